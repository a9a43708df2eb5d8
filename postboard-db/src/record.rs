use postboard_common::model::post::Post;
use sqlx::FromRow;
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct PostRecord {
    pub post_id: i64,
    pub writer: String,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct HashTagRecord {
    pub post_id: i64,
    pub tag_name: String,
}

impl PostRecord {
    pub fn into_post(self, hash_tags: Vec<String>) -> Post {
        Post {
            id: self.post_id.into(),
            writer: self.writer,
            title: self.title,
            content: self.content,
            hash_tags,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

/// Attaches hash tags to their posts, keeping the order of both inputs.
pub(crate) fn join_hash_tags(posts: Vec<PostRecord>, hash_tags: Vec<HashTagRecord>) -> Vec<Post> {
    let mut tags_by_post: HashMap<i64, Vec<String>> = HashMap::new();
    for tag in hash_tags {
        tags_by_post
            .entry(tag.post_id)
            .or_default()
            .push(tag.tag_name);
    }

    posts
        .into_iter()
        .map(|record| {
            let tags = tags_by_post.remove(&record.post_id).unwrap_or_default();
            record.into_post(tags)
        })
        .collect()
}
