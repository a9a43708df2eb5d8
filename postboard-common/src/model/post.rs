use crate::{
    model::{
        Id,
        page::{PageInfo, PageQuery},
    },
    validation::{FieldError, FieldErrors, Validate, not_blank, not_null, size},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const WRITER_MAX_LEN: usize = 255;
pub const TITLE_MAX_LEN: usize = 255;
pub const HASH_TAG_MAX_LEN: usize = 50;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub writer: String,
    pub title: String,
    pub content: String,
    pub hash_tags: Vec<String>,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CreatePost {
    pub writer: String,
    pub title: String,
    pub content: String,
    pub hash_tags: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct UpdatePost {
    pub id: Id<PostMarker>,
    pub title: String,
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostCreateRequest {
    pub writer: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hash_tags: Option<Vec<String>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostModifyRequest {
    pub post_id: Option<Id<PostMarker>>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post_id: Id<PostMarker>,
    pub writer: String,
    pub title: String,
    pub content: String,
    pub hash_tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub count: usize,
    pub page_info: PageInfo,
    pub posts: Vec<PostDetailResponse>,
}

const CREATE_REQUEST_NAME: &str = "postCreateRequest";
const MODIFY_REQUEST_NAME: &str = "postModifyRequest";

fn not_blank_sized(
    object_name: &str,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<FieldError> {
    not_blank(object_name, field, value).or_else(|| size(object_name, field, value, max))
}

impl Validate for PostCreateRequest {
    fn validate(&self) -> Vec<FieldError> {
        let fields = [
            not_blank_sized(
                CREATE_REQUEST_NAME,
                "writer",
                self.writer.as_deref(),
                WRITER_MAX_LEN,
            ),
            not_blank_sized(
                CREATE_REQUEST_NAME,
                "title",
                self.title.as_deref(),
                TITLE_MAX_LEN,
            ),
            not_blank(CREATE_REQUEST_NAME, "content", self.content.as_deref()),
        ];

        // Tags are stored trimmed.
        let hash_tags = self
            .hash_tags
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, tag)| {
                size(
                    CREATE_REQUEST_NAME,
                    &format!("hashTags[{index}]"),
                    Some(tag.trim()),
                    HASH_TAG_MAX_LEN,
                )
            });

        fields.into_iter().chain(hash_tags).flatten().collect()
    }
}

impl Validate for PostModifyRequest {
    fn validate(&self) -> Vec<FieldError> {
        [
            not_null(MODIFY_REQUEST_NAME, "postId", self.post_id.as_ref()),
            not_blank_sized(
                MODIFY_REQUEST_NAME,
                "title",
                self.title.as_deref(),
                TITLE_MAX_LEN,
            ),
            not_blank(MODIFY_REQUEST_NAME, "content", self.content.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl TryFrom<PostCreateRequest> for CreatePost {
    type Error = FieldErrors;

    fn try_from(value: PostCreateRequest) -> Result<Self, Self::Error> {
        let errors = value.validate();
        let (Some(writer), Some(title), Some(content), true) =
            (value.writer, value.title, value.content, errors.is_empty())
        else {
            return Err(FieldErrors(errors));
        };

        let mut hash_tags: Vec<String> = Vec::new();
        for tag in value.hash_tags.unwrap_or_default() {
            let tag = tag.trim();
            if !tag.is_empty() && !hash_tags.iter().any(|known| known == tag) {
                hash_tags.push(tag.to_owned());
            }
        }

        Ok(Self {
            writer,
            title,
            content,
            hash_tags,
        })
    }
}

impl TryFrom<PostModifyRequest> for UpdatePost {
    type Error = FieldErrors;

    fn try_from(value: PostModifyRequest) -> Result<Self, Self::Error> {
        let errors = value.validate();
        let (Some(id), Some(title), Some(content), true) =
            (value.post_id, value.title, value.content, errors.is_empty())
        else {
            return Err(FieldErrors(errors));
        };

        Ok(Self { id, title, content })
    }
}

impl From<Post> for PostDetailResponse {
    fn from(value: Post) -> Self {
        Self {
            post_id: value.id,
            writer: value.writer,
            title: value.title,
            content: value.content,
            hash_tags: value.hash_tags,
            created_at: value.created_at,
            modified_at: value.modified_at,
        }
    }
}

impl PostListResponse {
    #[must_use]
    pub fn new(query: PageQuery, total_count: u64, posts: Vec<Post>) -> Self {
        let posts: Vec<PostDetailResponse> = posts.into_iter().map(Into::into).collect();

        Self {
            count: posts.len(),
            page_info: PageInfo::new(query, total_count),
            posts,
        }
    }
}
