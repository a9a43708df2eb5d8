use crate::record::{HashTagRecord, PostRecord, join_hash_tags};
use postboard_common::model::{
    Id,
    post::{CreatePost, Post, PostMarker, UpdatePost},
};
use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    query, query_as, query_scalar,
};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Running database migrations failed: {0}")]
    Migrate(#[from] MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Clone, Debug)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub async fn count_posts(&self) -> Result<u64> {
        let count: i64 = query_scalar(
            "
            SELECT count(*)
            FROM posts.posts
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.cast_unsigned())
    }

    /// Fetches one page of posts, newest first.
    pub async fn fetch_post_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = query_as(
            "
            SELECT
                posts.post_id,
                posts.writer,
                posts.title,
                posts.content,
                posts.created_at,
                posts.modified_at
            FROM
                posts.posts
            ORDER BY
                posts.created_at DESC,
                posts.post_id DESC
            OFFSET $1
            LIMIT $2
            ",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let post_ids: Vec<i64> = records.iter().map(|record| record.post_id).collect();
        let hash_tags: Vec<HashTagRecord> = query_as(
            "
            SELECT
                hash_tags.post_id,
                hash_tags.tag_name
            FROM
                posts.hash_tags
            WHERE
                hash_tags.post_id = ANY($1)
            ORDER BY
                hash_tags.hash_tag_id
            ",
        )
        .bind(&post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(join_hash_tags(records, hash_tags))
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let record: Option<PostRecord> = query_as(
            "
            SELECT
                posts.post_id,
                posts.writer,
                posts.title,
                posts.content,
                posts.created_at,
                posts.modified_at
            FROM
                posts.posts
            WHERE
                posts.post_id = $1
            ",
        )
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let hash_tags = self.fetch_hash_tags(post_id).await?;
        Ok(Some(record.into_post(hash_tags)))
    }

    async fn fetch_hash_tags(&self, post_id: Id<PostMarker>) -> Result<Vec<String>> {
        let hash_tags = query_scalar(
            "
            SELECT hash_tags.tag_name
            FROM posts.hash_tags
            WHERE hash_tags.post_id = $1
            ORDER BY hash_tags.hash_tag_id
            ",
        )
        .bind(post_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(hash_tags)
    }

    /// Inserts the post together with its hash tags in one transaction.
    pub async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        let mut transaction = self.pool.begin().await?;

        let record: PostRecord = query_as(
            "
            INSERT INTO posts.posts (writer, title, content)
            VALUES ($1, $2, $3)
            RETURNING post_id, writer, title, content, created_at, modified_at
            ",
        )
        .bind(&post.writer)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&mut *transaction)
        .await?;

        insert_hash_tags(&mut transaction, record.post_id, &post.hash_tags).await?;
        transaction.commit().await?;

        Ok(record.into_post(post.hash_tags.clone()))
    }

    pub async fn update_post(&self, post: &UpdatePost) -> Result<Option<Post>> {
        let record: Option<PostRecord> = query_as(
            "
            UPDATE posts.posts
            SET
                title = $2,
                content = $3,
                modified_at = now()
            WHERE
                posts.post_id = $1
            RETURNING post_id, writer, title, content, created_at, modified_at
            ",
        )
        .bind(post.id.get())
        .bind(&post.title)
        .bind(&post.content)
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let hash_tags = self.fetch_hash_tags(post.id).await?;
        Ok(Some(record.into_post(hash_tags)))
    }

    /// Returns whether a post was deleted. Hash tags are removed by cascade.
    pub async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<bool> {
        let result = query(
            "
            DELETE FROM posts.posts
            WHERE posts.post_id = $1
            ",
        )
        .bind(post_id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_hash_tags(
    transaction: &mut Transaction<'_, Postgres>,
    post_id: i64,
    hash_tags: &[String],
) -> Result<()> {
    for tag_name in hash_tags {
        query(
            "
            INSERT INTO posts.hash_tags (post_id, tag_name)
            VALUES ($1, $2)
            ",
        )
        .bind(post_id)
        .bind(tag_name)
        .execute(&mut **transaction)
        .await?;
    }

    Ok(())
}
