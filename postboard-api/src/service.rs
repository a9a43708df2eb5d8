use async_trait::async_trait;
use postboard_common::{
    model::{
        Id,
        page::PageQuery,
        post::{
            CreatePost, PostCreateRequest, PostDetailResponse, PostListResponse, PostMarker,
            PostModifyRequest, UpdatePost,
        },
    },
    validation::FieldErrors,
};
use postboard_db::client::{DbClient, DbError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

pub type DynPostService = Arc<dyn PostService>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("The post payload was invalid: {0}")]
    InvalidPayload(#[from] FieldErrors),
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Domain operations on posts. Handlers only ever see this boundary.
#[async_trait]
pub trait PostService: Send + Sync {
    async fn get_posts(&self, page: PageQuery) -> Result<PostListResponse>;

    /// Fails with [`ServiceError::PostNotFound`] when no post has this id.
    async fn get_detail(&self, id: Id<PostMarker>) -> Result<PostDetailResponse>;

    async fn insert(&self, request: PostCreateRequest) -> Result<PostDetailResponse>;

    async fn modify(&self, request: PostModifyRequest) -> Result<PostDetailResponse>;

    async fn delete(&self, id: Id<PostMarker>) -> Result<()>;
}

#[async_trait]
impl PostService for DbClient {
    async fn get_posts(&self, page: PageQuery) -> Result<PostListResponse> {
        let (total_count, posts) = tokio::try_join!(
            self.count_posts(),
            self.fetch_post_page(page.offset(), page.limit()),
        )?;

        Ok(PostListResponse::new(page, total_count, posts))
    }

    async fn get_detail(&self, id: Id<PostMarker>) -> Result<PostDetailResponse> {
        let post = self
            .fetch_post(id)
            .await?
            .ok_or(ServiceError::PostNotFound(id))?;

        Ok(post.into())
    }

    async fn insert(&self, request: PostCreateRequest) -> Result<PostDetailResponse> {
        let post = CreatePost::try_from(request)?;
        let post = self.create_post(&post).await?;

        debug!(id = %post.id, "Created post");
        Ok(post.into())
    }

    async fn modify(&self, request: PostModifyRequest) -> Result<PostDetailResponse> {
        let post = UpdatePost::try_from(request)?;
        let post = self
            .update_post(&post)
            .await?
            .ok_or(ServiceError::PostNotFound(post.id))?;

        debug!(id = %post.id, "Modified post");
        Ok(post.into())
    }

    async fn delete(&self, id: Id<PostMarker>) -> Result<()> {
        if !self.delete_post(id).await? {
            return Err(ServiceError::PostNotFound(id));
        }

        debug!(%id, "Deleted post");
        Ok(())
    }
}
