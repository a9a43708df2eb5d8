use crate::{
    server::{
        Result, ServerError, ServerRouter,
        json::{Json, OptionalJson},
        query::Query,
    },
    service::DynPostService,
};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::routing::{RouterExt, TypedPath};
use postboard_common::{
    model::{
        Id,
        page::PageQuery,
        post::{PostCreateRequest, PostListResponse, PostMarker, PostModifyRequest},
    },
    validation::Validate,
};
use serde::Deserialize;
use tracing::{error, info, warn};

pub const MISSING_PAYLOAD_MESSAGE: &str = "Please send the post to register.";
pub const CREATE_FAILURE_PREFIX: &str = "Sorry, the server failed. Cause: ";
pub const DELETE_SUCCESS_MESSAGE: &str = "DEL SUCCESS!";

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_put(update_post)
        .typed_patch(update_post)
        .typed_get(get_post)
        .typed_delete(delete_post)
}

#[derive(TypedPath)]
#[typed_path("/api/v1/posts")]
struct PostsPath;

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/v1/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

/// Replies with every field error if the payload is invalid.
fn check_fields(payload: &impl Validate) -> Result<(), Response> {
    let field_errors = payload.validate();
    if field_errors.is_empty() {
        return Ok(());
    }

    for field_error in &field_errors {
        warn!(%field_error, "Invalid client data");
    }
    Err((StatusCode::BAD_REQUEST, Json(field_errors)).into_response())
}

async fn list_posts(
    _: PostsPath,
    State(posts): State<DynPostService>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PostListResponse>> {
    info!(page = page.page, size = page.size, "Listing posts");

    let list = posts.get_posts(page).await?;

    Ok(Json(list))
}

async fn get_post(PostPath { id }: PostPath, State(posts): State<DynPostService>) -> Response {
    info!(%id, "Fetching post");

    match posts.get_detail(id).await {
        Ok(post) => Json(post).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

async fn create_post(
    _: PostsPath,
    State(posts): State<DynPostService>,
    OptionalJson(payload): OptionalJson<PostCreateRequest>,
) -> Response {
    info!(?payload, "Creating post");

    let Some(payload) = payload else {
        return (StatusCode::BAD_REQUEST, MISSING_PAYLOAD_MESSAGE).into_response();
    };
    if let Err(response) = check_fields(&payload) {
        return response;
    }

    match posts.insert(payload).await {
        Ok(post) => Json(post).into_response(),
        Err(err) => {
            error!(error = %err, "Creating post failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{CREATE_FAILURE_PREFIX}{err}"),
            )
                .into_response()
        }
    }
}

async fn update_post(
    _: PostsPath,
    method: Method,
    State(posts): State<DynPostService>,
    Json(payload): Json<PostModifyRequest>,
) -> Result<Response> {
    info!(%method, ?payload, "Modifying post");

    if let Err(response) = check_fields(&payload) {
        return Ok(response);
    }

    let post = posts.modify(payload).await?;

    Ok(Json(post).into_response())
}

async fn delete_post(PostPath { id }: PostPath, State(posts): State<DynPostService>) -> Response {
    info!(%id, "Deleting post");

    match posts.delete(id).await {
        Ok(()) => (StatusCode::OK, DELETE_SUCCESS_MESSAGE).into_response(),
        Err(err) => {
            error!(error = %err, "Deleting post failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
