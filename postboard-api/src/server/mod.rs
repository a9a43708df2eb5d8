use crate::service::{DynPostService, ServiceError};
use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use json::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

mod json;
mod query;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub post_service: DynPostService,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("Request body could not be read: {0}")]
    BodyRejection(#[from] BytesRejection),
    #[error("Expected request with `Content-Type: application/json`")]
    MissingJsonContentType,
    #[error("Incoming JSON could not be parsed: {0}")]
    InvalidJsonBody(serde_json::Error),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("Unhandled service error: {0}")]
    Service(#[from] ServiceError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::PathRejection(PathRejection::FailedToDeserializePathParams(_))
            | ServerError::QueryRejection(_)
            | ServerError::JsonRejection(_)
            | ServerError::MissingJsonContentType
            | ServerError::InvalidJsonBody(_) => StatusCode::BAD_REQUEST,
            ServerError::UnknownRoute(_) | ServerError::PathRejection(_) => StatusCode::NOT_FOUND,
            ServerError::BodyRejection(rejection) => rejection.status(),
            ServerError::JsonResponse(_) | ServerError::Service(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    status: u16,
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_owned(),
        };
        (status, Json(error_response)).into_response()
    }
}
