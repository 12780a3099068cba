use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("unknown resource {0}")]
    UnknownResource(String),

    #[error("{resource}/{id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    Invalid(String),

    #[error("store error: {0}")]
    Store(#[from] io::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::UnknownResource(_) | ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Invalid(_) => StatusCode::BAD_REQUEST,
            ServerError::Store(_) | ServerError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}
