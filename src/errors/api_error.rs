use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, Error};

use crate::structs::api_response::ApiResponse;

#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[error(ignore)]
    #[display("{_0}")]
    BadRequest(String),
    #[error(ignore)]
    #[display("{_0}")]
    NotFound(String),
    #[error(ignore)]
    #[display("Internal server error: {_0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn missing(param: &str) -> Self {
        ApiError::BadRequest(format!("Missing required query parameter: {}", param))
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                ApiResponse::failure(msg.clone(), None)
            }
            ApiError::Internal(err) => {
                log::error!("{:#}", err);
                // Upstream details only leave the process in development builds.
                let detail = cfg!(debug_assertions).then(|| format!("{:#}", err));
                ApiResponse::failure("Internal Server Error", detail)
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
