use actix_web::body::BoxBody;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("An unspecified internal error ocurred: {0}")]
    InternalError(#[from] anyhow::Error),
    #[error("An unspecified internal error ocurred")]
    DatabaseError(#[from] BlockingError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("The username is not available")]
    UsernameTaken,
    #[error("The Email is not available")]
    EmailNotAvailable,
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error("Resource already favourited")]
    AlreadyFavorited,
    #[error("'{0}' is not a valid favorite type")]
    UnknownFavoriteType(String),
}

impl ApiError {
    fn get_error_code(&self) -> String {
        match self {
            ApiError::InternalError(_) => "IE-00500".to_string(),
            ApiError::DatabaseError(_) => "DE-00500".to_string(),
            ApiError::NotFound(_) => "NF-00404".to_string(),
            ApiError::UsernameTaken => "UT-00400".to_string(),
            ApiError::EmailNotAvailable => "ENA-00400".to_string(),
            ApiError::InvalidCredentials => "IC-00400".to_string(),
            ApiError::AlreadyFavorited => "AF-00400".to_string(),
            ApiError::UnknownFavoriteType(_) => "UFT-00400".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub message: String,
    pub status: u16,
    pub timestamp: NaiveDateTime,
    pub internal_code: String,
}

impl From<&ApiError> for ApiErrorResponse {
    fn from(value: &ApiError) -> Self {
        Self {
            message: value.to_string(),
            status: value.status_code().as_u16(),
            timestamp: NaiveDateTime::from_timestamp_opt(chrono::Utc::now().timestamp(), 0)
                .unwrap_or_default(),
            internal_code: value.get_error_code(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UsernameTaken => StatusCode::BAD_REQUEST,
            ApiError::EmailNotAvailable => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::AlreadyFavorited => StatusCode::BAD_REQUEST,
            ApiError::UnknownFavoriteType(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ApiErrorResponse::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(ApiError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::EmailNotAvailable.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::AlreadyFavorited.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnknownFavoriteType("Droids".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        assert_eq!(
            ApiError::NotFound("character").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn response_envelope_carries_code_and_status() {
        let error = ApiError::AlreadyFavorited;
        let response = ApiErrorResponse::from(&error);
        assert_eq!(response.status, 400);
        assert_eq!(response.internal_code, "AF-00400");
        assert_eq!(response.message, "Resource already favourited");
    }
}
