use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid answer label: {0}")]
    InvalidAnswerLabel(String),

    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    #[error("Failed to fetch questions: {0}")]
    FetchFailure(String),

    #[error("No usable questions: {0}")]
    ParseYieldedNothing(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidAnswerLabel(_) => "INVALID_ANSWER_LABEL",
            AppError::InvalidSessionState(_) => "INVALID_SESSION_STATE",
            AppError::FetchFailure(_) => "FETCH_FAILURE",
            AppError::ParseYieldedNothing(_) => "PARSE_YIELDED_NOTHING",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidAnswerLabel(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidSessionState(_) => StatusCode::CONFLICT,
            AppError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::ParseYieldedNothing(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::FetchFailure(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::FetchFailure("completion request timed out".to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
