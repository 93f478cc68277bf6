use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields or files")]
    MissingFields,

    #[error("Too many files")]
    TooManyFiles,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Note not found")]
    NotFound,

    #[error("Authentication is not implemented")]
    NotImplemented,

    /// Server fault; `context` is the message shown to the client.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { context, source }
    }

    /// Replace the client-facing message of a server fault. Client faults
    /// pass through unchanged.
    pub fn context(self, context: &'static str) -> Self {
        match self {
            AppError::Storage { source, .. } => AppError::Storage { context, source },
            other => other,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(source: StoreError) -> Self {
        AppError::Storage {
            context: "Server Error",
            source,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        StoreError::from(e).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingFields
            | AppError::TooManyFiles
            | AppError::InvalidFileType
            | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Storage { context, source } => {
                error!(error = %source, "{context}");
                context.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
