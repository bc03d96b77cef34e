//! Handler errors and their HTTP mapping.
//!
//! Each failure kind maps to exactly one status: malformed input is 400, a
//! missing record is 404 and anything the store reports is 500. Bodies are
//! `{"message": ...}`; storage details are logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::store::StoreError;
use crate::types::Message;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid todo id format: {0}")]
    InvalidId(String),

    #[error("todo text must not be empty")]
    BlankText,

    #[error("todo not found")]
    NotFound,

    /// `context` names the operation, e.g. "Error updating todo".
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) | AppError::BlankText => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::InvalidId(_) => "Invalid todo ID format".to_string(),
            AppError::BlankText => "Todo text must not be empty".to_string(),
            AppError::NotFound => "Todo not found".to_string(),
            AppError::Storage { context, .. } => (*context).to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { .. } = &self {
            tracing::error!(error = %self, "storage operation failed");
        }
        (self.status(), Json(Message::new(self.public_message()))).into_response()
    }
}
