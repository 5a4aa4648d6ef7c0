//! Shared API types
//!
//! Common types used across all API endpoints including error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::tickets::TicketError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    NotFound { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_sqlite(e: crate::data::sqlite::SqliteError) -> Self {
        tracing::error!(error = %e, "SQLite error");
        Self::Internal {
            message: "Database operation failed".to_string(),
        }
    }

    pub fn from_ticket(e: TicketError) -> Self {
        match e {
            TicketError::NotFound { id } => {
                Self::not_found("TICKET_NOT_FOUND", format!("Ticket {} does not exist", id))
            }
            TicketError::Storage(e) => Self::from_sqlite(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_not_found_response() {
        let response = ApiError::not_found("TICKET_NOT_FOUND", "Ticket 7 does not exist")
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_response() {
        let response = ApiError::internal("Database operation failed").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_ticket_not_found() {
        let err = ApiError::from_ticket(TicketError::NotFound { id: 42 });
        match err {
            ApiError::NotFound { code, message } => {
                assert_eq!(code, "TICKET_NOT_FOUND");
                assert_eq!(message, "Ticket 42 does not exist");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_ticket_storage_hides_details() {
        let err = ApiError::from_ticket(TicketError::Storage(SqliteError::Database(
            sqlx::Error::PoolClosed,
        )));
        match err {
            ApiError::Internal { message } => assert_eq!(message, "Database operation failed"),
            other => panic!("expected Internal, got {:?}", other),
        }
    }
}
