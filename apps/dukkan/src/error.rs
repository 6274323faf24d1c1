//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Dukkan                                 │
//! │                                                                         │
//! │  Command Function  Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── DbError::Rejected(CoreError) ──┐                            │
//! │         ├── DbError::NotFound ─────────────┤                            │
//! │         ├── DocError::Io ──────────────────┼──► ApiError { code, msg }  │
//! │         └── ValidationError ───────────────┘           │                │
//! │                                                        ▼                │
//! │                                   error notification in the center     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged in full and reach the caller as a generic
//! message.

use dukkan_core::{CoreError, ValidationError};
use dukkan_db::DbError;
use dukkan_docs::DocError;
use serde::Serialize;

use crate::config::ConfigError;

/// What a caller receives when a command fails:
/// ```json
/// { "code": "INSUFFICIENT_STOCK", "message": "Insufficient stock for SCAN2829: ..." }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    DatabaseError,
    InsufficientStock,
    /// Rendering or writing an exported document failed.
    ExportError,
    ConfigError,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::validation(format!("{} '{}' already exists", field, value))
            }
            DbError::Rejected(core) => ApiError::from(core),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Decode { key, reason } => {
                tracing::error!(key = %key, "Stored data unreadable: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored data is unreadable")
            }
            err @ (DbError::QueryFailed(_)
            | DbError::TransactionFailed(_)
            | DbError::Encode { .. }
            | DbError::Internal(_)) => {
                tracing::error!("Database operation failed: {}", err);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvoiceNotFound(id) => ApiError::not_found("Invoice", &id),
            CoreError::DebtorNotFound(id) => ApiError::not_found("Debtor", &id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyInvoice => ApiError::validation("Invoice has no items"),
            err @ (CoreError::InvalidLineIndex { .. } | CoreError::AmountOverflow { .. }) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<DocError> for ApiError {
    fn from(err: DocError) -> Self {
        match err {
            DocError::InvalidFileName(name) => {
                ApiError::validation(format!("Invalid file name: {}", name))
            }
            other => {
                tracing::error!("Export failed: {}", other);
                ApiError::new(ErrorCode::ExportError, "Could not export the document")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
