/// Error handling for the PawFund services
///
/// This module provides the unified error type returned by the account,
/// profile and listing services. All user-facing failures carry
/// field-scoped messages for the presentation layer to display next to
/// the offending input; none are fatal, and the services always leave
/// prior state intact on failure.
///
/// # Example
///
/// ```
/// use pawfund_service::error::{FieldError, ServiceError};
///
/// let err = ServiceError::Validation(vec![FieldError {
///     field: "email".to_string(),
///     message: "Invalid email format".to_string(),
/// }]);
/// assert_eq!(err.to_string(), "validation failed: 1 field(s)");
/// ```

use pawfund_shared::store::StoreError;
use serde::{Deserialize, Serialize};

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A field-scoped validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Unified service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// One or more form fields are missing or invalid
    #[error("validation failed: {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// An account with this (case-insensitive) email already exists
    #[error("an account already exists for {0}")]
    DuplicateAccount(String),

    /// Unknown email or password mismatch
    ///
    /// Deliberately indistinguishable so the message leaks nothing about
    /// which part was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The referenced account (or its pet) does not exist
    #[error("no account found for {0}")]
    NotFound(String),

    /// An uploaded file could not be read
    ///
    /// A read failure rejects the whole save; the file is never silently
    /// dropped.
    #[error("failed to read file '{filename}': {source}")]
    FileRead {
        /// Original filename of the upload
        filename: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An uploaded file did not finish reading within the configured bound
    #[error("timed out reading file '{filename}'")]
    FileReadTimeout {
        /// Original filename of the upload
        filename: String,
    },

    /// An uploaded file exceeds the configured size cap
    #[error("file '{filename}' exceeds the {limit}-byte limit")]
    FileTooLarge {
        /// Original filename of the upload
        filename: String,
        /// Configured cap in bytes
        limit: u64,
    },

    /// The local store could not be written
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Builds a single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    /// Returns the field-scoped messages, if this is a validation error
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Maps `validator` derive output into field-scoped service errors
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ServiceError::Validation(details)
    }
}
