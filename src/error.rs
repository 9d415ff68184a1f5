//! Error types for the HRMS engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition a store mutator, the configuration loader or
//! an access check can produce.

use thiserror::Error;

/// The main error type for the HRMS engine.
///
/// All fallible operations in the engine return this error type. The HTTP
/// layer turns each variant into a JSON error body with a matching status.
///
/// # Example
///
/// ```
/// use hrms_engine::error::HrmsError;
///
/// let error = HrmsError::NotFound {
///     entity: "employee".to_string(),
///     id: "emp_999".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: emp_999");
/// ```
#[derive(Debug, Error)]
pub enum HrmsError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (e.g. "leave_request").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Submitted form data failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The caller did not present an identity.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller's roles do not grant the requested action.
    #[error("Not permitted to {action}")]
    Forbidden {
        /// The action that was refused.
        action: String,
    },

    /// The request collides with existing state (duplicate email, double check-in).
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// A workflow action is not allowed from the record's current status.
    #[error("Cannot {action} {entity} '{id}' while it is {from}")]
    InvalidTransition {
        /// The kind of record.
        entity: String,
        /// The record identifier.
        id: String,
        /// The current status.
        from: String,
        /// The attempted action.
        action: String,
    },
}

impl HrmsError {
    /// Shorthand for a [`HrmsError::NotFound`].
    pub fn not_found(entity: &str, id: &str) -> Self {
        HrmsError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a [`HrmsError::Validation`].
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        HrmsError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`HrmsError::InvalidTransition`].
    pub fn invalid_transition(
        entity: &str,
        id: &str,
        from: impl std::fmt::Display,
        action: &str,
    ) -> Self {
        HrmsError::InvalidTransition {
            entity: entity.to_string(),
            id: id.to_string(),
            from: from.to_string(),
            action: action.to_string(),
        }
    }
}

/// A type alias for Results that return HrmsError.
pub type HrmsResult<T> = Result<T, HrmsError>;
