//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable machine-readable error codes, organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Intake errors
    NonNumericCapacity,
    NegativeCapacity,
    EmptyTitle,
    TitleTooLong,

    // Transition errors
    AlreadyInRole,
    RoleFull,
    NotParticipating,
    NotHost,

    // Lookup errors
    SessionNotFound,
    InvalidControl,
    MissingContext,

    // Collaborator errors
    SurfaceNotFound,
    SurfaceRejected,
    NetworkError,
    DecodeError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NonNumericCapacity => "NON_NUMERIC_CAPACITY",
            ErrorCode::NegativeCapacity => "NEGATIVE_CAPACITY",
            ErrorCode::EmptyTitle => "EMPTY_TITLE",
            ErrorCode::TitleTooLong => "TITLE_TOO_LONG",
            ErrorCode::AlreadyInRole => "ALREADY_IN_ROLE",
            ErrorCode::RoleFull => "ROLE_FULL",
            ErrorCode::NotParticipating => "NOT_PARTICIPATING",
            ErrorCode::NotHost => "NOT_HOST",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::InvalidControl => "INVALID_CONTROL",
            ErrorCode::MissingContext => "MISSING_CONTEXT",
            ErrorCode::SurfaceNotFound => "SURFACE_NOT_FOUND",
            ErrorCode::SurfaceRejected => "SURFACE_REJECTED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::DecodeError => "DECODE_ERROR",
        };
        write!(f, "{}", s)
    }
}
