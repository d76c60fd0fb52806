//! Recruitment transition errors.
//!
//! Every error here is a domain-rule rejection: it is reported to the acting
//! member only and never accompanies a state change.

use thiserror::Error;

use super::role::Role;
use crate::domain::foundation::ErrorCode;

/// Intake rejected while building a new session from the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("capacity for {role} is not a number: '{raw}'")]
    NonNumericCapacity { role: Role, raw: String },

    #[error("capacity for {role} is negative: {value}")]
    NegativeCapacity { role: Role, value: i64 },

    #[error("title is empty")]
    EmptyTitle,

    #[error("title is {length} characters, limit is {limit}")]
    TitleTooLong { length: usize, limit: usize },
}

impl IntakeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::NonNumericCapacity { .. } => ErrorCode::NonNumericCapacity,
            IntakeError::NegativeCapacity { .. } => ErrorCode::NegativeCapacity,
            IntakeError::EmptyTitle => ErrorCode::EmptyTitle,
            IntakeError::TitleTooLong { .. } => ErrorCode::TitleTooLong,
        }
    }

    /// Message shown to the member who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            IntakeError::NonNumericCapacity { .. } => {
                "Slot counts must be whole numbers. Please enter half-width digits.".to_string()
            }
            IntakeError::NegativeCapacity { role, .. } => {
                format!("The {} slot count cannot be negative.", role)
            }
            IntakeError::EmptyTitle => "Please enter a title.".to_string(),
            IntakeError::TitleTooLong { limit, .. } => {
                format!("The title must be {} characters or fewer.", limit)
            }
        }
    }
}

/// A claim that was refused without touching any roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("actor already holds {role}")]
    AlreadyInRole { role: Role },

    #[error("{role} is at capacity")]
    RoleFull { role: Role },
}

impl ClaimError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClaimError::AlreadyInRole { .. } => ErrorCode::AlreadyInRole,
            ClaimError::RoleFull { .. } => ErrorCode::RoleFull,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ClaimError::AlreadyInRole { role } => format!("You have already joined as {}.", role),
            ClaimError::RoleFull { role } => format!("The {} slots are full.", role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReleaseError {
    #[error("actor does not hold any role")]
    NotParticipating,
}

impl ReleaseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReleaseError::NotParticipating => ErrorCode::NotParticipating,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ReleaseError::NotParticipating => "You are not participating.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CloseError {
    #[error("only the host may close a session")]
    NotHost,
}

impl CloseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CloseError::NotHost => ErrorCode::NotHost,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            CloseError::NotHost => "Only the host can close this recruitment.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_errors_carry_role_in_message() {
        let err = ClaimError::RoleFull { role: Role::Healer };
        assert_eq!(err.code(), ErrorCode::RoleFull);
        assert!(err.user_message().contains("Healer"));
    }

    #[test]
    fn intake_codes_are_distinct() {
        let non_numeric = IntakeError::NonNumericCapacity {
            role: Role::Tank,
            raw: "x".to_string(),
        };
        let negative = IntakeError::NegativeCapacity {
            role: Role::Tank,
            value: -1,
        };
        assert_ne!(non_numeric.code(), negative.code());
    }

    #[test]
    fn title_too_long_mentions_limit() {
        let err = IntakeError::TitleTooLong {
            length: 51,
            limit: 50,
        };
        assert!(err.user_message().contains("50"));
        assert_eq!(err.to_string(), "title is 51 characters, limit is 50");
    }
}
