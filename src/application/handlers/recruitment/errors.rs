//! Errors surfaced by recruitment command handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::recruitment::{
    ClaimError, CloseError, IntakeError, InvalidControlId, ReleaseError,
};
use crate::ports::SurfaceError;

/// Everything a recruitment command can fail with.
///
/// Domain-rule rejections, stale panels and collaborator failures stay
/// distinct so the actor is never told the wrong story.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error(transparent)]
    Close(#[from] CloseError),

    /// The panel refers to a session the store no longer holds.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    InvalidControl(#[from] InvalidControlId),

    #[error("interaction is missing its {0}")]
    MissingContext(&'static str),

    #[error("chat surface error: {0}")]
    Surface(#[from] SurfaceError),
}

impl RecruitmentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecruitmentError::Intake(err) => err.code(),
            RecruitmentError::Claim(err) => err.code(),
            RecruitmentError::Release(err) => err.code(),
            RecruitmentError::Close(err) => err.code(),
            RecruitmentError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            RecruitmentError::InvalidControl(_) => ErrorCode::InvalidControl,
            RecruitmentError::MissingContext(_) => ErrorCode::MissingContext,
            RecruitmentError::Surface(err) => err.code(),
        }
    }

    /// Returns true for rejections caused by the actor's request rather than
    /// by missing state or a failing collaborator.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RecruitmentError::Intake(_)
                | RecruitmentError::Claim(_)
                | RecruitmentError::Release(_)
                | RecruitmentError::Close(_)
        )
    }

    /// Message shown to the acting member only.
    pub fn user_message(&self) -> String {
        match self {
            RecruitmentError::Intake(err) => err.user_message(),
            RecruitmentError::Claim(err) => err.user_message(),
            RecruitmentError::Release(err) => err.user_message(),
            RecruitmentError::Close(err) => err.user_message(),
            RecruitmentError::SessionNotFound(_) => {
                "This recruitment could not be found. It may have been closed, or the bot was restarted."
                    .to_string()
            }
            RecruitmentError::InvalidControl(_) => "This control is not recognized.".to_string(),
            RecruitmentError::MissingContext(what) => {
                format!("This action can only be used inside a server ({} missing).", what)
            }
            RecruitmentError::Surface(err) => {
                format!("The request to the chat service failed: {}", err)
            }
        }
    }
}
