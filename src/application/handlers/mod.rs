//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod recruitment;

pub use recruitment::{
    // Dispatcher
    InteractionContext, InteractionReply, RecruitmentDispatcher,
    // Commands and Results
    ClaimRoleCommand, ClaimRoleHandler, CloseRecruitmentCommand, CloseRecruitmentHandler,
    CloseRecruitmentResult, CreateRecruitmentCommand, CreateRecruitmentHandler,
    CreateRecruitmentResult, ReleaseRoleCommand, ReleaseRoleHandler, RosterTransitionResult,
    // Shared
    sync_panel, PanelSync, RecruitmentError, RecruitmentSettings,
};
