//! Recruitment command handlers and the interaction dispatcher.

mod claim_role;
mod close_recruitment;
mod create_recruitment;
mod dispatcher;
mod errors;
mod panel_sync;
mod release_role;
mod settings;

pub use claim_role::{ClaimRoleCommand, ClaimRoleHandler, RosterTransitionResult};
pub use close_recruitment::{
    CloseRecruitmentCommand, CloseRecruitmentHandler, CloseRecruitmentResult,
};
pub use create_recruitment::{
    CreateRecruitmentCommand, CreateRecruitmentHandler, CreateRecruitmentResult,
};
pub use dispatcher::{InteractionContext, InteractionReply, RecruitmentDispatcher};
pub use errors::RecruitmentError;
pub use panel_sync::{sync_panel, PanelSync};
pub use release_role::{ReleaseRoleCommand, ReleaseRoleHandler};
pub use settings::RecruitmentSettings;
