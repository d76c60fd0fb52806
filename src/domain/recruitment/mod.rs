//! Recruitment module - the session state machine and its panel projection.
//!
//! # Components
//!
//! - `SessionEngine` - validated, synchronous transitions over one `Session`
//! - `project` - pure projection of a committed snapshot into a `PanelView`
//! - `ControlId` - tagged decoding of panel control identifiers

mod control;
mod engine;
mod errors;
mod intake;
mod panel;
mod role;
mod session;

pub use control::{ComponentAction, ControlId, FormId, InvalidControlId, PanelAction, TriggerControl};
pub use engine::SessionEngine;
pub use errors::{ClaimError, CloseError, IntakeError, ReleaseError};
pub use intake::{split_date_time, IntakeForm, MAX_TITLE_LENGTH};
pub use panel::{project, ControlStyle, PanelControl, PanelView, RoleRow, RowMembers};
pub use role::{PerRole, Role};
pub use session::{RoleCapacity, Roster, Session, SessionClosure, SessionDraft, SessionSnapshot};
