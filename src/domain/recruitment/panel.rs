//! Panel projection.
//!
//! `project` turns a committed session snapshot into a platform-neutral
//! description of the signup panel. It is recomputed from scratch after every
//! transition, so the rendered panel never drifts from the stored state.

use serde::Serialize;

use super::control::{ControlId, PanelAction};
use super::role::Role;
use super::session::SessionSnapshot;
use crate::domain::foundation::{ActorId, SessionId, VoiceRoomId};

/// Visual emphasis of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// Member list of one role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "members", rename_all = "snake_case")]
pub enum RowMembers {
    /// Nobody has claimed this role yet.
    Nobody,
    Listed(Vec<ActorId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRow {
    pub role: Role,
    pub count: usize,
    pub capacity: u32,
    pub members: RowMembers,
}

/// One interactive control on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelControl {
    #[serde(serialize_with = "serialize_control_id")]
    pub id: ControlId,
    pub label: String,
    pub style: ControlStyle,
    /// Layout row; claim controls share row 0, release and close share row 1.
    pub row: u8,
    pub disabled: bool,
}

/// Everything a chat surface needs to render a session panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub session_id: SessionId,
    pub title: String,
    pub schedule: String,
    pub host: ActorId,
    pub rows: Vec<RoleRow>,
    pub voice_room: Option<VoiceRoomId>,
    pub controls: Vec<PanelControl>,
}

impl PanelView {
    pub fn row(&self, role: Role) -> Option<&RoleRow> {
        self.rows.iter().find(|row| row.role == role)
    }

    pub fn control(&self, action: PanelAction) -> Option<&PanelControl> {
        self.controls.iter().find(|control| control.id.action == action)
    }
}

const CLAIM_ROW: u8 = 0;
const MANAGE_ROW: u8 = 1;

/// Projects a snapshot into its panel.
///
/// Pure and deterministic. Actor identity plays no part; authorization is
/// enforced by the engine when a control is activated.
pub fn project(snapshot: &SessionSnapshot) -> PanelView {
    let session = &snapshot.session;

    let rows = Role::ALL
        .into_iter()
        .map(|role| {
            let members = session.members(role);
            RoleRow {
                role,
                count: members.len(),
                capacity: session.capacity(role),
                members: if members.is_empty() {
                    RowMembers::Nobody
                } else {
                    RowMembers::Listed(members.to_vec())
                },
            }
        })
        .collect();

    let mut controls: Vec<PanelControl> = Role::ALL
        .into_iter()
        .map(|role| PanelControl {
            id: ControlId::new(PanelAction::Claim(role), snapshot.id),
            label: format!(
                "{} {}/{}",
                role,
                session.count(role),
                session.capacity(role)
            ),
            style: claim_style(role),
            row: CLAIM_ROW,
            disabled: session.is_full(role),
        })
        .collect();

    controls.push(PanelControl {
        id: ControlId::new(PanelAction::Release, snapshot.id),
        label: "Leave".to_string(),
        style: ControlStyle::Secondary,
        row: MANAGE_ROW,
        disabled: false,
    });
    controls.push(PanelControl {
        id: ControlId::new(PanelAction::Close, snapshot.id),
        label: "Close (host only)".to_string(),
        style: ControlStyle::Danger,
        row: MANAGE_ROW,
        disabled: false,
    });

    PanelView {
        session_id: snapshot.id,
        title: session.title().to_string(),
        schedule: schedule(session.date(), session.time()),
        host: session.host(),
        rows,
        voice_room: session.voice_room(),
        controls,
    }
}

fn claim_style(role: Role) -> ControlStyle {
    match role {
        Role::Tank => ControlStyle::Primary,
        Role::Healer => ControlStyle::Success,
        Role::Dps => ControlStyle::Danger,
    }
}

fn schedule(date: &str, time: &str) -> String {
    if time.is_empty() {
        date.to_string()
    } else {
        format!("{} {}", date, time)
    }
}

fn serialize_control_id<S>(id: &ControlId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(id)
}
