//! Control identifiers carried by interactive panel components.
//!
//! Chat platforms hand back only an opaque string when a button is pressed.
//! These types encode and decode that string once, at the boundary, so the
//! rest of the crate works with tagged values instead of split strings.
//!
//! Wire format: `role_{role}_{session}`, `leave_{session}`, `close_{session}`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::role::Role;
use crate::domain::foundation::SessionId;

const TRIGGER_WITHOUT_VOICE: &str = "trigger_create_recruit_no_vc";
const TRIGGER_WITH_VOICE: &str = "trigger_create_recruit_with_vc";
const FORM_PREFIX: &str = "modal_recruit_create_";

/// What a panel control asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    Claim(Role),
    Release,
    Close,
}

/// A decoded panel control: an action bound to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId {
    pub action: PanelAction,
    pub session_id: SessionId,
}

impl ControlId {
    pub fn new(action: PanelAction, session_id: SessionId) -> Self {
        Self { action, session_id }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            PanelAction::Claim(role) => write!(f, "role_{}_{}", role.key(), self.session_id),
            PanelAction::Release => write!(f, "leave_{}", self.session_id),
            PanelAction::Close => write!(f, "close_{}", self.session_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized control identifier: '{0}'")]
pub struct InvalidControlId(pub String);

impl FromStr for ControlId {
    type Err = InvalidControlId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidControlId(s.to_string());
        let (kind, rest) = s.split_once('_').ok_or_else(invalid)?;

        let (action, raw_session) = match kind {
            "role" => {
                let (key, raw_session) = rest.split_once('_').ok_or_else(invalid)?;
                let role = Role::from_key(key).ok_or_else(invalid)?;
                (PanelAction::Claim(role), raw_session)
            }
            "leave" => (PanelAction::Release, rest),
            "close" => (PanelAction::Close, rest),
            _ => return Err(invalid()),
        };

        let session_id = raw_session.parse().map_err(|_| invalid())?;
        Ok(ControlId::new(action, session_id))
    }
}

/// Buttons on the standing "start a recruitment" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerControl {
    pub with_voice_room: bool,
}

impl TriggerControl {
    pub fn custom_id(self) -> &'static str {
        if self.with_voice_room {
            TRIGGER_WITH_VOICE
        } else {
            TRIGGER_WITHOUT_VOICE
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            TRIGGER_WITHOUT_VOICE => Some(Self {
                with_voice_room: false,
            }),
            TRIGGER_WITH_VOICE => Some(Self {
                with_voice_room: true,
            }),
            _ => None,
        }
    }
}

/// Identifier of the signup form; remembers whether a voice room was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormId {
    pub with_voice_room: bool,
}

impl FormId {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.strip_prefix(FORM_PREFIX)? {
            "vc" => Some(Self {
                with_voice_room: true,
            }),
            "novc" => Some(Self {
                with_voice_room: false,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.with_voice_room { "vc" } else { "novc" };
        write!(f, "{}{}", FORM_PREFIX, suffix)
    }
}

/// Any component activation this crate knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    OpenForm(TriggerControl),
    Panel(ControlId),
}

impl FromStr for ComponentAction {
    type Err = InvalidControlId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(trigger) = TriggerControl::parse(s) {
            return Ok(ComponentAction::OpenForm(trigger));
        }
        s.parse().map(ComponentAction::Panel)
    }
}
