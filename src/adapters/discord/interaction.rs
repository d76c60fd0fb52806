//! Discord interaction payloads.
//!
//! Inbound interactions are deserialized into [`Interaction`] and decoded
//! into an [`InboundEvent`]; replies are serialized as
//! [`InteractionResponse`].

use serde::{Deserialize, Serialize};

use super::render::{
    intake_modal, trigger_message, MessagePayload, ModalPayload, DATETIME_INPUT, DPS_INPUT,
    HEALER_INPUT, TANK_INPUT, TITLE_INPUT,
};
use crate::application::{InteractionContext, InteractionReply};
use crate::domain::foundation::{ActorId, ChannelId, GuildId};
use crate::domain::recruitment::{FormId, IntakeForm};

const PING: u8 = 1;
const APPLICATION_COMMAND: u8 = 2;
const MESSAGE_COMPONENT: u8 = 3;
const MODAL_SUBMIT: u8 = 5;

const PONG: u8 = 1;
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
const DEFERRED_UPDATE_MESSAGE: u8 = 6;
const MODAL: u8 = 9;

/// Message flag restricting visibility to the invoking member.
pub const EPHEMERAL: u64 = 1 << 6;

/// Name of the slash command that posts the trigger panel.
pub const SETUP_COMMAND: &str = "setup";

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: ActorId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalField {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalRow {
    #[serde(default)]
    pub components: Vec<ModalField>,
}

/// The `data` object; which fields are present depends on the interaction type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    /// Application command name.
    pub name: Option<String>,
    /// Component or modal identifier.
    pub custom_id: Option<String>,
    #[serde(default)]
    pub components: Vec<ModalRow>,
}

impl InteractionData {
    /// Value of a submitted modal input, empty when absent.
    pub fn field(&self, custom_id: &str) -> String {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|field| field.custom_id == custom_id)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }
}

/// An inbound Discord interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    pub guild_id: Option<GuildId>,
    pub channel_id: Option<ChannelId>,
    /// Present for interactions inside a guild.
    pub member: Option<Member>,
    /// Present for interactions in direct messages.
    pub user: Option<User>,
    #[serde(default)]
    pub data: InteractionData,
}

/// What an interaction asks the dispatcher to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Ping,
    Setup,
    Component {
        ctx: InteractionContext,
        custom_id: String,
    },
    FormSubmitted {
        ctx: InteractionContext,
        form: IntakeForm,
        wants_voice_room: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    #[error("unsupported interaction type {0}")]
    UnsupportedType(u8),

    #[error("unsupported command '{0}'")]
    UnsupportedCommand(String),

    #[error("interaction has no acting user")]
    MissingActor,

    #[error("interaction is missing '{0}'")]
    MissingField(&'static str),
}

impl Interaction {
    pub fn actor(&self) -> Option<ActorId> {
        self.member
            .as_ref()
            .map(|member| member.user.id)
            .or_else(|| self.user.as_ref().map(|user| user.id))
    }

    fn context(&self) -> Result<InteractionContext, InteractionError> {
        Ok(InteractionContext {
            actor: self.actor().ok_or(InteractionError::MissingActor)?,
            guild: self.guild_id,
            channel: self.channel_id,
        })
    }

    /// Decodes the interaction into a dispatcher event.
    pub fn into_event(self) -> Result<InboundEvent, InteractionError> {
        match self.kind {
            PING => Ok(InboundEvent::Ping),
            APPLICATION_COMMAND => match self.data.name.as_deref() {
                Some(SETUP_COMMAND) => Ok(InboundEvent::Setup),
                Some(other) => Err(InteractionError::UnsupportedCommand(other.to_string())),
                None => Err(InteractionError::MissingField("data.name")),
            },
            MESSAGE_COMPONENT => {
                let ctx = self.context()?;
                let custom_id = self
                    .data
                    .custom_id
                    .ok_or(InteractionError::MissingField("data.custom_id"))?;
                Ok(InboundEvent::Component { ctx, custom_id })
            }
            MODAL_SUBMIT => {
                let ctx = self.context()?;
                let form_id = self
                    .data
                    .custom_id
                    .as_deref()
                    .and_then(FormId::parse)
                    .ok_or(InteractionError::MissingField("data.custom_id"))?;
                let form = IntakeForm {
                    title: self.data.field(TITLE_INPUT),
                    date_time: self.data.field(DATETIME_INPUT),
                    tank: self.data.field(TANK_INPUT),
                    healer: self.data.field(HEALER_INPUT),
                    dps: self.data.field(DPS_INPUT),
                };
                Ok(InboundEvent::FormSubmitted {
                    ctx,
                    form,
                    wants_voice_room: form_id.with_voice_room,
                })
            }
            other => Err(InteractionError::UnsupportedType(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Message(MessagePayload),
    Modal(ModalPayload),
}

/// Reply to an interaction, returned in the HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData::Message(MessagePayload {
                content: Some(content.into()),
                flags: Some(EPHEMERAL),
                ..MessagePayload::default()
            })),
        }
    }
}

impl From<InteractionReply> for InteractionResponse {
    fn from(reply: InteractionReply) -> Self {
        match reply {
            InteractionReply::Pong => InteractionResponse::pong(),
            InteractionReply::TriggerPanel => InteractionResponse {
                kind: CHANNEL_MESSAGE_WITH_SOURCE,
                data: Some(ResponseData::Message(trigger_message())),
            },
            InteractionReply::OpenForm { form, defaults } => InteractionResponse {
                kind: MODAL,
                data: Some(ResponseData::Modal(intake_modal(form, &defaults))),
            },
            InteractionReply::AcknowledgeUpdate => InteractionResponse {
                kind: DEFERRED_UPDATE_MESSAGE,
                data: None,
            },
            InteractionReply::Ephemeral(content) => InteractionResponse::ephemeral(content),
        }
    }
}
