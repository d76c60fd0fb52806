//! Discord message rendering.
//!
//! Turns platform-neutral views into Discord message payloads: embeds and
//! component rows for panels, the intake modal and the trigger panel.

use serde::Serialize;

use crate::domain::recruitment::{
    ControlStyle, FormId, PanelView, Role, RoleCapacity, RowMembers, TriggerControl,
    MAX_TITLE_LENGTH,
};

const PANEL_COLOR: u32 = 0x3498db;
const TRIGGER_COLOR: u32 = 0xf1c40f;

const ACTION_ROW: u8 = 1;
const BUTTON: u8 = 2;
const TEXT_INPUT: u8 = 4;
const TEXT_INPUT_SHORT: u8 = 1;

pub const TITLE_INPUT: &str = "title_input";
pub const DATETIME_INPUT: &str = "datetime_input";
pub const TANK_INPUT: &str = "tank_input";
pub const HEALER_INPUT: &str = "healer_input";
pub const DPS_INPUT: &str = "dps_input";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: u8,
    pub label: String,
    pub custom_id: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    pub kind: u8,
    pub custom_id: String,
    pub label: String,
    pub style: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    pub max_length: u16,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    TextInput(TextInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    fn new(components: Vec<Component>) -> Self {
        Self {
            kind: ACTION_ROW,
            components,
        }
    }
}

/// Body of a create/edit message request, or the data of a message response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

/// Data of a modal interaction response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalPayload {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ActionRow>,
}

fn button_style(style: ControlStyle) -> u8 {
    match style {
        ControlStyle::Primary => 1,
        ControlStyle::Secondary => 2,
        ControlStyle::Success => 3,
        ControlStyle::Danger => 4,
    }
}

/// Renders a session panel.
pub fn panel_message(view: &PanelView) -> MessagePayload {
    let mut fields = vec![
        EmbedField {
            name: "Date/Time".to_string(),
            value: view.schedule.clone(),
            inline: false,
        },
        EmbedField {
            name: "Host".to_string(),
            value: format!("<@{}>", view.host),
            inline: false,
        },
    ];

    for row in &view.rows {
        let value = match &row.members {
            RowMembers::Nobody => "None".to_string(),
            RowMembers::Listed(members) => members
                .iter()
                .map(|member| format!("<@{}>", member))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        fields.push(EmbedField {
            name: format!("{} ({}/{})", row.role, row.count, row.capacity),
            value,
            inline: true,
        });
    }

    if let Some(room) = view.voice_room {
        fields.push(EmbedField {
            name: "VC".to_string(),
            value: format!("<#{}>", room),
            inline: false,
        });
    }

    let mut rows: Vec<ActionRow> = Vec::new();
    for control in &view.controls {
        let index = usize::from(control.row);
        while rows.len() <= index {
            rows.push(ActionRow::new(Vec::new()));
        }
        rows[index].components.push(Component::Button(Button {
            kind: BUTTON,
            style: button_style(control.style),
            label: control.label.clone(),
            custom_id: control.id.to_string(),
            disabled: control.disabled,
        }));
    }
    rows.retain(|row| !row.components.is_empty());

    MessagePayload {
        content: None,
        embeds: vec![Embed {
            title: format!("Recruiting: {}", view.title),
            description: None,
            color: Some(PANEL_COLOR),
            fields,
        }],
        components: rows,
        flags: None,
    }
}

/// Placeholder posted to reserve the panel message id.
pub fn placeholder_message() -> MessagePayload {
    MessagePayload {
        content: None,
        embeds: vec![Embed {
            title: "Recruiting...".to_string(),
            description: Some("Preparing".to_string()),
            color: None,
            fields: Vec::new(),
        }],
        components: Vec::new(),
        flags: None,
    }
}

/// The standing panel with the two "start a recruitment" buttons.
pub fn trigger_message() -> MessagePayload {
    let button = |with_voice_room: bool, label: &str, style: ControlStyle| {
        Component::Button(Button {
            kind: BUTTON,
            style: button_style(style),
            label: label.to_string(),
            custom_id: TriggerControl { with_voice_room }.custom_id().to_string(),
            disabled: false,
        })
    };

    MessagePayload {
        content: None,
        embeds: vec![Embed {
            title: "Party Recruitment".to_string(),
            description: Some("Press a button below to start a recruitment.".to_string()),
            color: Some(TRIGGER_COLOR),
            fields: Vec::new(),
        }],
        components: vec![ActionRow::new(vec![
            button(false, "Create recruitment", ControlStyle::Primary),
            button(true, "Create recruitment (+VC)", ControlStyle::Secondary),
        ])],
        flags: None,
    }
}

fn text_input(
    custom_id: &str,
    label: &str,
    placeholder: &str,
    min_length: Option<u16>,
    max_length: u16,
    value: Option<String>,
) -> ActionRow {
    ActionRow::new(vec![Component::TextInput(TextInput {
        kind: TEXT_INPUT,
        custom_id: custom_id.to_string(),
        label: label.to_string(),
        style: TEXT_INPUT_SHORT,
        min_length,
        max_length,
        required: true,
        placeholder: Some(placeholder.to_string()),
        value,
    })])
}

/// The intake form, pre-filled with the default capacities.
pub fn intake_modal(form: FormId, defaults: &RoleCapacity) -> ModalPayload {
    let title_limit = u16::try_from(MAX_TITLE_LENGTH).unwrap_or(u16::MAX);
    let capacity = |custom_id: &str, label: &str, value: u32| {
        text_input(
            custom_id,
            label,
            &value.to_string(),
            Some(1),
            2,
            Some(value.to_string()),
        )
    };

    ModalPayload {
        custom_id: form.to_string(),
        title: "Recruitment details".to_string(),
        components: vec![
            text_input(TITLE_INPUT, "Title", "Savage floor 1 practice", None, title_limit, None),
            text_input(
                DATETIME_INPUT,
                "Date/Time (e.g. 1201 21:00)",
                "20231201 21:00",
                Some(5),
                20,
                None,
            ),
            capacity(TANK_INPUT, "Tank slots", defaults[Role::Tank]),
            capacity(HEALER_INPUT, "Healer slots", defaults[Role::Healer]),
            capacity(DPS_INPUT, "DPS slots", defaults[Role::Dps]),
        ],
    }
}
