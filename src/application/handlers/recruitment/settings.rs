//! Runtime settings shared by the recruitment handlers.

use crate::domain::foundation::ChannelId;
use crate::domain::recruitment::RoleCapacity;

/// Recruitment behaviour that comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitmentSettings {
    /// Capacities pre-filled in the intake form.
    pub default_capacity: RoleCapacity,
    pub voice_room_prefix: String,
    pub voice_room_suffix: String,
    /// Channel that receives every panel. `None` posts next to the form.
    pub target_channel: Option<ChannelId>,
}

impl RecruitmentSettings {
    pub fn voice_room_name(&self, title: &str) -> String {
        format!("{}{}{}", self.voice_room_prefix, title, self.voice_room_suffix)
    }

    /// Resolves where a panel created from `origin` should be posted.
    pub fn panel_channel(&self, origin: ChannelId) -> ChannelId {
        self.target_channel.unwrap_or(origin)
    }
}

impl Default for RecruitmentSettings {
    fn default() -> Self {
        Self {
            default_capacity: RoleCapacity::new(2, 2, 4),
            voice_room_prefix: "🔑_".to_string(),
            voice_room_suffix: "_VC".to_string(),
            target_channel: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_room_name_wraps_title() {
        let settings = RecruitmentSettings::default();
        assert_eq!(settings.voice_room_name("Raid"), "🔑_Raid_VC");
    }

    #[test]
    fn target_channel_overrides_origin() {
        let mut settings = RecruitmentSettings::default();
        assert_eq!(settings.panel_channel(ChannelId::new(1)), ChannelId::new(1));

        settings.target_channel = Some(ChannelId::new(9));
        assert_eq!(settings.panel_channel(ChannelId::new(1)), ChannelId::new(9));
    }
}
