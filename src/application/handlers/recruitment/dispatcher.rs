//! RecruitmentDispatcher - Routes inbound interactions to recruitment handlers.
//!
//! Every inbound event resolves to exactly one [`InteractionReply`]. Failures
//! become ephemeral replies addressed to the acting member only.

use std::sync::Arc;

use tracing::{debug, warn};

use super::claim_role::{ClaimRoleCommand, ClaimRoleHandler, RosterTransitionResult};
use super::close_recruitment::{CloseRecruitmentCommand, CloseRecruitmentHandler};
use super::create_recruitment::{
    CreateRecruitmentCommand, CreateRecruitmentHandler, CreateRecruitmentResult,
};
use super::errors::RecruitmentError;
use super::panel_sync::PanelSync;
use super::release_role::{ReleaseRoleCommand, ReleaseRoleHandler};
use super::settings::RecruitmentSettings;
use crate::domain::foundation::{ActorId, ChannelId, GuildId};
use crate::domain::recruitment::{
    ComponentAction, ControlId, FormId, IntakeForm, PanelAction, RoleCapacity,
};
use crate::ports::{ChatSurface, SessionStore};

/// What the interaction endpoint should answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionReply {
    /// Answer to a liveness ping from the platform.
    Pong,
    /// Post the standing "start a recruitment" panel.
    TriggerPanel,
    /// Open the intake form.
    OpenForm {
        form: FormId,
        defaults: RoleCapacity,
    },
    /// Acknowledge silently; the panel update carries the result.
    AcknowledgeUpdate,
    /// A message only the acting member sees.
    Ephemeral(String),
}

/// Who acted, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionContext {
    pub actor: ActorId,
    pub guild: Option<GuildId>,
    pub channel: Option<ChannelId>,
}

pub struct RecruitmentDispatcher {
    store: Arc<dyn SessionStore>,
    settings: Arc<RecruitmentSettings>,
    create: CreateRecruitmentHandler,
    claim: ClaimRoleHandler,
    release: ReleaseRoleHandler,
    close: CloseRecruitmentHandler,
}

impl RecruitmentDispatcher {
    pub fn new(
        store: Arc<dyn SessionStore>,
        surface: Arc<dyn ChatSurface>,
        settings: RecruitmentSettings,
    ) -> Self {
        let settings = Arc::new(settings);
        let panels = Arc::new(PanelSync::new(store.clone(), surface.clone()));
        Self {
            create: CreateRecruitmentHandler::new(
                store.clone(),
                surface.clone(),
                settings.clone(),
            ),
            claim: ClaimRoleHandler::new(store.clone(), panels.clone()),
            release: ReleaseRoleHandler::new(store.clone(), panels.clone()),
            close: CloseRecruitmentHandler::new(store.clone(), surface, panels),
            store,
            settings,
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    pub fn on_setup(&self) -> InteractionReply {
        InteractionReply::TriggerPanel
    }

    /// A trigger button was pressed: open the intake form.
    pub fn on_create_triggered(&self, actor: ActorId, wants_voice_room: bool) -> InteractionReply {
        debug!(actor = %actor, wants_voice_room, "Opening recruitment form");
        InteractionReply::OpenForm {
            form: FormId {
                with_voice_room: wants_voice_room,
            },
            defaults: self.settings.default_capacity.clone(),
        }
    }

    pub async fn on_form_submitted(
        &self,
        ctx: InteractionContext,
        form: IntakeForm,
        wants_voice_room: bool,
    ) -> InteractionReply {
        let outcome = match (ctx.guild, ctx.channel) {
            (Some(guild), Some(channel)) => {
                self.create
                    .handle(CreateRecruitmentCommand {
                        host: ctx.actor,
                        guild,
                        channel,
                        form,
                        wants_voice_room,
                    })
                    .await
            }
            (None, _) => Err(RecruitmentError::MissingContext("guild")),
            (_, None) => Err(RecruitmentError::MissingContext("channel")),
        };

        match outcome {
            Ok(created) => {
                InteractionReply::Ephemeral(format!("Recruitment created! -> {}", jump_url(&created)))
            }
            Err(err) => failure(ctx.actor, err),
        }
    }

    /// A panel control was pressed.
    pub async fn on_control_activated(
        &self,
        actor: ActorId,
        channel: ChannelId,
        control: ControlId,
    ) -> InteractionReply {
        let session_id = control.session_id;
        match control.action {
            PanelAction::Claim(role) => {
                let outcome = self
                    .claim
                    .handle(ClaimRoleCommand {
                        actor,
                        channel,
                        session_id,
                        role,
                    })
                    .await;
                roster_reply(actor, outcome, &format!("You joined as {}", role))
            }
            PanelAction::Release => {
                let outcome = self
                    .release
                    .handle(ReleaseRoleCommand {
                        actor,
                        channel,
                        session_id,
                    })
                    .await;
                roster_reply(actor, outcome, "You left the recruitment")
            }
            PanelAction::Close => {
                let outcome = self
                    .close
                    .handle(CloseRecruitmentCommand {
                        actor,
                        channel,
                        session_id,
                    })
                    .await;
                match outcome {
                    Ok(_) => InteractionReply::Ephemeral(
                        "Recruitment closed and removed.".to_string(),
                    ),
                    Err(err) => failure(actor, err),
                }
            }
        }
    }

    /// Routes any component activation by its raw identifier.
    pub async fn on_component(&self, ctx: InteractionContext, custom_id: &str) -> InteractionReply {
        let action = match custom_id.parse::<ComponentAction>() {
            Ok(action) => action,
            Err(err) => return failure(ctx.actor, err.into()),
        };

        match action {
            ComponentAction::OpenForm(trigger) => {
                self.on_create_triggered(ctx.actor, trigger.with_voice_room)
            }
            ComponentAction::Panel(control) => match ctx.channel {
                Some(channel) => self.on_control_activated(ctx.actor, channel, control).await,
                None => failure(ctx.actor, RecruitmentError::MissingContext("channel")),
            },
        }
    }
}

fn jump_url(created: &CreateRecruitmentResult) -> String {
    format!(
        "https://discord.com/channels/{}/{}/{}",
        created.guild,
        created.channel,
        created.session_id.message_id()
    )
}

fn roster_reply(
    actor: ActorId,
    outcome: Result<RosterTransitionResult, RecruitmentError>,
    done: &str,
) -> InteractionReply {
    match outcome {
        Ok(result) if result.panel_synced => InteractionReply::AcknowledgeUpdate,
        Ok(_) => InteractionReply::Ephemeral(format!(
            "{}, but the panel could not be refreshed.",
            done
        )),
        Err(err) => failure(actor, err),
    }
}

fn failure(actor: ActorId, err: RecruitmentError) -> InteractionReply {
    if !err.is_rejection() {
        warn!(actor = %actor, code = %err.code(), error = %err, "Recruitment request failed");
    }
    InteractionReply::Ephemeral(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::super::panel_sync::test_support::RecordingSurface;
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::SessionId;
    use crate::domain::recruitment::Role;

    const HOST: ActorId = ActorId::new(1);
    const GUILD: GuildId = GuildId::new(2);
    const CHANNEL: ChannelId = ChannelId::new(3);

    fn dispatcher() -> (RecruitmentDispatcher, Arc<RecordingSurface>) {
        let surface = Arc::new(RecordingSurface::new());
        let dispatcher = RecruitmentDispatcher::new(
            Arc::new(InMemorySessionStore::new()),
            surface.clone(),
            RecruitmentSettings::default(),
        );
        (dispatcher, surface)
    }

    fn ctx(actor: ActorId) -> InteractionContext {
        InteractionContext {
            actor,
            guild: Some(GUILD),
            channel: Some(CHANNEL),
        }
    }

    fn form(dps: &str) -> IntakeForm {
        IntakeForm {
            title: "Raid".to_string(),
            date_time: "1201 21:00".to_string(),
            tank: "1".to_string(),
            healer: "1".to_string(),
            dps: dps.to_string(),
        }
    }

    async fn create(dispatcher: &RecruitmentDispatcher, dps: &str) -> SessionId {
        let reply = dispatcher.on_form_submitted(ctx(HOST), form(dps), false).await;
        assert!(matches!(reply, InteractionReply::Ephemeral(ref text) if text.starts_with("Recruitment created!")));
        SessionId::new(1000)
    }

    #[test]
    fn trigger_opens_form_with_defaults() {
        let (dispatcher, _) = dispatcher();
        assert_eq!(
            dispatcher.on_create_triggered(HOST, true),
            InteractionReply::OpenForm {
                form: FormId {
                    with_voice_room: true
                },
                defaults: RoleCapacity::new(2, 2, 4),
            }
        );
    }

    #[tokio::test]
    async fn form_submission_replies_with_jump_link() {
        let (dispatcher, _) = dispatcher();

        let reply = dispatcher.on_form_submitted(ctx(HOST), form("2"), false).await;

        assert_eq!(
            reply,
            InteractionReply::Ephemeral(
                "Recruitment created! -> https://discord.com/channels/2/3/1000".to_string()
            )
        );
        assert_eq!(dispatcher.session_count(), 1);
    }

    #[tokio::test]
    async fn invalid_form_is_reported_to_actor() {
        let (dispatcher, surface) = dispatcher();

        let reply = dispatcher.on_form_submitted(ctx(HOST), form("x"), false).await;

        assert_eq!(
            reply,
            InteractionReply::Ephemeral(
                "Slot counts must be whole numbers. Please enter half-width digits.".to_string()
            )
        );
        assert!(surface.calls().is_empty());
    }

    #[tokio::test]
    async fn form_outside_guild_is_refused() {
        let (dispatcher, _) = dispatcher();
        let mut context = ctx(HOST);
        context.guild = None;

        let reply = dispatcher.on_form_submitted(context, form("2"), false).await;

        assert!(matches!(reply, InteractionReply::Ephemeral(ref text) if text.contains("guild missing")));
        assert_eq!(dispatcher.session_count(), 0);
    }

    #[tokio::test]
    async fn successful_claim_acknowledges_silently() {
        let (dispatcher, _) = dispatcher();
        let id = create(&dispatcher, "2").await;

        let reply = dispatcher
            .on_control_activated(
                ActorId::new(5),
                CHANNEL,
                ControlId::new(PanelAction::Claim(Role::Dps), id),
            )
            .await;

        assert_eq!(reply, InteractionReply::AcknowledgeUpdate);
    }

    #[tokio::test]
    async fn full_role_is_reported_to_actor() {
        let (dispatcher, _) = dispatcher();
        let id = create(&dispatcher, "0").await;

        let reply = dispatcher
            .on_control_activated(
                ActorId::new(5),
                CHANNEL,
                ControlId::new(PanelAction::Claim(Role::Dps), id),
            )
            .await;

        assert_eq!(
            reply,
            InteractionReply::Ephemeral("The DPS slots are full.".to_string())
        );
    }

    #[tokio::test]
    async fn stale_panel_reports_session_not_found() {
        let (dispatcher, _) = dispatcher();

        let reply = dispatcher
            .on_component(ctx(HOST), "close_424242")
            .await;

        assert!(matches!(reply, InteractionReply::Ephemeral(ref text) if text.contains("could not be found")));
    }

    #[tokio::test]
    async fn unknown_component_is_reported() {
        let (dispatcher, _) = dispatcher();

        let reply = dispatcher.on_component(ctx(HOST), "bogus").await;

        assert_eq!(
            reply,
            InteractionReply::Ephemeral("This control is not recognized.".to_string())
        );
    }

    #[tokio::test]
    async fn host_close_through_component_id() {
        let (dispatcher, surface) = dispatcher();
        let id = create(&dispatcher, "2").await;

        let reply = dispatcher
            .on_component(ctx(HOST), &ControlId::new(PanelAction::Close, id).to_string())
            .await;

        assert_eq!(
            reply,
            InteractionReply::Ephemeral("Recruitment closed and removed.".to_string())
        );
        assert_eq!(dispatcher.session_count(), 0);
        assert!(surface.calls().len() >= 3);
    }

    #[tokio::test]
    async fn trigger_component_opens_form() {
        let (dispatcher, _) = dispatcher();

        let reply = dispatcher
            .on_component(ctx(HOST), "trigger_create_recruit_no_vc")
            .await;

        assert!(matches!(
            reply,
            InteractionReply::OpenForm {
                form: FormId {
                    with_voice_room: false
                },
                ..
            }
        ));
    }
}
