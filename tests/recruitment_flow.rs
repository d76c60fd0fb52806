//! Integration tests for the recruitment flow.
//!
//! These tests drive the dispatcher (and the HTTP router on top of it) with
//! the in-memory session store and a recording chat surface:
//! 1. Roster transitions honour capacity and the single-role rule
//! 2. Close removes the session and its chat artifacts
//! 3. Signed interactions travel end to end through the router

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use party_recruit::adapters::{
    interaction_router, InMemorySessionStore, InteractionAppState, RelayVerifier,
};
use party_recruit::application::{
    InteractionContext, InteractionReply, RecruitmentDispatcher, RecruitmentSettings,
};
use party_recruit::domain::foundation::{
    ActorId, ChannelId, GuildId, MessageId, SessionId, VoiceRoomId,
};
use party_recruit::domain::recruitment::{IntakeForm, PanelView, Role, RowMembers};
use party_recruit::ports::{ChatSurface, SessionStore, SurfaceError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const HOST: ActorId = ActorId::new(10);
const ALICE: ActorId = ActorId::new(11);
const BOB: ActorId = ActorId::new(12);
const GUILD: GuildId = GuildId::new(20);
const CHANNEL: ChannelId = ChannelId::new(30);
const SECRET: &str = "integration-secret";

/// Chat surface that hands out sequential ids and keeps the latest panel.
struct RecordingSurface {
    next_id: AtomicU64,
    last_view: Mutex<Option<PanelView>>,
    destroyed_messages: Mutex<Vec<MessageId>>,
    destroyed_rooms: Mutex<Vec<VoiceRoomId>>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(5000),
            last_view: Mutex::new(None),
            destroyed_messages: Mutex::new(Vec::new()),
            destroyed_rooms: Mutex::new(Vec::new()),
        }
    }

    fn last_view(&self) -> PanelView {
        self.last_view.lock().unwrap().clone().expect("no panel rendered")
    }
}

#[async_trait]
impl ChatSurface for RecordingSurface {
    async fn render_placeholder(&self, _channel: ChannelId) -> Result<MessageId, SurfaceError> {
        Ok(MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn update_panel(
        &self,
        _channel: ChannelId,
        _message: MessageId,
        view: &PanelView,
    ) -> Result<(), SurfaceError> {
        *self.last_view.lock().unwrap() = Some(view.clone());
        Ok(())
    }

    async fn create_voice_room(
        &self,
        _guild: GuildId,
        _name: &str,
    ) -> Result<VoiceRoomId, SurfaceError> {
        Ok(VoiceRoomId::new(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn destroy_voice_room(&self, room: VoiceRoomId) -> Result<(), SurfaceError> {
        self.destroyed_rooms.lock().unwrap().push(room);
        Ok(())
    }

    async fn destroy_message(
        &self,
        _channel: ChannelId,
        message: MessageId,
    ) -> Result<(), SurfaceError> {
        self.destroyed_messages.lock().unwrap().push(message);
        Ok(())
    }
}

struct Harness {
    dispatcher: Arc<RecruitmentDispatcher>,
    store: InMemorySessionStore,
    surface: Arc<RecordingSurface>,
}

impl Harness {
    fn new() -> Self {
        let store = InMemorySessionStore::new();
        let surface = Arc::new(RecordingSurface::new());
        let dispatcher = Arc::new(RecruitmentDispatcher::new(
            Arc::new(store.clone()),
            surface.clone(),
            RecruitmentSettings::default(),
        ));
        Self {
            dispatcher,
            store,
            surface,
        }
    }

    /// Creates a session and returns its id (the panel message id).
    async fn create(&self, tank: &str, healer: &str, dps: &str, voice: bool) -> SessionId {
        let reply = self
            .dispatcher
            .on_form_submitted(ctx(HOST), form(tank, healer, dps), voice)
            .await;
        match reply {
            InteractionReply::Ephemeral(text) if text.starts_with("Recruitment created!") => {}
            other => panic!("unexpected reply: {:?}", other),
        }
        self.surface.last_view().session_id
    }

    async fn press(&self, actor: ActorId, custom_id: String) -> InteractionReply {
        self.dispatcher.on_component(ctx(actor), &custom_id).await
    }

    fn members(&self, id: SessionId, role: Role) -> Vec<ActorId> {
        self.store
            .get(id)
            .map(|session| session.members(role).to_vec())
            .unwrap_or_default()
    }
}

fn ctx(actor: ActorId) -> InteractionContext {
    InteractionContext {
        actor,
        guild: Some(GUILD),
        channel: Some(CHANNEL),
    }
}

fn form(tank: &str, healer: &str, dps: &str) -> IntakeForm {
    IntakeForm {
        title: "Weekly clear".to_string(),
        date_time: "1201 21:00".to_string(),
        tank: tank.to_string(),
        healer: healer.to_string(),
        dps: dps.to_string(),
    }
}

fn claim(role: &str, id: SessionId) -> String {
    format!("role_{}_{}", role, id)
}

// =============================================================================
// Dispatcher flow
// =============================================================================

#[tokio::test]
async fn claim_move_and_capacity_follow_the_roster_rules() {
    let harness = Harness::new();
    let id = harness.create("1", "1", "2", false).await;

    let reply = harness.press(ALICE, claim("tank", id)).await;
    assert_eq!(reply, InteractionReply::AcknowledgeUpdate);
    assert_eq!(harness.members(id, Role::Tank), vec![ALICE]);

    let reply = harness.press(BOB, claim("tank", id)).await;
    assert_eq!(
        reply,
        InteractionReply::Ephemeral("The Tank slots are full.".to_string())
    );
    assert_eq!(harness.members(id, Role::Tank), vec![ALICE]);

    let reply = harness.press(ALICE, claim("healer", id)).await;
    assert_eq!(reply, InteractionReply::AcknowledgeUpdate);
    assert!(harness.members(id, Role::Tank).is_empty());
    assert_eq!(harness.members(id, Role::Healer), vec![ALICE]);

    let reply = harness.press(BOB, claim("tank", id)).await;
    assert_eq!(reply, InteractionReply::AcknowledgeUpdate);
    assert_eq!(harness.members(id, Role::Tank), vec![BOB]);

    let view = harness.surface.last_view();
    assert_eq!(view.row(Role::Tank).unwrap().members, RowMembers::Listed(vec![BOB]));
    assert_eq!(view.row(Role::Healer).unwrap().members, RowMembers::Listed(vec![ALICE]));
}

#[tokio::test]
async fn zero_capacity_role_is_always_full() {
    let harness = Harness::new();
    let id = harness.create("1", "1", "0", false).await;

    let reply = harness.press(ALICE, claim("dps", id)).await;

    assert_eq!(
        reply,
        InteractionReply::Ephemeral("The DPS slots are full.".to_string())
    );
    assert!(harness.members(id, Role::Dps).is_empty());
}

#[tokio::test]
async fn release_without_a_role_is_rejected() {
    let harness = Harness::new();
    let id = harness.create("1", "1", "2", false).await;

    let reply = harness.press(ALICE, format!("leave_{}", id)).await;

    assert_eq!(
        reply,
        InteractionReply::Ephemeral("You are not participating.".to_string())
    );
}

#[tokio::test]
async fn close_of_unknown_session_reports_not_found() {
    let harness = Harness::new();

    let reply = harness.press(HOST, "close_424242".to_string()).await;

    match reply {
        InteractionReply::Ephemeral(text) => assert!(text.contains("could not be found")),
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn only_the_host_can_close() {
    let harness = Harness::new();
    let id = harness.create("1", "1", "2", false).await;

    let reply = harness.press(ALICE, format!("close_{}", id)).await;

    assert_eq!(
        reply,
        InteractionReply::Ephemeral("Only the host can close this recruitment.".to_string())
    );
    assert!(harness.store.contains(id));
}

#[tokio::test]
async fn host_close_removes_session_panel_and_voice_room() {
    let harness = Harness::new();
    let id = harness.create("1", "1", "2", true).await;
    let room = harness.surface.last_view().voice_room.expect("voice room");

    let reply = harness.press(HOST, format!("close_{}", id)).await;

    assert_eq!(
        reply,
        InteractionReply::Ephemeral("Recruitment closed and removed.".to_string())
    );
    assert!(!harness.store.contains(id));
    assert_eq!(harness.dispatcher.session_count(), 0);
    assert_eq!(
        *harness.surface.destroyed_messages.lock().unwrap(),
        vec![id.message_id()]
    );
    assert_eq!(*harness.surface.destroyed_rooms.lock().unwrap(), vec![room]);

    let reply = harness.press(ALICE, claim("tank", id)).await;
    match reply {
        InteractionReply::Ephemeral(text) => assert!(text.contains("could not be found")),
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn invalid_form_creates_nothing() {
    let harness = Harness::new();

    let reply = harness
        .dispatcher
        .on_form_submitted(ctx(HOST), form("1", "two", "2"), true)
        .await;

    assert!(matches!(reply, InteractionReply::Ephemeral(_)));
    assert_eq!(harness.dispatcher.session_count(), 0);
    assert!(harness.surface.last_view.lock().unwrap().is_none());
}

// =============================================================================
// HTTP end to end
// =============================================================================

fn verifier() -> RelayVerifier {
    RelayVerifier::new(SecretString::new(SECRET.to_string()))
}

fn signed(body: Value) -> Request<Body> {
    let body = body.to_string();
    let timestamp = chrono::Utc::now().timestamp();
    let signature = format!(
        "t={},v1={}",
        timestamp,
        verifier().sign(timestamp, body.as_bytes())
    );
    Request::builder()
        .method("POST")
        .uri("/interactions")
        .header("content-type", "application/json")
        .header("x-relay-signature", signature)
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn modal_submit(actor: ActorId) -> Value {
    json!({
        "type": 5,
        "guild_id": GUILD.to_string(),
        "channel_id": CHANNEL.to_string(),
        "member": { "user": { "id": actor.to_string() } },
        "data": {
            "custom_id": "modal_recruit_create_novc",
            "components": [
                { "components": [{ "custom_id": "title_input", "value": "Weekly clear" }] },
                { "components": [{ "custom_id": "datetime_input", "value": "1201 21:00" }] },
                { "components": [{ "custom_id": "tank_input", "value": "1" }] },
                { "components": [{ "custom_id": "healer_input", "value": "1" }] },
                { "components": [{ "custom_id": "dps_input", "value": "2" }] }
            ]
        }
    })
}

fn button(actor: ActorId, custom_id: &str) -> Value {
    json!({
        "type": 3,
        "guild_id": GUILD.to_string(),
        "channel_id": CHANNEL.to_string(),
        "member": { "user": { "id": actor.to_string() } },
        "data": { "custom_id": custom_id }
    })
}

#[tokio::test]
async fn signed_interactions_drive_a_session_end_to_end() {
    let harness = Harness::new();
    let app = interaction_router(
        InteractionAppState::new(harness.dispatcher.clone(), verifier()),
        Duration::from_secs(5),
    );

    let response = app.clone().oneshot(signed(modal_submit(HOST))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["type"], 4);
    assert_eq!(body["data"]["flags"], 64);
    assert!(body["data"]["content"]
        .as_str()
        .unwrap()
        .starts_with("Recruitment created!"));

    let id = harness.surface.last_view().session_id;
    let response = app
        .clone()
        .oneshot(signed(button(ALICE, &claim("dps", id))))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({ "type": 6 }));
    assert_eq!(harness.members(id, Role::Dps), vec![ALICE]);

    let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(health).await.unwrap();
    assert_eq!(
        json_body(response).await,
        json!({ "status": "ok", "sessions": 1 })
    );
}
