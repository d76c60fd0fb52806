//! HTTP handlers for interaction delivery and health.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::discord::{InboundEvent, Interaction, InteractionResponse};
use crate::application::{InteractionReply, RecruitmentDispatcher};

use super::dto::{ErrorResponse, HealthResponse};
use super::signature::{RelayVerifier, SIGNATURE_HEADER};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InteractionAppState {
    dispatcher: Arc<RecruitmentDispatcher>,
    verifier: Arc<RelayVerifier>,
}

impl InteractionAppState {
    pub fn new(dispatcher: Arc<RecruitmentDispatcher>, verifier: RelayVerifier) -> Self {
        Self {
            dispatcher,
            verifier: Arc::new(verifier),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /interactions - Receive a relayed Discord interaction
pub async fn receive_interaction(
    State(state): State<InteractionAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    if let Err(err) = state
        .verifier
        .verify(signature, &body, chrono::Utc::now().timestamp())
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("INVALID_SIGNATURE", err.to_string())),
        )
            .into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to parse interaction payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_PAYLOAD", err.to_string())),
            )
                .into_response();
        }
    };

    let event = match interaction.into_event() {
        Ok(event) => event,
        Err(err) => {
            tracing::debug!(error = %err, "Unsupported interaction");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("UNSUPPORTED_INTERACTION", err.to_string())),
            )
                .into_response();
        }
    };

    // Detached so a timed-out request cannot cut a transition short.
    let dispatcher = state.dispatcher.clone();
    let work = tokio::spawn(async move { dispatch(&dispatcher, event).await });

    match work.await {
        Ok(reply) => Json(InteractionResponse::from(reply)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Interaction dispatch task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("INTERNAL_ERROR", "interaction could not be processed")),
            )
                .into_response()
        }
    }
}

async fn dispatch(dispatcher: &RecruitmentDispatcher, event: InboundEvent) -> InteractionReply {
    match event {
        InboundEvent::Ping => InteractionReply::Pong,
        InboundEvent::Setup => dispatcher.on_setup(),
        InboundEvent::Component { ctx, custom_id } => {
            dispatcher.on_component(ctx, &custom_id).await
        }
        InboundEvent::FormSubmitted {
            ctx,
            form,
            wants_voice_room,
        } => dispatcher.on_form_submitted(ctx, form, wants_voice_room).await,
    }
}

/// GET /health - Liveness and live session count
pub async fn health(State(state): State<InteractionAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.dispatcher.session_count(),
    })
}
