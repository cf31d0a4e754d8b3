use super::state::AppState;
use crate::client::ClientFactory;
use crate::error::Error;
use crate::latency::IndicatorView;
use crate::session::{SessionConfig, SessionStatus, VoiceSession};
use crate::voices;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    /// Optional voice override (must be a catalog id)
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub status: String,
    pub message: String,
    pub session: SessionStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::ConfigurationMissing(_) => StatusCode::BAD_REQUEST,
        Error::PermissionDenied(_) => StatusCode::FORBIDDEN,
        Error::Connection(_) => StatusCode::BAD_GATEWAY,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /session/start
/// Start the voice session
pub async fn start_session(
    State(state): State<AppState>,
    req: Option<Json<StartSessionRequest>>,
) -> impl IntoResponse {
    let req = req.map(|Json(r)| r).unwrap_or_default();

    // Hold the slot for the whole start path so two concurrent starts
    // cannot both pass the guard. A session stays active until stop() tears
    // down its backend client, even after a remote hangup, so an active
    // occupant is a conflict regardless of its connection state.
    let mut slot = state.session.write().await;

    if let Some(existing) = slot.as_ref() {
        if existing.is_active() {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "a session is already active".to_string(),
                }),
            )
                .into_response();
        }
    }

    let voice_id = match req.voice_id {
        Some(id) => match voices::find_voice(&id) {
            Some(voice) => voice.id.to_string(),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("unknown voice: {}", id),
                    }),
                )
                    .into_response();
            }
        },
        None => state.agent.voice_id.clone(),
    };

    let config = SessionConfig {
        public_key: state.vapi.public_key.clone(),
        assistant_id: state.vapi.assistant_id.clone(),
        voice_id,
        provider: state.agent.provider,
        ..SessionConfig::default()
    };

    info!("Starting session: {}", config.session_id);

    let client = match ClientFactory::create(config.provider) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create voice client: {}", e);
            return (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    // Configuration is validated here, before any connection attempt
    let session = match VoiceSession::new(config, client) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to create session: {}", e);
            return (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    if let Err(e) = session.start().await {
        error!("Failed to start session: {}", e);
        return (
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    let session_id = session.status().await.session_id;

    *slot = Some(session);

    info!("Session started: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "starting".to_string(),
            message: format!("Session {} starting", session_id),
        }),
    )
        .into_response()
}

/// POST /session/stop
/// Stop the voice session
pub async fn stop_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = {
        let mut slot = state.session.write().await;
        slot.take()
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(status) => {
                info!("Session stopped: {}", status.session_id);
                (
                    StatusCode::OK,
                    Json(StopSessionResponse {
                        status: "stopped".to_string(),
                        message: "Session stopped".to_string(),
                        session: status,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to stop session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no active session".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /session/status
/// Snapshot of the session, or 404 when none exists
pub async fn get_session_status(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;

    match session.as_ref() {
        Some(session) => (StatusCode::OK, Json(session.status().await)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no active session".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /session/latency
/// Latency indicator view (inactive when no session exists)
pub async fn get_session_latency(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;

    let view = match session.as_ref() {
        Some(session) => session.indicator_view().await,
        None => IndicatorView::Inactive,
    };

    (StatusCode::OK, Json(view)).into_response()
}

/// GET /voices
/// Voice catalog
pub async fn list_voices() -> impl IntoResponse {
    (StatusCode::OK, Json(voices::BRITISH_VOICES)).into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
