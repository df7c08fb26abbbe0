//! API routes for sohayokd
//!
//! Resolution never fails: unmatched text gets the fallback response.
//! Errors here are about sessions (unknown id, registry full, log full) and
//! rule reloads (no file configured, invalid file).

use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use sohayok_common::api::{
    HealthResponse, ReloadResponse, ResolveResponse, SessionCreated, SessionLog, TextRequest,
};
use sohayok_common::{ConversationSession, IntentEngine, Message, RuleTable, SharedSession};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

type AppStateArc = Arc<AppState>;
type ApiError = (StatusCode, String);

// ============================================================================
// Health
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let rules = state.engine.read().await.table().rule_count();
    let sessions = state.sessions.read().await.len();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules,
        sessions,
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Stateless resolution
// ============================================================================

pub fn resolve_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/resolve", post(resolve))
}

async fn resolve(
    State(state): State<AppStateArc>,
    Json(req): Json<TextRequest>,
) -> Json<ResolveResponse> {
    let resolution = state.engine.read().await.explain(&req.text);
    debug!(
        "  Resolved to '{}' (fallback: {})",
        resolution.rule_id, resolution.fallback
    );
    Json(resolution.into())
}

// ============================================================================
// Sessions
// ============================================================================

pub fn session_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", delete(delete_session))
        .route(
            "/v1/sessions/:id/messages",
            post(post_message).get(get_messages),
        )
}

async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<SharedSession>, ApiError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Session '{}' not found", id)))
}

async fn create_session(
    State(state): State<AppStateArc>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let max_sessions = state.config.server.max_sessions;
    if state.sessions.read().await.len() >= max_sessions {
        state.evict_idle().await;
    }

    let engine = state.engine.read().await.clone();
    let mut sessions = state.sessions.write().await;

    if sessions.len() >= max_sessions {
        warn!("  Session limit reached ({})", sessions.len());
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Too many open sessions".to_string(),
        ));
    }

    let session = SharedSession::new(ConversationSession::new(engine));
    let session_id = session.id();
    sessions.insert(session_id, Arc::new(session));
    info!("  Session {} opened", session_id);

    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

async fn post_message(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextRequest>,
) -> Result<Json<Message>, ApiError> {
    let session = find_session(&state, id).await?;
    let limit = state.config.server.max_messages_per_session;
    match session.submit(&req.text, limit).await {
        Some(reply) => Ok(Json(reply)),
        None => {
            debug!("  Session {} is full", id);
            Err((
                StatusCode::CONFLICT,
                format!("Session '{}' reached its {}-message limit", id, limit),
            ))
        }
    }
}

async fn get_messages(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionLog>, ApiError> {
    let session = find_session(&state, id).await?;
    Ok(Json(SessionLog {
        session_id: id,
        messages: session.snapshot().await,
    }))
}

async fn delete_session(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            info!("  Session {} closed", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, format!("Session '{}' not found", id))),
    }
}

// ============================================================================
// Rules
// ============================================================================

pub fn rule_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/rules/reload", post(reload_rules))
}

/// Re-read the configured rule file. Open sessions keep their table.
async fn reload_rules(
    State(state): State<AppStateArc>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let Some(path) = state.config.knowledge.rules_file.clone() else {
        return Err((
            StatusCode::CONFLICT,
            "No rules_file configured; the built-in knowledge base is in use".to_string(),
        ));
    };

    let table = RuleTable::load(&path).map_err(|e| {
        warn!("  Rule reload from {} failed: {}", path.display(), e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let rules = table.rule_count();
    *state.engine.write().await = IntentEngine::new(table);
    info!("  Reloaded {} rules from {}", rules, path.display());

    Ok(Json(ReloadResponse { rules }))
}
