//! HTTP server for sohayokd

use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use sohayok_common::{IntentEngine, SharedSession, SohayokConfig};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

/// How often the background sweep looks for idle sessions
const SWEEP_INTERVAL_SECS: u64 = 60;

/// Application state shared across handlers
pub struct AppState {
    pub config: SohayokConfig,
    /// Current rule table. Reloads swap the whole engine.
    pub engine: RwLock<IntentEngine>,
    pub sessions: RwLock<HashMap<Uuid, Arc<SharedSession>>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: SohayokConfig, engine: IntentEngine) -> Self {
        Self {
            config,
            engine: RwLock::new(engine),
            sessions: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Build state from config, loading the configured rule table
    pub fn from_config(config: SohayokConfig) -> Result<Self> {
        let table = config
            .load_rule_table()
            .context("Failed to load rule table")?;
        Ok(Self::new(config, IntentEngine::new(table)))
    }

    /// Drop sessions idle for at least `session_idle_secs`. Returns how many.
    pub async fn evict_idle(&self) -> usize {
        let limit = Duration::from_secs(self.config.server.session_idle_secs);
        let mut sessions = self.sessions.write().await;

        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            if session.idle_for().await >= limit {
                expired.push(*id);
            }
        }
        for id in &expired {
            sessions.remove(id);
            debug!("  Session {} expired", id);
        }

        if !expired.is_empty() {
            info!(
                "  Evicted {} idle sessions, {} remain",
                expired.len(),
                sessions.len()
            );
        }
        expired.len()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::resolve_routes())
        .merge(routes::session_routes())
        .merge(routes::rule_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.bind.clone();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    serve(listener, Arc::new(state), shutdown_signal()).await
}

/// Serve on a bound listener until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let sweeper = spawn_session_sweeper(Arc::clone(&state));
    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await;
    sweeper.abort();
    served.context("HTTP server failed")
}

fn spawn_session_sweeper(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            state.evict_idle().await;
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
