//! HTTP long-poll transport for the Studio plugin.
//!
//! The plugin cannot accept inbound connections, so it drives this side:
//! `GET /poll` long-polls for the next job, `POST /result` uploads the answer,
//! `GET /ping` refreshes liveness, `GET /health` is an operational probe.
//!
//! Every request runs on its own task, so a held-open poll never blocks other
//! traffic. The queue's condvar waits would park a runtime worker, so they are
//! pushed onto the blocking pool.

use crate::config::{BridgeConfig, DEFAULT_CLIENT_ID};
use crate::queue::{epoch_seconds, JobQueue};
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
struct HttpState {
    queue: Arc<JobQueue>,
    poll_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ClientQuery {
    client_id: Option<String>,
}

impl ClientQuery {
    fn client_id(self) -> String {
        self.client_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string())
    }
}

/// Build the transport router.
pub fn router(queue: Arc<JobQueue>, config: &BridgeConfig) -> Router {
    let state = HttpState {
        queue,
        poll_timeout: config.poll_timeout,
    };
    let router = Router::new()
        .route("/ping", get(ping))
        .route("/poll", get(poll))
        .route("/result", post(result))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state);

    if config.quiet {
        router
    } else {
        router.layer(TraceLayer::new_for_http())
    }
}

async fn ping(State(state): State<HttpState>, Query(query): Query<ClientQuery>) -> Json<Value> {
    state.queue.mark_seen(&query.client_id());
    Json(json!({ "ok": true, "server_time": epoch_seconds() }))
}

async fn poll(State(state): State<HttpState>, Query(query): Query<ClientQuery>) -> Json<Value> {
    let client_id = query.client_id();
    state.queue.mark_seen(&client_id);

    let queue = state.queue.clone();
    let timeout = state.poll_timeout;
    let job = tokio::task::spawn_blocking(move || queue.wait_for_job(&client_id, timeout))
        .await
        .unwrap_or_else(|err| {
            error!("poll wait panicked: {err}");
            None
        });

    Json(json!({ "ok": true, "job": job }))
}

async fn result(State(state): State<HttpState>, body: Bytes) -> (StatusCode, Json<Value>) {
    // An empty body reads as an empty object, which then fails the job_id
    // check rather than the JSON parse.
    let raw: &[u8] = if body.is_empty() { b"{}" } else { &body };
    let payload: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "ok": false, "error": "invalid_json" })),
            );
        }
    };

    let Some(job_id) = payload
        .get("job_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "missing_job_id" })),
        );
    };

    state.queue.store_result(&job_id, payload);
    (StatusCode::OK, Json(json!({ "ok": true })))
}

async fn health() -> Json<Value> {
    // Wire-compat: the field carries epoch seconds, not elapsed time.
    Json(json!({ "ok": true, "uptime": epoch_seconds() }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "ok": false, "error": "not_found" })),
    )
}

/// Bind and serve until the process exits.
pub async fn serve(queue: Arc<JobQueue>, config: BridgeConfig) -> Result<()> {
    let addr = format!("{}:{}", config.bind_display(), config.http_port);
    let app = router(queue, &config);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    info!("HTTP server listening on {addr}");
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}

/// Run the HTTP transport on a detached thread with its own runtime.
///
/// The stdio loop owns the process lifetime; this thread dies with it.
/// Ctrl-C is watched here so an interrupted bridge still exits with 0.
pub fn spawn(queue: Arc<JobQueue>, config: BridgeConfig) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("http-transport".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to start HTTP runtime: {err:#}");
                    std::process::exit(1);
                }
            };

            runtime.block_on(async {
                tokio::select! {
                    served = serve(queue, config) => {
                        if let Err(err) = served {
                            error!("HTTP transport failed: {err:#}");
                            std::process::exit(1);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("interrupt received, shutting down");
                        std::process::exit(0);
                    }
                }
            });
        })
        .context("failed to spawn HTTP transport thread")
}
