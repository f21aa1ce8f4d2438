//! Tool-call dispatcher.
//!
//! Translates a `tools/call` into a queued job, waits for the plugin's
//! result, and formats the envelope the agent sees. The connection-status
//! pseudo-tool is answered here without touching the plugin.
//!
//! Every error surface is a fixed, user-facing message carried by
//! [`DispatchError`]; tool failures never escalate to JSON-RPC errors.

use crate::config::{DEFAULT_CLIENT_ID, LIVENESS_WINDOW};
use crate::protocol::ToolCallResult;
use crate::queue::{epoch_seconds, Job, JobQueue};
use crate::tools::{ToolCatalog, CONNECTION_STATUS_TOOL};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Job types whose `code` argument may arrive under an alias.
const CODE_ALIASED_JOB_TYPES: [&str; 2] = ["run_code", "run_script_in_play_mode"];

/// Everything that can go wrong with one tool call. The `Display` strings
/// are the exact texts shown to the agent inside the error envelope.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Studio is not connected. Make sure the Roblox Studio plugin is installed and 'Start Bridge Polling' has been clicked.")]
    NotConnected,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Timed out waiting for Studio to respond. Check that the plugin is running and connected.")]
    Timeout,

    /// Failure reported by the plugin itself (`ok: false` in the result)
    #[error("{0}")]
    Plugin(String),
}

/// Glues the stdio transport to the job queue.
pub struct Dispatcher {
    queue: Arc<JobQueue>,
    catalog: Arc<ToolCatalog>,
    job_timeout: Duration,
}

impl Dispatcher {
    pub fn new(queue: Arc<JobQueue>, catalog: Arc<ToolCatalog>, job_timeout: Duration) -> Self {
        Self {
            queue,
            catalog,
            job_timeout,
        }
    }

    /// Entry point for tools/call. Always produces an envelope; success
    /// payloads are serialized as two-space-indented JSON text.
    pub fn call_tool(&self, name: &str, arguments: Value) -> ToolCallResult {
        match self.dispatch(name, arguments) {
            Ok(payload) => match serde_json::to_string_pretty(&payload) {
                Ok(text) => ToolCallResult::text(text),
                Err(err) => ToolCallResult::error(format!("Failed to serialize tool result: {err}")),
            },
            Err(err) => ToolCallResult::error(err.to_string()),
        }
    }

    fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, DispatchError> {
        if name == CONNECTION_STATUS_TOOL {
            return Ok(self.connection_status(&arguments));
        }

        let client_id = client_id_of(&arguments);
        if !self.queue.is_connected(&client_id, LIVENESS_WINDOW) {
            return Err(DispatchError::NotConnected);
        }

        let job_type = self
            .catalog
            .get(name)
            .and_then(|spec| spec.job_type)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let job = mint_job(job_type, arguments);
        let job_id = job.job_id.clone();
        debug!(%job_id, job_type, %client_id, "enqueueing job");
        self.queue.enqueue(&client_id, job);

        let Some(result) = self.queue.wait_for_result(&job_id, self.job_timeout) else {
            // Best-effort: if the poller already took the job, any late
            // result lands in a slot nobody will read.
            let removed = self.queue.cancel_job(&job_id);
            warn!(%job_id, removed, "timed out waiting for result");
            return Err(DispatchError::Timeout);
        };

        if result.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            Ok(result.get("result").cloned().unwrap_or(Value::Null))
        } else {
            let message = result
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("Studio error");
            Err(DispatchError::Plugin(message.to_string()))
        }
    }

    /// Local answer for the connection-status pseudo-tool. Never blocks.
    fn connection_status(&self, arguments: &Value) -> Value {
        let client_id = client_id_of(arguments);
        match self.queue.last_seen_age(&client_id) {
            None => json!({ "connected": false, "client_id": client_id }),
            Some(age) => {
                let age = age.as_secs_f64();
                json!({
                    "connected": age < LIVENESS_WINDOW.as_secs_f64(),
                    "client_id": client_id,
                    "last_seen_seconds": (age * 10.0).round() / 10.0,
                })
            }
        }
    }
}

/// Resolve the client id from tool arguments, defaulting when absent or empty.
pub(crate) fn client_id_of(arguments: &Value) -> String {
    arguments
        .get("client_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_CLIENT_ID)
        .to_string()
}

/// Mint an immutable job from a catalog job type and raw tool arguments.
///
/// Arguments pass through verbatim except the one aliasing rule: for code
/// execution jobs, a missing or empty `code` is backfilled from `script`,
/// then `source`.
fn mint_job(job_type: &str, arguments: Value) -> Job {
    let mut args = match arguments {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    if CODE_ALIASED_JOB_TYPES.contains(&job_type) && !has_code(&args) {
        let fallback = ["script", "source"]
            .iter()
            .find_map(|key| {
                args.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
            })
            .unwrap_or(Value::Null);
        args["code"] = fallback;
    }

    Job {
        job_id: mint_job_id(),
        job_type: job_type.to_string(),
        args,
        created_at: epoch_seconds(),
    }
}

fn has_code(args: &Value) -> bool {
    args.get("code")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// `job_` + 12 hex chars; collisions are negligible over a process lifetime.
fn mint_job_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("job_{}", &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_JOB_TIMEOUT;

    fn dispatcher_with_timeout(job_timeout: Duration) -> (Dispatcher, Arc<JobQueue>) {
        let queue = Arc::new(JobQueue::new());
        let catalog = Arc::new(ToolCatalog::new());
        (
            Dispatcher::new(queue.clone(), catalog, job_timeout),
            queue,
        )
    }

    fn dispatcher() -> (Dispatcher, Arc<JobQueue>) {
        dispatcher_with_timeout(DEFAULT_JOB_TIMEOUT)
    }

    fn envelope_text(envelope: &ToolCallResult) -> &str {
        let crate::protocol::ContentBlock::Text { text } = &envelope.content[0];
        text
    }

    /// Stand-in for the plugin: answer the next job for `client_id` with the
    /// given result payload (minus job_id, which is filled in).
    fn answer_next_job(queue: Arc<JobQueue>, client_id: &str, mut result: Value) -> std::thread::JoinHandle<Job> {
        let client_id = client_id.to_string();
        std::thread::spawn(move || {
            let job = queue
                .wait_for_job(&client_id, Duration::from_secs(2))
                .expect("no job delivered");
            result["job_id"] = Value::String(job.job_id.clone());
            queue.store_result(&job.job_id, result);
            job
        })
    }

    #[test]
    fn test_not_connected_error() {
        let (dispatcher, _queue) = dispatcher();
        let envelope = dispatcher.call_tool("roblox_list_services", json!({}));

        assert!(envelope.is_error);
        assert!(envelope_text(&envelope).contains("Studio is not connected"));
    }

    #[test]
    fn test_unknown_tool_error() {
        let (dispatcher, queue) = dispatcher();
        queue.mark_seen("studio");

        let envelope = dispatcher.call_tool("roblox_nonsense", json!({}));

        assert!(envelope.is_error);
        assert_eq!(envelope_text(&envelope), "Unknown tool: roblox_nonsense");
    }

    #[test]
    fn test_success_envelope_is_pretty_json() {
        let (dispatcher, queue) = dispatcher();
        queue.mark_seen("studio");
        let plugin = answer_next_job(
            queue.clone(),
            "studio",
            json!({ "ok": true, "result": { "services": ["Workspace", "Lighting"] } }),
        );

        let envelope = dispatcher.call_tool("roblox_list_services", json!({ "client_id": "studio" }));
        let job = plugin.join().unwrap();

        assert_eq!(job.job_type, "list_services");
        assert!(job.job_id.starts_with("job_"));
        assert_eq!(job.job_id.len(), "job_".len() + 12);
        assert!(!envelope.is_error);
        assert_eq!(
            envelope_text(&envelope),
            "{\n  \"services\": [\n    \"Workspace\",\n    \"Lighting\"\n  ]\n}"
        );
    }

    #[test]
    fn test_plugin_reported_failure() {
        let (dispatcher, queue) = dispatcher();
        queue.mark_seen("studio");
        let plugin = answer_next_job(
            queue.clone(),
            "studio",
            json!({ "ok": false, "error": "instance not found" }),
        );

        let envelope = dispatcher.call_tool("roblox_get_instance", json!({ "path": "Workspace.Missing" }));
        plugin.join().unwrap();

        assert!(envelope.is_error);
        assert_eq!(envelope_text(&envelope), "instance not found");
    }

    #[test]
    fn test_plugin_failure_without_message_falls_back() {
        let (dispatcher, queue) = dispatcher();
        queue.mark_seen("studio");
        let plugin = answer_next_job(queue.clone(), "studio", json!({ "ok": false }));

        let envelope = dispatcher.call_tool("roblox_undo", json!({}));
        plugin.join().unwrap();

        assert!(envelope.is_error);
        assert_eq!(envelope_text(&envelope), "Studio error");
    }

    #[test]
    fn test_timeout_cancels_pending_job() {
        let (dispatcher, queue) = dispatcher_with_timeout(Duration::from_millis(50));
        queue.mark_seen("studio");

        let envelope = dispatcher.call_tool("roblox_list_services", json!({}));

        assert!(envelope.is_error);
        assert!(envelope_text(&envelope).contains("Timed out"));
        // The cancelled job must be gone from the mailbox.
        assert_eq!(queue.pending_jobs("studio"), 0);
    }

    #[test]
    fn test_code_aliasing_from_script() {
        let (dispatcher, queue) = dispatcher_with_timeout(Duration::from_millis(100));
        queue.mark_seen("studio");
        let plugin = answer_next_job(queue.clone(), "studio", json!({ "ok": true, "result": null }));

        dispatcher.call_tool(
            "roblox_run_code",
            json!({ "script": "print(1)", "client_id": "studio" }),
        );
        let job = plugin.join().unwrap();

        assert_eq!(job.args["code"], "print(1)");
        // The original key is still forwarded verbatim.
        assert_eq!(job.args["script"], "print(1)");
    }

    #[test]
    fn test_code_aliasing_prefers_existing_code() {
        let job = mint_job("run_code", json!({ "code": "a()", "script": "b()" }));
        assert_eq!(job.args["code"], "a()");
    }

    #[test]
    fn test_code_aliasing_falls_back_to_source() {
        let job = mint_job("run_script_in_play_mode", json!({ "source": "c()" }));
        assert_eq!(job.args["code"], "c()");
    }

    #[test]
    fn test_code_aliasing_null_when_nothing_given() {
        let job = mint_job("run_code", json!({}));
        assert!(job.args["code"].is_null());
    }

    #[test]
    fn test_no_aliasing_for_other_job_types() {
        let job = mint_job("write_script", json!({ "source": "print(1)" }));
        assert!(job.args.get("code").is_none());
    }

    #[test]
    fn test_connection_status_never_seen() {
        let (dispatcher, _queue) = dispatcher();

        let envelope = dispatcher.call_tool(CONNECTION_STATUS_TOOL, json!({}));

        assert!(!envelope.is_error);
        let status: Value = serde_json::from_str(envelope_text(&envelope)).unwrap();
        assert_eq!(status["connected"], false);
        assert_eq!(status["client_id"], "studio");
        assert!(status.get("last_seen_seconds").is_none());
    }

    #[test]
    fn test_connection_status_recently_seen() {
        let (dispatcher, queue) = dispatcher();
        queue.mark_seen("alt");

        let envelope = dispatcher.call_tool(CONNECTION_STATUS_TOOL, json!({ "client_id": "alt" }));

        let status: Value = serde_json::from_str(envelope_text(&envelope)).unwrap();
        assert_eq!(status["connected"], true);
        assert_eq!(status["client_id"], "alt");
        assert!(status["last_seen_seconds"].as_f64().unwrap() < 1.0);
    }

    #[test]
    fn test_client_id_defaults() {
        assert_eq!(client_id_of(&json!({})), "studio");
        assert_eq!(client_id_of(&json!({ "client_id": "" })), "studio");
        assert_eq!(client_id_of(&json!({ "client_id": "alt" })), "alt");
        assert_eq!(client_id_of(&Value::Null), "studio");
    }

    #[test]
    fn test_jobs_delivered_in_call_order() {
        let (dispatcher, queue) = dispatcher_with_timeout(Duration::from_secs(2));
        queue.mark_seen("studio");

        // Two calls from two agent threads; enqueue order is observable on
        // the poll stream even though each call waits on its own result.
        let d = Arc::new(dispatcher);
        let first = {
            let d = d.clone();
            std::thread::spawn(move || d.call_tool("roblox_undo", json!({})))
        };
        std::thread::sleep(Duration::from_millis(30));
        let second = {
            let d = d.clone();
            std::thread::spawn(move || d.call_tool("roblox_redo", json!({})))
        };

        let a = queue.wait_for_job("studio", Duration::from_secs(1)).unwrap();
        let b = queue.wait_for_job("studio", Duration::from_secs(1)).unwrap();
        assert_eq!(a.job_type, "undo");
        assert_eq!(b.job_type, "redo");

        queue.store_result(&a.job_id, json!({ "job_id": a.job_id, "ok": true, "result": null }));
        queue.store_result(&b.job_id, json!({ "job_id": b.job_id, "ok": true, "result": null }));
        assert!(!first.join().unwrap().is_error);
        assert!(!second.join().unwrap().is_error);
    }
}
