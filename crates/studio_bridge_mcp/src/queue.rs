//! Job broker shared by the stdio and HTTP transports.
//!
//! A single mutex guards per-client mailboxes, result slots, and liveness
//! timestamps; one condition variable is broadcast on every state change and
//! every waiter re-checks its predicate after waking. Waits never hold the
//! lock while sleeping and are always bounded by a deadline.
//!
//! The two transports share no other state: the stdio dispatcher enqueues
//! jobs and blocks on results, the HTTP side pops jobs for pollers and stores
//! uploaded results.

use std::collections::{HashMap, VecDeque};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current wall-clock time as fractional epoch seconds, the unit used for
/// `created_at`, `server_time`, and `uptime` on the wire.
pub fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// One unit of work for the plugin. Immutable once minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Opaque unique id, `job_` + 12 hex chars
    pub job_id: String,

    /// Operation tag the plugin dispatches on
    #[serde(rename = "type")]
    pub job_type: String,

    /// Tool arguments, forwarded verbatim (modulo the `code` aliasing rule)
    pub args: Value,

    /// Epoch seconds at mint time
    pub created_at: f64,
}

#[derive(Default)]
struct QueueState {
    /// Per-client FIFO mailboxes
    pending: HashMap<String, VecDeque<Job>>,
    /// Uploaded results keyed by job id, filled once, consumed once
    results: HashMap<String, Value>,
    /// Monotonic liveness timestamps keyed by client id
    last_seen: HashMap<String, Instant>,
}

/// Thread-safe mailbox matching enqueued jobs to uploaded results.
pub struct JobQueue {
    state: Mutex<QueueState>,
    cond: Condvar,
}

impl JobQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            cond: Condvar::new(),
        }
    }

    /// A poisoned lock only means another thread panicked mid-update of plain
    /// maps; the data is still structurally sound, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that a client polled or pinged just now.
    pub fn mark_seen(&self, client_id: &str) {
        let mut state = self.lock();
        state.last_seen.insert(client_id.to_string(), Instant::now());
        self.cond.notify_all();
    }

    /// Time since the client was last seen, if ever.
    pub fn last_seen_age(&self, client_id: &str) -> Option<Duration> {
        self.lock().last_seen.get(client_id).map(Instant::elapsed)
    }

    /// Whether the client was seen within the liveness window.
    pub fn is_connected(&self, client_id: &str, max_age: Duration) -> bool {
        self.last_seen_age(client_id).is_some_and(|age| age < max_age)
    }

    /// Append a job to the client's mailbox and wake any pollers.
    pub fn enqueue(&self, client_id: &str, job: Job) {
        let mut state = self.lock();
        state
            .pending
            .entry(client_id.to_string())
            .or_default()
            .push_back(job);
        self.cond.notify_all();
    }

    /// Block until the client's mailbox has a job, then pop the head.
    /// Returns `None` once the deadline passes with the mailbox still empty.
    pub fn wait_for_job(&self, client_id: &str, timeout: Duration) -> Option<Job> {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if let Some(job) = state.pending.get_mut(client_id).and_then(|q| q.pop_front()) {
                return Some(job);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            state = self
                .cond
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// File an uploaded result and wake the waiting dispatcher.
    pub fn store_result(&self, job_id: &str, result: Value) {
        let mut state = self.lock();
        state.results.insert(job_id.to_string(), result);
        self.cond.notify_all();
    }

    /// Block until the result slot for `job_id` is filled, then consume it.
    /// Each result is returned at most once.
    pub fn wait_for_result(&self, job_id: &str, timeout: Duration) -> Option<Value> {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if let Some(result) = state.results.remove(job_id) {
                return Some(result);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            state = self
                .cond
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Remove the first still-pending job with this id from any mailbox.
    /// Best-effort: a job already handed to a poller cannot be recalled.
    pub fn cancel_job(&self, job_id: &str) -> bool {
        let mut state = self.lock();
        for queue in state.pending.values_mut() {
            if let Some(pos) = queue.iter().position(|job| job.job_id == job_id) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of jobs still waiting in the client's mailbox.
    pub fn pending_jobs(&self, client_id: &str) -> usize {
        self.lock().pending.get(client_id).map_or(0, VecDeque::len)
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
