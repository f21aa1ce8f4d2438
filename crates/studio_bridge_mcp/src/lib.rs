//! MCP bridge between an AI agent and the Roblox Studio plugin.
//!
//! The agent speaks line-delimited JSON-RPC 2.0 over stdio; the Studio plugin
//! is sandboxed and can only make outbound HTTP requests. The bridge inverts
//! the direction: the plugin long-polls for work, and tool calls from the
//! agent are dispatched onto that poll stream as jobs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     AI Agent (MCP client)                     │
//! └──────────────────────────────────────────────────────────────┘
//!                 │ JSON-RPC 2.0 over stdio (one line per message)
//!                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  server    │ stdio loop: initialize, tools/list, tools/call   │
//! │  dispatch  │ tool call → job, await result, format envelope   │
//! │  tools     │ static catalog of 56 tool descriptors            │
//! │  queue     │ mutex+condvar broker: mailboxes, results, seen   │
//! │  http      │ axum: /ping /poll /result /health                │
//! └──────────────────────────────────────────────────────────────┘
//!                 ▲ outbound HTTP long-poll
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Roblox Studio plugin (executor)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stdio loop and the HTTP server communicate only through the
//! [`queue::JobQueue`]; there is no other shared state. Tool payloads are
//! opaque JSON; what a job means is the plugin's business.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod protocol;
pub mod queue;
pub mod server;
pub mod tools;

// Re-exports for convenience
pub use config::{BridgeConfig, DEFAULT_CLIENT_ID, LIVENESS_WINDOW};
pub use dispatch::{DispatchError, Dispatcher};
pub use protocol::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use queue::{Job, JobQueue};
pub use server::BridgeServer;
pub use tools::ToolCatalog;
