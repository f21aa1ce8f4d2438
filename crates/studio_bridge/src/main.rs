//! Roblox Studio MCP bridge launcher.
//!
//! Foreground lifetime is the stdio JSON-RPC loop; the HTTP long-poll
//! transport for the Studio plugin runs on a detached background thread.
//! Exits 0 on clean stdin EOF or interrupt.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use studio_bridge_mcp::config::{DEFAULT_HTTP_PORT, SERVER_NAME};
use studio_bridge_mcp::{http, BridgeConfig, BridgeServer, JobQueue};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "studio-bridge", about = "MCP bridge between an AI agent and Roblox Studio", version)]
struct Cli {
    /// HTTP bind address (empty = all interfaces)
    #[arg(long, default_value = "")]
    http_bind: String,

    /// HTTP port the Studio plugin polls
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT)]
    http_port: u16,

    /// Seconds a /poll request is held open waiting for a job
    #[arg(long, default_value_t = 5)]
    poll_timeout: u64,

    /// Seconds to wait for Studio to answer a tool call
    #[arg(long, default_value_t = 30)]
    job_timeout: u64,

    /// Suppress per-request HTTP access logging
    #[arg(long)]
    quiet: bool,

    /// Enable verbose logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = BridgeConfig {
        http_bind: cli.http_bind,
        http_port: cli.http_port,
        poll_timeout: Duration::from_secs(cli.poll_timeout),
        job_timeout: Duration::from_secs(cli.job_timeout),
        quiet: cli.quiet,
    };

    info!(
        "{SERVER_NAME} starting: http {}:{}, poll timeout {}s, job timeout {}s",
        config.bind_display(),
        config.http_port,
        config.poll_timeout.as_secs(),
        config.job_timeout.as_secs(),
    );

    let queue = Arc::new(JobQueue::new());
    // Detached on purpose: the stdio loop below owns the process lifetime.
    let _http = http::spawn(queue.clone(), config.clone())?;

    let mut server = BridgeServer::new(queue, &config);
    server.run()
}

/// Stderr-only logging; stdout carries the JSON-RPC protocol.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "studio_bridge=debug,studio_bridge_mcp=debug,tower_http=debug"
    } else {
        "studio_bridge=info,studio_bridge_mcp=info,tower_http=debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
