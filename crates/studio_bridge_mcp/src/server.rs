//! Stdio JSON-RPC transport.
//!
//! Reads one JSON-RPC message per line from standard input and writes one
//! response per line to standard output. Standard error carries operator
//! logging only; stdout belongs to the protocol.
//!
//! This is a synchronous blocking loop; the stdio side needs no async
//! runtime. Tool calls block the loop until the plugin answers or the job
//! times out; the agent is expected to be serial over stdio.

use crate::config::{BridgeConfig, SERVER_NAME};
use crate::dispatch::Dispatcher;
use crate::protocol::{
    methods, ErrorCode, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, ToolsListResult,
    MCP_PROTOCOL_VERSION,
};
use crate::queue::JobQueue;
use crate::tools::ToolCatalog;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// The agent-facing half of the bridge.
pub struct BridgeServer {
    catalog: Arc<ToolCatalog>,
    dispatcher: Dispatcher,
}

impl BridgeServer {
    pub fn new(queue: Arc<JobQueue>, config: &BridgeConfig) -> Self {
        let catalog = Arc::new(ToolCatalog::new());
        let dispatcher = Dispatcher::new(queue, catalog.clone(), config.job_timeout);
        Self {
            catalog,
            dispatcher,
        }
    }

    /// Run over real stdin/stdout. Returns on EOF.
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_loop(stdin.lock(), stdout.lock())
    }

    /// Transport loop over any line-oriented reader/writer pair.
    ///
    /// Blank lines are skipped. Lines that are not JSON, or that carry no
    /// `method`, produce no reply: JSON-RPC requires no response for
    /// messages that cannot be identified.
    pub fn run_loop<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> Result<()> {
        info!("stdio transport started");

        for line in reader.lines() {
            let line = line.context("failed to read from stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(line) {
                Ok(request) => request,
                Err(err) => {
                    debug!("dropping malformed line: {err}");
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                self.write_response(&mut writer, &response)?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single request. Returns `None` for notifications, which never
    /// receive a reply.
    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.method == methods::INITIALIZED {
            return None;
        }

        let id = match request.id {
            Some(id) => id,
            None => {
                debug!(method = %request.method, "ignoring notification");
                return None;
            }
        };

        let response = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(id),
            methods::TOOLS_LIST => self.handle_tools_list(id),
            methods::TOOLS_CALL => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                Some(id),
                JsonRpcError::new(ErrorCode::MethodNotFound, "Method not found"),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: RequestId) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {},
            },
        };

        JsonRpcResponse::success(Some(id), serde_json::to_value(result).unwrap())
    }

    fn handle_tools_list(&self, id: RequestId) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.catalog.definitions(),
        };

        JsonRpcResponse::success(Some(id), serde_json::to_value(result).unwrap())
    }

    fn handle_tools_call(&mut self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(err)) => {
                return JsonRpcResponse::error(
                    Some(id),
                    JsonRpcError::new(
                        ErrorCode::InvalidParams,
                        format!("Invalid tool call params: {err}"),
                    ),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    Some(id),
                    JsonRpcError::new(ErrorCode::InvalidParams, "Missing tool call params"),
                );
            }
        };

        info!("tool call: {}", params.name);

        // Tool failures stay inside the envelope; the JSON-RPC layer sees
        // every completed call as a success.
        let envelope = self.dispatcher.call_tool(&params.name, params.arguments);
        JsonRpcResponse::success(Some(id), serde_json::to_value(envelope).unwrap())
    }

    /// Write one response line and flush.
    fn write_response<W: Write>(&self, writer: &mut W, response: &JsonRpcResponse) -> Result<()> {
        let json = serde_json::to_string(response)?;
        debug!("sending: {json}");
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn run_lines(server: &mut BridgeServer, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        server
            .run_loop(Cursor::new(input.to_string()), &mut output)
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn test_server() -> (BridgeServer, Arc<JobQueue>) {
        let queue = Arc::new(JobQueue::new());
        (BridgeServer::new(queue.clone(), &BridgeConfig::default()), queue)
    }

    #[test]
    fn test_initialize_reply() {
        let (mut server, _queue) = test_server();
        let replies = run_lines(&mut server, "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n");

        assert_eq!(replies.len(), 1);
        let result = &replies[0]["result"];
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "roblox-mcp-bridge");
        assert_eq!(result["capabilities"]["tools"], json!({}));
    }

    #[test]
    fn test_tools_list_reply() {
        let (mut server, _queue) = test_server();
        let replies = run_lines(&mut server, "{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"tools/list\"}\n");

        let tools = replies[0]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 56);
        assert!(tools.iter().any(|t| t["name"] == "roblox_get_tree"));
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_unknown_method_error() {
        let (mut server, _queue) = test_server();
        let replies = run_lines(&mut server, "{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"resources/list\"}\n");

        assert_eq!(replies[0]["error"]["code"], -32601);
        assert_eq!(replies[0]["error"]["message"], "Method not found");
    }

    #[test]
    fn test_notifications_get_no_reply() {
        let (mut server, _queue) = test_server();
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"tools/list\"}\n",
        );
        let replies = run_lines(&mut server, input);
        assert!(replies.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (mut server, _queue) = test_server();
        let input = concat!(
            "this is not json\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"id\":3}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"initialize\"}\n",
        );
        let replies = run_lines(&mut server, input);

        // Only the well-formed request gets a reply.
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["id"], 4);
    }

    #[test]
    fn test_tools_call_without_params_is_invalid() {
        let (mut server, _queue) = test_server();
        let replies = run_lines(&mut server, "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/call\"}\n");

        assert_eq!(replies[0]["error"]["code"], -32602);
    }

    #[test]
    fn test_tools_call_not_connected_envelope() {
        let (mut server, _queue) = test_server();
        let input = "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"roblox_list_services\",\"arguments\":{}}}\n";
        let replies = run_lines(&mut server, input);

        // The call fails, but at the JSON-RPC layer it is a success.
        let result = &replies[0]["result"];
        assert!(replies[0].get("error").is_none());
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Studio is not connected"));
    }

    #[test]
    fn test_string_request_ids_echo_back() {
        let (mut server, _queue) = test_server();
        let replies = run_lines(
            &mut server,
            "{\"jsonrpc\":\"2.0\",\"id\":\"req-1\",\"method\":\"initialize\"}\n",
        );
        assert_eq!(replies[0]["id"], "req-1");
    }
}
