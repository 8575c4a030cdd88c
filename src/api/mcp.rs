//! MCP endpoint: JSON-RPC 2.0 requests over a single POST
//!
//! Supports `initialize`, `ping`, `tools/list` and `tools/call`. Each request gets
//! one JSON response. Notifications (no `id`) are acknowledged with 202 and no body.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::api::tools::{SERVER_NAME, TextContent, ToolResponse};
use crate::service::{LegalResearchService, ToolDescriptor, ToolError, ToolName};

/// Newest first; an unsupported client version is answered with the first entry
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request
#[derive(Debug, Deserialize, ToSchema)]
pub struct JsonRpcRequest {
    /// Must be "2.0"
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default)]
    #[schema(value_type = Object)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub params: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: i32,
    pub message: String,
}

/// JSON-RPC response carrying either `result` or `error`
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[schema(value_type = Object)]
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(ErrorDetail {
                code: error.code,
                message: error.message,
            }),
        }
    }
}

#[derive(Debug)]
struct RpcError {
    code: i32,
    message: String,
}

impl RpcError {
    fn new(code: i32, message: String) -> Self {
        Self { code, message }
    }
}

impl From<ToolError> for RpcError {
    fn from(err: ToolError) -> Self {
        RpcError::new(INVALID_PARAMS, err.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::new(INTERNAL_ERROR, format!("Internal error: {}", err))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: &'static str,
    capabilities: ServerCapabilities,
    server_info: Implementation,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct Implementation {
    name: &'static str,
    version: &'static str,
}

/// Tool entry as advertised by `tools/list`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct McpTool {
    name: String,
    title: String,
    description: String,
    input_schema: Value,
    annotations: ToolAnnotations,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolAnnotations {
    read_only_hint: bool,
    destructive_hint: bool,
    idempotent_hint: bool,
    open_world_hint: bool,
}

impl From<ToolDescriptor> for McpTool {
    fn from(descriptor: ToolDescriptor) -> Self {
        Self {
            name: descriptor.name,
            title: descriptor.title,
            description: descriptor.description,
            input_schema: descriptor.input_schema,
            annotations: ToolAnnotations {
                read_only_hint: descriptor.hints.read_only,
                destructive_hint: descriptor.hints.destructive,
                idempotent_hint: descriptor.hints.idempotent,
                open_world_hint: descriptor.hints.open_world,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ToolsListResult {
    tools: Vec<McpTool>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

fn initialize_result(params: &Value) -> InitializeResult {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let protocol_version = SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| Some(*v) == requested)
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

    InitializeResult {
        protocol_version,
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: Implementation {
            name: SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
    }
}

async fn dispatch(
    service: &LegalResearchService,
    method: &str,
    params: Value,
) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(serde_json::to_value(initialize_result(&params))?),
        "ping" => Ok(json!({})),
        "tools/list" => {
            let tools = ToolName::ALL
                .iter()
                .map(|t| McpTool::from(t.descriptor()))
                .collect();
            Ok(serde_json::to_value(ToolsListResult { tools })?)
        }
        "tools/call" => {
            let params: CallToolParams = serde_json::from_value(params).map_err(|e| {
                RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e))
            })?;
            let tool: ToolName = params.name.parse()?;
            let text = service.call(tool, params.arguments).await?;

            tracing::info!(tool = %tool, bytes = text.len(), "MCP tool call complete");

            Ok(serde_json::to_value(ToolResponse {
                content: vec![TextContent {
                    kind: "text".to_string(),
                    text,
                }],
            })?)
        }
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        )),
    }
}

/// Handle one MCP JSON-RPC message
#[utoipa::path(
    post,
    path = "/mcp",
    request_body = JsonRpcRequest,
    responses(
        (status = 200, description = "JSON-RPC response", body = JsonRpcResponse),
        (status = 202, description = "Notification accepted"),
        (status = 400, description = "Malformed JSON-RPC message", body = JsonRpcResponse)
    ),
    tag = "mcp"
)]
#[post("/mcp")]
pub async fn mcp(service: web::Data<LegalResearchService>, body: web::Bytes) -> HttpResponse {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse MCP request");
            return HttpResponse::BadRequest().json(JsonRpcResponse::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    if request.jsonrpc != "2.0" {
        return HttpResponse::BadRequest().json(JsonRpcResponse::failure(
            request.id.unwrap_or(Value::Null),
            RpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\"".to_string()),
        ));
    }

    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "MCP notification");
        return HttpResponse::Accepted().finish();
    };

    tracing::debug!(method = %request.method, "MCP request");

    let response = match dispatch(&service, &request.method, request.params).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => {
            tracing::warn!(
                method = %request.method,
                code = e.code,
                message = %e.message,
                "MCP request failed"
            );
            JsonRpcResponse::failure(id, e)
        }
    };

    HttpResponse::Ok().json(response)
}

/// Configure MCP routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(mcp);
}
