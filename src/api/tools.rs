//! REST API endpoints for the research tools

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::service::{LegalResearchService, ToolDescriptor, ToolName};

pub(crate) const SERVER_NAME: &str = "japan-legal-mcp-server";

#[derive(Debug, Serialize, ToSchema)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// A single text block of tool output
#[derive(Debug, Serialize, ToSchema)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
}

/// Server identification
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server information", body = ServerInfo)
    ),
    tag = "tools"
)]
#[get("/")]
pub async fn server_info() -> impl Responder {
    HttpResponse::Ok().json(ServerInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "日本の法律・判例・労災認定基準データベースMCPサーバー".to_string(),
    })
}

/// List available tools
#[utoipa::path(
    get,
    path = "/v1/tools",
    responses(
        (status = 200, description = "Tool descriptors", body = ToolListResponse)
    ),
    tag = "tools"
)]
#[get("/v1/tools")]
pub async fn list_tools() -> impl Responder {
    HttpResponse::Ok().json(ToolListResponse {
        tools: ToolName::ALL.iter().map(ToolName::descriptor).collect(),
    })
}

/// Call a tool with a JSON argument object
#[utoipa::path(
    post,
    path = "/v1/tools/{name}",
    params(
        ("name" = String, Path, description = "Tool name, e.g. search_harassment_cases")
    ),
    responses(
        (status = 200, description = "Tool output", body = ToolResponse),
        (status = 400, description = "Invalid arguments", body = crate::api::error::ErrorResponse),
        (status = 404, description = "Unknown tool", body = crate::api::error::ErrorResponse)
    ),
    tag = "tools"
)]
#[post("/v1/tools/{name}")]
pub async fn call_tool(
    service: web::Data<LegalResearchService>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let tool: ToolName = path.into_inner().parse()?;
    let text = service.call(tool, body.into_inner()).await?;

    tracing::info!(tool = %tool, bytes = text.len(), "Tool call complete");

    Ok(HttpResponse::Ok().json(ToolResponse {
        content: vec![TextContent {
            kind: "text".to_string(),
            text,
        }],
    }))
}

/// Configure tool routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(server_info)
        .service(list_tools)
        .service(call_tool);
}
