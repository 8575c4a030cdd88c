//! OpenAPI specification endpoint

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::health::HealthStatus;
use crate::api::mcp::{ErrorDetail, JsonRpcRequest, JsonRpcResponse};
use crate::api::tools::{ServerInfo, TextContent, ToolListResponse, ToolResponse};
use crate::service::tools::{ToolDescriptor, ToolHints};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Japan Legal Research API",
        description = "Workplace-harassment case law and rosai recognition research tools"
    ),
    paths(
        crate::api::mcp::mcp,
        crate::api::tools::server_info,
        crate::api::tools::list_tools,
        crate::api::tools::call_tool,
        crate::api::health::liveness,
    ),
    components(schemas(
        JsonRpcRequest,
        JsonRpcResponse,
        ErrorDetail,
        ServerInfo,
        ToolListResponse,
        ToolDescriptor,
        ToolHints,
        ToolResponse,
        TextContent,
        ErrorResponse,
        HealthStatus,
    )),
    tags(
        (name = "mcp", description = "Model Context Protocol endpoint"),
        (name = "tools", description = "Legal research tools"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json);
}
