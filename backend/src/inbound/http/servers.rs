//! Server provisioning and lifecycle HTTP handlers.
//!
//! ```text
//! GET  /api/v1/servers
//! POST /api/v1/servers
//! PUT  /api/v1/servers/{id}/start
//! PUT  /api/v1/servers/{id}/stop
//! PUT  /api/v1/servers/{id}/config
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CreateServerRequest, GameServer, ProvisionedServer, ServerConfigUpdate, ServerId,
    ServerStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Full server record as shown in the panel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Game template identifier.
    pub template: String,
    /// Lifecycle status.
    pub status: ServerStatus,
    /// Public IPv4 address.
    pub ip: String,
    /// Reserved game port.
    pub port: u16,
    /// FTP host.
    pub ftp_host: String,
    /// FTP port.
    pub ftp_port: u16,
    /// Generated FTP account name.
    pub ftp_username: String,
    /// Generated FTP account password.
    pub ftp_password: String,
    /// Player capacity.
    pub max_players: i32,
    /// Monitor-written CPU usage percentage.
    pub cpu_usage: f32,
    /// Monitor-written RAM usage percentage.
    pub ram_usage: f32,
    /// Monitor-written connected player count.
    pub current_players: i32,
    /// Restart-after-crash flag.
    pub auto_restart: bool,
    /// Nightly backup flag.
    pub backup_enabled: bool,
    /// Whether the record consumed the free slot.
    pub is_free: bool,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<GameServer> for ServerResponse {
    fn from(server: GameServer) -> Self {
        Self {
            id: *server.id.as_uuid(),
            name: server.name,
            template: server.template,
            status: server.status,
            ip: server.address.ip,
            port: server.address.port,
            ftp_host: server.ftp.host,
            ftp_port: server.ftp.port,
            ftp_username: server.ftp.username,
            ftp_password: server.ftp.password,
            max_players: server.max_players,
            cpu_usage: server.telemetry.cpu_usage,
            ram_usage: server.telemetry.ram_usage,
            current_players: server.telemetry.current_players,
            auto_restart: server.auto_restart,
            backup_enabled: server.backup_enabled,
            is_free: server.is_free,
            created_at: server.created_at.to_rfc3339(),
        }
    }
}

/// Envelope for the server listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerListResponse {
    /// Servers owned by the caller, newest first.
    pub servers: Vec<ServerResponse>,
}

/// Request payload for provisioning a server.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerPayload {
    /// Display name.
    pub name: Option<String>,
    /// Game template identifier.
    pub template: Option<String>,
    /// Claim the free slot instead of paying the fee. Defaults to false.
    pub is_free: Option<bool>,
}

/// What a successful provisioning returns.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedServerResponse {
    /// Identifier of the new record.
    pub server_id: Uuid,
    /// Public IPv4 address.
    pub ip: String,
    /// Reserved game port.
    pub port: u16,
    /// FTP host.
    pub ftp_host: String,
    /// FTP port.
    pub ftp_port: u16,
    /// Generated FTP account name.
    pub ftp_username: String,
    /// Generated FTP account password.
    pub ftp_password: String,
}

impl From<ProvisionedServer> for ProvisionedServerResponse {
    fn from(server: ProvisionedServer) -> Self {
        Self {
            server_id: *server.id.as_uuid(),
            ip: server.address.ip,
            port: server.address.port,
            ftp_host: server.ftp.host,
            ftp_port: server.ftp.port,
            ftp_username: server.ftp.username,
            ftp_password: server.ftp.password,
        }
    }
}

/// Response payload for a status transition.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Status after the transition.
    pub status: ServerStatus,
}

/// Request payload for a configuration update.
///
/// All three fields are required: the update overwrites them wholesale.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigPayload {
    /// New player capacity; deliberately not bounds-checked.
    pub max_players: Option<i32>,
    /// New auto-restart flag.
    pub auto_restart: Option<bool>,
    /// New backup flag.
    pub backup_enabled: Option<bool>,
}

fn parse_config_payload(payload: UpdateConfigPayload) -> Result<ServerConfigUpdate, crate::domain::Error> {
    Ok(ServerConfigUpdate {
        max_players: payload
            .max_players
            .ok_or_else(|| missing_field_error("maxPlayers"))?,
        auto_restart: payload
            .auto_restart
            .ok_or_else(|| missing_field_error("autoRestart"))?,
        backup_enabled: payload
            .backup_enabled
            .ok_or_else(|| missing_field_error("backupEnabled"))?,
    })
}

/// List the authenticated user's servers.
#[utoipa::path(
    get,
    path = "/api/v1/servers",
    responses(
        (status = 200, description = "Owned servers, newest first", body = ServerListResponse),
        (status = 401, description = "No identity supplied")
    ),
    tags = ["servers"],
    operation_id = "listServers"
)]
#[get("/servers")]
pub async fn list_servers(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let servers = state.provisioning.list_servers(&user.0).await?;
    Ok(HttpResponse::Ok().json(ServerListResponse {
        servers: servers.into_iter().map(ServerResponse::from).collect(),
    }))
}

/// Provision a new server for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/servers",
    request_body = CreateServerPayload,
    responses(
        (status = 200, description = "Server provisioned", body = ProvisionedServerResponse),
        (status = 400, description = "Invalid input, insufficient funds, or free limit reached"),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "User not found"),
        (status = 503, description = "Identity allocation exhausted")
    ),
    tags = ["servers"],
    operation_id = "createServer"
)]
#[post("/servers")]
pub async fn create_server(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateServerPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = CreateServerRequest {
        name: payload.name.ok_or_else(|| missing_field_error("name"))?,
        template: payload
            .template
            .ok_or_else(|| missing_field_error("template"))?,
        is_free: payload.is_free.unwrap_or(false),
    };

    let provisioned = state.provisioning.create_server(&user.0, request).await?;
    Ok(HttpResponse::Ok().json(ProvisionedServerResponse::from(provisioned)))
}

/// Start a server.
#[utoipa::path(
    put,
    path = "/api/v1/servers/{id}/start",
    params(("id" = Uuid, Path, description = "Server identifier")),
    responses(
        (status = 200, description = "Server is now online", body = StatusResponse),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "Server missing or owned by another user")
    ),
    tags = ["servers"],
    operation_id = "startServer"
)]
#[put("/servers/{id}/start")]
pub async fn start_server(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let server_id = ServerId::from_uuid(path.into_inner());
    let status = state.lifecycle.start(&user.0, &server_id).await?;
    Ok(HttpResponse::Ok().json(StatusResponse { status }))
}

/// Stop a server.
#[utoipa::path(
    put,
    path = "/api/v1/servers/{id}/stop",
    params(("id" = Uuid, Path, description = "Server identifier")),
    responses(
        (status = 200, description = "Server is now offline", body = StatusResponse),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "Server missing or owned by another user")
    ),
    tags = ["servers"],
    operation_id = "stopServer"
)]
#[put("/servers/{id}/stop")]
pub async fn stop_server(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let server_id = ServerId::from_uuid(path.into_inner());
    let status = state.lifecycle.stop(&user.0, &server_id).await?;
    Ok(HttpResponse::Ok().json(StatusResponse { status }))
}

/// Overwrite a server's mutable configuration.
#[utoipa::path(
    put,
    path = "/api/v1/servers/{id}/config",
    params(("id" = Uuid, Path, description = "Server identifier")),
    request_body = UpdateConfigPayload,
    responses(
        (status = 204, description = "Configuration updated"),
        (status = 400, description = "Missing field"),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "Server missing or owned by another user")
    ),
    tags = ["servers"],
    operation_id = "updateServerConfig"
)]
#[put("/servers/{id}/config")]
pub async fn update_server_config(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateConfigPayload>,
) -> ApiResult<HttpResponse> {
    let server_id = ServerId::from_uuid(path.into_inner());
    let update = parse_config_payload(payload.into_inner())?;

    state
        .lifecycle
        .update_config(&user.0, &server_id, update)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
