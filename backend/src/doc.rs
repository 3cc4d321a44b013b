//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers the payment, server, and health paths
//! together with their request and response schemas, and declares the
//! `X-User-Id` header scheme every authenticated endpoint relies on.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, PaymentKind, PaymentStatus, ServerStatus};
use crate::inbound::http::payments::{
    BalanceResponse, DepositRequest, PaymentHistoryResponse, PaymentResponse,
};
use crate::inbound::http::servers::{
    CreateServerPayload, ProvisionedServerResponse, ServerListResponse, ServerResponse,
    StatusResponse, UpdateConfigPayload,
};

/// Enrich the generated document with the identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "UserIdHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "UUID of the acting user, supplied by the fronting gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Game panel backend API",
        description = "HTTP interface for balance management, server provisioning, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("UserIdHeader" = [])),
    paths(
        crate::inbound::http::payments::get_balance,
        crate::inbound::http::payments::deposit,
        crate::inbound::http::payments::payment_history,
        crate::inbound::http::servers::list_servers,
        crate::inbound::http::servers::create_server,
        crate::inbound::http::servers::start_server,
        crate::inbound::http::servers::stop_server,
        crate::inbound::http::servers::update_server_config,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PaymentKind,
        PaymentStatus,
        ServerStatus,
        BalanceResponse,
        DepositRequest,
        PaymentResponse,
        PaymentHistoryResponse,
        CreateServerPayload,
        ServerResponse,
        ServerListResponse,
        ProvisionedServerResponse,
        StatusResponse,
        UpdateConfigPayload,
    )),
    tags(
        (name = "ledger", description = "Balance and payment history operations"),
        (name = "servers", description = "Server provisioning and lifecycle operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_registers_every_operation() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/balance",
            "/api/v1/payments/deposit",
            "/api/v1/payments",
            "/api/v1/servers",
            "/api/v1/servers/{id}/start",
            "/api/v1/servers/{id}/stop",
            "/api/v1/servers/{id}/config",
            "/healthz/ready",
            "/healthz/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should register {path}"
            );
        }
    }
}
