//! Balance and payment HTTP handlers.
//!
//! ```text
//! GET  /api/v1/balance
//! POST /api/v1/payments/deposit
//! GET  /api/v1/payments
//! ```

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{PaymentKind, PaymentRecord, PaymentStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Response payload carrying the user's balance.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// Current balance after the operation, as a decimal string.
    #[schema(value_type = String, example = "100.00")]
    pub balance: Decimal,
}

/// Request payload for a deposit.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Positive amount to credit, as a decimal string.
    #[schema(value_type = String, example = "25.00")]
    pub amount: Option<Decimal>,
}

/// Query parameters for the payment history listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Maximum number of entries to return (default 20, capped at 100).
    pub limit: Option<u32>,
}

/// One payment log entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Amount moved by the entry, as a decimal string.
    #[schema(value_type = String, example = "50.00")]
    pub amount: Decimal,
    /// Entry kind.
    pub kind: PaymentKind,
    /// Settlement state.
    pub status: PaymentStatus,
    /// Append timestamp, RFC 3339.
    pub created_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            kind: record.kind,
            status: record.status,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Envelope for the history listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryResponse {
    /// Entries, newest first.
    pub payments: Vec<PaymentResponse>,
}

/// Fetch the authenticated user's balance.
#[utoipa::path(
    get,
    path = "/api/v1/balance",
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "User not found")
    ),
    tags = ["ledger"],
    operation_id = "getBalance"
)]
#[get("/balance")]
pub async fn get_balance(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let balance = state.ledger.balance(&user.0).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse { balance }))
}

/// Credit the authenticated user's balance.
#[utoipa::path(
    post,
    path = "/api/v1/payments/deposit",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Post-credit balance", body = BalanceResponse),
        (status = 400, description = "Missing or non-positive amount"),
        (status = 401, description = "No identity supplied"),
        (status = 404, description = "User not found")
    ),
    tags = ["ledger"],
    operation_id = "deposit"
)]
#[post("/payments/deposit")]
pub async fn deposit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<DepositRequest>,
) -> ApiResult<HttpResponse> {
    let amount = payload
        .into_inner()
        .amount
        .ok_or_else(|| missing_field_error("amount"))?;

    let balance = state.ledger.deposit(&user.0, amount).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse { balance }))
}

/// List the authenticated user's payment history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Payment history", body = PaymentHistoryResponse),
        (status = 401, description = "No identity supplied")
    ),
    tags = ["ledger"],
    operation_id = "paymentHistory"
)]
#[get("/payments")]
pub async fn payment_history(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<HistoryQuery>,
) -> ApiResult<HttpResponse> {
    let records = state.ledger.history(&user.0, query.limit).await?;
    Ok(HttpResponse::Ok().json(PaymentHistoryResponse {
        payments: records.into_iter().map(PaymentResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    fn payment_response_maps_domain_values() {
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            amount: dec!(50.00),
            kind: PaymentKind::ServerPurchase,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        };
        let id = record.id;

        let response = PaymentResponse::from(record);
        assert_eq!(response.id, id);
        assert_eq!(response.amount, dec!(50.00));
        assert_eq!(response.kind, PaymentKind::ServerPurchase);
    }

    #[rstest]
    fn balance_serialises_as_a_decimal_string() {
        let value = serde_json::to_value(BalanceResponse {
            balance: dec!(100.00),
        })
        .expect("serialise");
        assert_eq!(value["balance"], "100.00");
    }
}
