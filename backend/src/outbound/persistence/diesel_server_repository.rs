//! PostgreSQL-backed [`ServerRepository`] implementation using Diesel.
//!
//! This adapter owns the provisioning transaction: debit, payment record,
//! and server row commit or roll back together. Business outcomes the store
//! decides transactionally (insufficient funds, the free-slot limit,
//! identity collisions) are detected here and surfaced as typed port errors
//! rather than raw constraint text.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{ServerRepository, ServerStoreError};
use crate::domain::{
    FtpEndpoint, GameServer, NetworkAddress, NewServer, PaymentKind, PaymentStatus,
    ServerConfigUpdate, ServerId, ServerStatus, ServerTelemetry, UserId,
};

use super::models::{NewPaymentRow, NewServerRow, ServerConfigChangeset, ServerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{payments, servers, users};

/// Partial unique index enforcing one free server per user.
const FREE_SLOT_INDEX: &str = "servers_one_free_per_user_idx";

/// Diesel-backed implementation of the [`ServerRepository`] port.
#[derive(Clone)]
pub struct DieselServerRepository {
    pool: DbPool,
}

impl DieselServerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Transaction-internal failure: either a typed business outcome or a raw
/// Diesel error that still needs mapping.
enum TxAbort {
    Store(ServerStoreError),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxAbort {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

fn map_pool_error(error: PoolError) -> ServerStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ServerStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ServerStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            if info.constraint_name() == Some(FREE_SLOT_INDEX) {
                ServerStoreError::FreeLimitReached
            } else {
                // Port or FTP credential collision; the provisioning engine
                // retries with a fresh identity.
                ServerStoreError::IdentityConflict
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            ServerStoreError::UserMissing
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ServerStoreError::connection("database connection error")
        }
        _ => ServerStoreError::query("database error"),
    }
}

fn map_tx_abort(error: TxAbort) -> ServerStoreError {
    match error {
        TxAbort::Store(store) => store,
        TxAbort::Db(db) => map_diesel_error(db),
    }
}

/// Ports are constrained to the reserved range in the schema; a value outside
/// `u16` would mean external tampering and is reported as port zero.
fn port_from_db(row_id: Uuid, value: i32) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| {
        warn!(server_id = %row_id, value, "stored port outside u16 range");
        0
    })
}

fn row_to_server(row: ServerRow) -> GameServer {
    let status = ServerStatus::from_store(&row.status).unwrap_or_else(|| {
        warn!(server_id = %row.id, value = row.status, "unrecognised server status, reporting offline");
        ServerStatus::Offline
    });

    GameServer {
        id: ServerId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        name: row.name,
        template: row.template,
        status,
        address: NetworkAddress {
            ip: row.ip,
            port: port_from_db(row.id, row.port),
        },
        ftp: FtpEndpoint {
            host: row.ftp_host,
            port: port_from_db(row.id, row.ftp_port),
            username: row.ftp_username,
            password: row.ftp_password,
        },
        max_players: row.max_players,
        telemetry: ServerTelemetry {
            cpu_usage: row.cpu_usage,
            ram_usage: row.ram_usage,
            current_players: row.current_players,
        },
        auto_restart: row.auto_restart,
        backup_enabled: row.backup_enabled,
        is_free: row.is_free,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

async fn insert_server_row(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
    server: &NewServer,
) -> Result<ServerRow, diesel::result::Error> {
    diesel::insert_into(servers::table)
        .values(NewServerRow {
            id: Uuid::new_v4(),
            user_id,
            name: &server.name,
            template: &server.template,
            status: ServerStatus::Offline.as_str(),
            ip: &server.ip,
            port: i32::from(server.identity.port),
            ftp_host: &server.ftp_host,
            ftp_port: i32::from(server.ftp_port),
            ftp_username: &server.identity.ftp_username,
            ftp_password: &server.identity.ftp_password,
            max_players: server.max_players,
            is_free: server.is_free,
        })
        .returning(ServerRow::as_returning())
        .get_result(conn)
        .await
}

#[async_trait]
impl ServerRepository for DieselServerRepository {
    async fn create_free(
        &self,
        user_id: &UserId,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uid = *user_id.as_uuid();

        // A single insert: the partial unique index rejects a second free
        // server and the FK rejects an unknown user, both atomically.
        insert_server_row(&mut conn, uid, server)
            .await
            .map(row_to_server)
            .map_err(map_diesel_error)
    }

    async fn create_paid(
        &self,
        user_id: &UserId,
        fee: Decimal,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uid = *user_id.as_uuid();

        conn.transaction::<GameServer, TxAbort, _>(|conn| {
            async move {
                // Guarded in-place debit: zero rows means either no such
                // user or not enough money, and nothing was changed.
                let debited: Option<Decimal> = diesel::update(
                    users::table.filter(users::id.eq(uid).and(users::balance.ge(fee))),
                )
                .set(users::balance.eq(users::balance - fee))
                .returning(users::balance)
                .get_result(conn)
                .await
                .optional()?;

                if debited.is_none() {
                    let exists: Option<Uuid> = users::table
                        .find(uid)
                        .select(users::id)
                        .first(conn)
                        .await
                        .optional()?;
                    let outcome = if exists.is_some() {
                        ServerStoreError::InsufficientFunds
                    } else {
                        ServerStoreError::UserMissing
                    };
                    return Err(TxAbort::Store(outcome));
                }

                diesel::insert_into(payments::table)
                    .values(NewPaymentRow {
                        id: Uuid::new_v4(),
                        user_id: uid,
                        amount: fee,
                        kind: PaymentKind::ServerPurchase.as_str(),
                        status: PaymentStatus::Completed.as_str(),
                    })
                    .execute(conn)
                    .await?;

                let row = insert_server_row(conn, uid, server).await?;
                Ok(row_to_server(row))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_abort)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<GameServer>, ServerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ServerRow> = servers::table
            .filter(servers::user_id.eq(user_id.as_uuid()))
            .order(servers::created_at.desc())
            .select(ServerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_server).collect())
    }

    async fn set_status(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        status: ServerStatus,
    ) -> Result<bool, ServerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            servers::table.filter(
                servers::id
                    .eq(server_id.as_uuid())
                    .and(servers::user_id.eq(user_id.as_uuid())),
            ),
        )
        .set((
            servers::status.eq(status.as_str()),
            servers::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn update_config(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        update: &ServerConfigUpdate,
    ) -> Result<bool, ServerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            servers::table.filter(
                servers::id
                    .eq(server_id.as_uuid())
                    .and(servers::user_id.eq(user_id.as_uuid())),
            ),
        )
        .set((
            ServerConfigChangeset {
                max_players: update.max_players,
                auto_restart: update.auto_restart,
                backup_enabled: update.backup_enabled,
            },
            servers::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
