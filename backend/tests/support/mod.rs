//! Shared fixtures for endpoint integration tests.
//!
//! Provides an in-memory store implementing both persistence ports with the
//! same contracts the PostgreSQL adapters enforce, so the full HTTP stack
//! can be exercised without a database.
//!
//! Each test binary compiles this module separately, so not every helper is
//! used by every binary.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use backend::domain::ports::{
    LedgerRepository, LedgerStoreError, ServerRepository, ServerStoreError,
};
use backend::domain::{
    FtpEndpoint, GameServer, LedgerService, LifecycleService, NetworkAddress, NewServer,
    PaymentKind, PaymentRecord, PaymentStatus, ProvisioningConfig, ProvisioningService,
    ServerConfigUpdate, ServerId, ServerStatus, ServerTelemetry, UserId,
};
use backend::inbound::http::state::HttpState;

#[derive(Default)]
struct StoreState {
    balances: HashMap<Uuid, Decimal>,
    payments: Vec<PaymentRecord>,
    servers: Vec<GameServer>,
}

/// Port-faithful in-memory store.
///
/// `fail_purchases` simulates a store-side failure during the paid-server
/// transaction; nothing is written when it trips, matching rollback.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    pub fail_purchases: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_user(&self, user_id: &UserId, balance: Decimal) {
        let mut state = self.state.lock().expect("store lock");
        state.balances.insert(*user_id.as_uuid(), balance);
    }

    pub fn balance_of(&self, user_id: &UserId) -> Option<Decimal> {
        let state = self.state.lock().expect("store lock");
        state.balances.get(user_id.as_uuid()).copied()
    }

    pub fn server_count(&self) -> usize {
        let state = self.state.lock().expect("store lock");
        state.servers.len()
    }

    pub fn status_of(&self, server_id: Uuid) -> Option<ServerStatus> {
        let state = self.state.lock().expect("store lock");
        state
            .servers
            .iter()
            .find(|s| *s.id.as_uuid() == server_id)
            .map(|s| s.status)
    }
}

fn build_server(user_id: &UserId, server: &NewServer) -> GameServer {
    let now = Utc::now();
    GameServer {
        id: ServerId::random(),
        user_id: *user_id,
        name: server.name.clone(),
        template: server.template.clone(),
        status: ServerStatus::Offline,
        address: NetworkAddress {
            ip: server.ip.clone(),
            port: server.identity.port,
        },
        ftp: FtpEndpoint {
            host: server.ftp_host.clone(),
            port: server.ftp_port,
            username: server.identity.ftp_username.clone(),
            password: server.identity.ftp_password.clone(),
        },
        max_players: server.max_players,
        telemetry: ServerTelemetry::default(),
        auto_restart: false,
        backup_enabled: false,
        is_free: server.is_free,
        created_at: now,
        updated_at: now,
    }
}

fn identity_collides(state: &StoreState, server: &NewServer) -> bool {
    state.servers.iter().any(|existing| {
        existing.address.port == server.identity.port
            || (existing.ftp.username == server.identity.ftp_username
                && existing.ftp.password == server.identity.ftp_password)
    })
}

#[async_trait]
impl LedgerRepository for InMemoryStore {
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Option<Decimal>, LedgerStoreError> {
        let state = self.state.lock().map_err(|e| LedgerStoreError::connection(e.to_string()))?;
        Ok(state.balances.get(user_id.as_uuid()).copied())
    }

    async fn credit(
        &self,
        user_id: &UserId,
        amount: Decimal,
    ) -> Result<Option<Decimal>, LedgerStoreError> {
        let mut state =
            self.state.lock().map_err(|e| LedgerStoreError::connection(e.to_string()))?;
        let uuid = *user_id.as_uuid();
        let Some(balance) = state.balances.get_mut(&uuid) else {
            return Ok(None);
        };
        *balance += amount;
        let updated = *balance;
        state.payments.push(PaymentRecord {
            id: Uuid::new_v4(),
            user_id: *user_id,
            amount,
            kind: PaymentKind::Deposit,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        });
        Ok(Some(updated))
    }

    async fn history(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<PaymentRecord>, LedgerStoreError> {
        let state = self.state.lock().map_err(|e| LedgerStoreError::connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(state
            .payments
            .iter()
            .rev()
            .filter(|p| p.user_id == *user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ServerRepository for InMemoryStore {
    async fn create_free(
        &self,
        user_id: &UserId,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError> {
        let mut state =
            self.state.lock().map_err(|e| ServerStoreError::connection(e.to_string()))?;
        if !state.balances.contains_key(user_id.as_uuid()) {
            return Err(ServerStoreError::UserMissing);
        }
        if state
            .servers
            .iter()
            .any(|s| s.user_id == *user_id && s.is_free)
        {
            return Err(ServerStoreError::FreeLimitReached);
        }
        if identity_collides(&state, server) {
            return Err(ServerStoreError::IdentityConflict);
        }
        let record = build_server(user_id, server);
        state.servers.push(record.clone());
        Ok(record)
    }

    async fn create_paid(
        &self,
        user_id: &UserId,
        fee: Decimal,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError> {
        let mut state =
            self.state.lock().map_err(|e| ServerStoreError::connection(e.to_string()))?;
        let uuid = *user_id.as_uuid();
        let Some(balance) = state.balances.get(&uuid).copied() else {
            return Err(ServerStoreError::UserMissing);
        };
        if balance < fee {
            return Err(ServerStoreError::InsufficientFunds);
        }
        if identity_collides(&state, server) {
            return Err(ServerStoreError::IdentityConflict);
        }
        if self.fail_purchases.load(Ordering::SeqCst) {
            // All-or-nothing: the checks passed but nothing was written.
            return Err(ServerStoreError::query("injected transaction failure"));
        }
        state.balances.insert(uuid, balance - fee);
        state.payments.push(PaymentRecord {
            id: Uuid::new_v4(),
            user_id: *user_id,
            amount: fee,
            kind: PaymentKind::ServerPurchase,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        });
        let record = build_server(user_id, server);
        state.servers.push(record.clone());
        Ok(record)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<GameServer>, ServerStoreError> {
        let state = self.state.lock().map_err(|e| ServerStoreError::connection(e.to_string()))?;
        Ok(state
            .servers
            .iter()
            .rev()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        status: ServerStatus,
    ) -> Result<bool, ServerStoreError> {
        let mut state =
            self.state.lock().map_err(|e| ServerStoreError::connection(e.to_string()))?;
        let Some(record) = state
            .servers
            .iter_mut()
            .find(|s| s.id == *server_id && s.user_id == *user_id)
        else {
            return Ok(false);
        };
        record.status = status;
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn update_config(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        update: &ServerConfigUpdate,
    ) -> Result<bool, ServerStoreError> {
        let mut state =
            self.state.lock().map_err(|e| ServerStoreError::connection(e.to_string()))?;
        let Some(record) = state
            .servers
            .iter_mut()
            .find(|s| s.id == *server_id && s.user_id == *user_id)
        else {
            return Ok(false);
        };
        record.max_players = update.max_players;
        record.auto_restart = update.auto_restart;
        record.backup_enabled = update.backup_enabled;
        record.updated_at = Utc::now();
        Ok(true)
    }
}

/// The handler state wired against the in-memory store.
pub fn test_state(store: &Arc<InMemoryStore>) -> HttpState {
    HttpState::new(
        LedgerService::new(store.clone()),
        ProvisioningService::new(store.clone(), ProvisioningConfig::default()),
        LifecycleService::new(store.clone()),
    )
}
