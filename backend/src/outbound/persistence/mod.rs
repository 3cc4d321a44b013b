//! PostgreSQL persistence adapters for the domain ports.

mod diesel_ledger_repository;
mod diesel_server_repository;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_ledger_repository::DieselLedgerRepository;
pub use diesel_server_repository::DieselServerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
