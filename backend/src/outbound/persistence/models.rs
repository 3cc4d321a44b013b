//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversion into domain types happens in the repository adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{payments, servers};

/// Row struct for reading from the payments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub kind: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending payment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub(crate) struct NewPaymentRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub kind: &'a str,
    pub status: &'a str,
}

/// Row struct for reading from the servers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = servers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub template: String,
    pub status: String,
    pub ip: String,
    pub port: i32,
    pub ftp_host: String,
    pub ftp_port: i32,
    pub ftp_username: String,
    pub ftp_password: String,
    pub max_players: i32,
    pub cpu_usage: f32,
    pub ram_usage: f32,
    pub current_players: i32,
    pub auto_restart: bool,
    pub backup_enabled: bool,
    pub is_free: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating server records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = servers)]
pub(crate) struct NewServerRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub template: &'a str,
    pub status: &'a str,
    pub ip: &'a str,
    pub port: i32,
    pub ftp_host: &'a str,
    pub ftp_port: i32,
    pub ftp_username: &'a str,
    pub ftp_password: &'a str,
    pub max_players: i32,
    pub is_free: bool,
}

/// Changeset struct for one configuration update.
#[derive(Debug, Clone, Copy, AsChangeset)]
#[diesel(table_name = servers)]
pub(crate) struct ServerConfigChangeset {
    pub max_players: i32,
    pub auto_restart: bool,
    pub backup_enabled: bool,
}
