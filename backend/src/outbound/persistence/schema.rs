//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. Regenerate with `diesel print-schema` after
//! a migration changes the schema.

diesel::table! {
    /// User accounts, owned by the external identity system.
    ///
    /// This core only ever mutates `balance`, and only through in-place
    /// arithmetic updates.
    users (id) {
        /// Primary key: UUID supplied by the identity system.
        id -> Uuid,
        /// Current balance; non-negative by CHECK constraint.
        balance -> Numeric,
    }
}

diesel::table! {
    /// Append-only payment log.
    payments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Positive amount moved by the entry.
        amount -> Numeric,
        /// Entry kind: `deposit` or `server_purchase`.
        #[sql_name = "type"]
        kind -> Varchar,
        /// Settlement state; always `completed`.
        status -> Varchar,
        /// Append timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookkeeping records of hosted game servers.
    ///
    /// `port` and the `(ftp_username, ftp_password)` pair carry UNIQUE
    /// constraints; a partial unique index on `(user_id) WHERE is_free`
    /// enforces the one-free-server rule.
    servers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user (FK to users).
        user_id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Game template identifier.
        template -> Varchar,
        /// Lifecycle status: `offline` or `online`.
        status -> Varchar,
        /// Public IPv4 address.
        ip -> Varchar,
        /// Reserved game port; unique across the fleet.
        port -> Int4,
        /// FTP host.
        ftp_host -> Varchar,
        /// FTP port.
        ftp_port -> Int4,
        /// Generated FTP account name.
        ftp_username -> Varchar,
        /// Generated FTP account password.
        ftp_password -> Varchar,
        /// Player capacity.
        max_players -> Int4,
        /// Monitor-written CPU usage percentage.
        cpu_usage -> Float4,
        /// Monitor-written RAM usage percentage.
        ram_usage -> Float4,
        /// Monitor-written connected player count.
        current_players -> Int4,
        /// Restart-after-crash flag.
        auto_restart -> Bool,
        /// Nightly backup flag.
        backup_enabled -> Bool,
        /// Whether the record consumed the owner's free slot.
        is_free -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(payments -> users (user_id));
diesel::joinable!(servers -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, payments, servers);
