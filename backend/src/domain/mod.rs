//! Domain core: ledger, provisioning, lifecycle, and their value objects.
//!
//! Purpose: hold every balance-and-provisioning invariant behind transport-
//! agnostic services. Persistence is reached only through the async port
//! traits in [`ports`]; inbound adapters translate [`Error`] into their own
//! envelopes.

pub mod error;
pub mod identity;
pub mod ledger;
pub mod lifecycle;
pub mod payment;
pub mod ports;
pub mod provisioning;
pub mod server;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::identity::{IdentitySettings, ServerIdentity};
pub use self::ledger::LedgerService;
pub use self::lifecycle::LifecycleService;
pub use self::payment::{PaymentKind, PaymentRecord, PaymentStatus};
pub use self::provisioning::{CreateServerRequest, ProvisioningConfig, ProvisioningService};
pub use self::server::{
    FtpEndpoint, GameServer, NetworkAddress, NewServer, ProvisionedServer, ServerConfigUpdate,
    ServerId, ServerStatus, ServerTelemetry,
};
pub use self::user::UserId;
