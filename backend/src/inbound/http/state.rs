//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they only
//! depend on the domain services and stay testable with mock-backed or
//! in-memory port implementations.

use crate::domain::{LedgerService, LifecycleService, ProvisioningService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Balance and payment-history operations.
    pub ledger: LedgerService,
    /// Server creation and listing.
    pub provisioning: ProvisioningService,
    /// Status transitions and configuration updates.
    pub lifecycle: LifecycleService,
}

impl HttpState {
    /// Bundle the three domain services.
    pub const fn new(
        ledger: LedgerService,
        provisioning: ProvisioningService,
        lifecycle: LifecycleService,
    ) -> Self {
        Self {
            ledger,
            provisioning,
            lifecycle,
        }
    }
}
