//! Domain ports for the hexagonal boundary.
//!
//! These traits are the only way the domain touches persistence. Outbound
//! adapters implement them; unit tests substitute `mockall` automocks.

mod ledger_repository;
mod server_repository;

#[cfg(test)]
pub use ledger_repository::MockLedgerRepository;
pub use ledger_repository::{LedgerRepository, LedgerStoreError};
#[cfg(test)]
pub use server_repository::MockServerRepository;
pub use server_repository::{ServerRepository, ServerStoreError};
