//! Planting ledger for Grove.
//!
//! This crate owns the intent and order tables and the rules that govern
//! them. It provides:
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the process-local implementation
//! - Idempotent, serialized intent confirmation
//! - Proof derivation for confirmed orders
//! - Link validation for the intent/order 1:1 invariant

pub mod config;
pub mod error;
pub mod memory;
pub mod traits;
pub mod validation;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use traits::{Confirmation, Ledger, LedgerReader, LedgerWriter};
pub use validation::{LinkReport, LinkValidator, Violation, ViolationKind};
