//! Foundation types for Grove.
//!
//! This crate provides the identifiers, records, and collaborator seams used
//! by the planting ledger and its HTTP adapter. Every other Grove crate
//! depends on `grove-types`.
//!
//! # Key Types
//!
//! - [`IntentId`] / [`OrderId`] — Opaque tokens from disjoint identifier spaces
//! - [`Intent`] — A registered, not yet finalized planting promise
//! - [`Order`] — The finalized planting created by confirming an intent
//! - [`Proof`] — Read-only summary of a completed order
//! - [`Coordinates`] — Latitude/longitude pair with bounded jitter
//! - [`Clock`], [`IdGenerator`], [`JitterSource`] — Injectable sources of time and randomness

pub mod error;
pub mod identity;
pub mod location;
pub mod records;
pub mod temporal;

pub use error::TypeError;
pub use identity::{IdGenerator, IntentId, OrderId, SequentialIdGenerator, UuidIdGenerator};
pub use location::{Coordinates, FixedJitter, JitterSource, RandomJitter};
pub use records::{Intent, IntentState, Order, Proof};
pub use temporal::{Clock, FixedClock, SystemClock};
