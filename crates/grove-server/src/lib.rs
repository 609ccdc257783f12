//! HTTP server for Grove.
//!
//! Exposes the planting ledger over three JSON endpoints
//! (`POST /planting-intents`, `POST /confirm`, `GET /proofs`) with
//! unrestricted CORS, plus a health probe.

pub mod config;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse, ServerError, ServerResult};
pub use handler::AppState;
pub use hooks::{ConfirmHook, NoOpHook, SimulatedPartnerHook};
pub use server::{shutdown_signal, GroveServer};
