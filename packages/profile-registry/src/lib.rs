//! # Profile Registry
//!
//! Registers business profiles tied to a wallet address. Reads and patches
//! are authorized by a signed login timestamp from the owning wallet or from
//! the `manager()` of the profile's liquidity pool.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin profile-registry
//! ```
//!
//! ## Endpoints
//! - `GET /profile/{id}` - Public view, or full profile with `time` + `signature`
//! - `POST /profile` - Create a profile signed by its wallet
//! - `PATCH /profile/{id}` - Replace `localDetail` (owner or pool manager)
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus counters

pub mod config;
mod error;
mod handlers;
mod metrics;
mod middleware;
mod response;
mod router;
pub mod rpc;
mod schemas;
mod state;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
