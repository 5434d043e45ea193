//! Movies Server - HTTP API over the movie listing pipeline
//!
//! Serves the dataset loaded by the `movies` crate, sorted by release date
//! and optionally filtered by title.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /movies?q=<text>` - Movies, most recent first (`query` is accepted too)
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (dataset loadable)
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
