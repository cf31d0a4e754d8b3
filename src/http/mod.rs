//! HTTP API server for the frontend
//!
//! This module provides a REST API the single-page UI binds to:
//! - POST /session/start - Start the voice session
//! - POST /session/stop - Stop the voice session
//! - GET  /session/status - Connection and agent state snapshot
//! - GET  /session/latency - Latency indicator view
//! - GET  /voices - Voice catalog
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
