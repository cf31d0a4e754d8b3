//! Voice session management
//!
//! This module provides the `VoiceSession` abstraction that manages:
//! - Session lifecycle (disconnected/connected) driven by backend events
//! - Latency tracking across user/assistant turns
//! - Agent state and volume readouts for the visualization surface
//! - Error surfacing for failed or dropped calls

mod config;
mod session;
mod status;

pub use config::SessionConfig;
pub use session::VoiceSession;
pub use status::{AgentState, SessionState, SessionStatus};
