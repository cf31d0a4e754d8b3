pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod latency;
pub mod session;
pub mod voices;

pub use client::{
    AgentEvent, ClientFactory, Provider, Role, ScriptedClient, ScriptedEvent, StartOptions,
    TurnScript, VoiceClient,
};
pub use config::Config;
pub use error::{Error, Result};
pub use http::{create_router, AppState};
pub use latency::{IndicatorView, LatencyQuality, LatencySummary, LatencyTracker};
pub use session::{AgentState, SessionConfig, SessionState, SessionStatus, VoiceSession};
pub use voices::{default_voice, find_voice, Voice, BRITISH_VOICES};
