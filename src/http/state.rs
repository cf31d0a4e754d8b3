use crate::config::{AgentConfig, VapiConfig};
use crate::session::VoiceSession;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
///
/// One session slot, not a map: at most one voice session exists per
/// process, created on start and torn down on stop.
#[derive(Clone)]
pub struct AppState {
    /// The active session, if any
    pub session: Arc<RwLock<Option<Arc<VoiceSession>>>>,

    /// Provider credentials from configuration
    pub vapi: Arc<VapiConfig>,

    /// Backend and voice selection from configuration
    pub agent: Arc<AgentConfig>,
}

impl AppState {
    pub fn new(vapi: VapiConfig, agent: AgentConfig) -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            vapi: Arc::new(vapi),
            agent: Arc::new(agent),
        }
    }
}
