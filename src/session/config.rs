use crate::client::Provider;
use crate::voices;
use serde::{Deserialize, Serialize};

/// Configuration for a voice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "call-7f3a...")
    pub session_id: String,

    /// Provider public API key. Required; start fails before any connection
    /// attempt if empty.
    #[serde(skip_serializing)]
    pub public_key: String,

    /// Assistant identifier on the provider side. Required.
    pub assistant_id: String,

    /// Voice to speak with, by stable id
    pub voice_id: String,

    /// Which backend to connect through
    pub provider: Provider,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("call-{}", uuid::Uuid::new_v4()),
            public_key: String::new(),
            assistant_id: String::new(),
            voice_id: voices::default_voice().id.to_string(),
            provider: Provider::Scripted,
        }
    }
}
