use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection state of a voice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Disconnected,
    Connected,
}

/// What the orb visualization should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// No call in progress
    NotConnected,
    /// Connected, assistant silent
    Listening,
    /// Connected, assistant producing speech
    Talking,
}

/// Snapshot of a voice session for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// Session identifier
    pub session_id: String,

    /// Connection state
    pub state: SessionState,

    /// Derived orb state
    pub agent_state: AgentState,

    /// Whether the assistant is currently producing speech
    pub assistant_speaking: bool,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Seconds since the session was created
    pub duration_secs: f64,

    /// Number of latency samples recorded this session
    pub samples_count: usize,

    /// Last user-visible error, if any
    pub last_error: Option<String>,
}
