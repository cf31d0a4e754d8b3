//! Voice backend abstraction
//!
//! The external voice SDK (connection, audio capture, STT, TTS) sits behind
//! the `VoiceClient` trait: one async start that yields an event channel,
//! one stop. The session layer only ever sees `AgentEvent`s, so how the host
//! delivers them (SDK callbacks, a websocket task, a scripted timeline) is
//! invisible to the latency logic.

mod scripted;

pub use scripted::{ScriptedClient, ScriptedEvent, TurnScript};

use crate::error::Result;
use tokio::sync::mpsc;

/// Who produced a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Events delivered by a voice backend, in callback order
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// The call is established; the session becomes connected
    CallStart,

    /// The call ended (remote hangup or local stop)
    CallEnd,

    /// The user started an utterance
    UserSpeechStart,

    /// The user stopped speaking at `at_ms` (fractional milliseconds on the
    /// producer's clock)
    UserSpeechEnd { at_ms: f64 },

    /// The assistant started producing audio
    AssistantSpeechStart,

    /// The assistant finished producing audio
    AssistantSpeechEnd,

    /// A transcript fragment arrived at `at_ms`
    Transcript {
        role: Role,
        text: String,
        partial: bool,
        at_ms: f64,
    },

    /// The backend reported an error; the message is user-visible
    Error { message: String },
}

/// Options passed to a backend when starting a call
#[derive(Debug, Clone)]
pub struct StartOptions {
    /// Assistant identifier on the provider side
    pub assistant_id: String,

    /// Voice to use for assistant speech, by stable id
    pub voice_id: String,
}

/// Voice backend trait
///
/// Implementations:
/// - Scripted: replays a configured turn timeline (demos, integration tests)
/// - Hosted SDK providers plug in here once a native binding exists
#[async_trait::async_trait]
pub trait VoiceClient: Send + Sync {
    /// Start a call
    ///
    /// Returns a channel receiver that will receive agent events. Microphone
    /// permission is requested here; refusal surfaces as
    /// `Error::PermissionDenied` before any event is delivered.
    async fn start(&mut self, opts: StartOptions) -> Result<mpsc::Receiver<AgentEvent>>;

    /// Stop the call. Unconditional and immediate; buffered events are
    /// dropped, not flushed.
    async fn stop(&mut self) -> Result<()>;

    /// Check if a call is currently active
    fn is_active(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Which voice backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// In-process scripted backend
    Scripted,
    /// Hosted Vapi realtime backend (no native binding yet)
    Vapi,
}

/// Voice client factory
pub struct ClientFactory;

impl ClientFactory {
    /// Create a voice client for the configured provider
    pub fn create(provider: Provider) -> Result<Box<dyn VoiceClient>> {
        match provider {
            Provider::Scripted => Ok(Box::new(ScriptedClient::new(TurnScript::default()))),

            Provider::Vapi => Err(crate::error::Error::Connection(
                "the vapi provider has no native binding in this build".to_string(),
            )),
        }
    }
}
