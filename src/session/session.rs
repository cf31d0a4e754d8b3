use super::config::SessionConfig;
use super::status::{AgentState, SessionState, SessionStatus};
use crate::client::{AgentEvent, Role, StartOptions, VoiceClient};
use crate::error::{Error, Result};
use crate::latency::{IndicatorView, LatencySummary, LatencyTracker};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// State shared between the event-consumer task and readout accessors
struct Shared {
    state: RwLock<SessionState>,
    assistant_speaking: AtomicBool,
    tracker: Mutex<LatencyTracker>,
    last_error: RwLock<Option<String>>,
}

/// A voice session that adapts backend events into connection state and
/// latency measurements
///
/// Events arrive on one channel and are applied by one consumer task, so
/// tracker transitions are serialized exactly as SDK callbacks would be.
pub struct VoiceSession {
    /// Session configuration
    config: SessionConfig,

    /// Voice backend for this session
    client: Mutex<Box<dyn VoiceClient>>,

    /// When the session was created
    started_at: chrono::DateTime<chrono::Utc>,

    /// Whether the event loop should keep consuming
    active: Arc<AtomicBool>,

    shared: Arc<Shared>,

    /// Handle for the event-consumer task
    event_task_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl VoiceSession {
    /// Create a new session
    ///
    /// Validates the required configuration values here, before any client
    /// interaction: an empty public key or assistant id fails with its own
    /// `ConfigurationMissing` message and no connection attempt is made.
    pub fn new(config: SessionConfig, client: Box<dyn VoiceClient>) -> Result<Self> {
        if config.public_key.trim().is_empty() {
            return Err(Error::ConfigurationMissing("Vapi public key not configured"));
        }

        if config.assistant_id.trim().is_empty() {
            return Err(Error::ConfigurationMissing(
                "Vapi assistant ID not configured",
            ));
        }

        Ok(Self {
            config,
            client: Mutex::new(client),
            started_at: Utc::now(),
            active: Arc::new(AtomicBool::new(false)),
            shared: Arc::new(Shared {
                state: RwLock::new(SessionState::Disconnected),
                assistant_speaking: AtomicBool::new(false),
                tracker: Mutex::new(LatencyTracker::new()),
                last_error: RwLock::new(None),
            }),
            event_task_handle: Arc::new(Mutex::new(None)),
        })
    }

    /// Start the call
    ///
    /// Connects through the backend and spawns the event-consumer task. The
    /// session does not become `Connected` here; that happens when the
    /// backend delivers `CallStart`.
    pub async fn start(&self) -> Result<()> {
        if self.active.load(Ordering::SeqCst) {
            warn!("Session already started: {}", self.config.session_id);
            return Ok(());
        }

        info!("Starting voice session: {}", self.config.session_id);

        let opts = StartOptions {
            assistant_id: self.config.assistant_id.clone(),
            voice_id: self.config.voice_id.clone(),
        };

        let mut rx = {
            let mut client = self.client.lock().await;
            client.start(opts).await?
        };

        self.active.store(true, Ordering::SeqCst);

        let active = Arc::clone(&self.active);
        let shared = Arc::clone(&self.shared);
        let session_id = self.config.session_id.clone();

        let event_task = tokio::spawn(async move {
            info!("Event loop started for session {}", session_id);

            while let Some(event) = rx.recv().await {
                if !active.load(Ordering::SeqCst) {
                    break;
                }

                apply_event(&shared, event).await;
            }

            info!("Event loop stopped for session {}", session_id);
        });

        {
            let mut handle = self.event_task_handle.lock().await;
            *handle = Some(event_task);
        }

        Ok(())
    }

    /// Stop the call
    ///
    /// Unconditional and immediate: the backend is told to hang up, the
    /// event loop is torn down, and any pending latency measurement is
    /// discarded rather than flushed. Recorded samples survive until the
    /// next connect resets the tracker. Teardown happens even when the
    /// backend refuses to hang up; the backend error is surfaced afterwards.
    pub async fn stop(&self) -> Result<SessionStatus> {
        if !self.active.swap(false, Ordering::SeqCst) {
            warn!("Session not active: {}", self.config.session_id);
            return Ok(self.status().await);
        }

        info!("Stopping voice session: {}", self.config.session_id);

        let client_result = {
            let mut client = self.client.lock().await;
            client.stop().await
        };

        // Tear down the event loop without draining it; stop does not wait
        // for stragglers.
        {
            let mut handle = self.event_task_handle.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
                if let Err(e) = task.await {
                    if !e.is_cancelled() {
                        error!("Event task panicked: {}", e);
                    }
                }
            }
        }

        {
            let mut state = self.shared.state.write().await;
            *state = SessionState::Disconnected;
        }
        self.shared.assistant_speaking.store(false, Ordering::SeqCst);
        self.shared.tracker.lock().await.discard_pending();

        client_result?;

        info!("Voice session stopped: {}", self.config.session_id);

        Ok(self.status().await)
    }

    /// True from a successful `start` until `stop`
    ///
    /// Stays true after a remote hangup: the backend client and event loop
    /// exist until `stop` tears them down, so the session still owns
    /// resources even while `Disconnected`.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Current connection state
    pub async fn state(&self) -> SessionState {
        *self.shared.state.read().await
    }

    /// Derived orb state: not connected, listening, or talking
    pub async fn agent_state(&self) -> AgentState {
        if self.state().await != SessionState::Connected {
            return AgentState::NotConnected;
        }

        if self.shared.assistant_speaking.load(Ordering::SeqCst) {
            AgentState::Talking
        } else {
            AgentState::Listening
        }
    }

    /// Current latency digest
    pub async fn latency_summary(&self) -> LatencySummary {
        self.shared.tracker.lock().await.summary()
    }

    /// What the latency indicator should render right now
    pub async fn indicator_view(&self) -> IndicatorView {
        let connected = self.state().await == SessionState::Connected;
        IndicatorView::from_summary(self.latency_summary().await, connected)
    }

    /// Polled input level for the orb
    ///
    /// The backend exposes no real levels; these are the fixed values the
    /// visualization animates against.
    pub async fn input_volume(&self) -> f32 {
        if self.state().await == SessionState::Connected {
            0.5
        } else {
            0.0
        }
    }

    /// Polled output level for the orb
    pub fn output_volume(&self) -> f32 {
        if self.shared.assistant_speaking.load(Ordering::SeqCst) {
            0.7
        } else {
            0.3
        }
    }

    /// Last user-visible error, if any
    pub async fn last_error(&self) -> Option<String> {
        self.shared.last_error.read().await.clone()
    }

    /// Snapshot for the status endpoint
    pub async fn status(&self) -> SessionStatus {
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStatus {
            session_id: self.config.session_id.clone(),
            state: self.state().await,
            agent_state: self.agent_state().await,
            assistant_speaking: self.shared.assistant_speaking.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            samples_count: self.shared.tracker.lock().await.sample_count(),
            last_error: self.last_error().await,
        }
    }
}

/// Apply one backend event to the shared session state
async fn apply_event(shared: &Shared, event: AgentEvent) {
    match event {
        AgentEvent::CallStart => {
            info!("Call started");
            {
                let mut state = shared.state.write().await;
                *state = SessionState::Connected;
            }
            // Sample lifetime is the session lifetime: every entry into
            // Connected starts from an empty history.
            shared.tracker.lock().await.reset();
            *shared.last_error.write().await = None;
        }

        AgentEvent::CallEnd => {
            info!("Call ended");
            {
                let mut state = shared.state.write().await;
                *state = SessionState::Disconnected;
            }
            shared.assistant_speaking.store(false, Ordering::SeqCst);
        }

        AgentEvent::UserSpeechStart => {
            shared.tracker.lock().await.on_user_speech_start();
        }

        AgentEvent::UserSpeechEnd { at_ms } => {
            shared.tracker.lock().await.on_user_speech_end(at_ms);
        }

        AgentEvent::AssistantSpeechStart => {
            shared.assistant_speaking.store(true, Ordering::SeqCst);
        }

        AgentEvent::AssistantSpeechEnd => {
            shared.assistant_speaking.store(false, Ordering::SeqCst);
        }

        AgentEvent::Transcript { role, at_ms, .. } => {
            if role == Role::Assistant {
                shared.tracker.lock().await.on_assistant_transcript(at_ms);
            }
        }

        AgentEvent::Error { message } => {
            error!("Backend error: {}", message);

            // An established call survives an error report; a connecting one
            // is forced back to disconnected.
            let mut state = shared.state.write().await;
            if *state != SessionState::Connected {
                *state = SessionState::Disconnected;
            }
            drop(state);

            *shared.last_error.write().await = Some(message);
        }
    }
}
