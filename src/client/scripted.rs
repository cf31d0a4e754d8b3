use super::{AgentEvent, Role, StartOptions, VoiceClient};
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// One scheduled event on a scripted timeline
#[derive(Debug, Clone)]
pub struct ScriptedEvent {
    /// Delay after the previous event
    pub after: Duration,
    pub event: AgentEvent,
}

/// A conversation timeline for the scripted backend
///
/// Events carrying an `at_ms` of zero are stamped with the elapsed time on
/// the emitter's clock when they fire, so scripted latencies come out close
/// to the scripted delays.
#[derive(Debug, Clone)]
pub struct TurnScript {
    pub events: Vec<ScriptedEvent>,
}

impl TurnScript {
    /// A single question-and-answer turn with a ~400ms response gap
    pub fn single_turn() -> Self {
        fn at(after_ms: u64, event: AgentEvent) -> ScriptedEvent {
            ScriptedEvent {
                after: Duration::from_millis(after_ms),
                event,
            }
        }

        Self {
            events: vec![
                at(0, AgentEvent::CallStart),
                at(50, AgentEvent::UserSpeechStart),
                at(900, AgentEvent::UserSpeechEnd { at_ms: 0.0 }),
                at(400, AgentEvent::AssistantSpeechStart),
                at(
                    10,
                    AgentEvent::Transcript {
                        role: Role::Assistant,
                        text: "Hello! How can I help you today?".to_string(),
                        partial: false,
                        at_ms: 0.0,
                    },
                ),
                at(1200, AgentEvent::AssistantSpeechEnd),
            ],
        }
    }
}

impl Default for TurnScript {
    fn default() -> Self {
        Self::single_turn()
    }
}

/// Voice backend that replays a configured timeline
///
/// Stands in for a hosted provider in demos and integration tests: the
/// session and tracker exercise the exact same event path they would with a
/// real backend.
pub struct ScriptedClient {
    script: TurnScript,
    active: Arc<AtomicBool>,
    emitter: Option<JoinHandle<()>>,
}

impl ScriptedClient {
    pub fn new(script: TurnScript) -> Self {
        Self {
            script,
            active: Arc::new(AtomicBool::new(false)),
            emitter: None,
        }
    }
}

#[async_trait::async_trait]
impl VoiceClient for ScriptedClient {
    async fn start(&mut self, opts: StartOptions) -> Result<mpsc::Receiver<AgentEvent>> {
        info!(
            "Starting scripted call (assistant={}, voice={}, {} events)",
            opts.assistant_id,
            opts.voice_id,
            self.script.events.len()
        );

        self.active.store(true, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(64);
        let script = self.script.clone();
        let active = Arc::clone(&self.active);

        let emitter = tokio::spawn(async move {
            let epoch = Instant::now();

            for scheduled in script.events {
                tokio::time::sleep(scheduled.after).await;

                if !active.load(Ordering::SeqCst) {
                    break;
                }

                let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
                let event = stamp(scheduled.event, now_ms);

                if tx.send(event).await.is_err() {
                    break;
                }
            }

            // The receiver learns about the hangup the same way it would
            // from a real backend.
            if active.swap(false, Ordering::SeqCst) {
                let _ = tx.send(AgentEvent::CallEnd).await;
            }

            info!("Scripted call finished");
        });

        self.emitter = Some(emitter);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);

        if let Some(emitter) = self.emitter.take() {
            emitter.abort();
        }

        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fill in emitter-clock timestamps for events scripted with `at_ms: 0.0`
fn stamp(event: AgentEvent, now_ms: f64) -> AgentEvent {
    match event {
        AgentEvent::UserSpeechEnd { at_ms } if at_ms == 0.0 => {
            AgentEvent::UserSpeechEnd { at_ms: now_ms }
        }
        AgentEvent::Transcript {
            role,
            text,
            partial,
            at_ms,
        } if at_ms == 0.0 => AgentEvent::Transcript {
            role,
            text,
            partial,
            at_ms: now_ms,
        },
        other => other,
    }
}
