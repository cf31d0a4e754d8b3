use serde::Serialize;
use tracing::info;

/// Rolling digest of response-latency samples for the current session
///
/// All fields are `None` until the first sample is recorded and return to
/// `None` when the tracker is reset at the start of a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LatencySummary {
    /// Most recently recorded sample, in milliseconds
    pub current: Option<i64>,

    /// Rounded mean over all samples this session
    pub average: Option<i64>,

    /// Smallest sample this session
    pub min: Option<i64>,

    /// Largest sample this session
    pub max: Option<i64>,
}

impl LatencySummary {
    /// True once at least one sample has been recorded
    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }
}

/// Measures user-speech-end to assistant-transcript latency
///
/// One turn produces one sample: `on_user_speech_end` arms a pending
/// timestamp and the next `on_assistant_transcript` closes it. Events that
/// arrive without a pending timestamp (duplicate transcripts, mid-utterance
/// partials) are ignored. The sample list is unbounded; it lives for the
/// session and a conversational session is human-scale.
///
/// Timestamps are fractional milliseconds supplied by the event producer.
/// The tracker never reads a clock itself. Deltas are recorded as-is, even
/// zero or negative ones from a skewed clock or reordered events: the
/// summary is diagnostic, not correctness-critical.
#[derive(Debug, Default)]
pub struct LatencyTracker {
    /// End-of-user-speech timestamp awaiting a matching assistant response
    pending_ms: Option<f64>,

    /// All samples recorded this session, in arrival order
    samples: Vec<i64>,

    summary: LatencySummary,
}

impl LatencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user started a new utterance: any prior pending measurement is
    /// invalid now (the assistant has not replied to the previous one).
    pub fn on_user_speech_start(&mut self) {
        self.discard_pending();
    }

    /// Drop any pending timestamp without recording a sample
    pub fn discard_pending(&mut self) {
        self.pending_ms = None;
    }

    /// The user stopped speaking at `timestamp_ms`. Overwrites any existing
    /// pending timestamp; only the most recent stop-of-speech matters.
    pub fn on_user_speech_end(&mut self, timestamp_ms: f64) {
        self.pending_ms = Some(timestamp_ms);
    }

    /// An assistant transcript arrived at `timestamp_ms`. Closes the pending
    /// turn if one exists, otherwise ignored.
    pub fn on_assistant_transcript(&mut self, timestamp_ms: f64) {
        let Some(pending) = self.pending_ms.take() else {
            return;
        };

        // Half-millisecond deltas round toward positive infinity, which
        // matters for negative deltas from a skewed clock
        let sample = (timestamp_ms - pending + 0.5).floor() as i64;
        info!("Recorded response latency: {} ms", sample);

        self.samples.push(sample);
        self.recompute(sample);
    }

    /// Discard all samples and any pending timestamp. Called on every
    /// transition into a connected session.
    pub fn reset(&mut self) {
        self.pending_ms = None;
        self.samples.clear();
        self.summary = LatencySummary::default();
    }

    /// Current four-number digest
    pub fn summary(&self) -> LatencySummary {
        self.summary
    }

    /// Number of samples recorded this session
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// True while a speech-end timestamp is waiting for its transcript
    pub fn has_pending(&self) -> bool {
        self.pending_ms.is_some()
    }

    fn recompute(&mut self, latest: i64) {
        let sum: i64 = self.samples.iter().sum();
        // Same rounding as the samples themselves
        let average = (sum as f64 / self.samples.len() as f64 + 0.5).floor() as i64;

        self.summary = LatencySummary {
            current: Some(latest),
            average: Some(average),
            min: self.samples.iter().min().copied(),
            max: self.samples.iter().max().copied(),
        };
    }
}
