//! Response-latency measurement
//!
//! This module provides the `LatencyTracker` that measures the time between
//! the user finishing an utterance and the assistant's first transcript for
//! that turn, plus the presentation model derived from it:
//! - Rolling summary (current/average/min/max) over the session's samples
//! - Qualitative banding (excellent/good/fair/slow)
//! - Indicator view states for the frontend

mod indicator;
mod tracker;

pub use indicator::{IndicatorView, LatencyQuality};
pub use tracker::{LatencySummary, LatencyTracker};
