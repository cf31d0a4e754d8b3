use super::tracker::LatencySummary;
use serde::Serialize;
use std::fmt;

/// Qualitative band for a latency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyQuality {
    Excellent,
    Good,
    Fair,
    Slow,
}

impl LatencyQuality {
    /// Band a latency value: <300ms excellent, <600ms good, <1000ms fair,
    /// anything else slow.
    pub fn from_ms(ms: i64) -> Self {
        if ms < 300 {
            LatencyQuality::Excellent
        } else if ms < 600 {
            LatencyQuality::Good
        } else if ms < 1000 {
            LatencyQuality::Fair
        } else {
            LatencyQuality::Slow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LatencyQuality::Excellent => "Excellent",
            LatencyQuality::Good => "Good",
            LatencyQuality::Fair => "Fair",
            LatencyQuality::Slow => "Slow",
        }
    }
}

/// What the latency indicator should show, as pure data
///
/// The frontend decides pixels; this type decides which of the three states
/// applies and carries the numbers for the measured case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndicatorView {
    /// Not connected: latency monitoring inactive
    Inactive,

    /// Connected but no samples yet: prompt the user to speak
    AwaitingSpeech,

    /// At least one sample recorded
    Measured {
        summary: LatencySummary,
        quality: LatencyQuality,
    },
}

impl IndicatorView {
    /// Derive the view from the current summary and connection flag
    pub fn from_summary(summary: LatencySummary, connected: bool) -> Self {
        if !connected {
            return IndicatorView::Inactive;
        }

        match summary.current {
            Some(current) => IndicatorView::Measured {
                summary,
                quality: LatencyQuality::from_ms(current),
            },
            None => IndicatorView::AwaitingSpeech,
        }
    }
}

impl fmt::Display for IndicatorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorView::Inactive => write!(f, "Latency monitoring inactive"),
            IndicatorView::AwaitingSpeech => {
                write!(f, "Start speaking to measure latency...")
            }
            IndicatorView::Measured { summary, quality } => write!(
                f,
                "{}ms ({}) | min {}ms / avg {}ms / max {}ms",
                summary.current.unwrap_or_default(),
                quality.label(),
                summary.min.unwrap_or_default(),
                summary.average.unwrap_or_default(),
                summary.max.unwrap_or_default(),
            ),
        }
    }
}
