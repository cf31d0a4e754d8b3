// Unit tests for the latency tracker and indicator model
//
// These exercise the turn arithmetic and the view states the frontend
// renders from.

use voxmeter::{IndicatorView, LatencyQuality, LatencySummary, LatencyTracker};

#[test]
fn test_current_tracks_latest_sample() {
    let mut tracker = LatencyTracker::new();

    let turns = [(1000.0, 1250.0), (3000.0, 3700.0), (5000.0, 5100.0)];
    let mut expected = Vec::new();

    for (end, reply) in turns {
        tracker.on_user_speech_end(end);
        tracker.on_assistant_transcript(reply);

        let sample = (reply - end).round() as i64;
        expected.push(sample);

        let summary = tracker.summary();
        assert_eq!(summary.current, Some(sample), "current must be the latest sample");

        let min = summary.min.unwrap();
        let avg = summary.average.unwrap();
        let max = summary.max.unwrap();
        assert!(min <= avg && avg <= max, "min <= average <= max must hold");
    }

    assert_eq!(tracker.sample_count(), expected.len());
}

#[test]
fn test_two_turn_running_summary() {
    let mut tracker = LatencyTracker::new();

    tracker.on_user_speech_end(1000.0);
    tracker.on_assistant_transcript(1350.0);

    let first = tracker.summary();
    assert_eq!(first.current, Some(350));
    assert_eq!(first.average, Some(350));
    assert_eq!(first.min, Some(350));
    assert_eq!(first.max, Some(350));

    tracker.on_user_speech_end(2000.0);
    tracker.on_assistant_transcript(2900.0);

    let second = tracker.summary();
    assert_eq!(second.current, Some(900));
    assert_eq!(second.average, Some(625));
    assert_eq!(second.min, Some(350));
    assert_eq!(second.max, Some(900));
}

#[test]
fn test_transcript_without_speech_end_changes_nothing() {
    let mut tracker = LatencyTracker::new();

    tracker.on_assistant_transcript(100.0);
    tracker.on_assistant_transcript(200.0);

    assert_eq!(tracker.summary(), LatencySummary::default());
}

#[test]
fn test_new_utterance_invalidates_pending_measurement() {
    let mut tracker = LatencyTracker::new();

    tracker.on_user_speech_end(1000.0);
    tracker.on_user_speech_start();
    assert!(!tracker.has_pending());

    // The transcript for the abandoned turn must not produce a sample
    tracker.on_assistant_transcript(1500.0);
    assert_eq!(tracker.sample_count(), 0);
}

#[test]
fn test_repeated_speech_end_keeps_latest_timestamp() {
    let mut tracker = LatencyTracker::new();

    tracker.on_user_speech_end(1000.0);
    tracker.on_user_speech_end(1800.0);
    tracker.on_assistant_transcript(2000.0);

    assert_eq!(tracker.summary().current, Some(200));
}

#[test]
fn test_reset_returns_to_absent() {
    let mut tracker = LatencyTracker::new();

    tracker.on_user_speech_end(1000.0);
    tracker.on_assistant_transcript(1400.0);
    assert!(tracker.summary().has_data());

    tracker.reset();
    assert_eq!(tracker.summary(), LatencySummary::default());
    assert_eq!(tracker.sample_count(), 0);
    assert!(!tracker.has_pending());
}

#[test]
fn test_negative_delta_recorded_as_is() {
    let mut tracker = LatencyTracker::new();

    // A skewed clock can put the transcript before the speech end
    tracker.on_user_speech_end(2000.0);
    tracker.on_assistant_transcript(1900.0);

    assert_eq!(tracker.summary().current, Some(-100));
    assert_eq!(tracker.summary().min, Some(-100));
}

#[test]
fn test_voice_catalog_lookup() {
    let default = voxmeter::default_voice();
    assert_eq!(voxmeter::find_voice(default.id), Some(default));
    assert!(voxmeter::find_voice("nope").is_none());
}

#[test]
fn test_fractional_timestamps_round() {
    let mut tracker = LatencyTracker::new();

    tracker.on_user_speech_end(1000.4);
    tracker.on_assistant_transcript(1350.9);

    // 350.5 rounds up
    assert_eq!(tracker.summary().current, Some(351));
}

#[test]
fn test_negative_half_delta_rounds_toward_positive() {
    let mut tracker = LatencyTracker::new();

    // -350.5 rounds toward positive infinity, not away from zero
    tracker.on_user_speech_end(2000.0);
    tracker.on_assistant_transcript(1649.5);
    assert_eq!(tracker.summary().current, Some(-350));

    // The average rounds the same way: mean of -350 and -351 is -350.5
    tracker.on_user_speech_end(3000.0);
    tracker.on_assistant_transcript(2649.0);
    assert_eq!(tracker.summary().current, Some(-351));
    assert_eq!(tracker.summary().average, Some(-350));
}

#[test]
fn test_quality_bands() {
    assert_eq!(LatencyQuality::from_ms(0), LatencyQuality::Excellent);
    assert_eq!(LatencyQuality::from_ms(299), LatencyQuality::Excellent);
    assert_eq!(LatencyQuality::from_ms(300), LatencyQuality::Good);
    assert_eq!(LatencyQuality::from_ms(599), LatencyQuality::Good);
    assert_eq!(LatencyQuality::from_ms(600), LatencyQuality::Fair);
    assert_eq!(LatencyQuality::from_ms(999), LatencyQuality::Fair);
    assert_eq!(LatencyQuality::from_ms(1000), LatencyQuality::Slow);
    assert_eq!(LatencyQuality::from_ms(-50), LatencyQuality::Excellent);
}

#[test]
fn test_indicator_view_states() {
    let empty = LatencySummary::default();

    assert_eq!(
        IndicatorView::from_summary(empty, false),
        IndicatorView::Inactive
    );
    assert_eq!(
        IndicatorView::from_summary(empty, true),
        IndicatorView::AwaitingSpeech
    );

    let mut tracker = LatencyTracker::new();
    tracker.on_user_speech_end(0.0);
    tracker.on_assistant_transcript(450.0);

    let view = IndicatorView::from_summary(tracker.summary(), true);
    match view {
        IndicatorView::Measured { summary, quality } => {
            assert_eq!(summary.current, Some(450));
            assert_eq!(quality, LatencyQuality::Good);
        }
        other => panic!("expected measured view, got {:?}", other),
    }

    // Disconnecting wins over having data
    assert_eq!(
        IndicatorView::from_summary(tracker.summary(), false),
        IndicatorView::Inactive
    );
}

#[test]
fn test_indicator_display_text() {
    assert_eq!(
        IndicatorView::Inactive.to_string(),
        "Latency monitoring inactive"
    );
    assert_eq!(
        IndicatorView::AwaitingSpeech.to_string(),
        "Start speaking to measure latency..."
    );

    let mut tracker = LatencyTracker::new();
    tracker.on_user_speech_end(0.0);
    tracker.on_assistant_transcript(250.0);

    let text = IndicatorView::from_summary(tracker.summary(), true).to_string();
    assert!(text.contains("250ms"));
    assert!(text.contains("Excellent"));
}
