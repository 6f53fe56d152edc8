//! Core speech-recognition trait and session events.
//!
//! # Overview
//!
//! [`SpeechRecognizer`] is the seam between the flow controller and whatever
//! speech-to-text engine the host provides.  It is object-safe and
//! `Send + Sync` so it can be held behind an `Arc<dyn SpeechRecognizer>`.
//!
//! A session is **one-shot**: `start` acquires the microphone, the engine
//! emits at most one final [`RecognitionEvent::Transcript`] (interim partial
//! results are discarded at the engine), then exactly one
//! [`RecognitionEvent::Ended`] regardless of how the session terminated —
//! natural completion, explicit `stop`, or engine error.  On error the engine
//! emits [`RecognitionEvent::Failed`] before `Ended` and no transcript.
//!
//! Engines deliver events into the flow controller's event channel; each
//! implementation receives the sender at construction time, so the trait
//! itself stays channel-agnostic.
//!
//! [`UnavailableRecognizer`] is the degraded-mode implementation installed
//! when the host offers no speech-to-text capability at all: `start` always
//! fails with [`RecognitionError::CapabilityUnavailable`] and everything else
//! (manual text entry, translation, speech output) keeps working.

use thiserror::Error;

use crate::flow::Side;

// ---------------------------------------------------------------------------
// RecognitionError
// ---------------------------------------------------------------------------

/// All errors that can arise from the recognition subsystem.
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    /// The host environment offers no speech-to-text capability.  Detected at
    /// startup; recognition stays disabled for the rest of the session.
    #[error("Speech recognition is not available on this system")]
    CapabilityUnavailable,

    /// A session is already in progress.  The flow controller swallows this
    /// without surfacing it to the user — the active session is preserved.
    #[error("A recognition session is already in progress")]
    AlreadyListening,

    /// The engine failed to start or aborted mid-session.
    #[error("Recognition engine error: {0}")]
    Engine(String),
}

// ---------------------------------------------------------------------------
// RecognitionEvent
// ---------------------------------------------------------------------------

/// Terminal and result events emitted by a recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The single final transcript of a one-shot session, tagged with the
    /// side whose microphone initiated it.
    Transcript { side: Side, text: String },

    /// The session terminated — by natural completion, explicit stop, or
    /// after an error.  Emitted exactly once per session.
    Ended,

    /// The engine reported a failure mid-session.  Non-fatal; `Ended`
    /// follows and no transcript is produced.
    Failed { reason: String },
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for one-shot speech-to-text sessions.
///
/// # Contract
///
/// - At most one session may be in flight; the flow controller enforces this
///   and never calls `start` while a previous session has not yet `Ended`.
/// - `start` takes the speech-engine locale tag (e.g. `"zh-HK"`) of the
///   language selected on the initiating side.
/// - `stop` only *requests* termination; the session is over when the engine
///   delivers `Ended`, not before — the microphone resource may still be
///   held in between.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a one-shot recognition session in the given locale, acquiring
    /// the microphone.
    fn start(&self, side: Side, locale: &str) -> Result<(), RecognitionError>;

    /// Request termination of the in-flight session.  A no-op when no
    /// session is active.
    fn stop(&self);
}

// Compile-time assertion: Box<dyn SpeechRecognizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechRecognizer>) {}
};

// ---------------------------------------------------------------------------
// UnavailableRecognizer
// ---------------------------------------------------------------------------

/// Fallback recognizer for hosts without a speech-to-text engine.
///
/// Every `start` fails with [`RecognitionError::CapabilityUnavailable`] so
/// the flow controller surfaces a message and stays idle; no microphone is
/// ever touched.
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

impl SpeechRecognizer for UnavailableRecognizer {
    fn start(&self, side: Side, locale: &str) -> Result<(), RecognitionError> {
        log::warn!(
            "recognition: start({}, {locale}) refused — no engine on this host",
            side.label()
        );
        Err(RecognitionError::CapabilityUnavailable)
    }

    fn stop(&self) {}
}

// ---------------------------------------------------------------------------
// MockRecognizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records `start`/`stop` calls instead of touching any
/// audio hardware.  Session events are injected by the test directly into
/// the controller's channel, keeping event ordering deterministic.
#[cfg(test)]
#[derive(Default)]
pub struct MockRecognizer {
    starts: std::sync::Mutex<Vec<(Side, String)>>,
    stops: std::sync::atomic::AtomicUsize,
    fail_start: Option<RecognitionError>,
}

#[cfg(test)]
impl MockRecognizer {
    /// A mock whose `start` always succeeds.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A mock whose `start` always returns `error`.
    pub fn failing(error: RecognitionError) -> Self {
        Self {
            fail_start: Some(error),
            ..Self::default()
        }
    }

    /// All `(side, locale)` pairs passed to `start`, in call order.
    pub fn starts(&self) -> Vec<(Side, String)> {
        self.starts.lock().unwrap().clone()
    }

    /// Number of `stop` calls so far.
    pub fn stop_count(&self) -> usize {
        self.stops.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SpeechRecognizer for MockRecognizer {
    fn start(&self, side: Side, locale: &str) -> Result<(), RecognitionError> {
        if let Some(err) = &self.fail_start {
            return Err(err.clone());
        }
        self.starts.lock().unwrap().push((side, locale.to_string()));
        Ok(())
    }

    fn stop(&self) {
        self.stops
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- UnavailableRecognizer ---

    #[test]
    fn unavailable_start_fails_with_capability_unavailable() {
        let rec = UnavailableRecognizer;
        let err = rec.start(Side::Source, "en-US").unwrap_err();
        assert!(matches!(err, RecognitionError::CapabilityUnavailable));
    }

    #[test]
    fn unavailable_stop_is_a_no_op() {
        UnavailableRecognizer.stop();
    }

    // --- MockRecognizer ---

    #[test]
    fn mock_records_start_calls_in_order() {
        let rec = MockRecognizer::ok();
        rec.start(Side::Source, "zh-HK").unwrap();
        rec.start(Side::Dest, "ja-JP").unwrap();

        assert_eq!(
            rec.starts(),
            vec![
                (Side::Source, "zh-HK".to_string()),
                (Side::Dest, "ja-JP".to_string()),
            ]
        );
    }

    #[test]
    fn mock_counts_stops() {
        let rec = MockRecognizer::ok();
        rec.stop();
        rec.stop();
        assert_eq!(rec.stop_count(), 2);
    }

    #[test]
    fn failing_mock_returns_configured_error() {
        let rec = MockRecognizer::failing(RecognitionError::Engine("no mic".into()));
        let err = rec.start(Side::Source, "en-US").unwrap_err();
        assert!(matches!(err, RecognitionError::Engine(_)));
        assert!(rec.starts().is_empty());
    }

    // --- object safety ---

    #[test]
    fn box_dyn_recognizer_compiles() {
        let rec: Box<dyn SpeechRecognizer> = Box::new(MockRecognizer::ok());
        let _ = rec.start(Side::Source, "en-US");
    }

    // --- error display ---

    #[test]
    fn error_display_capability_unavailable() {
        let e = RecognitionError::CapabilityUnavailable;
        assert!(e.to_string().contains("not available"));
    }

    #[test]
    fn error_display_engine_includes_reason() {
        let e = RecognitionError::Engine("audio-capture".into());
        assert!(e.to_string().contains("audio-capture"));
    }
}
