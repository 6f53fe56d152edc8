//! Core speech-synthesis trait and the degraded-mode implementation.
//!
//! Speech output is fire-and-forget: `speak` must never block the flow
//! controller.  The audio device is exclusive — implementations cancel any
//! in-progress utterance before starting the new one, so at most one
//! utterance is audible and the newest request always wins (interrupt
//! semantics, not queueing).

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for text-to-speech output.
///
/// # Contract
///
/// - `speak("")` is a no-op.
/// - `speak` first cancels any utterance currently being spoken.
/// - Voice selection for `locale` is best-effort; falling back to a default
///   voice for the locale is acceptable and expected.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` aloud in the given speech locale (e.g. `"ja-JP"`).
    fn speak(&self, text: &str, locale: &str);

    /// Cancel any in-progress utterance.
    fn cancel_all(&self);
}

// Compile-time assertion: Box<dyn SpeechSynthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// NullSynthesizer
// ---------------------------------------------------------------------------

/// Fallback synthesizer for hosts without a text-to-speech capability.
///
/// Discards every request, logging at debug so a translation pipeline can
/// still be traced end to end.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn speak(&self, text: &str, locale: &str) {
        if text.is_empty() {
            return;
        }
        log::debug!("speech: no synthesis backend — dropping {locale} utterance ({} chars)", text.len());
    }

    fn cancel_all(&self) {}
}

// ---------------------------------------------------------------------------
// RecordingSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records every `speak` call.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSynthesizer {
    spoken: std::sync::Mutex<Vec<(String, String)>>,
    cancels: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(text, locale)` pairs passed to `speak`, in call order.
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }

    /// Number of `cancel_all` calls so far.
    pub fn cancel_count(&self) -> usize {
        self.cancels.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str, locale: &str) {
        if text.is_empty() {
            return;
        }
        // Cancel-before-speak contract: count the implicit cancellation so
        // tests can assert interrupt semantics.
        self.cancels
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), locale.to_string()));
    }

    fn cancel_all(&self) {
        self.cancels
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
