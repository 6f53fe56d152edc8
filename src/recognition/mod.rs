//! Speech recognition module.
//!
//! Wraps a single external one-shot speech-to-text session behind the
//! [`SpeechRecognizer`] trait.  The flow controller owns the single-flight
//! guard; this module owns the session contract (one transcript at most,
//! exactly one `Ended` per session) and the degraded-mode fallback for hosts
//! without a speech engine.

pub mod engine;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::{RecognitionError, RecognitionEvent, SpeechRecognizer, UnavailableRecognizer};

// test-only re-export so the flow controller test module can import
// MockRecognizer without `use speech_translate::recognition::engine::MockRecognizer`.
#[cfg(test)]
pub use engine::MockRecognizer;
