//! Speech output (text-to-speech) module.
//!
//! Exposes the [`SpeechSynthesizer`] trait consumed by the flow controller
//! and [`NullSynthesizer`], the degraded-mode implementation for hosts
//! without a synthesis backend.

pub mod output;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use output::{NullSynthesizer, SpeechSynthesizer};

#[cfg(test)]
pub use output::RecordingSynthesizer;
