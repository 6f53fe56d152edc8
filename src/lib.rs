//! Two-way spoken-language translation core.
//!
//! A user speaks in one of two configured languages; the utterance is
//! transcribed, translated, and the translation is both written into the
//! counterpart text buffer and spoken aloud in the counterpart language.
//! The two sides are symmetric and swappable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   FlowEvent    ┌────────────────┐
//! │  frontend    │──────────────▶│ FlowController  │──▶ SharedState
//! └─────────────┘    (mpsc)     └───────┬────────┘    (read back by
//!                                        │              the frontend)
//!          ┌─────────────────┬───────────┼──────────────────┐
//!          ▼                 ▼           ▼                  ▼
//!   LanguageRegistry  SpeechRecognizer  Translator   SpeechSynthesizer
//!   (fixed table)     (one-shot STT     (HTTP gtx    (cancel-before-
//!                      sessions)         endpoint)    speak TTS)
//! ```
//!
//! Speech-to-text, text-to-speech, and the translation endpoint are external
//! capabilities behind the traits in [`recognition`], [`speech`] and
//! [`translate`]; the crate is the orchestration between them.

pub mod config;
pub mod flow;
pub mod lang;
pub mod recognition;
pub mod speech;
pub mod translate;
