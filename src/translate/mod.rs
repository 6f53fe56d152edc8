//! Translation module.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by all translation backends.
//! * [`HttpTranslator`] — gtx-style HTTP GET translation client.
//! * [`concat_fragments`] — nested-array response body parser.
//! * [`TranslateError`] — error variants for translation operations.

pub mod client;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{concat_fragments, HttpTranslator, TranslateError, Translator};
