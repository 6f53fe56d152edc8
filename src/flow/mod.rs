//! Flow module — interaction state and the event-driven controller.
//!
//! This module wires frontend actions and recognition callbacks into the
//! listen → transcribe → translate → speak pipeline and exposes the shared
//! state that the frontend reads.
//!
//! # Architecture
//!
//! ```text
//! FlowEvent (mpsc) ← frontend actions + recognition callbacks
//!        │
//!        ▼
//! FlowController::run()  ← async tokio task
//!        │
//!        ├─ SetSourceLanguage / SetDestLanguage → validate via registry
//!        ├─ Swap                                → exchange langs + buffers
//!        ├─ MicPressed(side)                    → single-flight session guard
//!        ├─ SpeakPressed(side)                  → synthesizer.speak
//!        │
//!        └─ Recognition(Transcript)
//!              │
//!              ├─ write initiating side's buffer
//!              ├─ Translator::translate (awaited)
//!              └─ write opposite buffer, SpeechSynthesizer::speak
//!
//! SharedState (Arc<Mutex<FlowState>>) ←─── read by the frontend
//! ```

pub mod controller;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{FlowController, FlowEvent};
pub use state::{new_shared_state, FlowState, ListeningState, SharedState, Side};
