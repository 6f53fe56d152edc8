//! Flow controller — drives the full listen → transcribe → translate → speak
//! pipeline.
//!
//! [`FlowController`] owns the [`SharedState`] and responds to
//! [`FlowEvent`]s received over a `tokio::sync::mpsc` channel.  Frontend
//! actions and recognition-session callbacks arrive through the same
//! channel, so every handler runs to completion before the next event is
//! processed — no half-swapped state, no interleaved pipelines.
//!
//! # Pipeline flow
//!
//! ```text
//! MicPressed(side)            [Idle]
//!   └─▶ set Listening(side), recognizer.start(side, speech locale)
//!
//! Recognition(Transcript { side, text })
//!   └─▶ write side's buffer
//!         └─▶ translator.translate(text, side code, opposite code)  (awaited)
//!               ├─ Ok  → write opposite buffer, speak in opposite locale
//!               └─ Err → leave opposite buffer untouched, surface message
//!
//! Recognition(Ended)   — stop, natural completion, or error alike
//!   └─▶ Listening(_) → Idle
//! ```
//!
//! # Single-flight listening
//!
//! At most one recognition session is in flight.  A mic press on the side
//! that is already listening requests a stop; a press on the *other* side is
//! swallowed (logged at debug), preserving the active session.  The state
//! only returns to idle when the engine confirms termination via `Ended` —
//! never on the stop request itself, so a new session cannot start before
//! the microphone is actually released.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::lang::LanguageRegistry;
use crate::recognition::{RecognitionEvent, SpeechRecognizer};
use crate::speech::SpeechSynthesizer;
use crate::translate::Translator;

use super::state::{ListeningState, SharedState, Side};

// ---------------------------------------------------------------------------
// FlowEvent
// ---------------------------------------------------------------------------

/// Everything the controller reacts to: frontend actions and recognition
/// session callbacks, merged into one ordered stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// Select a new language on the source side.
    SetSourceLanguage(String),
    /// Select a new language on the destination side.
    SetDestLanguage(String),
    /// Manual edit of one side's text buffer.
    SetText(Side, String),
    /// Exchange the two languages and the two buffers.
    Swap,
    /// Microphone toggle on one side.
    MicPressed(Side),
    /// Speak-aloud button on one side.
    SpeakPressed(Side),
    /// Callback from the recognition engine.
    Recognition(RecognitionEvent),
}

// ---------------------------------------------------------------------------
// FlowController
// ---------------------------------------------------------------------------

/// Drives the complete two-way translation flow.
///
/// Create with [`FlowController::new`], then call [`run`](Self::run) inside
/// a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use speech_translate::flow::{new_shared_state, FlowController};
/// use speech_translate::lang::LanguageRegistry;
///
/// # async fn example() {
/// # use speech_translate::recognition::SpeechRecognizer;
/// # use speech_translate::speech::SpeechSynthesizer;
/// # use speech_translate::translate::Translator;
/// # fn make_recognizer() -> Arc<dyn SpeechRecognizer> { unimplemented!() }
/// # fn make_translator() -> Arc<dyn Translator> { unimplemented!() }
/// # fn make_synthesizer() -> Arc<dyn SpeechSynthesizer> { unimplemented!() }
/// let state = new_shared_state("yue", "ja");
/// let (event_tx, event_rx) = tokio::sync::mpsc::channel(32);
///
/// let controller = FlowController::new(
///     LanguageRegistry::builtin(),
///     state,
///     make_recognizer(),
///     make_translator(),
///     make_synthesizer(),
/// );
/// controller.run(event_rx).await;
/// # }
/// ```
pub struct FlowController {
    registry: LanguageRegistry,
    state: SharedState,
    recognizer: Arc<dyn SpeechRecognizer>,
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl FlowController {
    /// Create a new controller.
    ///
    /// # Arguments
    ///
    /// * `registry`    — fixed language table; both keys in `state` must be
    ///   present in it.
    /// * `state`       — shared interaction state (also read by the frontend).
    /// * `recognizer`  — speech-to-text session seam.
    /// * `translator`  — translation backend (e.g. `HttpTranslator`).
    /// * `synthesizer` — text-to-speech seam.
    pub fn new(
        registry: LanguageRegistry,
        state: SharedState,
        recognizer: Arc<dyn SpeechRecognizer>,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            registry,
            state,
            recognizer,
            translator,
            synthesizer,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the controller until `event_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(self, mut event_rx: mpsc::Receiver<FlowEvent>) {
        while let Some(event) = event_rx.recv().await {
            match event {
                FlowEvent::SetSourceLanguage(key) => self.handle_set_language(Side::Source, &key),
                FlowEvent::SetDestLanguage(key) => self.handle_set_language(Side::Dest, &key),
                FlowEvent::SetText(side, text) => self.handle_set_text(side, text),
                FlowEvent::Swap => self.handle_swap(),
                FlowEvent::MicPressed(side) => self.handle_mic_pressed(side),
                FlowEvent::SpeakPressed(side) => self.handle_speak_pressed(side),
                FlowEvent::Recognition(ev) => self.handle_recognition(ev).await,
            }
        }

        log::info!("flow: event channel closed, controller shutting down");
    }

    // -----------------------------------------------------------------------
    // Frontend events
    // -----------------------------------------------------------------------

    /// Replace `side`'s selected language after validating the key.
    ///
    /// An unknown key is a programming error (the frontend only offers
    /// registry-backed keys); it is logged and the selection is left
    /// unchanged.
    fn handle_set_language(&self, side: Side, key: &str) {
        if let Err(e) = self.registry.lookup(key) {
            log::error!("flow: rejected language change on {}: {e}", side.label());
            return;
        }

        let mut st = self.state.lock().unwrap();
        match side {
            Side::Source => st.source_lang = key.to_string(),
            Side::Dest => st.dest_lang = key.to_string(),
        }
        log::debug!("flow: {} language = {key}", side.label());
    }

    fn handle_set_text(&self, side: Side, text: String) {
        self.state.lock().unwrap().set_text(side, text);
    }

    /// Exchange languages and buffers in one critical section.
    fn handle_swap(&self) {
        self.state.lock().unwrap().swap();
        log::debug!("flow: sides swapped");
    }

    /// Microphone toggle: start a session when idle, request a stop when the
    /// pressing side is listening, swallow the press otherwise.
    fn handle_mic_pressed(&self, side: Side) {
        let listening = self.state.lock().unwrap().listening;

        match listening.active_side() {
            None => self.start_listening(side),
            Some(active) if active == side => {
                // The state stays Listening until the engine confirms
                // termination with Ended — the microphone may still be held.
                log::debug!("flow: stop requested on {}", side.label());
                self.recognizer.stop();
            }
            Some(active) => {
                // AlreadyListening: swallowed by design, the active session
                // is preserved and the press is not surfaced as an error.
                log::debug!(
                    "flow: mic press on {} swallowed — {} is listening",
                    side.label(),
                    active.label()
                );
            }
        }
    }

    /// Start a one-shot session for `side` in its selected language.
    fn start_listening(&self, side: Side) {
        let key = {
            let st = self.state.lock().unwrap();
            st.lang_key(side).to_string()
        };

        let entry = match self.registry.lookup(&key) {
            Ok(entry) => entry,
            Err(e) => {
                // Selections are validated on the way in, so this indicates
                // state corruption.
                log::error!("flow: selected language vanished from registry: {e}");
                return;
            }
        };

        {
            let mut st = self.state.lock().unwrap();
            st.listening = ListeningState::Listening(side);
            st.error_message = None;
        }

        match self.recognizer.start(side, &entry.speech_locale) {
            Ok(()) => {
                log::debug!(
                    "flow: listening on {} ({})",
                    side.label(),
                    entry.speech_locale
                );
            }
            Err(e) => {
                log::warn!("flow: failed to start recognition: {e}");
                let mut st = self.state.lock().unwrap();
                st.listening = ListeningState::Idle;
                st.error_message = Some(e.to_string());
            }
        }
    }

    /// Speak-aloud button: read the side's buffer in the side's own language.
    fn handle_speak_pressed(&self, side: Side) {
        let (text, key) = {
            let st = self.state.lock().unwrap();
            (st.text(side).to_string(), st.lang_key(side).to_string())
        };

        if text.is_empty() {
            return;
        }

        match self.registry.lookup(&key) {
            Ok(entry) => self.synthesizer.speak(&text, &entry.speech_locale),
            Err(e) => log::error!("flow: selected language vanished from registry: {e}"),
        }
    }

    // -----------------------------------------------------------------------
    // Recognition events
    // -----------------------------------------------------------------------

    async fn handle_recognition(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Transcript { side, text } => {
                self.handle_transcript(side, text).await;
            }
            RecognitionEvent::Ended => {
                let mut st = self.state.lock().unwrap();
                if !st.listening.is_idle() {
                    log::debug!("flow: recognition session ended");
                }
                st.listening = ListeningState::Idle;
            }
            RecognitionEvent::Failed { reason } => {
                log::error!("flow: recognition error: {reason}");
                self.set_error(format!("Recognition error: {reason}"));
            }
        }
    }

    /// Route a final transcript into the pipeline: buffer write, translation
    /// into the opposite language, then speech output — strictly in that
    /// order.
    async fn handle_transcript(&self, side: Side, text: String) {
        // A transcript is only valid while its session is the active one.
        // This drops results that race an explicit stop or arrive after an
        // error termination.
        let (from_key, to_key) = {
            let mut st = self.state.lock().unwrap();
            if st.listening != ListeningState::Listening(side) {
                log::debug!(
                    "flow: dropping stale transcript for {} ({:?} active)",
                    side.label(),
                    st.listening
                );
                return;
            }

            st.set_text(side, text.clone());
            (
                st.lang_key(side).to_string(),
                st.lang_key(side.opposite()).to_string(),
            )
        };

        if text.trim().is_empty() {
            return;
        }

        let (from_entry, to_entry) = match (self.registry.lookup(&from_key), self.registry.lookup(&to_key)) {
            (Ok(f), Ok(t)) => (f, t),
            _ => {
                log::error!("flow: selected language vanished from registry");
                return;
            }
        };

        log::debug!(
            "flow: translating {} → {} ({} chars)",
            from_entry.translate_code,
            to_entry.translate_code,
            text.len()
        );

        match self
            .translator
            .translate(&text, &from_entry.translate_code, &to_entry.translate_code)
            .await
        {
            Ok(translated) => {
                self.state
                    .lock()
                    .unwrap()
                    .set_text(side.opposite(), translated.clone());
                self.synthesizer.speak(&translated, &to_entry.speech_locale);
            }
            Err(e) => {
                // The opposite buffer keeps its previous contents.
                log::warn!("flow: translation failed: {e}");
                self.set_error(format!("Translation failed: {e}"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_error(&self, message: String) {
        self.state.lock().unwrap().error_message = Some(message);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
