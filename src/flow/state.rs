//! Interaction state shared between the flow controller and the frontend.
//!
//! [`FlowState`] is the single source of truth: the selected language key and
//! text buffer for each side, the listening status, and any error message to
//! surface.  The controller mutates it; the frontend reads it.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<FlowState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One half of the two-way translation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Dest,
}

impl Side {
    /// The other half.
    pub fn opposite(self) -> Side {
        match self {
            Side::Source => Side::Dest,
            Side::Dest => Side::Source,
        }
    }

    /// A short label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Dest => "dest",
        }
    }
}

// ---------------------------------------------------------------------------
// ListeningState
// ---------------------------------------------------------------------------

/// Whether a recognition session is active, and on which side.
///
/// Only these two shapes exist — there is never more than one active
/// session, and no nested listening states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListeningState {
    /// No recognition session in progress.
    #[default]
    Idle,
    /// A one-shot session triggered by the given side's microphone.
    Listening(Side),
}

impl ListeningState {
    /// `true` when no session is active.
    pub fn is_idle(self) -> bool {
        matches!(self, ListeningState::Idle)
    }

    /// The side that owns the active session, if any.
    pub fn active_side(self) -> Option<Side> {
        match self {
            ListeningState::Idle => None,
            ListeningState::Listening(side) => Some(side),
        }
    }
}

// ---------------------------------------------------------------------------
// FlowState
// ---------------------------------------------------------------------------

/// Mutable interaction state for one UI session.
///
/// Created at startup with the configured default languages; destroyed with
/// the session; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    /// Registry key selected on the source side.
    pub source_lang: String,
    /// Registry key selected on the destination side.
    pub dest_lang: String,
    /// Most recent transcribed or translated text on the source side.
    pub source_text: String,
    /// Most recent transcribed or translated text on the destination side.
    pub dest_text: String,
    /// Current listening status.
    pub listening: ListeningState,
    /// Error message to surface, set by the controller on recognition or
    /// translation failures and cleared when a new session starts.
    pub error_message: Option<String>,
}

impl FlowState {
    /// Create a new state with the given default language keys and empty
    /// buffers.
    pub fn new(source_lang: impl Into<String>, dest_lang: impl Into<String>) -> Self {
        Self {
            source_lang: source_lang.into(),
            dest_lang: dest_lang.into(),
            source_text: String::new(),
            dest_text: String::new(),
            listening: ListeningState::Idle,
            error_message: None,
        }
    }

    /// The language key selected on `side`.
    pub fn lang_key(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_lang,
            Side::Dest => &self.dest_lang,
        }
    }

    /// The text buffer for `side`.
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_text,
            Side::Dest => &self.dest_text,
        }
    }

    /// Overwrite the text buffer for `side`.  Buffers are always replaced
    /// wholesale, never appended to.
    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        match side {
            Side::Source => self.source_text = text.into(),
            Side::Dest => self.dest_text = text.into(),
        }
    }

    /// Exchange the two language keys and the two text buffers.
    ///
    /// Runs under a single `&mut` borrow, so with the state behind
    /// [`SharedState`] no reader can observe a half-swapped state.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.dest_lang);
        std::mem::swap(&mut self.source_text, &mut self.dest_text);
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`FlowState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<FlowState>>;

/// Construct a new [`SharedState`] with the given default language keys.
pub fn new_shared_state(
    source_lang: impl Into<String>,
    dest_lang: impl Into<String>,
) -> SharedState {
    Arc::new(Mutex::new(FlowState::new(source_lang, dest_lang)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Side ---

    #[test]
    fn opposite_is_an_involution() {
        assert_eq!(Side::Source.opposite(), Side::Dest);
        assert_eq!(Side::Dest.opposite(), Side::Source);
        assert_eq!(Side::Source.opposite().opposite(), Side::Source);
    }

    // ---- ListeningState ---

    #[test]
    fn default_listening_state_is_idle() {
        assert!(ListeningState::default().is_idle());
        assert_eq!(ListeningState::default().active_side(), None);
    }

    #[test]
    fn listening_reports_its_side() {
        let st = ListeningState::Listening(Side::Dest);
        assert!(!st.is_idle());
        assert_eq!(st.active_side(), Some(Side::Dest));
    }

    // ---- FlowState ---

    #[test]
    fn new_state_has_empty_buffers_and_is_idle() {
        let st = FlowState::new("yue", "ja");
        assert_eq!(st.source_lang, "yue");
        assert_eq!(st.dest_lang, "ja");
        assert!(st.source_text.is_empty());
        assert!(st.dest_text.is_empty());
        assert!(st.listening.is_idle());
        assert!(st.error_message.is_none());
    }

    #[test]
    fn same_language_on_both_sides_is_legal() {
        let st = FlowState::new("en", "en");
        assert_eq!(st.lang_key(Side::Source), st.lang_key(Side::Dest));
    }

    #[test]
    fn set_text_overwrites() {
        let mut st = FlowState::new("en", "ja");
        st.set_text(Side::Dest, "first");
        st.set_text(Side::Dest, "second");
        assert_eq!(st.text(Side::Dest), "second");
        assert_eq!(st.text(Side::Source), "");
    }

    #[test]
    fn swap_exchanges_languages_and_buffers() {
        let mut st = FlowState::new("yue", "ja");
        st.set_text(Side::Source, "你好");
        st.set_text(Side::Dest, "こんにちは");

        st.swap();

        assert_eq!(st.source_lang, "ja");
        assert_eq!(st.dest_lang, "yue");
        assert_eq!(st.source_text, "こんにちは");
        assert_eq!(st.dest_text, "你好");
    }

    /// swap(); swap() restores the original state for any starting state.
    #[test]
    fn swap_is_an_involution() {
        let mut st = FlowState::new("en", "ko");
        st.set_text(Side::Source, "hello");
        st.set_text(Side::Dest, "안녕하세요");
        st.listening = ListeningState::Listening(Side::Source);

        let before = st.clone();
        st.swap();
        st.swap();
        assert_eq!(st, before);
    }

    // ---- SharedState ---

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state("yue", "ja");
        let state2 = Arc::clone(&state);

        state.lock().unwrap().listening = ListeningState::Listening(Side::Source);
        assert_eq!(
            state2.lock().unwrap().listening,
            ListeningState::Listening(Side::Source)
        );
    }
}
