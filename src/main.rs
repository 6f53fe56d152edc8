//! Application entry point — two-way speech translator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Validate the configured default languages against the registry.
//! 4. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 5. Detect host capabilities — speech recognition and synthesis degrade to
//!    their unavailable/null implementations when the host has no engine.
//! 6. Spawn the flow controller on the tokio runtime.
//! 7. Run the console frontend — blocks until EOF or `/quit`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use speech_translate::{
    config::AppConfig,
    flow::{new_shared_state, FlowController, FlowEvent, SharedState, Side},
    lang::LanguageRegistry,
    recognition::{SpeechRecognizer, UnavailableRecognizer},
    speech::{NullSynthesizer, SpeechSynthesizer},
    translate::{HttpTranslator, Translator},
};

// ---------------------------------------------------------------------------
// Console frontend
// ---------------------------------------------------------------------------

const HELP: &str = "\
commands:
  /langs           list available languages
  /src <key>       select source language
  /dst <key>       select destination language
  /swap            swap sides (languages and text)
  /mic src|dst     toggle the microphone on one side
  /say src|dst     speak one side's text aloud
  /show            print the current state
  /help            print this help
  /quit            exit
anything else is entered as source-side text";

fn print_languages(registry: &LanguageRegistry) {
    for entry in registry.entries() {
        println!(
            "  {:4} {}  (speech {}, translate {})",
            entry.key, entry.display_name, entry.speech_locale, entry.translate_code
        );
    }
}

fn print_state(registry: &LanguageRegistry, state: &SharedState) {
    let st = state.lock().unwrap();
    let name = |key: &str| {
        registry
            .lookup(key)
            .map(|e| e.display_name.clone())
            .unwrap_or_else(|_| key.to_string())
    };

    println!("  [{}] {}", name(&st.source_lang), st.source_text);
    println!("  [{}] {}", name(&st.dest_lang), st.dest_text);
    if let Some(side) = st.listening.active_side() {
        println!("  (listening on {})", side.label());
    }
    if let Some(msg) = &st.error_message {
        println!("  ! {msg}");
    }
}

fn parse_side(arg: &str) -> Option<Side> {
    match arg {
        "src" | "source" => Some(Side::Source),
        "dst" | "dest" => Some(Side::Dest),
        _ => None,
    }
}

/// Map one input line to a flow event.  `None` means the line was handled
/// locally (help text, state display) or was malformed.
fn parse_line(line: &str) -> Option<FlowEvent> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        "/src" => Some(FlowEvent::SetSourceLanguage(arg.to_string())),
        "/dst" => Some(FlowEvent::SetDestLanguage(arg.to_string())),
        "/swap" => Some(FlowEvent::Swap),
        "/mic" => parse_side(arg).map(FlowEvent::MicPressed),
        "/say" => parse_side(arg).map(FlowEvent::SpeakPressed),
        _ if cmd.starts_with('/') => None,
        _ if line.is_empty() => None,
        _ => Some(FlowEvent::SetText(Side::Source, line.to_string())),
    }
}

/// Read stdin line by line, forwarding events to the controller and echoing
/// the state back after each one.
async fn run_console(
    registry: LanguageRegistry,
    state: SharedState,
    event_tx: mpsc::Sender<FlowEvent>,
) -> anyhow::Result<()> {
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        match trimmed {
            "/quit" => break,
            "/help" => {
                println!("{HELP}");
                continue;
            }
            "/langs" => {
                print_languages(&registry);
                continue;
            }
            "/show" => {
                print_state(&registry, &state);
                continue;
            }
            _ => {}
        }

        match parse_line(trimmed) {
            Some(event) => {
                event_tx.send(event).await?;
                // The controller runs on its own task; give it a beat before
                // rendering the updated state.
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                print_state(&registry, &state);
            }
            None if !trimmed.is_empty() => println!("unrecognised command — try /help"),
            None => {}
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Capability detection
// ---------------------------------------------------------------------------

/// Pick the speech-recognition backend for this host.
///
/// No engine is bundled with the crate; hosts integrate one by implementing
/// [`SpeechRecognizer`].  Until then recognition degrades gracefully: starts
/// fail with `CapabilityUnavailable` while manual text entry, translation
/// and speech output keep working.
fn detect_recognizer() -> Arc<dyn SpeechRecognizer> {
    log::warn!("no speech recognition engine on this host — mic buttons will be inert");
    Arc::new(UnavailableRecognizer)
}

/// Pick the speech-synthesis backend for this host.
fn detect_synthesizer() -> Arc<dyn SpeechSynthesizer> {
    log::warn!("no speech synthesis engine on this host — output will be text only");
    Arc::new(NullSynthesizer)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("speech-translate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Registry + default language validation
    let registry = LanguageRegistry::builtin();

    let source_default = if registry.contains(&config.languages.source_default) {
        config.languages.source_default.clone()
    } else {
        log::warn!(
            "configured source language {:?} is unknown; falling back",
            config.languages.source_default
        );
        "yue".to_string()
    };
    let dest_default = if registry.contains(&config.languages.dest_default) {
        config.languages.dest_default.clone()
    } else {
        log::warn!(
            "configured destination language {:?} is unknown; falling back",
            config.languages.dest_default
        );
        "ja".to_string()
    };

    // 4. Tokio runtime (2 worker threads — controller + frontend)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    // 5. Capabilities
    let recognizer = detect_recognizer();
    let synthesizer = detect_synthesizer();
    let translator: Arc<dyn Translator> = Arc::new(HttpTranslator::from_config(&config.translation));

    // 6. Shared state + controller
    let state = new_shared_state(source_default, dest_default);
    let (event_tx, event_rx) = mpsc::channel::<FlowEvent>(32);

    let controller = FlowController::new(
        registry.clone(),
        Arc::clone(&state),
        recognizer,
        translator,
        synthesizer,
    );
    rt.spawn(controller.run(event_rx));

    // 7. Console frontend (blocks until EOF or /quit)
    rt.block_on(run_console(registry, state, event_tx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
