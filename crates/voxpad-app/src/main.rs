//! Voxpad application binary - composition root.
//!
//! Ties together the Voxpad crates into a single executable:
//! 1. Parse CLI arguments and load the TOML configuration
//! 2. Initialize tracing
//! 3. Resolve the two speech capabilities once
//! 4. Build the dictation controller
//! 5. Run the interactive form, multiplexing user commands with
//!    recognition events on a single task
//!
//! This build ships a simulated recognition engine and a console synthesis
//! stand-in; a platform speech engine plugs in behind the same provider
//! traits.

mod cli;

use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use voxpad_core::config::VoxpadConfig;
use voxpad_core::error::Result;
use voxpad_core::events::{DomainEvent, EventBus};
use voxpad_core::types::{Locale, Timestamp};
use voxpad_dictation::DictationController;
use voxpad_speech::capability::Capability;
use voxpad_speech::mock::MockRecognitionProvider;
use voxpad_speech::recognition::RecognitionProvider;
use voxpad_speech::synthesis::SynthesisProvider;

/// Synthesis stand-in that renders utterances to the terminal.
struct ConsoleSynthesis;

impl SynthesisProvider for ConsoleSynthesis {
    fn display_name(&self) -> &'static str {
        "Console synthesis"
    }

    fn speak(&self, text: &str, locale: Locale) -> Result<()> {
        println!("(speaking, {}) {}", locale.tag(), text);
        Ok(())
    }

    fn cancel_all(&self) -> Result<()> {
        tracing::debug!("Cancelling any active utterance");
        Ok(())
    }
}

/// Script for the simulated recognition engine. `None` entries end a
/// listening attempt without a result, like a silent microphone.
fn canned_utterances() -> Vec<Option<String>> {
    [
        Some("hello from the simulated engine"),
        Some("the quick brown fox"),
        None,
        Some("jumps over the lazy dog"),
        Some("that is all"),
    ]
    .into_iter()
    .map(|entry| entry.map(str::to_string))
    .collect()
}

fn resolve_recognition(config: &VoxpadConfig) -> Capability<Box<dyn RecognitionProvider>> {
    if config.speech.recognition_enabled {
        let provider = MockRecognitionProvider::with_script(canned_utterances())
            .with_delay(Duration::from_millis(config.speech.recognition_delay_ms));
        tracing::info!(provider = provider.display_name(), "Recognition capability resolved");
        Capability::Available(Box::new(provider))
    } else {
        tracing::warn!("Recognition capability disabled in config");
        Capability::Unavailable
    }
}

fn resolve_synthesis(config: &VoxpadConfig) -> Capability<Box<dyn SynthesisProvider>> {
    if config.speech.synthesis_enabled {
        Capability::Available(Box::new(ConsoleSynthesis))
    } else {
        tracing::warn!("Synthesis capability disabled in config");
        Capability::Unavailable
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    let config_path = args.resolve_config_path();
    let config = VoxpadConfig::load_or_default(&config_path);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("VOXPAD_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    args.resolve_log_level(&config.general.log_level),
                )
            }),
        )
        .init();

    let locale = args.resolve_locale(config.speech.default_locale)?;

    let events = EventBus::default();
    let mut event_log = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_log.recv().await {
            tracing::debug!(event = event.event_name(), "Domain event");
        }
    });

    let (recognition_tx, mut recognition_events) = mpsc::unbounded_channel();
    let mut controller = DictationController::new(
        resolve_recognition(&config),
        resolve_synthesis(&config),
        recognition_tx,
        events.clone(),
        locale,
    );
    controller.configure(locale)?;

    events.emit(DomainEvent::ApplicationStarted {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Timestamp::now(),
    });

    print_banner(&controller);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt(&controller);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if handle_line(&mut controller, line.trim())? {
                    break;
                }
                prompt(&controller);
            }
            Some(event) = recognition_events.recv() => {
                controller.handle_event(event)?;
                println!();
                println!("transcript: {}", controller.transcript());
                prompt(&controller);
            }
        }
    }

    events.emit(DomainEvent::ApplicationShutdown {
        timestamp: Timestamp::now(),
    });
    Ok(())
}

/// Apply one line from the form. Returns `true` when the user quits.
fn handle_line(controller: &mut DictationController, line: &str) -> Result<bool> {
    match line {
        "" => {}
        ":quit" | ":q" => return Ok(true),
        ":help" => print_help(),
        ":show" => {
            println!("transcript: {}", controller.transcript());
            println!(
                "locale:     {} ({})",
                controller.locale().tag(),
                controller.locale().display_name()
            );
        }
        ":clear" => controller.edit_transcript(""),
        ":speak" => controller.speak_transcript()?,
        ":listen" => {
            if controller.is_listening() {
                println!("(already listening)");
            } else if !controller.recognition_available() {
                println!("(speech recognition is unavailable)");
            } else {
                controller.start_listening()?;
            }
        }
        _ if line.starts_with(":locale") => {
            let tag = line.strip_prefix(":locale").unwrap_or_default().trim();
            if tag.is_empty() {
                print_locales();
            } else {
                match Locale::from_tag(tag) {
                    Some(locale) => {
                        controller.configure(locale)?;
                        println!(
                            "locale set to {} ({})",
                            locale.tag(),
                            locale.display_name()
                        );
                    }
                    None => {
                        println!("unsupported locale '{}'", tag);
                        print_locales();
                    }
                }
            }
        }
        _ if line.starts_with(':') => {
            println!("unknown command '{}'; :help lists commands", line);
        }
        // Anything else is a direct edit, replacing the transcript.
        _ => controller.edit_transcript(line),
    }
    Ok(false)
}

fn print_banner(controller: &DictationController) {
    println!("voxpad — speak and it types, type and it speaks");
    println!(
        "locale: {} ({})  —  :help for commands",
        controller.locale().tag(),
        controller.locale().display_name()
    );
}

fn print_help() {
    println!("commands:");
    println!("  <text>        replace the transcript with <text>");
    println!("  :listen       dictate; the recognized utterance is appended");
    println!("  :speak        read the transcript aloud");
    println!("  :locale <tag> switch locale (rebuilds the recognition session)");
    println!("  :show         print the transcript and locale");
    println!("  :clear        empty the transcript");
    println!("  :quit         exit");
}

fn print_locales() {
    println!("supported locales:");
    for locale in Locale::ALL {
        println!("  {:6} {}", locale.tag(), locale.display_name());
    }
}

fn prompt(controller: &DictationController) {
    use std::io::Write;
    if controller.is_listening() {
        print!("voxpad (listening…)> ");
    } else {
        print!("voxpad> ");
    }
    let _ = std::io::stdout().flush();
}
