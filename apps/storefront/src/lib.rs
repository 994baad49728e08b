//! # Storefront Shell
//!
//! Thin orchestration layer for Magnate. This is the entry point that
//! loads the catalog and runs the demo shell.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & demo shell)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── Session handle (Arc<Mutex>)
//! ├── dispatch.rs     ◄─── Input event table
//! ├── render.rs       ◄─── Renderer trait + view snapshots
//! ├── sequencer.rs    ◄─── Prank timer driver
//! ├── loader.rs       ◄─── One-shot catalog load
//! └── error.rs        ◄─── UI boundary error
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Resolve Catalog Path ─────────────────────────────────────────────► │
//! │     • first CLI argument, else MAGNATE_CATALOG, else bundled default    │
//! │                                                                         │
//! │  3. Load Catalog ─────────────────────────────────────────────────────► │
//! │     • one-shot read + parse; failure is fatal, nothing renders          │
//! │                                                                         │
//! │  4. Build Dispatcher & Initial Render ────────────────────────────────► │
//! │                                                                         │
//! │  5. Run Shell Loop ───────────────────────────────────────────────────► │
//! │     • one line = one input event, handled to completion                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod dispatch;
pub mod error;
pub mod loader;
pub mod render;
pub mod sequencer;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use magnate_core::{Currency, Language};

use crate::dispatch::{Dispatcher, InputEvent};
use crate::error::UiError;
use crate::render::{Renderer, TracingRenderer};

/// Catalog path used when neither the CLI nor the environment provides one.
const DEFAULT_CATALOG_PATH: &str = "apps/storefront/data/catalog.json";

/// Runs the storefront shell to completion.
pub async fn run() -> Result<(), UiError> {
    init_tracing();

    info!("Starting Magnate storefront");

    let path = catalog_path();
    info!(path = %path.display(), "catalog path resolved");

    let catalog = Arc::new(loader::load_catalog(&path).await?);

    let renderer: Arc<dyn Renderer> = Arc::new(TracingRenderer);
    let dispatcher = Dispatcher::new(catalog, renderer);
    dispatcher.render_all();

    shell_loop(&dispatcher).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=magnate=trace` - Show trace for magnate crates only
/// - Default: INFO level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,magnate=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves the catalog document path.
///
/// ## Precedence
/// 1. First CLI argument
/// 2. `MAGNATE_CATALOG` environment variable
/// 3. The bundled sample catalog
fn catalog_path() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    if let Ok(path) = std::env::var("MAGNATE_CATALOG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

/// One parsed shell line.
enum ShellCommand {
    Event(InputEvent),
    Help,
    Quit,
}

/// Reads one command per line from stdin until EOF or `quit`.
async fn shell_loop(dispatcher: &Dispatcher) -> Result<(), UiError> {
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| UiError::internal(format!("stdin read failed: {e}")))?
    {
        match parse_command(&line) {
            Some(ShellCommand::Event(event)) => {
                // dispatch errors are contract violations from typos in the
                // shell; report and keep going
                if let Err(err) = dispatcher.dispatch(event) {
                    eprintln!("error: {err}");
                }
            }
            Some(ShellCommand::Help) => print_help(),
            Some(ShellCommand::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    eprintln!("unrecognized command: {line}");
                }
            }
        }
    }

    info!("storefront shell exiting");
    Ok(())
}

/// Parses a shell line into a command.
fn parse_command(line: &str) -> Option<ShellCommand> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next(), words.next()) {
        ("persona", Some(id), None) => ShellCommand::Event(InputEvent::SelectPersona {
            persona_id: id.to_string(),
        }),
        ("qty", Some(id), Some(delta)) => ShellCommand::Event(InputEvent::AdjustQuantity {
            item_id: id.to_string(),
            delta: delta.parse().ok()?,
        }),
        ("buy", Some(id), None) => ShellCommand::Event(InputEvent::Purchase {
            item_id: id.to_string(),
        }),
        ("currency", Some(code), None) => ShellCommand::Event(InputEvent::ChangeCurrency {
            currency: Currency::from_code(code)?,
        }),
        ("lang", Some(code), None) => ShellCommand::Event(InputEvent::ChangeLanguage {
            language: Language::from_code(code)?,
        }),
        ("dismiss", None, None) => ShellCommand::Event(InputEvent::DismissPrank),
        ("help", None, None) => ShellCommand::Help,
        ("quit", None, None) | ("exit", None, None) => ShellCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn print_help() {
    println!("commands:");
    println!("  persona <id>      select a persona");
    println!("  qty <item> <n>    adjust staged quantity by a signed delta");
    println!("  buy <item>        purchase the staged quantity");
    println!("  currency <code>   switch display currency (USD/UZS/RUB)");
    println!("  lang <code>       switch display language (EN/UZ/RU)");
    println!("  dismiss           close the prank overlay");
    println!("  help | quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            parse_command("persona musk"),
            Some(ShellCommand::Event(InputEvent::SelectPersona { .. }))
        ));
        assert!(matches!(
            parse_command("qty yacht -1"),
            Some(ShellCommand::Event(InputEvent::AdjustQuantity { delta: -1, .. }))
        ));
        assert!(matches!(
            parse_command("currency uzs"),
            Some(ShellCommand::Event(InputEvent::ChangeCurrency {
                currency: Currency::Uzs
            }))
        ));
        assert!(matches!(parse_command("quit"), Some(ShellCommand::Quit)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("").is_none());
        assert!(parse_command("buy").is_none());
        assert!(parse_command("qty yacht lots").is_none());
        assert!(parse_command("currency EUR").is_none());
    }
}
