//! Cavern headless runner.
//!
//! Reads one key per stdin line, feeds it to the screen controller and prints
//! the rendered screen to stdout after every change. Logs go to stderr.
//!
//! ```bash
//! printf 'enter\nright\ndown\nesc\n' | cargo run -p cavern-client
//! CAVERN_SEED=7 RUST_LOG=cavern_core=trace cargo run -p cavern-client
//! ```
mod config;
mod input;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use cavern_content::ContentFactory;
use cavern_core::{CellBuffer, GameError, ScreenContext, ScreenController};

use crate::config::ClientConfig;
use crate::input::{Command, parse_line};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let client_config = ClientConfig::from_env();
    let factory = match &client_config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::builtin(),
    };

    let mut config = factory.load_config().context("loading game config")?;
    let catalog = factory.load_catalog().context("loading entity templates")?;
    if let Some(seed) = client_config.seed {
        config.seed = Some(seed);
    }

    tracing::info!(
        data_dir = ?factory.data_dir(),
        seed = ?config.seed,
        creatures = catalog.creatures.len(),
        "starting cavern"
    );

    let screen = config.screen_dimensions();
    let mut controller = ScreenController::new(ScreenContext::new(config, catalog))?;
    let mut buffer = CellBuffer::new(screen);
    let stdout = io::stdout();

    draw(&controller, &mut buffer, &mut stdout.lock())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let event = match parse_line(&line) {
            Some(Command::Key(event)) => event,
            Some(Command::Quit) => break,
            None => continue,
        };

        match controller.handle_input(event) {
            Ok(kind) => tracing::debug!(screen = %kind, ?event, "handled input"),
            Err(err) if err.severity().is_recoverable() => {
                tracing::warn!(code = err.error_code(), "{err}");
                continue;
            }
            Err(err) => {
                tracing::error!(code = err.error_code(), "{err}");
                return Err(err.into());
            }
        }

        draw(&controller, &mut buffer, &mut stdout.lock())?;
    }

    tracing::info!("goodbye");
    Ok(())
}

fn draw(
    controller: &ScreenController,
    buffer: &mut CellBuffer,
    out: &mut impl Write,
) -> Result<()> {
    buffer.clear();
    controller.render(buffer);
    for row in buffer.rows() {
        writeln!(out, "{}", row.trim_end())?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
