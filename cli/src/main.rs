//! MoodLens CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`moodlens_engine`] (application state) and [`moodlens_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed cleanup.
//!
//! ```text
//! main() -> TerminalSession::new() -> run_app() -> App + TUI
//! ```
//!
//! # Event Loop
//!
//! A fixed 8ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`moodlens_tui::InputPump`])
//! 3. Advance application state (`app.tick()`), collecting a finished submission
//! 4. Render frame

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use moodlens_config::config_dir;
use moodlens_engine::{App, AppOptions, MoodReading, MoodlensConfig};
use moodlens_tui::{InputPump, draw, handle_events};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let candidates = log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.moodlens/logs/moodlens.log
    if let Some(dir) = config_dir() {
        candidates.push(dir.join("logs").join("moodlens.log"));
    }

    // Fallback: ./.moodlens/logs/moodlens.log (useful in constrained environments)
    candidates.push(PathBuf::from(".moodlens").join("logs").join("moodlens.log"));

    candidates
}

#[derive(Debug, Parser)]
#[command(name = "moodlens", version)]
#[command(about = "Terminal client for the MoodLens self-assessment")]
struct CliArgs {
    /// Open the mood result view with a reading from a JSON file
    #[arg(long, value_name = "FILE")]
    mood_reading: Option<PathBuf>,
}

fn read_mood_reading(path: &Path) -> Result<MoodReading> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid mood reading in {}", path.display()))
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode and the alternate screen. On drop, both are restored,
/// so the terminal remains usable even after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    init_tracing();

    let config = match MoodlensConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Using default configuration: {err}");
            None
        }
    };
    let mood_reading = args
        .mood_reading
        .as_deref()
        .map(read_mood_reading)
        .transpose()?;

    let mut app = App::new(AppOptions::from_config(config.as_ref())?);
    if let Some(reading) = mood_reading {
        app.show_mood_result(Some(reading));
    }

    let run_result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }
    tracing::info!("Exiting");

    Ok(())
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        app.tick();

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("moodlens").chain(raw.iter().copied()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(args(&[]).unwrap().mood_reading, None);
    }

    #[test]
    fn mood_reading_path() {
        let parsed = args(&["--mood-reading", "reading.json"]).unwrap();
        assert_eq!(parsed.mood_reading, Some(PathBuf::from("reading.json")));
    }

    #[test]
    fn mood_reading_requires_path() {
        assert!(args(&["--mood-reading"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }

    #[test]
    fn help_is_generated() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--mood-reading <FILE>"));
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn reads_mood_reading_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reading.json");
        fs::write(&path, r#"{"mood":"neutral","confidence":0.42}"#).unwrap();
        let reading = read_mood_reading(&path).unwrap();
        assert_eq!(reading.mood, "neutral");
        assert_eq!(reading.confidence_label().as_deref(), Some("42.00%"));
    }

    #[test]
    fn reads_mood_reading_without_mood() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reading.json");
        fs::write(&path, r#"{"confidence":0.5}"#).unwrap();
        let reading = read_mood_reading(&path).unwrap();
        assert!(reading.mood.is_empty());
        assert_eq!(reading.confidence_label().as_deref(), Some("50.00%"));
    }
}
