//! Radio CLI - headless console driver for radio-core.
//!
//! Plays a simulated internet radio stream and reads playback commands from
//! stdin. Status and metadata callbacks are printed as they arrive; the
//! now-playing surface is the log.

mod commands;
mod config;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use radio_core::{
    BroadcastDelegate, LoggingDelegate, LoggingMediaSession, ManagerRegistry, MediaCenter,
    ParserRegistry, RadioEvent, RadioManager, SimulatedEngine, TokioSpawner,
};
use tokio::signal;
use tokio::sync::{broadcast, mpsc};

use crate::commands::{Command, Flow};
use crate::config::CliConfig;

/// Radio CLI - Headless internet radio playback driver.
#[derive(Parser, Debug)]
#[command(name = "radio-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "info", env = "RADIO_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Stream endpoint (overrides config file).
    #[arg(short = 'u', long)]
    stream_url: Option<String>,

    /// Treat pause as stop (overrides config file).
    #[arg(long)]
    pause_stops_playing: bool,

    /// Start playing immediately.
    #[arg(long)]
    autoplay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Radio CLI v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config =
        CliConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(url) = args.stream_url {
        config.stream_url = Some(url);
    }
    if args.pause_stops_playing {
        config.pause_stops_playing = true;
    }

    log::info!(
        "Configuration: stream_url={}, parser={}, pause_stops_playing={}",
        config.stream_url.as_deref().unwrap_or("-"),
        config.parser.as_deref().unwrap_or("-"),
        config.pause_stops_playing
    );

    let parsers = ParserRegistry::global();
    let engine = Arc::new(SimulatedEngine::new(
        TokioSpawner::current(),
        config.to_engine_config(),
    ));
    let manager = RadioManager::from_config(engine, &config.to_radio_config(), parsers)
        .context("Failed to create radio manager")?;
    let manager = ManagerRegistry::global()
        .install(manager)
        .context("Failed to install shared manager")?;

    let media = MediaCenter::new(Arc::new(LoggingMediaSession));
    media
        .enable_audio_session()
        .context("Failed to enable audio session")?;
    manager.set_media_center(media.clone());

    // The manager holds the delegate weakly; it lives until main returns.
    let delegate = Arc::new(BroadcastDelegate::new(64));
    delegate.set_downstream(Arc::new(LoggingDelegate));
    manager.set_delegate(&delegate);
    let printer = tokio::spawn(print_events(delegate.subscribe()));

    if args.autoplay {
        manager.play();
    }

    println!("{}", commands::HELP);

    tokio::select! {
        result = command_loop(&manager, parsers, spawn_stdin_reader()) => result?,
        _ = shutdown_signal() => log::info!("Shutdown signal received, cleaning up..."),
    }

    ManagerRegistry::global().teardown();
    if let Err(e) = media.disable_audio_session() {
        log::warn!("Failed to disable audio session: {}", e);
    }
    printer.abort();

    log::info!("Shutdown complete");
    Ok(())
}

/// Reads stdin lines on a dedicated thread.
///
/// A blocking read never holds up the runtime, so shutdown does not wait for
/// the next line. The thread ends at end of input or once the receiver is
/// dropped.
fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
        log::debug!("[Console] stdin reader finished");
    });
    rx
}

/// Runs commands from `lines` until `quit` or end of input.
async fn command_loop(
    manager: &RadioManager,
    parsers: &ParserRegistry,
    mut lines: mpsc::Receiver<std::io::Result<String>>,
) -> Result<()> {
    while let Some(line) = lines.recv().await {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };
        match commands::execute(command, manager, parsers) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("error: {}", e),
        }
    }
    Ok(())
}

/// Prints delegate events to stdout.
async fn print_events(mut rx: broadcast::Receiver<RadioEvent>) {
    loop {
        match rx.recv().await {
            Ok(RadioEvent::MetadataUpdated { metadata }) => {
                let fields: Vec<String> = metadata
                    .iter()
                    .map(|(key, value)| match value.as_str() {
                        Some(text) => format!("{}={}", key, text),
                        None => format!("{}={}", key, value),
                    })
                    .collect();
                println!("[metadata] {}", fields.join(" "));
            }
            Ok(event) => println!("[status] {:?}", event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                log::warn!("Event printer lagged, skipped {} events", n);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::{PlaybackStatus, SimulatedEngineConfig};

    fn manager() -> RadioManager {
        let engine = Arc::new(SimulatedEngine::new(
            TokioSpawner::current(),
            SimulatedEngineConfig::default(),
        ));
        RadioManager::with_stream_endpoint(engine, "http://radio.example.com/live")
    }

    #[tokio::test(start_paused = true)]
    async fn command_loop_stops_at_quit() {
        let manager = manager();
        let parsers = ParserRegistry::new();
        let (tx, rx) = mpsc::channel(8);
        for line in ["", "pause-stops on", "rewind", "quit", "play"] {
            tx.send(Ok(line.to_string())).await.unwrap();
        }

        command_loop(&manager, &parsers, rx).await.unwrap();

        assert!(manager.pause_stops_playing());
        assert_eq!(manager.status(), PlaybackStatus::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn command_loop_ends_with_input() {
        let manager = manager();
        let parsers = ParserRegistry::new();
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok("play".to_string())).await.unwrap();
        drop(tx);

        command_loop(&manager, &parsers, rx).await.unwrap();

        assert_eq!(manager.status(), PlaybackStatus::Loading);
    }

    #[tokio::test]
    async fn command_loop_reports_read_errors() {
        let manager = manager();
        let parsers = ParserRegistry::new();
        let (tx, rx) = mpsc::channel(8);
        tx.send(Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        )))
        .await
        .unwrap();

        let err = command_loop(&manager, &parsers, rx).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read stdin"));
    }
}
