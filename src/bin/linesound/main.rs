//! linesound - play sound effects for lines of text
//!
//! Run with: some-command | linesound --config linesound.json

mod audio;
mod input;
mod watch;

use std::{
    path::PathBuf,
    sync::{mpsc, Arc},
};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use linesound::{config::Config, engine::Engine};

#[derive(Debug, Parser)]
#[command(version, about = "Play procedurally generated sounds when stdin lines match regex triggers")]
struct Args {
    /// Path to the JSON config; created with defaults if it doesn't exist
    #[arg(short, long)]
    config: PathBuf,
}

/// Everything the main thread reacts to.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    ConfigChanged,
    Shutdown,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .wrap_err_with(|| format!("can't load config {}", args.config.display()))?;
    let engine = Arc::new(Engine::from_config(&config).wrap_err("invalid trigger config")?);

    let _stream = audio::start(Arc::clone(&engine))?;

    let (tx, rx) = mpsc::channel();

    let shutdown_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(AppEvent::Shutdown);
    })
    .wrap_err("can't install signal handler")?;

    // maxVoices and watchConfig only take effect at startup
    let _watcher = if config.watch_config {
        Some(watch::watch(&args.config, tx)?)
    } else {
        drop(tx);
        None
    };

    let _input = input::spawn(Arc::clone(&engine)).wrap_err("can't start input thread")?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::ConfigChanged => match Config::load(&args.config) {
                Ok(next) => {
                    if let Err(err) = engine.apply(&next) {
                        tracing::warn!("{err}, keeping previous triggers");
                    }
                }
                Err(err) => tracing::warn!("{err}, keeping previous config"),
            },
            AppEvent::Shutdown => break,
        }
    }

    tracing::info!("exiting");
    Ok(())
}
