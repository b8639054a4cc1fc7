use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cli::{SessionScript, Shell, StartupArgs};
use color_eyre::eyre::{Result, WrapErr};
use gridmeasure::{AppState, MeasureConfig, UiEvent, render};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect holes in the image and report their centres
    Detect {
        #[command(flatten)]
        startup: StartupArgs,
        /// Save a copy of the image with every detected hole outlined
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Save detected holes as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Replay a recorded session script (TOML or JSON)
    Replay {
        #[command(flatten)]
        startup: StartupArgs,
        /// Path to the session script
        #[arg(long)]
        script: PathBuf,
        /// Save the last rendered frame
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
    /// Read events from stdin: `measure`, `click X Y`, `clear`, `generate`, `quit`
    Interactive {
        #[command(flatten)]
        startup: StartupArgs,
        /// Save the last rendered frame on exit
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
    /// Print the JSON schema of session scripts
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect { startup, overlay, geojson } => {
            detect(&startup.resolve()?, overlay.as_deref(), geojson.as_deref())?;
        }
        Commands::Replay { startup, script, overlay } => {
            replay(&startup.resolve()?, script, overlay.as_deref())?;
        }
        Commands::Interactive { startup, overlay } => {
            interactive(&startup.resolve()?, overlay.as_deref())?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&SessionScript::schema())?);
        }
    }

    Ok(())
}

fn detect(config: &MeasureConfig, overlay: Option<&Path>, geojson: Option<&Path>) -> Result<()> {
    let shell = Shell::load(config)?;
    let index = shell.controller().index();

    println!("Detected {} hole(s)", index.len());
    for centroid in index.centroids() {
        println!("  - ({}, {})", centroid.x, centroid.y);
    }

    if let Some(path) = overlay {
        render::outline_all(shell.base(), index, shell.pen()).save(path)?;
        info!("Saved overlay to {}", path.display());
    }
    if let Some(path) = geojson {
        index.save_geojson(path)?;
        info!("Saved GeoJSON to {}", path.display());
    }

    Ok(())
}

fn replay(config: &MeasureConfig, script_path: &Path, overlay: Option<&Path>) -> Result<()> {
    let script = SessionScript::from_file(script_path)
        .wrap_err_with(|| format!("failed to load script {}", script_path.display()))?;
    info!("Replaying {} event(s)", script.events.len());

    let mut shell = Shell::load(config)?;
    let mut state = AppState::new(config.startup.scale_factor);
    for event in script.events {
        state = shell.apply(state, event);
    }

    if let Some(path) = overlay {
        shell.save_frame(path)?;
    }
    Ok(())
}

fn interactive(config: &MeasureConfig, overlay: Option<&Path>) -> Result<()> {
    let mut shell = Shell::load(config)?;
    let mut state = AppState::new(config.startup.scale_factor);

    println!("Commands: {}, quit", UiEvent::command_names().join(", "));
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        match trimmed.parse::<UiEvent>() {
            Ok(event) => state = shell.apply(state, event),
            Err(err) => warn!("{}", err),
        }
    }

    if let Some(path) = overlay {
        shell.save_frame(path)?;
    }
    Ok(())
}
