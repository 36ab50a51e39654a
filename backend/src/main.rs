//! Resolve a saved palletizer configuration into its pick/place sequence.
//!
//! Usage: `pallet-backend <configuration.json> [engine.json]`
//!
//! The saved configuration (configuration plus resolved box coordinates) is
//! written to stdout as JSON. Pallets that fail to resolve are logged and the
//! output is marked incomplete.

use pallet_core::engine::resolve_configuration_with;
use pallet_core::model::ConfigurationSet;
use pallet_core::EngineConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum BackendError {
    #[error("usage: pallet-backend <configuration.json> [engine.json]")]
    Usage,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn read_file(path: &Path) -> Result<String, BackendError> {
    std::fs::read_to_string(path).map_err(|source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, BackendError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    EngineConfig::from_json(&read_file(path)?).map_err(|source| BackendError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn run() -> Result<bool, BackendError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config_path = args.next().ok_or(BackendError::Usage)?;
    let engine_path = args.next();

    let engine = load_engine_config(engine_path.as_deref())?;
    let set = ConfigurationSet::from_json(&read_file(&config_path)?).map_err(|source| {
        BackendError::Parse {
            path: config_path.clone(),
            source,
        }
    })?;

    info!(
        "Loaded '{}': {} box types, {} pallets",
        set.name,
        set.boxes.len(),
        set.pallets.len()
    );

    let resolution = resolve_configuration_with(&set, &engine);
    let saved = resolution.into_saved(set);
    info!(
        "Resolved {} box coordinates (complete: {})",
        saved.box_coordinates.len(),
        saved.complete
    );

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &saved)?;
    println!();
    Ok(saved.complete)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
