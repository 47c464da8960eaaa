//! Touch screen toggle command-line entry point.
//!
//! Loads the configuration, starts the toggle (device discovery + initial
//! state read), performs the requested action, and prints the state the
//! device ended up in.
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML file or defaults
//!  └─ TouchScreenToggle::start -- xinput list + list-props
//!  └─ action
//!       ├─ status   -> mirrored state
//!       ├─ enable   -> xinput enable  + list-props
//!       ├─ disable  -> xinput disable + list-props
//!       └─ toggle   -> enable or disable, whichever flips it
//! ```
//!
//! Logs go to stderr so stdout only ever carries the status line (or JSON
//! with `--json`).  If the device cannot be found nothing is printed on
//! stdout and the process exits non-zero.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use touch_toggle::application::toggle::{ToggleStatus, TouchScreenToggle};
use touch_toggle::infrastructure::process::SystemCommandRunner;
use touch_toggle::infrastructure::storage::config::{
    load_config, load_config_from, AppConfig, ConfigError,
};

/// Enable or disable the touch screen through xinput.
#[derive(Debug, Parser)]
#[command(name = "touch-toggle", version, about)]
struct Cli {
    /// Config file to use instead of the XDG default.
    #[arg(long, env = "TOUCH_TOGGLE_CONFIG")]
    config: Option<PathBuf>,

    /// Per-invocation xinput timeout in milliseconds (overrides the config).
    #[arg(
        long,
        env = "TOUCH_TOGGLE_TIMEOUT_MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_ms: Option<u64>,

    /// Print the resulting state as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Action {
    /// Show the current state (default).
    Status,
    /// Enable the touch screen.
    Enable,
    /// Disable the touch screen.
    Disable,
    /// Flip the touch screen state.
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = resolve_config(cli.config.as_deref(), load_config)?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    if let Some(e) = config_error {
        warn!("{e}; using default configuration");
    }

    let timeout = cli
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tool.timeout());
    let runner = Arc::new(SystemCommandRunner::new(timeout));

    let mut toggle = TouchScreenToggle::new(runner, config.device_query());
    toggle
        .start()
        .await
        .context("touch screen is not available")?;

    let action = cli.action.unwrap_or(Action::Status);
    info!("running {action:?}");
    match action {
        Action::Status => {}
        Action::Enable => {
            toggle.set_enabled(true).await.context("enabling touch screen")?;
        }
        Action::Disable => {
            toggle.set_enabled(false).await.context("disabling touch screen")?;
        }
        Action::Toggle => {
            toggle.toggle().await.context("toggling touch screen")?;
        }
    }

    let status = toggle
        .status()
        .context("touch screen toggle stopped unexpectedly")?;
    println!("{}", render(&status, cli.json)?);

    toggle.stop();
    Ok(())
}

/// Loads the config named on the command line, or the default one.
///
/// An explicit `--config` that fails is fatal.  A failing default config
/// falls back to defaults and hands the error back so it can be logged once
/// tracing is up.
fn resolve_config(
    explicit: Option<&Path>,
    load_default: impl FnOnce() -> Result<AppConfig, ConfigError>,
) -> anyhow::Result<(AppConfig, Option<ConfigError>)> {
    match explicit {
        Some(path) => {
            let config = load_config_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            Ok((config, None))
        }
        None => match load_default() {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((AppConfig::default(), Some(e))),
        },
    }
}

fn render(status: &ToggleStatus, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(status)?)
    } else {
        Ok(status.to_string())
    }
}
