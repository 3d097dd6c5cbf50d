//! `castmin`: terminal administration client for events, series, themes
//! and access-control lists.
//!
//! Built on [ratatui](https://ratatui.rs) over `castmin-core`'s state store.
//! Screens are reachable via number keys (1-3): Events, Themes, ACLs.
//!
//! Logs go to a file (default `/tmp/castmin.log`) so they never corrupt
//! the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use castmin_config::{Config, Profile};
use castmin_core::{Controller, ServerConfig};

use crate::app::App;

/// Terminal client for administering a media platform.
#[derive(Parser, Debug)]
#[command(name = "castmin", version, about)]
struct Cli {
    /// Config profile to use (defaults to `default_profile`)
    #[arg(short = 'p', long, env = "CASTMIN_PROFILE")]
    profile: Option<String>,

    /// Admin server URL, overrides the profile (e.g., https://admin.example.org)
    #[arg(short = 'u', long, env = "CASTMIN_URL")]
    url: Option<String>,

    /// Login name, overrides the profile
    #[arg(long)]
    username: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/castmin.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. The guard must live until exit so buffered lines
/// are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("CASTMIN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "castmin_tui={level},castmin_core={level},castmin_api={level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("castmin.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the server to talk to. CLI flags win over the profile; a bare
/// `--url` works without any config file.
fn server_config(cli: &Cli, config: &Config) -> Result<ServerConfig> {
    let (name, mut profile) = match config.profile(cli.profile.as_deref()) {
        Ok((name, profile)) => (name.to_owned(), profile.clone()),
        Err(e) => {
            let Some(url) = cli.url.clone() else {
                return Err(e).wrap_err("no usable profile; pass --url or edit the config file");
            };
            let profile = Profile {
                server: url,
                username: None,
                password: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            };
            ("cli".to_owned(), profile)
        }
    };

    if let Some(url) = &cli.url {
        profile.server.clone_from(url);
    }
    if let Some(username) = &cli.username {
        profile.username = Some(username.clone());
    }
    if cli.insecure {
        profile.insecure = Some(true);
    }

    castmin_config::profile_to_server_config(&profile, &name, &config.defaults)
        .wrap_err_with(|| format!("profile '{name}' is invalid"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first, so a panic during setup still restores the terminal.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = castmin_config::load_config().wrap_err("loading configuration")?;
    let server = server_config(&cli, &config)?;
    info!(url = %server.url, "starting castmin");

    let controller = Controller::connect(&server)
        .await
        .wrap_err_with(|| format!("connecting to {}", server.url))?;

    let mut app = App::new(controller, &config.hotkeys);
    app.run().await?;

    Ok(())
}
