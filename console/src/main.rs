//! Console entry-point: wires configuration, adapters, and the command
//! dispatcher.

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig as _;
use tracing::warn;
use url::Url;
use tracing_subscriber::{EnvFilter, fmt};

use console::AppSettings;
use console::inbound::cli::{App, Cli, TerminalNavigator};
use console::outbound::{FileSessionStore, ReqwestTransport};

/// Application bootstrap.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = match AppSettings::load_from_iter(console::config::settings_args()) {
        Ok(settings) => settings,
        Err(err) => {
            return Err(color_eyre::eyre::eyre!("failed to load configuration: {err}"));
        }
    };
    let settings = settings.with_overrides(
        cli.base_url.clone(),
        cli.session_file.clone(),
        cli.timeout_seconds,
    );

    let origin = Url::parse(settings.base_url())
        .wrap_err_with(|| format!("invalid base URL: {}", settings.base_url()))?;
    let transport = Arc::new(
        ReqwestTransport::new(origin, settings.timeout())
            .wrap_err("failed to build the HTTP client")?,
    );
    let store = Arc::new(FileSessionStore::new(settings.session_file()));
    let navigator = Arc::new(TerminalNavigator);

    let app = App::assemble(transport, store, navigator)
        .wrap_err("failed to restore the session")?;

    if app.run(cli.command).await {
        Ok(())
    } else {
        // The screen already rendered its failure; just signal it.
        std::process::exit(1);
    }
}
