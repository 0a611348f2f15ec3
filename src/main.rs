use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use tracing::{error, info};

use dockstat::app;
use dockstat::compose::ComposeClient;
use dockstat::config::{Cli, Config};
use dockstat::docker::DockerClient;
use dockstat::logging;

fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Cli::parse())?;
    let _log_guard = logging::init_logging(&config.log_dir, &config.log_level)
        .context("failed to initialise logging")?;

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGINT, SIGHUP] {
        signal_hook::flag::register(signal, Arc::clone(&should_quit))
            .with_context(|| format!("failed to register handler for signal {}", signal))?;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        app::restore_terminal();
        default_hook(info);
    }));

    let runtime = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .build()
            .context("failed to create tokio runtime")?,
    );

    // Refuse to start without a reachable daemon, before touching the terminal.
    let docker = DockerClient::connect().context("failed to connect to Docker")?;
    runtime
        .block_on(docker.ping())
        .context("Docker daemon is not reachable")?;
    info!("connected to Docker");

    let result = app::run(
        &config,
        Arc::clone(&runtime),
        Arc::new(docker),
        Arc::new(ComposeClient::default()),
        should_quit,
    );
    if let Err(ref e) = result {
        error!(error = %e, "dashboard exited with error");
    }
    result.context("dashboard failed")
}
