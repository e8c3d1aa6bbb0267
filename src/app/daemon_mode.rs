// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::watch;

use crate::cli::Args;
use crate::core::config::Config;
use crate::daemon::Daemon;
use crate::services::{idle, notify::DbusNotifier};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = super::platform::acquire_single_instance_lock()?;

    init_logging(args.verbose).await;
    enable_file_logging();

    eventline::info!("restwatch starting (pid={})", std::process::id());

    // Fatal errors below are reported once, by main.
    let cfg = load_config(&args).map_err(|e| format!("{e:#}"))?;

    // Without an idle source there is nothing to decide on.
    let sampler = idle::open_sampler(cfg.backend, &cfg.thresholds)?;
    let notifier = DbusNotifier::connect("restwatch").await?;

    let mut daemon = Daemon::new(&cfg, sampler, notifier);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let run = daemon.run(shutdown_rx);
    tokio::pin!(run);

    tokio::select! {
        res = &mut run => res,

        _ = wait_for_signal() => {
            let _ = shutdown_tx.send(true);
            run.await
        }
    }
}

/// Console output only with `--verbose`; the log file always gets `Info`.
pub async fn init_logging(verbose: bool) {
    eventline::runtime::init().await;

    if verbose {
        eventline::runtime::enable_console_output(true);
        eventline::runtime::set_log_level(eventline::runtime::LogLevel::Debug);
        eventline::debug!("debug logging enabled");
    } else {
        eventline::runtime::enable_console_output(false);
        eventline::runtime::set_log_level(eventline::runtime::LogLevel::Info);
    }
}

pub fn load_config(args: &Args) -> eyre::Result<Config> {
    let loaded = crate::config::load(args.config.as_deref())?;
    match &loaded.path {
        Some(path) => {
            eventline::debug!("config: using {}", path.display());
        }
        None => {
            eventline::debug!("config: using built-in defaults");
        }
    }
    let mut cfg = loaded.cfg;

    if let Some(backend) = args.backend {
        cfg.backend = backend.into();
    }

    Ok(cfg)
}

fn enable_file_logging() {
    let path = super::platform::default_log_path();

    if let Err(e) = super::platform::append_run_header(&path) {
        eventline::warn!("file logging disabled ({}): {}", path.display(), e);
        return;
    }

    if let Err(e) = eventline::runtime::enable_file_output(&path) {
        eventline::error!("failed to enable file logging: {}", e);
    } else {
        eventline::info!("file logging enabled: {}", path.display());
    }
}

async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            eventline::warn!("cannot listen for SIGTERM: {e}");
            let _ = tokio::signal::ctrl_c().await;
            eventline::info!("received Ctrl+C, shutting down");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            eventline::info!("received Ctrl+C, shutting down");
        }
        _ = term.recv() => {
            eventline::info!("received SIGTERM, shutting down");
        }
    }
}
