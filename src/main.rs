//! docwarn - command line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments; `--print-default-config` prints the built-in YAML and exits
//! 2. Initialize logging (stderr, plus rotating files with `--log-dir`)
//! 3. Load `docwarn.yaml` (or `--config`), falling back to built-in defaults
//! 4. Discover candidate documents under the root directory
//! 5. Run the batch on a tokio runtime; Ctrl-C stops documents not yet started
//! 6. Print the per-document report and tally to stdout
//!
//! Per-document failures are part of the report and do not change the exit
//! code. Only configuration, discovery or runtime setup errors are fatal.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use docwarn::cli::Cli;
use docwarn::models::DisclaimerConfig;
use docwarn::services::{PatchMode, discover_documents};
use docwarn::{APP_NAME, BatchRunner, ConfigManager, DisclaimerPatcher, FsDocumentStore, VERSION};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn utf8_path(path: PathBuf, what: &str) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow!("{} is not a valid UTF-8 path: {}", what, p.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", ConfigManager::to_yaml(&DisclaimerConfig::default())?);
        return Ok(());
    }

    let log_dir = cli
        .log_dir
        .map(|p| utf8_path(p, "Log directory"))
        .transpose()?;
    let _log_guard = docwarn::logging::setup_logging(log_dir.as_deref(), APP_NAME, cli.debug)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let root = utf8_path(cli.root, "Root directory")?;
    let config_manager = match cli.config {
        Some(path) => ConfigManager::new(utf8_path(path, "Config path")?),
        None => ConfigManager::for_base_dir(&root),
    };

    let mut config = config_manager.load_config()?;
    if let Some(jobs) = cli.jobs {
        config.max_concurrent = jobs.max(1);
    }

    let mode = if cli.dry_run {
        PatchMode::DryRun
    } else {
        PatchMode::Write
    };
    let patcher = DisclaimerPatcher::from_config(&config, &root)?.with_mode(mode);

    let paths = discover_documents(&root, &config.patterns, config.deduplicate)?;
    tracing::info!("Found {} candidate documents under {}", paths.len(), root);

    docwarn::report::write_banner(&mut std::io::stdout().lock(), cli.dry_run)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("docwarn-worker")
        .build()?;

    let runner = BatchRunner::new(patcher, Arc::new(FsDocumentStore::new()), config.max_concurrent);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let report = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received - finishing documents already in progress");
                let _ = cancel_tx.send(true);
            }
        });

        runner.run(paths, cancel_rx).await
    });

    runtime.shutdown_timeout(Duration::from_secs(5));

    let mut stdout = std::io::stdout().lock();
    docwarn::report::write_report(&mut stdout, &report)?;
    stdout.flush()?;

    tracing::info!("{} finished", APP_NAME);
    Ok(())
}
