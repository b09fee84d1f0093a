//! cardpush - main entry point

use cardpush_cli::carddav::Credentials;
use cardpush_cli::commands::import::{self, ImportRequest};
use cardpush_cli::config::ImportConfig;
use cardpush_cli::observer::{ImportObserver, ProgressObserver, TracingObserver};
use cardpush_cli::upload::{watch_interrupts, TimerCooldown};
use cardpush_cli::Cli;
use cardpush_common::logging::{init_logging, LogConfig, LogLevel};
use clap::Parser;
use colored::Colorize;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Verbose mode logs progress lines instead of drawing a progress bar
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .log_file_prefix("cardpush")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().with_env().unwrap_or(log_config);

    // The import works without logging
    let log_guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute(&cli).await {
        error!(error = %e, order = e.order(), "Import failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        // `process::exit` skips destructors; flush file logs first.
        drop(log_guard);
        process::exit(1);
    }
}

async fn execute(cli: &Cli) -> cardpush_cli::Result<()> {
    let mut config = ImportConfig::from_env()?;
    cli.apply_to(&mut config);

    let request = ImportRequest {
        file: cli.file.clone(),
        server: cli.server.clone(),
        credentials: Credentials::new(cli.email.clone(), cli.password.clone()),
        config,
        dry_run: cli.dry_run,
    };

    let cooldown = TimerCooldown::new();
    let handle = cooldown.handle();
    tokio::spawn(async move {
        if watch_interrupts(handle, tokio::signal::ctrl_c).await {
            process::exit(130);
        }
    });

    let observer: Box<dyn ImportObserver> = if cli.verbose {
        Box::new(TracingObserver)
    } else {
        Box::new(ProgressObserver::new())
    };

    import::run(&request, &cooldown, observer.as_ref()).await?;
    Ok(())
}
