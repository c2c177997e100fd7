// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notion_supabase_sync::{sync_router, Command, CommandLineInput, SyncConfig, SyncJob};
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion_supabase_sync.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

    // Logs go to stderr so `run` can print the report on stdout.
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Serves the sync endpoints until the process is stopped.
async fn serve(job: SyncJob, bind: SocketAddr) -> anyhow::Result<()> {
    let app = sync_router(Arc::new(job));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    log::info!("Listening on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs the job once and prints the report.
async fn run_once(job: SyncJob, notify: bool) -> anyhow::Result<()> {
    let report = if notify {
        job.run_and_notify().await
    } else {
        job.run().await
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SyncConfig::from_env().context("resolving configuration")?;
    let job = SyncJob::from_config(&config).context("building clients")?;

    match cli.command {
        Command::Serve { bind } => serve(job, bind).await,
        Command::Run { notify } => run_once(job, notify).await,
    }
}
