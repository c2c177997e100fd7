// src/config.rs
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PING_URL, LINKS_TABLE, PAPERS_TABLE,
};
use crate::error::AppError;
use crate::sync::SyncTarget;
use crate::types::{ApiKey, DatabaseId, SecretKey, TableName, ValidatedUrl};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the sync endpoints over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
        bind: SocketAddr,
    },
    /// Run the job once and print the report as JSON
    Run {
        /// Send a Telegram summary afterwards
        #[arg(long, default_value_t = false)]
        notify: bool,
    },
}

/// Telegram destination for run summaries.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: SecretKey,
    pub chat_id: String,
}

/// Resolved job configuration, validated and ready to build clients from.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub supabase_url: ValidatedUrl,
    pub supabase_key: SecretKey,
    pub notion_token: ApiKey,
    pub papers_database: DatabaseId,
    pub links_database: DatabaseId,
    pub ping_url: ValidatedUrl,
    /// `on_conflict` column(s) for upserts; the table's primary key when unset.
    pub upsert_key: Option<String>,
    pub telegram: Option<TelegramConfig>,
    pub http_timeout: Duration,
}

impl SyncConfig {
    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set",
                        name
                    ))
                })
        };
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let ping_url = optional("PING_URL").unwrap_or_else(|| DEFAULT_PING_URL.to_string());

        let http_timeout = match optional("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::MissingConfiguration(format!(
                    "HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let telegram = match (optional("TELEGRAM_BOT_TOKEN"), optional("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                bot_token: SecretKey::new(token, "TELEGRAM_BOT_TOKEN")?,
                chat_id,
            }),
            (None, None) => None,
            _ => {
                log::warn!(
                    "Only one of TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID is set; notifications disabled"
                );
                None
            }
        };

        Ok(SyncConfig {
            supabase_url: ValidatedUrl::parse(&required("SUPABASE_URL")?)?,
            supabase_key: SecretKey::new(required("SUPABASE_KEY")?, "SUPABASE_KEY")?,
            notion_token: ApiKey::new(required("NOTION_TOKEN")?)?,
            papers_database: DatabaseId::parse(&required("PAPERS_DATABASE_ID")?)?,
            links_database: DatabaseId::parse(&required("LINKS_DATABASE_ID")?)?,
            ping_url: ValidatedUrl::parse(&ping_url)?,
            upsert_key: optional("SUPABASE_UPSERT_KEY"),
            telegram,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }

    /// The databases to sync, papers first.
    pub fn targets(&self) -> Result<Vec<SyncTarget>, AppError> {
        Ok(vec![
            SyncTarget {
                database: self.papers_database.clone(),
                table: TableName::new(PAPERS_TABLE)?,
            },
            SyncTarget {
                database: self.links_database.clone(),
                table: TableName::new(LINKS_TABLE)?,
            },
        ])
    }
}
