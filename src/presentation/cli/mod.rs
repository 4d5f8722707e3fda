pub mod commands;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::domain::entities::client_context::{ClientContext, DEFAULT_BASE_URL};
use crate::infrastructure::filesystem::settings_store::{Settings, SettingsStore};
use commands::{AccountCommand, ApplyApplicationCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// gitops-apply - Create, sync and update GitOps applications from YAML manifests
#[derive(Parser)]
#[command(name = "gitops-apply")]
#[command(about = "Create, sync and update GitOps applications from YAML manifests")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (defaults to ~/.gitops-apply/config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gateway base URL
    #[arg(long, global = true, env = "GITOPS_BASE_URL")]
    pub base_url: Option<String>,

    /// Account identifier
    #[arg(long, global = true, env = "GITOPS_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, global = true, env = "GITOPS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or update a resource from a manifest
    Apply {
        #[command(subcommand)]
        target: ApplyTarget,
    },

    /// Fetch account details (prints the failure response when the lookup fails)
    Account,
}

#[derive(Subcommand)]
pub enum ApplyTarget {
    /// Create a GitOps application, or sync and update an existing one
    GitopsApplication {
        /// Path to the application manifest
        #[arg(short, long)]
        file: Option<String>,

        /// GitOps agent identifier (prompted for when missing)
        #[arg(long)]
        agent_identifier: Option<String>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    /// Installs the tracing subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_logging(&self) {
        let default_directive = if self.cli.verbose {
            "gitops_apply=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Apply {
                target:
                    ApplyTarget::GitopsApplication {
                        file,
                        agent_identifier,
                    },
            } => {
                let command = ApplyApplicationCommand::new(file.clone(), agent_identifier.clone());
                // Reported before credentials are required.
                if command.missing_file() {
                    command.report_missing_file();
                    return Ok(());
                }
                let context = self.client_context()?;
                command.execute(&context).await
            }
            Commands::Account => {
                let context = self.client_context()?;
                AccountCommand::new().execute(&context).await
            }
        }
    }

    /// Resolves connection settings: flags and environment first, then the settings file.
    fn client_context(&self) -> Result<ClientContext> {
        let file_settings = SettingsStore::new().load_or_default(self.cli.config.as_deref())?;
        let flag_settings = Settings {
            base_url: self.cli.base_url.clone(),
            account_id: self.cli.account_id.clone(),
            api_key: self.cli.api_key.clone(),
            timeout_seconds: None,
        };
        let settings = file_settings.merge(flag_settings);

        let account_id = settings.account_id.ok_or_else(|| {
            anyhow!("Account identifier is not set (use --account-id, GITOPS_ACCOUNT_ID or the settings file)")
        })?;
        let api_key = settings.api_key.ok_or_else(|| {
            anyhow!("API key is not set (use --api-key, GITOPS_API_KEY or the settings file)")
        })?;
        let base_url = settings
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut context = ClientContext::new(account_id, api_key, base_url)?;
        if let Some(seconds) = settings.timeout_seconds {
            context = context.with_timeout(Duration::from_secs(seconds));
        }
        Ok(context)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
