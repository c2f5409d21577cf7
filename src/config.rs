//! Configuration management for the sign-up form validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML config file (conflict policy, session timing)
//! - Precedence: command line over config file over defaults

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conflict::{ConflictPolicy, PolicyCheck};
use crate::validation::ValidationEngine;

/// Command-line arguments for the sign-up form validator
#[derive(Debug, Parser)]
#[command(name = "signup-form")]
#[command(about = "Incremental validation engine for a sign-up form")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file to load instead of the per-user default
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Conflict policy applied after all field rules pass
    #[arg(long, global = true, help = "Conflict policy (always, never, registry)")]
    pub conflict_policy: Option<ConflictPolicy>,

    /// Artificial delay before a submission result is reported
    #[arg(long, global = true, help = "Delay in milliseconds before submit results")]
    pub submit_delay_ms: Option<u64>,

    /// Log level, overridden by RUST_LOG when set
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Read line-delimited JSON events on stdin and answer on stdout
    Session,
    /// Validate one set of values and print the result as JSON
    Check {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
        /// Validate only this field (email, password, confirmPassword)
        #[arg(long)]
        field: Option<String>,
    },
}

/// On-disk config file layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub conflict: ConflictSection,
    pub session: SessionSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConflictSection {
    pub policy: ConflictPolicy,
    pub registered: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub submit_delay_ms: u64,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// What the binary should do
    pub command: Command,
    /// Config file that was actually read, if any
    pub config_path: Option<PathBuf>,
    pub conflict_policy: ConflictPolicy,
    /// Addresses treated as taken by the registry policy
    pub registered_emails: Vec<String>,
    pub submit_delay: Duration,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // An explicit path must exist; the default one is optional
        let (file, config_path) = match args.config {
            Some(path) => (ConfigFile::load(&path)?, Some(path)),
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => (ConfigFile::load(&path)?, Some(path)),
                None => (ConfigFile::default(), None),
            },
        };

        if let Some(path) = &config_path {
            log::info!("Loaded config from {}", path.display());
        }

        let conflict_policy = args.conflict_policy.unwrap_or(file.conflict.policy);
        if conflict_policy == ConflictPolicy::Registry && file.conflict.registered.is_empty() {
            log::warn!("Registry conflict policy selected with no registered emails");
        }

        Ok(Config {
            command: args.command.unwrap_or(Command::Session),
            config_path,
            conflict_policy,
            registered_emails: file.conflict.registered,
            submit_delay: Duration::from_millis(
                args.submit_delay_ms.unwrap_or(file.session.submit_delay_ms),
            ),
            log_level: args.log_level,
        })
    }

    /// Conflict check selected by the effective policy
    pub fn conflict_check(&self) -> PolicyCheck {
        PolicyCheck::from_policy(self.conflict_policy, &self.registered_emails)
    }

    /// Engine wired with the configured conflict check
    pub fn engine(&self) -> ValidationEngine<PolicyCheck> {
        ValidationEngine::with_conflict_check(self.conflict_check())
    }
}

/// Per-user config location, e.g. `~/.config/signup-form/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("signup-form").join("config.toml"))
}
