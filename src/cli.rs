//! Command Dispatch
//!
//! Runs the subcommand selected in the configuration.

use anyhow::{Context, Result};
use std::io::Write;

use crate::config::{Command, Config};
use crate::form::FormValues;
use crate::session;

/// Execute the configured command
pub async fn run(config: Config) -> Result<()> {
    match &config.command {
        Command::Session => session::serve(&config).await,
        Command::Check {
            email,
            password,
            confirm_password,
            field,
        } => {
            let values =
                FormValues::new(email.as_str(), password.as_str(), confirm_password.as_str());
            let stdout = std::io::stdout();
            check(&config, &values, field.as_deref(), &mut stdout.lock())
        }
    }
}

/// Validate `values` once and write the JSON result to `out`
///
/// With `field` set only that field is validated; an unknown field name is
/// a hard error.
pub fn check(
    config: &Config,
    values: &FormValues,
    field: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let engine = config.engine();

    let json = match field {
        Some(name) => serde_json::to_string_pretty(&engine.validate_field_named(name, values)?)?,
        None => serde_json::to_string_pretty(&engine.submit(values))?,
    };

    writeln!(out, "{}", json).context("Failed to write result")?;
    Ok(())
}
