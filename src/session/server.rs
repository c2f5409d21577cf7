//! Session Driver
//!
//! Feeds protocol requests into a [`FormState`] and answers each one with a
//! snapshot of what the form should display.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::conflict::{ConflictCheck, PolicyCheck};
use crate::form::{FieldName, FormState};
use crate::session::protocol::{Request, Response};
use crate::validation::ValidationEngine;
use crate::Config;

/// One form lifecycle driven by protocol requests
pub struct Session<C = PolicyCheck> {
    form: FormState,
    engine: ValidationEngine<C>,
    submit_delay: Duration,
}

impl<C: ConflictCheck> Session<C> {
    pub fn new(engine: ValidationEngine<C>, submit_delay: Duration) -> Self {
        Self {
            form: FormState::new(),
            engine,
            submit_delay,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Handle one raw input line; blank lines produce no response
    pub async fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<Request>(line) {
            Ok(request) => Some(self.handle(request).await),
            Err(e) => {
                log::warn!("Malformed session request: {}", e);
                Some(Response::error(format!("malformed request: {}", e)))
            }
        }
    }

    pub async fn handle(&mut self, request: Request) -> Response {
        log::debug!("session request: {:?}", request);

        match request {
            Request::Edit { field, value } => match parse_field(&field) {
                Ok(field) => {
                    self.form.edit(field, value);
                    Response::snapshot(&self.form)
                }
                Err(response) => response,
            },
            Request::Blur { field } => match parse_field(&field) {
                Ok(field) => {
                    self.form.blur(field);
                    Response::snapshot(&self.form)
                }
                Err(response) => response,
            },
            Request::Submit => {
                // Artificial delay before the outcome is shown
                if !self.submit_delay.is_zero() {
                    tokio::time::sleep(self.submit_delay).await;
                }
                self.form.submit(&self.engine);
                Response::snapshot(&self.form)
            }
            Request::Reset => {
                self.form.reset();
                Response::snapshot(&self.form)
            }
            Request::Validate { field } => match parse_field(&field) {
                Ok(field) => Response::Validation {
                    field,
                    result: self.engine.validate_field(field, self.form.values()),
                },
                Err(response) => response,
            },
        }
    }
}

fn parse_field(name: &str) -> Result<FieldName, Response> {
    name.parse::<FieldName>().map_err(|e| {
        log::warn!("Rejected session request: {}", e);
        Response::error(e.to_string())
    })
}

/// Pump requests from `reader` through `session`, writing one response line each
pub async fn run_session<R, W, C>(
    reader: R,
    mut writer: W,
    session: &mut Session<C>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: ConflictCheck,
{
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read session input")?
    {
        let Some(response) = session.handle_line(&line).await else {
            continue;
        };

        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        writer
            .write_all(payload.as_bytes())
            .await
            .context("Failed to write session output")?;
        writer.flush().await?;
    }

    log::debug!("session input closed");
    Ok(())
}

/// Run a session over stdin/stdout using the configured engine
pub async fn serve(config: &Config) -> Result<()> {
    log::info!(
        "Starting session (conflict policy: {:?}, submit delay: {:?})",
        config.conflict_policy,
        config.submit_delay
    );

    let mut session = Session::new(config.engine(), config.submit_delay);
    run_session(BufReader::new(stdin()), stdout(), &mut session).await
}
