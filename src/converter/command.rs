//! External command construction and execution.
//!
//! Commands are echoed before they run with any `pass:` secret masked, then
//! awaited with inherited stdio so the tool's own output reaches the user.

use crate::cli::RuntimeConfig;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::Path;

const SECRET_PREFIX: &str = "pass:";
const MASKED_SECRET: &str = "pass:****";

/// A program and its arguments, kept as data so it can be echoed and tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Command running `program` with no arguments yet.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Space-joined command line with every `pass:<secret>` shown as `pass:****`.
    pub fn masked(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| mask_secret(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Echo the masked command line, run it to completion and fail on non-zero exit.
    pub async fn run(&self, runtime_config: &RuntimeConfig) -> Result<()> {
        let masked = self.masked();
        runtime_config.progress(&format!("Running: {masked}"))?;

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: masked.clone(),
                error,
            })?;

        if !status.success() {
            return Err(Error::UtilityInvocationFailed {
                command: masked,
                code: status.code(),
            });
        }

        log::debug!("Command succeeded: {}", masked);
        Ok(())
    }
}

/// Mask the secret in a single argument.
///
/// Only a `pass:` source is masked, either as the whole argument or as the
/// value after the first `=`: `--ks-pass=pass:hunter2` becomes
/// `--ks-pass=pass:****`. Anything else, such as a path that merely contains
/// `pass:`, is returned unchanged.
pub fn mask_secret(arg: &str) -> String {
    if arg.starts_with(SECRET_PREFIX) {
        return MASKED_SECRET.to_string();
    }
    match arg.split_once('=') {
        Some((flag, value)) if value.starts_with(SECRET_PREFIX) => {
            format!("{flag}={MASKED_SECRET}")
        }
        _ => arg.to_string(),
    }
}
