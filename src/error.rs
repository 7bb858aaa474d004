//! Error types for conversion runs.
//!
//! Every failure mode of a run is a variant here; [`Error::exit_code`] decides
//! the process exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all converter operations
#[derive(Error, Debug)]
pub enum Error {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Filesystem operation failed on a known path
    #[error("{context} {path:?}: {source}")]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Downloading bundletool failed (network error or non-2xx status)
    #[error("Download of {url} failed: {source}")]
    Download {
        /// URL being fetched
        url: String,
        /// Underlying HTTP error
        source: reqwest::Error,
    },

    /// The command could not be spawned at all
    #[error("Failed to run `{command}`: {error}")]
    CommandFailed {
        /// Masked command line
        command: String,
        /// Spawn error
        error: std::io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("Command `{command}` failed with exit code {}", exit_code_display(.code))]
    UtilityInvocationFailed {
        /// Masked command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// The produced archive could not be read
    #[error("Failed to read archive {archive:?}: {source}")]
    Archive {
        /// Archive path
        archive: PathBuf,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// The produced archive has no entry with the expected name
    #[error("Archive {archive:?} has no entry named {entry}")]
    MissingEntry {
        /// Archive path
        archive: PathBuf,
        /// Entry that was looked up
        entry: &'static str,
    },

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Some but not all signing flags were given
    #[error("Incomplete signing credentials: missing {}", join_flags(.missing))]
    IncompleteSigning {
        /// Flags that were not supplied
        missing: Vec<&'static str>,
    },
}

fn join_flags(flags: &[&str]) -> String {
    flags.join(", ")
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Usage errors exit with 2. A failed bundletool run passes its own exit
    /// code through. Everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Cli(_) => 2,
            Error::UtilityInvocationFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Adds path context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with a description of the operation and the path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.into(),
            source,
        })
    }
}
