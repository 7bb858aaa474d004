//! Command line argument parsing and validation.

use crate::converter::{DEFAULT_PATTERN, SigningCredentials};
use crate::error::{CliError, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Convert Android App Bundles into universal APKs
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "aab2apk",
    version,
    about = "Convert Android App Bundles into universal APKs",
    long_about = "Finds .aab files matching a glob pattern and converts each one into a universal APK
with bundletool. The APK is written next to its bundle as <name>-universal.apk.

bundletool is taken from --bundletool, else ~/.cache/bundletool/bundletool-all.jar,
else downloaded for the duration of the run.

Usage:
  aab2apk
  aab2apk --pattern 'app/build/**/*.aab' -bt ~/tools/bundletool.jar
  aab2apk --ks release.jks --ks-pass secret --ks-key-alias upload --key-pass secret

The four signing flags must be given together or not at all."
)]
pub struct Args {
    /// Glob of bundles to convert, relative to the working directory unless absolute
    #[arg(short = 'p', long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Path to bundletool.jar (also accepted as -bt)
    #[arg(long, value_name = "JAR")]
    pub bundletool: Option<PathBuf>,

    /// Keystore used to sign the APK
    #[arg(long, value_name = "PATH")]
    pub ks: Option<PathBuf>,

    /// Keystore password
    #[arg(long, value_name = "PASSWORD", allow_hyphen_values = true)]
    pub ks_pass: Option<String>,

    /// Alias of the signing key inside the keystore
    #[arg(long, value_name = "ALIAS")]
    pub ks_key_alias: Option<String>,

    /// Password of the signing key
    #[arg(long, value_name = "PASSWORD", allow_hyphen_values = true)]
    pub key_pass: Option<String>,

    /// Java launcher used to run bundletool (defaults to $JAVA_HOME/bin/java, then PATH)
    #[arg(long, env = "JAVA", value_name = "PATH")]
    pub java: Option<PathBuf>,

    /// Print extra progress detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Parse from an explicit argument list, first item being the program name.
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        if self.pattern.trim().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "Pattern cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Signing credentials, `None` when no signing flag was given.
    pub fn signing(&self) -> Result<Option<SigningCredentials>> {
        SigningCredentials::from_parts(
            self.ks.clone(),
            self.ks_pass.clone(),
            self.ks_key_alias.clone(),
            self.key_pass.clone(),
        )
    }
}

/// Rewrite the single-dash long flag `-bt` to `--bundletool`.
///
/// clap short flags are one character, so `-bt PATH` and `-bt=PATH` are
/// mapped before parsing.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-bt") => OsString::from("--bundletool"),
            Some(s) if s.starts_with("-bt=") => {
                OsString::from(format!("--bundletool={}", &s["-bt=".len()..]))
            }
            _ => arg,
        })
        .collect()
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

impl RuntimeConfig {
    /// Runtime configuration with explicit output modes.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Print verbose message if in verbose mode
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
