//! Batch conversion of Android App Bundles into universal APKs.
//!
//! Every `.aab` matching a glob pattern is run through
//! `bundletool build-apks --mode=universal`, optionally signed, and the
//! resulting `universal.apk` is written next to the bundle as
//! `<name>-universal.apk`.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod converter;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Error, Result};
