//! Input bundle to output APK path mapping.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the bundle's file stem.
pub const OUTPUT_SUFFIX: &str = "-universal";

/// Extension of the produced package.
pub const OUTPUT_EXTENSION: &str = "apk";

/// A discovered bundle and the APK it converts into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTarget {
    input: PathBuf,
    output: PathBuf,
}

impl ConversionTarget {
    /// Pair `input` with its sibling output, `dir/app.aab` -> `dir/app-universal.apk`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = derive_output_path(&input);
        Self { input, output }
    }

    /// Bundle being converted.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Where the universal APK is written.
    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Replace the final extension of `input` with `-universal.apk`.
///
/// Only the last extension is dropped, so `app.release.aab` becomes
/// `app.release-universal.apk`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(OUTPUT_SUFFIX);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    input.with_file_name(name)
}
