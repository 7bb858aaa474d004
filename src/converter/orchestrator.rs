//! Main conversion orchestration.
//!
//! This module provides the [`Converter`] that turns each discovered bundle
//! into a universal APK, one bundle at a time.

use crate::{
    cli::RuntimeConfig,
    converter::{
        ConversionTarget, SigningCredentials,
        checksum::calculate_sha256,
        command::ToolCommand,
        extract::{UNIVERSAL_ENTRY, extract_universal_apk, move_into_place},
        tool::BundletoolLocation,
    },
    error::{ErrorExt, Result},
};
use std::path::{Path, PathBuf};

/// Archive name bundletool writes into the per-bundle scratch directory.
pub const OUTPUT_ARCHIVE: &str = "universal.apks";

/// A universal APK written next to its bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPackage {
    /// Path of the written APK
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Converts bundles with a single resolved bundletool.
///
/// # Process
///
/// For every target:
/// 1. Creates a scratch directory
/// 2. Runs `bundletool build-apks --mode=universal` into it
/// 3. Extracts `universal.apk` in scratch and moves it next to the bundle
/// 4. Removes the scratch directory
///
/// The first failure stops the run; later bundles are never attempted.
#[derive(Debug)]
pub struct Converter {
    java: PathBuf,
    bundletool: BundletoolLocation,
    signing: Option<SigningCredentials>,
}

impl Converter {
    /// Creates a converter running `bundletool` with the `java` launcher.
    pub fn new(
        java: PathBuf,
        bundletool: BundletoolLocation,
        signing: Option<SigningCredentials>,
    ) -> Self {
        Self {
            java,
            bundletool,
            signing,
        }
    }

    /// The resolved bundletool jar.
    pub fn bundletool(&self) -> &BundletoolLocation {
        &self.bundletool
    }

    /// Builds the `build-apks` invocation for `target`, writing to `output_archive`.
    pub fn build_apks_command(
        &self,
        target: &ConversionTarget,
        output_archive: &Path,
    ) -> ToolCommand {
        let mut bundle = std::ffi::OsString::from("--bundle=");
        bundle.push(target.input());
        let mut output = std::ffi::OsString::from("--output=");
        output.push(output_archive);

        let command = ToolCommand::new(&self.java)
            .arg("-jar")
            .arg(self.bundletool.path())
            .args(["build-apks", "--mode=universal"])
            .arg(bundle)
            .arg(output);

        match &self.signing {
            Some(credentials) => command.args(credentials.bundletool_args()),
            None => command,
        }
    }

    /// Converts a single bundle.
    ///
    /// The scratch directory is removed on every path out of this function,
    /// including a failed bundletool run.
    pub async fn convert(
        &self,
        target: &ConversionTarget,
        runtime_config: &RuntimeConfig,
    ) -> Result<ConvertedPackage> {
        runtime_config.progress(&format!("Converting {}", target.input().display()))?;

        let scratch = tempfile::Builder::new().prefix("aab2apk-").tempdir()?;
        let archive = scratch.path().join(OUTPUT_ARCHIVE);
        runtime_config.verbose(&format!("Scratch directory: {}", scratch.path().display()))?;

        self.build_apks_command(target, &archive)
            .run(runtime_config)
            .await?;

        // Stage the APK in scratch so a failed extraction never touches the output.
        let staged = scratch.path().join(UNIVERSAL_ENTRY);
        let size = extract_universal_apk(&archive, &staged).await?;
        move_into_place(&staged, target.output()).await?;

        let scratch_path = scratch.path().to_path_buf();
        scratch
            .close()
            .fs_context("removing scratch directory", scratch_path)?;

        let checksum = calculate_sha256(target.output()).await?;

        runtime_config.success(&format!("Created {}", target.output().display()))?;
        runtime_config.indent(&format!("{} bytes, sha256 {}", size, checksum))?;

        Ok(ConvertedPackage {
            path: target.output().to_path_buf(),
            size,
            checksum,
        })
    }

    /// Converts every bundle yielded by `bundles`, in order.
    ///
    /// Stops at the first error. Packages already written stay on disk.
    pub async fn convert_all<I>(
        &self,
        bundles: I,
        runtime_config: &RuntimeConfig,
    ) -> Result<Vec<ConvertedPackage>>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut packages = Vec::new();
        for bundle in bundles {
            let target = ConversionTarget::new(bundle);
            packages.push(self.convert(&target, runtime_config).await?);
        }
        Ok(packages)
    }
}
