//! Command line interface for aab2apk.
//!
//! Parses arguments, resolves bundletool once, then converts every matching
//! bundle in order.

mod args;
mod output;

pub use args::{Args, RuntimeConfig, normalize_legacy_flags};
pub use output::OutputManager;

use crate::converter::{
    BundletoolLocation, Converter, ToolSource, discover, resolve_bundletool, resolve_java,
};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args, &ToolSource::default()).await
}

/// Run a conversion for already parsed arguments.
///
/// Signing flags are checked before anything touches the filesystem or
/// network. Returns the process exit code; finding no bundles is still a
/// success.
pub async fn execute(args: &Args, tool_source: &ToolSource) -> Result<i32> {
    args.validate()?;
    let signing = args.signing()?;
    let runtime_config = RuntimeConfig::from(args);

    let cwd = std::env::current_dir()?;
    let bundles = discover(&args.pattern, &cwd)?;

    let client = reqwest::Client::new();
    let bundletool = resolve_bundletool(args.bundletool.as_deref(), tool_source, &client).await?;
    runtime_config.verbose(&format!(
        "Using bundletool from {}: {}",
        bundletool.origin(),
        bundletool.path().display()
    ))?;
    if let (BundletoolLocation::Downloaded { .. }, Some(cache)) =
        (&bundletool, tool_source.cache_path())
    {
        runtime_config.warn(&format!(
            "bundletool was downloaded for this run only; save it as {} to skip the download",
            cache.display()
        ))?;
    }

    let java = resolve_java(args.java.as_deref());
    log::debug!("Using java launcher {}", java.display());

    let converter = Converter::new(java, bundletool, signing);
    let packages = converter.convert_all(bundles, &runtime_config).await?;

    if packages.is_empty() {
        runtime_config.progress(&format!("No files matching {} found", args.pattern))?;
    } else {
        runtime_config.success(&format!("Converted {} bundle(s)", packages.len()))?;
    }

    Ok(0)
}
