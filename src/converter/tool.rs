//! bundletool and Java launcher resolution.
//!
//! bundletool is looked up once per run: an explicit path wins, then the jar
//! cached under the home directory, and only then a fresh download into a
//! temporary directory that lives as long as the returned location.

use crate::converter::utils::http;
use crate::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Release fetched when no local bundletool is available.
pub const BUNDLETOOL_URL: &str =
    "https://github.com/google/bundletool/releases/download/1.18.1/bundletool-all-1.18.1.jar";

/// File name of the jar, both in the cache and in the download directory.
pub const BUNDLETOOL_JAR: &str = "bundletool-all.jar";

/// Cache directory below `$HOME`.
const CACHE_DIR: &str = ".cache/bundletool";

/// Where bundletool comes from when the user does not name a jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSource {
    download_url: String,
    cache_path: Option<PathBuf>,
}

impl Default for ToolSource {
    fn default() -> Self {
        Self {
            download_url: BUNDLETOOL_URL.to_string(),
            cache_path: dirs::home_dir().map(|home| home.join(CACHE_DIR).join(BUNDLETOOL_JAR)),
        }
    }
}

impl ToolSource {
    /// Source with a custom URL and cache location.
    pub fn new(download_url: impl Into<String>, cache_path: Option<PathBuf>) -> Self {
        Self {
            download_url: download_url.into(),
            cache_path,
        }
    }

    /// URL used for the fallback download.
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Well-known cached jar, if a home directory exists.
    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }
}

/// A resolved bundletool jar.
///
/// The `Downloaded` variant owns its temporary directory; dropping the
/// location deletes the jar.
#[derive(Debug)]
pub enum BundletoolLocation {
    /// Path given on the command line, used as is.
    Explicit(PathBuf),
    /// Jar found in the home directory cache.
    Cached(PathBuf),
    /// Jar downloaded for this run.
    Downloaded {
        /// Jar inside `dir`
        path: PathBuf,
        /// Keeps the download alive
        dir: TempDir,
    },
}

impl BundletoolLocation {
    /// Path to pass to `java -jar`.
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Cached(path) => path.as_path(),
            Self::Downloaded { path, .. } => path.as_path(),
        }
    }

    /// Short description of where the jar came from.
    pub fn origin(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "command line",
            Self::Cached(_) => "cache",
            Self::Downloaded { .. } => "download",
        }
    }
}

/// Resolve bundletool: `explicit`, else the cached jar, else a download.
pub async fn resolve_bundletool(
    explicit: Option<&Path>,
    source: &ToolSource,
    client: &reqwest::Client,
) -> Result<BundletoolLocation> {
    if let Some(path) = explicit {
        log::debug!("Using bundletool from command line: {}", path.display());
        return Ok(BundletoolLocation::Explicit(path.to_path_buf()));
    }

    if let Some(cached) = source.cache_path() {
        if tokio::fs::try_exists(cached).await.unwrap_or(false) {
            log::debug!("Using cached bundletool at {}", cached.display());
            return Ok(BundletoolLocation::Cached(cached.to_path_buf()));
        }
        log::debug!("No cached bundletool at {}", cached.display());
    }

    let dir = tempfile::Builder::new()
        .prefix("aab2apk-bundletool-")
        .tempdir()?;
    let path = dir.path().join(BUNDLETOOL_JAR);

    let data = http::download(client, source.download_url()).await?;
    tokio::fs::write(&path, data)
        .await
        .fs_context("writing bundletool", &path)?;

    log::info!("✓ Downloaded bundletool to {}", path.display());
    Ok(BundletoolLocation::Downloaded { path, dir })
}

/// Pick the Java launcher used to run the jar.
///
/// Order: `explicit`, `$JAVA_HOME/bin/java`, `java` on `PATH`, and finally the
/// bare name so a missing launcher fails at invocation.
pub fn resolve_java(explicit: Option<&Path>) -> PathBuf {
    if let Some(java) = explicit {
        return java.to_path_buf();
    }

    if let Some(home) = std::env::var_os("JAVA_HOME") {
        let candidate = Path::new(&home).join("bin").join(java_binary_name());
        if candidate.is_file() {
            log::debug!("Using java from JAVA_HOME: {}", candidate.display());
            return candidate;
        }
    }

    match which::which("java") {
        Ok(path) => {
            log::debug!("Found java at: {}", path.display());
            path
        }
        Err(e) => {
            log::debug!("java not found in PATH: {}", e);
            PathBuf::from("java")
        }
    }
}

fn java_binary_name() -> &'static str {
    if cfg!(windows) { "java.exe" } else { "java" }
}
