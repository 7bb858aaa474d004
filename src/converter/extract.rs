//! Extraction of the universal APK from bundletool's `.apks` output.

use crate::error::{Error, ErrorExt, Result};
use std::path::Path;

/// Entry bundletool writes in `--mode=universal` archives.
pub const UNIVERSAL_ENTRY: &str = "universal.apk";

/// Copy the `universal.apk` entry of `archive` to `destination`, byte for byte.
///
/// An existing destination is overwritten. Returns the number of bytes written.
pub async fn extract_universal_apk(archive: &Path, destination: &Path) -> Result<u64> {
    let archive = archive.to_path_buf();
    let destination = destination.to_path_buf();

    tokio::task::spawn_blocking(move || extract_entry(&archive, UNIVERSAL_ENTRY, &destination))
        .await
        .map_err(|e| Error::GenericError(format!("Extraction task panicked: {}", e)))?
}

fn extract_entry(archive: &Path, entry: &'static str, destination: &Path) -> Result<u64> {
    let file = std::fs::File::open(archive).fs_context("opening archive", archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| Error::Archive {
        archive: archive.to_path_buf(),
        source,
    })?;

    let mut apk = match zip.by_name(entry) {
        Ok(apk) => apk,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(Error::MissingEntry {
                archive: archive.to_path_buf(),
                entry,
            });
        }
        Err(source) => {
            return Err(Error::Archive {
                archive: archive.to_path_buf(),
                source,
            });
        }
    };

    let mut out = std::fs::File::create(destination).fs_context("creating package", destination)?;
    let written = match std::io::copy(&mut apk, &mut out) {
        Ok(written) => written,
        Err(e) => {
            drop(out);
            let _ = std::fs::remove_file(destination);
            return Err(e).fs_context("writing package", destination);
        }
    };

    log::debug!(
        "Extracted {} ({} bytes) from {} to {}",
        entry,
        written,
        archive.display(),
        destination.display()
    );
    Ok(written)
}

/// Move a staged package to `destination`, replacing any previous file.
///
/// Falls back to a copy when the two paths sit on different filesystems; a
/// failed copy leaves no partial file behind.
pub async fn move_into_place(staged: &Path, destination: &Path) -> Result<()> {
    match tokio::fs::rename(staged, destination).await {
        Ok(()) => return Ok(()),
        Err(e) => log::debug!(
            "Rename of {} failed ({}), copying instead",
            staged.display(),
            e
        ),
    }

    if let Err(e) = tokio::fs::copy(staged, destination).await {
        let _ = tokio::fs::remove_file(destination).await;
        return Err(e).fs_context("writing package", destination);
    }
    Ok(())
}
