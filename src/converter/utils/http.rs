//! HTTP utilities for downloading bundletool.

use crate::error::{Error, Result};

/// Downloads a file from a URL.
///
/// Returns the file contents as a byte vector. Connection failures and
/// non-2xx responses are both reported as [`Error::Download`].
pub async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    let to_error = |source| Error::Download {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(to_error)?;

    let bytes = response.bytes().await.map_err(to_error)?;

    log::debug!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}
