//! aab2apk - convert Android App Bundles into universal APKs.
//!
//! This binary finds bundles by glob pattern and converts each one with
//! bundletool, stopping at the first failure.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code; temporary directories are gone by the time it returns
    let exit_code = match aab2apk::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
