//! Bundle to universal APK conversion.
//!
//! # Module Organization
//!
//! - [`discovery`] - Glob-based bundle discovery
//! - [`target`] - Output path derivation
//! - [`signing`] - Keystore credentials
//! - [`tool`] - bundletool and Java resolution
//! - [`command`] - Masked command echo and execution
//! - [`extract`] - `universal.apk` extraction
//! - [`checksum`] - SHA-256 of produced packages
//! - [`orchestrator`] - Main [`Converter`] loop

pub mod checksum;
pub mod command;
pub mod discovery;
pub mod extract;
pub mod orchestrator;
pub mod signing;
pub mod target;
pub mod tool;
pub mod utils;

pub use discovery::{DEFAULT_PATTERN, Discovery, discover};
pub use orchestrator::{ConvertedPackage, Converter};
pub use signing::SigningCredentials;
pub use target::ConversionTarget;
pub use tool::{BundletoolLocation, ToolSource, resolve_bundletool, resolve_java};
