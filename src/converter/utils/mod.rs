//! Shared helpers for the converter.

pub mod http;
