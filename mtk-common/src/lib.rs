//! # MTK Common Library
//!
//! Shared code for the MTK tools:
//! - Bootstrap configuration (TOML) and its file location
//! - Rules source resolution
//! - Tracing subscriber setup
//! - Common error type

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
