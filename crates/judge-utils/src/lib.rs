//! Shared utilities for stock-judge
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and the small amount of process-level configuration the
//! binaries need before the domain config is built.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{LogFormat, init_tracing, init_tracing_with};
