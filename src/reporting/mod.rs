//! Structured logging for both binaries

pub mod logging;
