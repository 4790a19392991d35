//! Logging utilities.
//!
//! Centralizes logger initialization for the harness. Everything else logs
//! through the standard `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
