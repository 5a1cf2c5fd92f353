//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stderr output
//! - Optional rolling JSON log file via tracing-appender

pub mod logger;

pub use logger::{LogFormat, LoggerImpl, LOG_FILE_NAME};
