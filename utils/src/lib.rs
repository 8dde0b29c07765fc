//! Shared process utilities for the evote daemon.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
