//! Observability for the gateway
//!
//! Structured logging through `tracing`:
//! - one subscriber per process, installed by [`init_logging`]
//! - `RUST_LOG` takes precedence over the configured filter
//! - log lines go to stderr so CLI output on stdout stays clean

mod logger;

pub use logger::{build_filter, init_logging};
