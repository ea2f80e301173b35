#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Telemetry primitives shared across the Gravy workspace.
//!
//! This crate centralises logging setup so the toolkit crates only ever talk
//! to the `tracing` facade.
//!
//! Layout: `init.rs` (subscriber installation), `context.rs` (process-level
//! span), `error.rs`.

pub mod context;
pub mod error;
pub mod init;

pub use context::{GlobalContextGuard, record_stage};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
