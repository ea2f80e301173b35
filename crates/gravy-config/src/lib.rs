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

//! Configuration for the Gravy toolkit.
//!
//! Layout: `model.rs` (typed sections), `loader.rs` (JSON documents and
//! environment overrides), `validate.rs` (field checks), `error.rs`.

pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    AUTOSIZE_MIN_HEIGHT_ENV, CONFIG_PATH_ENV, LOG_FORMAT_ENV, LOG_LEVEL_ENV, STRAY_NEXT_ENV,
    load_from_env, load_with,
};
pub use model::{GravyConfig, SequencerConfig, TelemetryConfig};
