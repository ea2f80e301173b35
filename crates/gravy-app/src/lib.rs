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

//! Gravy application wiring.
//!
//! Layout: `toolkit.rs` (registry ownership and widget factories),
//! `bootstrap.rs` (config + logging + run), `walkthrough.rs` (sequencing
//! scenarios driven by timers), `error.rs`.

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level errors.
pub mod error;
/// Registry ownership and widget factories.
pub mod toolkit;
/// Timer-driven sequencing scenarios.
pub mod walkthrough;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
pub use toolkit::Toolkit;
