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

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (tracing setup), recorder.rs (ordered action log).

pub mod fixtures;
pub mod recorder;

pub use fixtures::init_test_tracing;
pub use recorder::Recorder;
