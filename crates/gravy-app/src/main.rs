#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that wires the Gravy toolkit together and runs the
//! sequencing walkthroughs.

use gravy_app::{AppResult, run_app};

/// Bootstraps the toolkit and blocks until the walkthroughs finish.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
