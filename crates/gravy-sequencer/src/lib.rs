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

//! Named queue sequencing for UI steps.
//!
//! Two flavours share the same "one lane per name" model:
//!
//! - [`Sequencer`] handles, minted by a [`QueueRegistry`], hold plain callbacks
//!   and advance only when an action calls [`Sequencer::next`].
//! - [`Lane`] handles, minted by a [`LaneRegistry`], run async steps on a
//!   per-name drain task that waits for each step's [`Completion`] signal.
//!
//! Layout: `registry.rs` (shared queue state), `sequencer.rs` (callback
//! handles), `lane.rs` (async lanes), `error.rs`.

pub mod error;
pub mod lane;
pub mod registry;
pub mod sequencer;

pub use error::{SequencerError, SequencerResult};
pub use lane::{Completion, Lane, LaneRegistry};
pub use registry::{Action, QueueRegistry, QueueSnapshot, StrayNextPolicy};
pub use sequencer::Sequencer;
