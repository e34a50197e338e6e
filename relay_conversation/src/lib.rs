#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Conversation handling for the relay.
//!
//! Inbound text goes through a fixed decision table: control commands, canned
//! replies, keyword replies, an optional remote completion, and finally a
//! default reply. Each sender keeps a short rolling history in memory.
//!
//! # Key Features
//! - Bounded per-sender history with FIFO eviction
//! - Per-sender turn serialization
//! - `summarize`, `history` and `clear` commands
//! - Provider failures degrade to canned text

mod command;
pub mod replies;
mod selector;
mod service;
mod store;
mod summary;

#[cfg(test)]
mod testing;

pub use command::{Command, normalize};
pub use selector::{
    MIN_COMPLETION_CHARS, ReplySource, ResponseSelector, Selection, exact_reply, keyword_reply,
};
pub use service::{ConversationService, TurnResult};
pub use store::{DEFAULT_CAPACITY, HistoryStore};
pub use summary::{SummaryGenerator, render_transcript};
