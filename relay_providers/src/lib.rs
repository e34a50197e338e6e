#![deny(
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

//! HTTP clients for the completion and messaging providers.

pub mod openai;
pub mod retry;
pub mod twilio;

pub use openai::OpenAiProvider;
pub use retry::retry_with_backoff;
pub use twilio::{AccountInfo, IncomingNumber, TwilioClient};
