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

//! HTTP gateway: provider webhook, health, and a delivery-free test endpoint.

mod error;
pub mod handler;
mod server;
mod state;

pub use error::{Error, Result};
pub use handler::{HealthResponse, InboundMessage, TestResponse, WebhookForm};
pub use server::{router, serve};
pub use state::AppState;
