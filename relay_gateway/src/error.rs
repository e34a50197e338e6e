use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Messaging provider not configured; reply was not delivered")]
    MessagingUnavailable,

    #[error("Error sending message")]
    Delivery(#[source] anyhow::Error),
}

impl Error {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::MessagingUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Self::Delivery(e) => error!("Error sending message: {e:#}"),
            other => warn!("Rejected request: {other}"),
        }
        (self.status(), self.to_string()).into_response()
    }
}
