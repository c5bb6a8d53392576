use thiserror::Error;

use crate::constants::TICKET_CONSUME_ERROR;
use crate::shared_roulette::SpinPhase;

/// Failures talking to the REST API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Why a paid spin could not consume its ticket.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TicketError {
    /// The server refused; carries its `error` message when it sent one.
    #[error("ticket rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    #[error("network error: {0}")]
    Network(String),
}

impl TicketError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            TicketError::Rejected(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            _ => TICKET_CONSUME_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot {action} while {from:?}")]
pub struct TransitionError {
    pub action: &'static str,
    pub from: SpinPhase,
}
