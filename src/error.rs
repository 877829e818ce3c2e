//! Error types for the ticket service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Cache misses are not errors and never appear here.

use crate::models::TicketId;
use thiserror::Error;

/// Errors raised by the ticket service and persistence layer.
#[derive(Error, Debug)]
pub enum TicketError {
    /// No ticket with the given id
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    /// Client supplied an invalid ticket
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Persistence layer failed
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with TicketError
pub type TicketResult<T> = Result<T, TicketError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
