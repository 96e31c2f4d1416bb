//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check that user names are usable in Basic credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("limits.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("auth.users[{0}] has an empty name")]
    EmptyUserName(usize),

    #[error("auth.users[{index}] name '{name}' contains ':'")]
    ColonInUserName { index: usize, name: String },

    #[error("auth.users name '{0}' is declared more than once")]
    DuplicateUser(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, user) in config.auth.users.iter().enumerate() {
        if user.name.is_empty() {
            errors.push(ValidationError::EmptyUserName(index));
        } else if user.name.contains(':') {
            errors.push(ValidationError::ColonInUserName {
                index,
                name: user.name.clone(),
            });
        }
        if !seen.insert(user.name.as_str()) {
            errors.push(ValidationError::DuplicateUser(user.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
