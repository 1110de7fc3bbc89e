//! Error types for scenario execution.
//!
//! # Design
//! `Assertions` gets its own type because a run can fail several expectations
//! at once and callers want all of them, not the first. Everything else stops
//! the run where it happens.

use std::fmt;

use scenario_core::AdaptError;
use thiserror::Error;

/// Errors returned by `Host::scenario`.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Configuring the scenario from a request descriptor failed.
    #[error(transparent)]
    Adapt(#[from] AdaptError),

    /// The scenario never selected a verb and URL.
    #[error("scenario has no request: select a verb and a URL first")]
    NoRequest,

    #[error("scenario URL '{url}' is not a valid request target")]
    InvalidUrl { url: String },

    #[error("request header '{name}' has an invalid name or value")]
    InvalidHeader { name: String },

    /// The response body could not be collected.
    #[error("failed to read response body")]
    ResponseBody(#[source] axum::Error),

    #[error(transparent)]
    Assertions(#[from] ScenarioAssertionError),
}

/// Every expectation a scenario run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioAssertionError {
    failures: Vec<String>,
}

impl ScenarioAssertionError {
    pub(crate) fn new(failures: Vec<String>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

impl fmt::Display for ScenarioAssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scenario failed {} expectation(s):", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScenarioAssertionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_error_lists_every_failure() {
        let err = ScenarioAssertionError::new(vec![
            "expected status 200, got 404".to_string(),
            "expected content 'ok', got ''".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "scenario failed 2 expectation(s):\n  - expected status 200, got 404\n  - expected content 'ok', got ''"
        );
    }

    #[test]
    fn adapt_errors_display_transparently() {
        let err = ScenarioError::from(AdaptError::UnsupportedMethod {
            method: "OPTIONS".to_string(),
        });
        assert_eq!(err.to_string(), "HTTP method 'OPTIONS' is not supported");
    }
}
