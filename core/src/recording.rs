//! A scenario builder that only records what it was asked to do.
//!
//! Useful for checking an adaptation without a host: every call made against
//! the builder contract is kept, in order, as a `BuilderCall`.

use crate::http::HttpMethod;
use crate::scenario::{RequestContinuation, ScenarioBuilder, UrlConfigurator};

/// One call made against the builder contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderCall {
    Url { method: HttpMethod, url: String },
    Header { name: String, value: String },
    BearerToken(String),
    Body(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct RecordingScenario {
    calls: Vec<BuilderCall>,
}

impl RecordingScenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BuilderCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<BuilderCall> {
        self.calls
    }

    fn entry_point(&mut self, method: HttpMethod) -> RecordingUrl<'_> {
        RecordingUrl {
            scenario: self,
            method,
        }
    }
}

pub struct RecordingUrl<'s> {
    scenario: &'s mut RecordingScenario,
    method: HttpMethod,
}

pub struct RecordingContinuation<'s> {
    scenario: &'s mut RecordingScenario,
}

impl ScenarioBuilder for RecordingScenario {
    type Url<'s> = RecordingUrl<'s>;
    type Continuation<'s> = RecordingContinuation<'s>;

    fn get(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Get)
    }

    fn post(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Post)
    }

    fn put(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Put)
    }

    fn delete(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Delete)
    }

    fn patch(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Patch)
    }

    fn head(&mut self) -> RecordingUrl<'_> {
        self.entry_point(HttpMethod::Head)
    }
}

impl<'s> UrlConfigurator for RecordingUrl<'s> {
    type Continuation = RecordingContinuation<'s>;

    fn url(self, relative_url: &str) -> RecordingContinuation<'s> {
        self.scenario.calls.push(BuilderCall::Url {
            method: self.method,
            url: relative_url.to_string(),
        });
        RecordingContinuation {
            scenario: self.scenario,
        }
    }
}

impl RequestContinuation for RecordingContinuation<'_> {
    fn header(&mut self, name: &str, value: &str) {
        self.scenario.calls.push(BuilderCall::Header {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn bearer_token(&mut self, token: &str) {
        self.scenario
            .calls
            .push(BuilderCall::BearerToken(token.to_string()));
    }

    fn body(&mut self, bytes: Vec<u8>) {
        self.scenario.calls.push(BuilderCall::Body(bytes));
    }
}
