//! Executes scenarios in-process against an `axum::Router`.

use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use scenario_core::AdapterOptions;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::error::{ScenarioAssertionError, ScenarioError};
use crate::scenario::Scenario;

/// A routing table that scenarios are run against, without a network.
#[derive(Debug, Clone)]
pub struct Host {
    router: Router,
    options: AdapterOptions,
}

impl Host {
    /// Options come from the environment; see `AdapterOptions::from_env`.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            options: AdapterOptions::from_env(),
        }
    }

    pub fn with_options(mut self, options: AdapterOptions) -> Self {
        self.options = options;
        self
    }

    /// Configure a scenario, execute it, and check its expectations.
    ///
    /// An error from `configure` aborts the run before anything executes.
    /// Failed expectations are all reported together as
    /// `ScenarioError::Assertions`.
    pub async fn scenario<F>(&self, configure: F) -> Result<ScenarioResult, ScenarioError>
    where
        F: FnOnce(&mut Scenario) -> Result<(), ScenarioError>,
    {
        let mut scenario = Scenario::new(self.options);
        configure(&mut scenario)?;
        let (request, expectations) = scenario.into_parts()?;

        tracing::debug!(method = %request.method(), uri = %request.uri(), "executing scenario");
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(ScenarioError::ResponseBody)?
            .to_bytes();
        tracing::debug!(status = %parts.status, bytes = body.len(), "scenario completed");

        let result = ScenarioResult {
            status: parts.status,
            headers: parts.headers,
            body,
        };
        let failures: Vec<String> = expectations
            .iter()
            .filter_map(|expectation| expectation.check(&result))
            .collect();
        if !failures.is_empty() {
            return Err(ScenarioAssertionError::new(failures).into());
        }
        Ok(result)
    }
}

/// The response of an executed scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ScenarioResult {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text; invalid UTF-8 is replaced.
    pub fn read_as_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn read_as_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
