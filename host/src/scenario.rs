//! The in-process scenario: a request under construction plus the
//! expectations its response is checked against.
//!
//! # Design
//! `Scenario` implements the `scenario_core` builder contract, so a request
//! configured through `get().url(..)` and one replayed by
//! `Scenario::from_request` end up in the same state. Headers are stored as
//! plain strings and only validated when the request is built, which keeps
//! every builder call infallible.

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use scenario_core::{
    AdaptError, AdapterOptions, HttpMethod, RequestAdapter, RequestContinuation,
    RequestDescriptor, ScenarioBuilder, UrlConfigurator,
};

use crate::error::ScenarioError;
use crate::host::ScenarioResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expectation {
    Status(StatusCode),
    Content(String),
    Header { name: String, value: String },
}

impl Expectation {
    /// Describe the mismatch, if any.
    pub(crate) fn check(&self, result: &ScenarioResult) -> Option<String> {
        match self {
            Expectation::Status(expected) => (result.status() != *expected).then(|| {
                format!("expected status {expected}, got {}", result.status())
            }),
            Expectation::Content(expected) => {
                let actual = result.read_as_text();
                (actual != *expected)
                    .then(|| format!("expected content '{expected}', got '{actual}'"))
            }
            Expectation::Header { name, value } => {
                let actual = result
                    .headers()
                    .get(name.as_str())
                    .and_then(|v| v.to_str().ok());
                match actual {
                    Some(actual) if actual == value.as_str() => None,
                    Some(actual) => Some(format!(
                        "expected header '{name}' to be '{value}', got '{actual}'"
                    )),
                    None => Some(format!("expected header '{name}' to be '{value}', but it was absent")),
                }
            }
        }
    }
}

/// A request scenario run in-process against a `Host`.
#[derive(Debug)]
pub struct Scenario {
    options: AdapterOptions,
    target: Option<(HttpMethod, String)>,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    expectations: Vec<Expectation>,
}

impl Scenario {
    pub(crate) fn new(options: AdapterOptions) -> Self {
        Self {
            options,
            target: None,
            headers: Vec::new(),
            body: None,
            expectations: Vec::new(),
        }
    }

    /// Configure this scenario from a request descriptor.
    pub fn from_request(
        &mut self,
        request: impl Into<Option<RequestDescriptor>>,
    ) -> Result<SendExpression<'_>, AdaptError> {
        RequestAdapter::new(self.options).adapt(self, request)
    }

    /// Set a request header, replacing any earlier value of the same name.
    pub fn with_request_header(&mut self, name: &str, value: &str) -> &mut Self {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn with_bearer_token(&mut self, token: &str) -> &mut Self {
        self.with_request_header(AUTHORIZATION.as_str(), &format!("Bearer {token}"))
    }

    pub fn status_code_should_be(&mut self, status: StatusCode) -> &mut Self {
        self.expectations.push(Expectation::Status(status));
        self
    }

    pub fn status_code_should_be_ok(&mut self) -> &mut Self {
        self.status_code_should_be(StatusCode::OK)
    }

    /// Expect the response body, read as UTF-8, to equal `content`.
    pub fn content_should_be(&mut self, content: &str) -> &mut Self {
        self.expectations
            .push(Expectation::Content(content.to_string()));
        self
    }

    pub fn header_should_be(&mut self, name: &str, value: &str) -> &mut Self {
        self.expectations.push(Expectation::Header {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    fn entry_point(&mut self, method: HttpMethod) -> UrlExpression<'_> {
        UrlExpression {
            scenario: self,
            method,
        }
    }

    /// Build the request to execute and hand back the expectations.
    pub(crate) fn into_parts(self) -> Result<(Request<Body>, Vec<Expectation>), ScenarioError> {
        let (method, url) = self.target.ok_or(ScenarioError::NoRequest)?;
        let uri: Uri = url
            .parse()
            .map_err(|_| ScenarioError::InvalidUrl { url: url.clone() })?;

        let mut request = Request::new(Body::from(self.body.unwrap_or_default()));
        *request.method_mut() = http_method(method);
        *request.uri_mut() = uri;
        for (name, value) in self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes());
            let header_value = HeaderValue::from_str(&value);
            match (header_name, header_value) {
                (Ok(header_name), Ok(header_value)) => {
                    request.headers_mut().insert(header_name, header_value);
                }
                _ => return Err(ScenarioError::InvalidHeader { name }),
            }
        }
        Ok((request, self.expectations))
    }
}

fn http_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Head => Method::HEAD,
    }
}

/// A verb has been chosen; `url` completes the request line.
pub struct UrlExpression<'s> {
    scenario: &'s mut Scenario,
    method: HttpMethod,
}

/// Request line set; headers and body go here.
pub struct SendExpression<'s> {
    scenario: &'s mut Scenario,
}

impl ScenarioBuilder for Scenario {
    type Url<'s> = UrlExpression<'s>;
    type Continuation<'s> = SendExpression<'s>;

    fn get(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Get)
    }

    fn post(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Post)
    }

    fn put(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Put)
    }

    fn delete(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Delete)
    }

    fn patch(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Patch)
    }

    fn head(&mut self) -> UrlExpression<'_> {
        self.entry_point(HttpMethod::Head)
    }
}

impl<'s> UrlConfigurator for UrlExpression<'s> {
    type Continuation = SendExpression<'s>;

    fn url(self, relative_url: &str) -> SendExpression<'s> {
        self.scenario.target = Some((self.method, relative_url.to_string()));
        SendExpression {
            scenario: self.scenario,
        }
    }
}

impl RequestContinuation for SendExpression<'_> {
    fn header(&mut self, name: &str, value: &str) {
        self.scenario.with_request_header(name, value);
    }

    fn bearer_token(&mut self, token: &str) {
        self.scenario.with_bearer_token(token);
    }

    fn body(&mut self, bytes: Vec<u8>) {
        self.scenario.body = Some(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario::new(AdapterOptions::default())
    }

    #[test]
    fn fluent_configuration_builds_request() {
        let mut scenario = scenario();
        let mut send = scenario.post().url("/api/data?x=1");
        send.header("X-Custom", "1");
        send.bearer_token("abc");
        send.body(b"payload".to_vec());

        let (request, expectations) = scenario.into_parts().unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri(), "/api/data?x=1");
        assert_eq!(request.headers()["x-custom"], "1");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc");
        assert!(expectations.is_empty());
    }

    #[test]
    fn later_header_replaces_earlier_one() {
        let mut scenario = scenario();
        scenario.get().url("/");
        scenario
            .with_request_header("Accept", "text/html")
            .with_request_header("accept", "application/json");

        let (request, _) = scenario.into_parts().unwrap();
        assert_eq!(request.headers().get_all("accept").iter().count(), 1);
        assert_eq!(request.headers()["accept"], "application/json");
    }

    #[test]
    fn scenario_without_url_has_no_request() {
        let err = scenario().into_parts().unwrap_err();
        assert!(matches!(err, ScenarioError::NoRequest));
    }

    #[test]
    fn invalid_header_name_is_reported() {
        let mut scenario = scenario();
        scenario.get().url("/");
        scenario.with_request_header("bad header", "x");

        match scenario.into_parts().unwrap_err() {
            ScenarioError::InvalidHeader { name } => assert_eq!(name, "bad header"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_request_sets_target_and_content_type() {
        let mut scenario = scenario();
        let request = RequestDescriptor::new("patch", Uri::from_static("http://localhost/api/patch"))
            .with_content(scenario_core::Content::text("patched"));
        scenario.from_request(request).map(|_| ()).unwrap();

        let (request, _) = scenario.into_parts().unwrap();
        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(request.uri(), "/api/patch");
        assert_eq!(request.headers()["content-type"], "text/plain; charset=utf-8");
    }
}
