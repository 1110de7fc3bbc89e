//! Translate a `RequestDescriptor` into calls on a scenario builder.
//!
//! # Design
//! `RequestAdapter` holds only its options and carries no state between
//! calls. One adaptation runs in a fixed order:
//!
//! 1. validate the descriptor and resolve the method,
//! 2. pick the verb's entry point and set the relative URL,
//! 3. apply message headers, routing `Authorization: Bearer ...` to the
//!    builder's bearer-token call,
//! 4. if content is present, drain it, apply `Content-Type`, then the other
//!    content headers, then hand over the body.
//!
//! Steps 1 and 2 cannot fail once the builder has been touched, so a bad
//! descriptor never leaves a half-configured scenario. A body that fails to
//! drain in step 4 does leave the message headers of step 3 applied.

use std::io::{self, Read};

use http::Uri;

use crate::error::AdaptError;
use crate::http::{HttpMethod, Headers, HEADER_VALUE_SEPARATOR};
use crate::request::{Content, RequestDescriptor, CONTENT_TYPE};
use crate::scenario::{RequestContinuation, ScenarioBuilder, UrlConfigurator};

/// Environment variable overriding `AdapterOptions::max_body_bytes`.
pub const MAX_BODY_BYTES_ENV: &str = "SCENARIO_MAX_BODY_BYTES";

pub const DEFAULT_MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

const AUTHORIZATION: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Upper bound on the bytes drained from a content body.
    pub max_body_bytes: u64,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AdapterOptions {
    /// Read `SCENARIO_MAX_BODY_BYTES`, keeping the default when it is unset
    /// or not a number.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_BODY_BYTES_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        value
            .and_then(|raw| raw.trim().parse().ok())
            .map(|max_body_bytes| Self { max_body_bytes })
            .unwrap_or_default()
    }
}

/// Adapts request descriptors onto scenario builders.
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    options: AdapterOptions,
}

impl RequestAdapter {
    pub fn new(options: AdapterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Configure `scenario` from `request` and return the continuation
    /// produced when the URL was set.
    pub fn adapt<'s, B>(
        &self,
        scenario: &'s mut B,
        request: impl Into<Option<RequestDescriptor>>,
    ) -> Result<B::Continuation<'s>, AdaptError>
    where
        B: ScenarioBuilder,
    {
        let request = request.into().ok_or(AdaptError::MissingDescriptor)?;
        let uri = request
            .uri
            .as_ref()
            .ok_or_else(|| AdaptError::InvalidDescriptor {
                reason: "request descriptor must have a URI".to_string(),
            })?;
        let method = HttpMethod::parse(&request.method)?;
        let url = relative_url(uri);

        tracing::debug!(method = %method, url = %url, "adapting request descriptor");
        let mut continuation = entry_point(scenario, method).url(&url);

        apply_message_headers(&mut continuation, &request.headers);

        if let Some(content) = request.content {
            materialize_content(&mut continuation, content, self.options.max_body_bytes)?;
        }

        Ok(continuation)
    }
}

/// Adapt `request` onto `scenario` with default options.
pub fn from_request<'s, B>(
    scenario: &'s mut B,
    request: impl Into<Option<RequestDescriptor>>,
) -> Result<B::Continuation<'s>, AdaptError>
where
    B: ScenarioBuilder,
{
    RequestAdapter::default().adapt(scenario, request)
}

fn entry_point<B: ScenarioBuilder>(scenario: &mut B, method: HttpMethod) -> B::Url<'_> {
    match method {
        HttpMethod::Get => scenario.get(),
        HttpMethod::Post => scenario.post(),
        HttpMethod::Put => scenario.put(),
        HttpMethod::Delete => scenario.delete(),
        HttpMethod::Patch => scenario.patch(),
        HttpMethod::Head => scenario.head(),
    }
}

/// Path and query of an absolute URI, or the literal form of a relative one.
fn relative_url(uri: &Uri) -> String {
    if uri.scheme().is_none() {
        return uri.to_string();
    }
    match uri.query() {
        Some(query) => format!("{}?{query}", uri.path()),
        None => uri.path().to_string(),
    }
}

fn apply_message_headers<C: RequestContinuation>(continuation: &mut C, headers: &Headers) {
    for (name, values) in headers.iter() {
        let value = values.join(HEADER_VALUE_SEPARATOR);
        match bearer_token(name, &value) {
            Some(token) => {
                tracing::trace!("applying bearer token");
                continuation.bearer_token(token);
            }
            None => {
                tracing::trace!(header = name, "applying message header");
                continuation.header(name, &value);
            }
        }
    }
}

fn bearer_token<'v>(name: &str, value: &'v str) -> Option<&'v str> {
    if !name.eq_ignore_ascii_case(AUTHORIZATION) {
        return None;
    }
    let prefix = value.get(..BEARER_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| &value[BEARER_PREFIX.len()..])
}

fn materialize_content<C: RequestContinuation>(
    continuation: &mut C,
    content: Content,
    max_body_bytes: u64,
) -> Result<(), AdaptError> {
    let (body, headers) = content.into_parts();
    let bytes = drain(body, max_body_bytes).map_err(AdaptError::ContentRead)?;

    if let Some(content_type) = headers.get_joined(CONTENT_TYPE) {
        continuation.header(CONTENT_TYPE, &content_type);
    }
    for (name, values) in headers.iter() {
        if name.eq_ignore_ascii_case(CONTENT_TYPE) {
            continue;
        }
        tracing::trace!(header = name, "applying content header");
        continuation.header(name, &values.join(HEADER_VALUE_SEPARATOR));
    }

    tracing::debug!(bytes = bytes.len(), "applying request body");
    continuation.body(bytes);
    Ok(())
}

/// Read the whole body, refusing anything past `limit` bytes. The reader is
/// dropped before returning.
fn drain(body: Box<dyn Read + Send>, limit: u64) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    body.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("content body exceeds {limit} bytes"),
        ));
    }
    Ok(bytes)
}
