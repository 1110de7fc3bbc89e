//! Request descriptors handed to the adapter.
//!
//! # Design
//! A `RequestDescriptor` is plain data with public fields, in the same spirit
//! as an `http::Request` that has not been sent anywhere. Headers that
//! describe the body travel with the `Content` rather than with the request,
//! so the adapter can apply them after the message headers and only when a
//! body exists.
//!
//! The body is kept as a reader so that descriptors built from streams,
//! files or failing sources behave like the real thing. It is drained once,
//! by the adapter.

use std::fmt;
use std::io::{Cursor, Read};

use http::Uri;
use serde::Serialize;

use crate::http::Headers;

/// Names treated as content headers when a descriptor is built from an
/// `http::Request`.
pub const CONTENT_HEADER_NAMES: &[&str] = &[
    "Allow",
    "Content-Disposition",
    "Content-Encoding",
    "Content-Language",
    "Content-Length",
    "Content-Location",
    "Content-MD5",
    "Content-Range",
    "Content-Type",
    "Expires",
    "Last-Modified",
];

pub const CONTENT_TYPE: &str = "Content-Type";

pub fn is_content_header(name: &str) -> bool {
    CONTENT_HEADER_NAMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// A request body and the headers describing it.
pub struct Content {
    body: Box<dyn Read + Send>,
    headers: Headers,
}

impl Content {
    /// Content backed by an arbitrary reader, with no content headers.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            body: Box::new(reader),
            headers: Headers::new(),
        }
    }

    /// Raw bytes with no content type.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(bytes.into()))
    }

    /// UTF-8 text, `text/plain; charset=utf-8`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::string(text, mime::TEXT_PLAIN)
    }

    /// UTF-8 text with the given media type. A `charset=utf-8` parameter is
    /// added unless the media type already names a charset.
    pub fn string(text: impl Into<String>, media_type: mime::Mime) -> Self {
        let content_type = with_utf8_charset(&media_type);
        let mut content = Self::bytes(text.into().into_bytes());
        content.headers.insert(CONTENT_TYPE, content_type);
        content
    }

    /// `value` serialized as JSON, `application/json; charset=utf-8`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::string(body, mime::APPLICATION_JSON))
    }

    /// Replace the content type.
    pub fn with_content_type(mut self, media_type: mime::Mime) -> Self {
        self.headers.insert(CONTENT_TYPE, media_type.to_string());
        self
    }

    /// Append a content header such as `Content-Language`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The rendered content type, if one is set.
    pub fn content_type(&self) -> Option<String> {
        self.headers.get_joined(CONTENT_TYPE)
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Read + Send>, Headers) {
        (self.body, self.headers)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn with_utf8_charset(media_type: &mime::Mime) -> String {
    if media_type.get_param(mime::CHARSET).is_some() {
        media_type.to_string()
    } else {
        format!("{media_type}; charset=utf-8")
    }
}

/// A request described as plain data, ready to be adapted onto a scenario.
#[derive(Debug)]
pub struct RequestDescriptor {
    pub method: String,
    pub uri: Option<Uri>,
    pub headers: Headers,
    pub content: Option<Content>,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, uri: Uri) -> Self {
        Self {
            method: method.into(),
            uri: Some(uri),
            headers: Headers::new(),
            content: None,
        }
    }

    /// Append a message header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }
}

/// Split an `http::Request` into message headers and content.
///
/// Content is attached when the body is non-empty or when any content
/// header is present, so an empty body with `Content-Type` still carries
/// its type through.
impl<B> From<http::Request<B>> for RequestDescriptor
where
    B: Into<Vec<u8>>,
{
    fn from(request: http::Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        let body: Vec<u8> = body.into();

        let mut headers = Headers::new();
        let mut content_headers = Headers::new();
        for (name, value) in &parts.headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            if is_content_header(name.as_str()) {
                content_headers.append(canonical_name(name.as_str()), value);
            } else {
                headers.append(name.as_str(), value);
            }
        }

        let content = if body.is_empty() && content_headers.is_empty() {
            None
        } else {
            let mut content = Content::bytes(body);
            *content.headers_mut() = content_headers;
            Some(content)
        };

        Self {
            method: parts.method.as_str().to_string(),
            uri: Some(parts.uri),
            headers,
            content,
        }
    }
}

/// `http` lower-cases header names; content headers get their registered
/// spelling back.
fn canonical_name(name: &str) -> &str {
    CONTENT_HEADER_NAMES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(name))
        .copied()
        .unwrap_or(name)
}
