//! Adapt plain request descriptors onto in-process scenario builders.
//!
//! # Overview
//! A `RequestDescriptor` (method, URI, headers, optional content) built
//! anywhere, for instance from an `http::Request`, is replayed against a
//! `ScenarioBuilder` so the resulting scenario is the same one the builder's
//! own fluent API would have produced.
//!
//! # Design
//! - The builder is a trait seam: hosts implement `ScenarioBuilder`,
//!   `UrlConfigurator` and `RequestContinuation`; this crate never executes a
//!   request.
//! - `HttpMethod` is a closed enum, so verb dispatch is an exhaustive match.
//! - Bodies are drained synchronously and bounded by `AdapterOptions`.
//! - `RecordingScenario` implements the builder contract by recording calls,
//!   which is how adaptations are inspected in tests.

pub mod adapter;
pub mod error;
pub mod http;
pub mod recording;
pub mod request;
pub mod scenario;

pub use adapter::{from_request, AdapterOptions, RequestAdapter};
pub use error::AdaptError;
pub use crate::http::{Headers, HttpMethod};
pub use recording::{BuilderCall, RecordingScenario};
pub use request::{Content, RequestDescriptor};
pub use scenario::{RequestContinuation, ScenarioBuilder, UrlConfigurator};
