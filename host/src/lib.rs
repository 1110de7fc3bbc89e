//! In-process scenario host built on axum.
//!
//! # Overview
//! A `Host` wraps an `axum::Router`. Each call to `Host::scenario` configures
//! a `Scenario` (by hand or from a `RequestDescriptor`), drives the router
//! with `tower::ServiceExt::oneshot`, and checks the response against the
//! scenario's expectations. No socket is opened.
//!
//! # Design
//! - `Scenario` implements `scenario_core::ScenarioBuilder`, which is what
//!   lets the adapter configure it.
//! - Configuration is synchronous; only execution is async.
//! - Adapter options (the body size bound) live on the `Host` and are
//!   handed to every scenario it creates.

pub mod error;
pub mod host;
pub mod scenario;

pub use error::{ScenarioAssertionError, ScenarioError};
pub use host::{Host, ScenarioResult};
pub use scenario::{Scenario, SendExpression, UrlExpression};
