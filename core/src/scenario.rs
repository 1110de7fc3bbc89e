//! The contract a scenario builder offers to the adapter.
//!
//! A builder exposes one entry point per verb. The entry point borrows the
//! builder, takes the relative URL, and hands back a continuation against
//! which headers, bearer tokens and the body are configured.

/// A fluent, in-process request scenario under construction.
pub trait ScenarioBuilder {
    type Url<'s>: UrlConfigurator<Continuation = Self::Continuation<'s>>
    where
        Self: 's;

    type Continuation<'s>: RequestContinuation
    where
        Self: 's;

    fn get(&mut self) -> Self::Url<'_>;
    fn post(&mut self) -> Self::Url<'_>;
    fn put(&mut self) -> Self::Url<'_>;
    fn delete(&mut self) -> Self::Url<'_>;
    fn patch(&mut self) -> Self::Url<'_>;
    fn head(&mut self) -> Self::Url<'_>;
}

/// Verb selected, waiting for the URL.
pub trait UrlConfigurator {
    type Continuation: RequestContinuation;

    fn url(self, relative_url: &str) -> Self::Continuation;
}

/// Verb and URL set; the rest of the request is configured here.
pub trait RequestContinuation {
    fn header(&mut self, name: &str, value: &str);

    /// Configure bearer authentication, distinct from a raw
    /// `Authorization` header.
    fn bearer_token(&mut self, token: &str);

    fn body(&mut self, bytes: Vec<u8>);
}
