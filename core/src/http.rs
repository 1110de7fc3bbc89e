//! HTTP vocabulary shared by descriptors and builders.
//!
//! # Design
//! `HttpMethod` is a closed set: only the verbs a scenario builder exposes an
//! entry point for can be represented, so every later `match` is exhaustive.
//! `Headers` keeps insertion order because header application order is
//! observable by the builder. Names compare ASCII case-insensitively, the way
//! HTTP treats them, while the first spelling seen is the one handed on.

use std::fmt;

use crate::error::AdaptError;

/// Separator used when several values of one header collapse into one line.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// The verbs a scenario builder has an entry point for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl HttpMethod {
    /// Resolve a method token, ignoring ASCII case.
    ///
    /// Tokens outside the six supported verbs, `OPTIONS` and `TRACE`
    /// included, fail with `AdaptError::UnsupportedMethod` carrying the token
    /// as it was given.
    pub fn parse(token: &str) -> Result<Self, AdaptError> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(AdaptError::UnsupportedMethod {
                method: token.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered header multimap.
///
/// Each distinct name (case-insensitive) occupies one slot holding all of its
/// values, positioned where the name was first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, grouping it with earlier values of the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Replace every value of `name` with `value`, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = vec![value],
            None => self.entries.push((name, vec![value])),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|index| self.entries[index].1.as_slice())
    }

    /// All values of `name` joined with `", "`.
    pub fn get_joined(&self, name: &str) -> Option<String> {
        self.get_all(name)
            .map(|values| values.join(HEADER_VALUE_SEPARATOR))
    }

    /// Iterate `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(HttpMethod::parse("get").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("Patch").unwrap(), HttpMethod::Patch);
        assert_eq!(HttpMethod::parse("HEAD").unwrap(), HttpMethod::Head);
    }

    #[test]
    fn parse_rejects_options_keeping_the_given_token() {
        let err = HttpMethod::parse("options").unwrap_err();
        match err {
            AdaptError::UnsupportedMethod { method } => assert_eq!(method, "options"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_trace_and_extension_methods() {
        assert!(HttpMethod::parse("TRACE").is_err());
        assert!(HttpMethod::parse("PURGE").is_err());
        assert!(HttpMethod::parse("").is_err());
    }

    #[test]
    fn append_groups_values_case_insensitively() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/html");
        headers.append("X-Trace", "1");
        headers.append("accept", "application/json");

        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.get_joined("ACCEPT").as_deref(),
            Some("text/html, application/json")
        );
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Accept", "X-Trace"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut headers: Headers = [("A", "1"), ("B", "2"), ("a", "3")].into_iter().collect();
        headers.insert("b", "4");

        let collected: Vec<(String, Vec<String>)> = headers.into_iter().collect();
        assert_eq!(
            collected,
            vec![
                ("A".to_string(), vec!["1".to_string(), "3".to_string()]),
                ("B".to_string(), vec!["4".to_string()]),
            ]
        );
    }

    #[test]
    fn remove_returns_all_values() {
        let mut headers: Headers = [("Via", "a"), ("via", "b")].into_iter().collect();
        assert_eq!(headers.remove("VIA"), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(headers.is_empty());
        assert!(headers.remove("Via").is_none());
    }
}
