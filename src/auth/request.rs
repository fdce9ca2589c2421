// src/auth/request.rs

use std::collections::HashMap;

/// Header names (lowercased) mapped to their values.
pub type Headers = HashMap<String, String>;

/// Everything the pipeline needs from one inbound trigger.
///
/// Built per request by the HTTP layer and dropped once the trigger has been
/// validated.
#[derive(Debug, Clone, Default)]
pub struct AuthenticatedRequest {
    pub raw_body: Vec<u8>,
    pub headers: Headers,
    pub declared_container_name: Option<String>,
}

impl AuthenticatedRequest {
    pub fn new(raw_body: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_body: raw_body.into(),
            ..Self::default()
        }
    }

    /// Add a header; the name is lowercased. A repeated header keeps the
    /// value it was first seen with.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }

    /// Collect `(name, value)` pairs in order via [`header`](Self::header).
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |req, (name, value)| req.header(name.as_ref(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let req = AuthenticatedRequest::new(b"{}".to_vec())
            .with_headers([("X-Timestamp", "1"), ("X-SIGNATURE", "ab")]);
        assert_eq!(req.headers.get("x-timestamp").map(String::as_str), Some("1"));
        assert_eq!(req.headers.get("x-signature").map(String::as_str), Some("ab"));
    }

    #[test]
    fn first_occurrence_of_a_repeated_header_wins() {
        let req = AuthenticatedRequest::new(Vec::new()).with_headers([
            ("x-timestamp", "1700000000"),
            ("X-Timestamp", "garbage"),
            ("x-timestamp", "1"),
        ]);
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.headers.get("x-timestamp").map(String::as_str),
            Some("1700000000")
        );
    }
}
