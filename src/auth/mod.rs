// src/auth/mod.rs

//! Request authentication: replay window plus HMAC signature.
//!
//! Checks run as a sequential gate and the first failing stage decides the
//! rejection:
//!
//! 1. `x-timestamp` present
//! 2. `x-timestamp` is a non-negative decimal integer
//! 3. timestamp not more than [`TIME_WINDOW`] seconds ahead of now (and,
//!    when configured, not more than `max_request_age` seconds behind)
//! 4. `x-signature` present
//! 5. `x-signature == hex(HMAC-SHA256(secret, body || x-timestamp))`
//!
//! The error messages are stable; the HTTP layer forwards them verbatim.

pub mod request;
pub mod signature;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::debug;

pub use request::{AuthenticatedRequest, Headers};
pub use signature::{compute_signature, verify_signature};

/// Maximum number of seconds a timestamp may lie in the future.
pub const TIME_WINDOW: i64 = 300;

pub const TIMESTAMP_HEADER: &str = "x-timestamp";
pub const SIGNATURE_HEADER: &str = "x-signature";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("missing x-timestamp in header")]
    MissingTimestamp,

    #[error("expected x-timestamp to be epoch int")]
    MalformedTimestamp,

    #[error("Request is too old or too far in the future")]
    OutsideWindow,

    #[error("missing x-signature in header")]
    MissingSignature,

    #[error("invalid signature")]
    InvalidSignature,
}

/// Verifies trigger requests against one shared secret.
///
/// The secret is injected at construction and never leaves this struct;
/// `Debug` output redacts it.
pub struct RequestAuthenticator {
    secret: SecretString,
    max_request_age: Option<u64>,
}

impl fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("secret", &"[REDACTED]")
            .field("max_request_age", &self.max_request_age)
            .finish()
    }
}

impl RequestAuthenticator {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            max_request_age: None,
        }
    }

    /// Also reject timestamps more than `max_age` seconds in the past.
    ///
    /// `None` (the default) only bounds how far into the future a timestamp
    /// may be.
    pub fn with_max_request_age(mut self, max_age: Option<u64>) -> Self {
        self.max_request_age = max_age;
        self
    }

    /// Run the full gate against the current wall clock.
    pub fn authenticate(&self, headers: &Headers, body: &[u8]) -> Result<(), AuthenticationError> {
        self.authenticate_at(headers, body, unix_now())
    }

    /// Run the full gate as if the current time were `now` (unix seconds).
    pub fn authenticate_at(
        &self,
        headers: &Headers,
        body: &[u8],
        now: u64,
    ) -> Result<(), AuthenticationError> {
        let timestamp = self.validate_timestamp(headers, now)?;
        self.validate_signature(headers, body, timestamp)?;
        debug!("request signature verified");
        Ok(())
    }

    /// Stages 1-3. Returns the raw timestamp text, which is part of the
    /// signed message.
    pub fn validate_timestamp<'h>(
        &self,
        headers: &'h Headers,
        now: u64,
    ) -> Result<&'h str, AuthenticationError> {
        let raw = header_value(headers, TIMESTAMP_HEADER)
            .ok_or(AuthenticationError::MissingTimestamp)?;

        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthenticationError::MalformedTimestamp);
        }

        // All digits but beyond u64: certainly outside any window.
        let timestamp: u64 = raw
            .parse()
            .map_err(|_| AuthenticationError::OutsideWindow)?;

        let delta = i128::from(timestamp) - i128::from(now);
        if delta > i128::from(TIME_WINDOW) {
            debug!(timestamp, now, "timestamp too far in the future");
            return Err(AuthenticationError::OutsideWindow);
        }
        if let Some(max_age) = self.max_request_age {
            if -delta > i128::from(max_age) {
                debug!(timestamp, now, max_age, "timestamp too old");
                return Err(AuthenticationError::OutsideWindow);
            }
        }

        Ok(raw)
    }

    /// Stages 4-5.
    pub fn validate_signature(
        &self,
        headers: &Headers,
        body: &[u8],
        timestamp: &str,
    ) -> Result<(), AuthenticationError> {
        let supplied = header_value(headers, SIGNATURE_HEADER)
            .ok_or(AuthenticationError::MissingSignature)?;

        let secret = self.secret.expose_secret().as_bytes();
        if verify_signature(secret, body, timestamp, supplied) {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidSignature)
        }
    }
}

/// Present and non-empty.
fn header_value<'h>(headers: &'h Headers, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "1111111111111111";
    const NOW: u64 = 1_700_000_000;

    fn authenticator() -> RequestAuthenticator {
        RequestAuthenticator::new(SecretString::from(SECRET.to_string()))
    }

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn signed(body: &[u8], ts: &str) -> Headers {
        let sig = compute_signature(SECRET.as_bytes(), body, ts);
        headers(&[("x-timestamp", ts), ("x-signature", sig.as_str())])
    }

    #[test]
    fn valid_request_passes() {
        let body = br#"{"container_name":"web"}"#;
        let h = signed(body, &NOW.to_string());
        assert_eq!(authenticator().authenticate_at(&h, body, NOW), Ok(()));
    }

    #[test]
    fn missing_timestamp_wins_over_everything_else() {
        let h = headers(&[("x-signature", "deadbeef")]);
        assert_eq!(
            authenticator().authenticate_at(&h, b"anything", NOW),
            Err(AuthenticationError::MissingTimestamp)
        );
        let empty = headers(&[("x-timestamp", "")]);
        assert_eq!(
            authenticator().authenticate_at(&empty, b"", NOW),
            Err(AuthenticationError::MissingTimestamp)
        );
    }

    #[test]
    fn non_numeric_timestamp_is_malformed() {
        for bad in ["invalid-timestamp", "-5", "12.5", " 17", "1e9"] {
            let h = headers(&[("x-timestamp", bad)]);
            assert_eq!(
                authenticator().validate_timestamp(&h, NOW),
                Err(AuthenticationError::MalformedTimestamp),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn window_boundary_is_inclusive_at_300() {
        let auth = authenticator();
        let at = |offset: u64| headers(&[("x-timestamp", (NOW + offset).to_string().as_str())]);
        assert!(auth.validate_timestamp(&at(300), NOW).is_ok());
        assert_eq!(
            auth.validate_timestamp(&at(301), NOW),
            Err(AuthenticationError::OutsideWindow)
        );
        assert_eq!(
            auth.validate_timestamp(&at(1000), NOW),
            Err(AuthenticationError::OutsideWindow)
        );
    }

    #[test]
    fn past_timestamps_pass_without_max_age() {
        let h = headers(&[("x-timestamp", "0")]);
        assert!(authenticator().validate_timestamp(&h, NOW).is_ok());
    }

    #[test]
    fn max_age_bounds_the_past() {
        let auth = authenticator().with_max_request_age(Some(600));
        let at = |ts: u64| headers(&[("x-timestamp", ts.to_string().as_str())]);
        assert!(auth.validate_timestamp(&at(NOW - 600), NOW).is_ok());
        assert_eq!(
            auth.validate_timestamp(&at(NOW - 601), NOW),
            Err(AuthenticationError::OutsideWindow)
        );
    }

    #[test]
    fn overflowing_timestamp_is_outside_window() {
        let h = headers(&[("x-timestamp", "99999999999999999999999")]);
        assert_eq!(
            authenticator().validate_timestamp(&h, NOW),
            Err(AuthenticationError::OutsideWindow)
        );
    }

    #[test]
    fn missing_and_invalid_signature() {
        let ts = NOW.to_string();
        let h = headers(&[("x-timestamp", ts.as_str())]);
        assert_eq!(
            authenticator().authenticate_at(&h, b"test body", NOW),
            Err(AuthenticationError::MissingSignature)
        );

        let h = headers(&[("x-timestamp", ts.as_str()), ("x-signature", "invalid-signature")]);
        assert_eq!(
            authenticator().authenticate_at(&h, b"test body", NOW),
            Err(AuthenticationError::InvalidSignature)
        );
    }

    #[test]
    fn signature_is_bound_to_body_and_timestamp() {
        let ts = NOW.to_string();
        let h = signed(b"test body", &ts);
        assert_eq!(
            authenticator().authenticate_at(&h, b"other body", NOW),
            Err(AuthenticationError::InvalidSignature)
        );

        let mut replayed = h.clone();
        replayed.insert("x-timestamp".into(), (NOW + 1).to_string());
        assert_eq!(
            authenticator().authenticate_at(&replayed, b"test body", NOW),
            Err(AuthenticationError::InvalidSignature)
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", authenticator());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("REDACTED"));
    }
}
