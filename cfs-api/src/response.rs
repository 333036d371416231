//! Success-classified response bodies.
//!
//! A [`ResponseBody`] is what the classifier hands to the parser: the fully
//! read body bytes plus the single JSON decode attempted during
//! classification. Nothing downstream reads the wire again.

use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;

use cfs_core::error::{CfsError, CfsResult};

/// Outcome of decoding a body as JSON.
#[derive(Debug)]
pub(crate) enum Payload {
    Empty,
    Json(Value),
    Malformed(CfsError),
}

impl Payload {
    pub(crate) fn decode(raw: &[u8]) -> Self {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Payload::Empty;
        }
        match serde_json::from_slice(raw) {
            Ok(value) => Payload::Json(value),
            Err(e) => Payload::Malformed(e.into()),
        }
    }
}

/// Body of a response classified as success.
#[derive(Debug)]
pub struct ResponseBody {
    status: StatusCode,
    raw: Bytes,
    payload: Payload,
}

impl ResponseBody {
    pub(crate) fn new(status: StatusCode, raw: Bytes, payload: Payload) -> Self {
        Self {
            status,
            raw,
            payload,
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body bytes as received.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Whether the body was empty (e.g. a HEAD response).
    pub fn is_empty(&self) -> bool {
        matches!(self.payload, Payload::Empty)
    }

    /// The decoded JSON value, if the body was valid JSON.
    pub fn json(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Take the decoded JSON value, failing if the body was empty or malformed.
    pub fn into_json(self) -> CfsResult<Value> {
        match self.payload {
            Payload::Json(value) => Ok(value),
            Payload::Malformed(err) => Err(err),
            Payload::Empty => Err(CfsError::Parse {
                message: "response body is empty".into(),
                line: None,
                column: None,
                fragment: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: &'static str) -> ResponseBody {
        ResponseBody::new(StatusCode::OK, Bytes::from(raw), Payload::decode(raw.as_bytes()))
    }

    #[test]
    fn test_json_body() {
        let body = body(r#"{"success":true}"#);
        assert!(!body.is_empty());
        assert_eq!(body.json().unwrap()["success"], true);
        assert_eq!(body.into_json().unwrap()["success"], true);
    }

    #[test]
    fn test_whitespace_body_is_empty() {
        let body = body(" \n");
        assert!(body.is_empty());
        assert!(body.json().is_none());
        assert!(matches!(body.into_json(), Err(CfsError::Parse { .. })));
    }

    #[test]
    fn test_malformed_body_keeps_position() {
        let body = body("{\"success\": tru");
        assert!(body.json().is_none());
        assert_eq!(body.raw(), b"{\"success\": tru");
        match body.into_json() {
            Err(CfsError::Parse { line, column, .. }) => {
                assert_eq!(line, Some(1));
                assert!(column.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
