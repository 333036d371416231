//! Response classification.
//!
//! Decides whether a response envelope is a success or a server-reported
//! error before any domain parsing happens. The body is read exactly once;
//! its single JSON decode is reused by the parser on success.
//!
//! Error markers, in order:
//! - a JSON object body with a non-null `error` member (any status, 200 included)
//! - a non-2xx status
//!
//! The error envelope is `{"error": {"code": n, "message": s, "data": ...}}`.
//! A bare `{"error": "text"}` is accepted too, with the HTTP status as code.

use std::io::Read;

use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::debug;

use cfs_core::error::{CfsError, CfsResult, ErrorDetail};

use crate::response::{Payload, ResponseBody};
use crate::transport::ResponseEnvelope;

/// Classify a response envelope, consuming it.
///
/// Returns the success body, or the server's error as one of two variants:
/// - `CfsError::Authentication` when the status is 401 or 403, with or
///   without an error envelope
/// - `CfsError::Server` for every other error
///
/// Both carry the same [`ErrorDetail`]. Callers that only match
/// `CfsError::Server` miss credential failures; use [`CfsError::detail`] to
/// read the code and message regardless of variant.
pub fn classify(envelope: ResponseEnvelope) -> CfsResult<ResponseBody> {
    let (status, mut reader) = envelope.into_parts();

    let mut raw = Vec::new();
    let read = reader.read_to_end(&mut raw);
    drop(reader);
    read.map_err(|e| CfsError::Transport(format!("failed to read response body: {e}")))?;

    let payload = Payload::decode(&raw);

    if let Some(detail) = error_marker(status, &payload) {
        debug!(
            "classified error response: status={} code={} message={}",
            status.as_u16(),
            detail.code,
            detail.message
        );
        return Err(wrap(status, detail));
    }

    Ok(ResponseBody::new(status, Bytes::from(raw), payload))
}

/// Extract the error detail a response carries, if any.
fn error_marker(status: StatusCode, payload: &Payload) -> Option<ErrorDetail> {
    let object = match payload {
        Payload::Json(Value::Object(map)) => Some(map),
        _ => None,
    };

    if let Some(detail) = object.and_then(|map| envelope_detail(status, map)) {
        return Some(detail);
    }

    if status.is_success() {
        return None;
    }

    let message = object
        .and_then(|map| map.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| reason(status));
    Some(ErrorDetail::new(i64::from(status.as_u16()), message))
}

/// Decode the `error` member of a JSON object body.
fn envelope_detail(status: StatusCode, map: &Map<String, Value>) -> Option<ErrorDetail> {
    let status_code = i64::from(status.as_u16());

    match map.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Object(error) => {
            let code = error.get("code").and_then(code_value).unwrap_or(status_code);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| reason(status));
            let detail = ErrorDetail::new(code, message);
            match error.get("data") {
                Some(data) if !data.is_null() => Some(detail.with_data(data.clone())),
                _ => Some(detail),
            }
        }
        Value::String(message) => Some(ErrorDetail::new(status_code, message.clone())),
        Value::Number(n) => Some(ErrorDetail::new(
            n.as_i64().unwrap_or(status_code),
            reason(status),
        )),
        _ => Some(ErrorDetail::new(status_code, reason(status))),
    }
}

/// Error codes arrive as numbers or numeric strings.
fn code_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

fn wrap(status: StatusCode, detail: ErrorDetail) -> CfsError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        CfsError::Authentication(detail)
    } else {
        CfsError::Server(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: u16, body: &'static str) -> ResponseEnvelope {
        ResponseEnvelope::from_bytes(StatusCode::from_u16(status).unwrap(), body)
    }

    #[test]
    fn test_success_body_is_passed_through() {
        let body = classify(envelope(200, r#"{"success":true}"#)).unwrap();
        assert_eq!(body.status(), StatusCode::OK);
        assert_eq!(body.json().unwrap()["success"], true);
    }

    #[test]
    fn test_error_envelope_on_200_is_server_error() {
        let err = classify(envelope(200, r#"{"error":{"code":409,"message":"conflict"}}"#))
            .unwrap_err();
        match err {
            CfsError::Server(detail) => {
                assert_eq!(detail.code, 409);
                assert_eq!(detail.message, "conflict");
                assert!(detail.data.is_none());
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_null_error_member_is_success() {
        let body = classify(envelope(200, r#"{"result":{"success":true},"error":null}"#)).unwrap();
        assert!(body.json().is_some());
    }

    #[test]
    fn test_error_envelope_keeps_nested_data() {
        let err = classify(envelope(
            400,
            r#"{"error":{"code":"2002","message":"invalid field","data":{"field":"email"}}}"#,
        ))
        .unwrap_err();
        let detail = err.detail().unwrap();
        assert_eq!(detail.code, 2002);
        assert_eq!(detail.message, "invalid field");
        assert_eq!(detail.data.as_ref().unwrap()["field"], "email");
    }

    #[test]
    fn test_string_error_uses_status_code() {
        let err = classify(envelope(200, r#"{"error":"quota exceeded"}"#)).unwrap_err();
        let detail = err.detail().unwrap();
        assert_eq!(detail.code, 200);
        assert_eq!(detail.message, "quota exceeded");
    }

    #[test]
    fn test_unauthorized_is_authentication_error() {
        let err = classify(envelope(401, r#"{"error":{"code":9000,"message":"token expired"}}"#))
            .unwrap_err();
        match err {
            CfsError::Authentication(detail) => {
                assert_eq!(detail.code, 9000);
                assert_eq!(detail.message, "token expired");
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn test_forbidden_without_envelope_is_authentication_error() {
        let err = classify(envelope(403, "")).unwrap_err();
        assert!(!matches!(err, CfsError::Server(_)));
        assert!(matches!(err, CfsError::Authentication(_)));
        let detail = err.detail().unwrap();
        assert_eq!(detail.code, 403);
        assert_eq!(detail.message, "Forbidden");
    }

    #[test]
    fn test_non_success_status_without_body() {
        let err = classify(envelope(503, "")).unwrap_err();
        match err {
            CfsError::Server(detail) => {
                assert_eq!(detail.code, 503);
                assert_eq!(detail.message, "Service Unavailable");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_success_status_uses_top_level_message() {
        let err = classify(envelope(404, r#"{"message":"no such user"}"#)).unwrap_err();
        let detail = err.detail().unwrap();
        assert_eq!(detail.code, 404);
        assert_eq!(detail.message, "no such user");
    }

    #[test]
    fn test_malformed_success_body_is_left_to_parser() {
        let body = classify(envelope(200, "pong")).unwrap();
        assert!(body.json().is_none());
        assert!(matches!(body.into_json(), Err(CfsError::Parse { .. })));
    }

    #[test]
    fn test_empty_success_body() {
        let body = classify(envelope(200, "")).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_read_failure_is_transport_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
            }
        }
        let err = classify(ResponseEnvelope::new(StatusCode::OK, Broken)).unwrap_err();
        assert!(err.is_transport());
    }
}
