//! JSON parser/mapper for success-classified responses.
//!
//! Two shapes are recognised, optionally wrapped in a `{"result": ...}`
//! object:
//! - profile: `{"account": {...}, "user": {...}}`
//! - general: `{"success": bool, "message": "..."}`
//!
//! Any missing required field or type mismatch fails the whole decode with
//! `CfsError::Parse`; no partially populated value is ever returned.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use cfs_core::constants::MAX_ERROR_FRAGMENT_LEN;
use cfs_core::error::{CfsError, CfsResult};

use crate::models::{Account, GeneralResult, Profile, User};
use crate::response::ResponseBody;

/// Expected shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// Account + user aggregate.
    Profile,
    /// Generic success flag with optional message.
    General,
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Profile(Profile),
    General(GeneralResult),
}

impl Parsed {
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            Parsed::Profile(profile) => Some(profile),
            Parsed::General(_) => None,
        }
    }

    pub fn into_general(self) -> Option<GeneralResult> {
        match self {
            Parsed::General(result) => Some(result),
            Parsed::Profile(_) => None,
        }
    }
}

/// Decode a success body into the requested shape.
pub fn parse(body: ResponseBody, shape: ResultShape) -> CfsResult<Parsed> {
    map_value(body.into_json()?, shape)
}

pub fn parse_profile(body: ResponseBody) -> CfsResult<Profile> {
    parse(body, ResultShape::Profile)?
        .into_profile()
        .ok_or_else(|| shape_mismatch(ResultShape::Profile))
}

pub fn parse_general(body: ResponseBody) -> CfsResult<GeneralResult> {
    parse(body, ResultShape::General)?
        .into_general()
        .ok_or_else(|| shape_mismatch(ResultShape::General))
}

/// Decode raw JSON bytes as a profile.
pub fn decode_profile(bytes: &[u8]) -> CfsResult<Profile> {
    map_value(serde_json::from_slice(bytes)?, ResultShape::Profile)?
        .into_profile()
        .ok_or_else(|| shape_mismatch(ResultShape::Profile))
}

/// Decode raw JSON bytes as a general result.
pub fn decode_general(bytes: &[u8]) -> CfsResult<GeneralResult> {
    map_value(serde_json::from_slice(bytes)?, ResultShape::General)?
        .into_general()
        .ok_or_else(|| shape_mismatch(ResultShape::General))
}

fn shape_mismatch(shape: ResultShape) -> CfsError {
    CfsError::Parse {
        message: format!("decoded value does not have the {shape:?} shape"),
        line: None,
        column: None,
        fragment: None,
    }
}

fn map_value(value: Value, shape: ResultShape) -> CfsResult<Parsed> {
    match shape {
        ResultShape::Profile => map_profile(value).map(Parsed::Profile),
        ResultShape::General => map_general(value).map(Parsed::General),
    }
}

fn map_profile(value: Value) -> CfsResult<Profile> {
    let mut payload = payload(value)?;
    let account = take_object(&mut payload, "account")?;
    let user = take_object(&mut payload, "user")?;

    let account: Account = typed("account", &account)?;
    let user: User = typed("user", &user)?;
    Ok(Profile::new(account, user))
}

fn map_general(value: Value) -> CfsResult<GeneralResult> {
    let payload = Value::Object(payload(value)?);
    if !payload.get("success").is_some_and(Value::is_boolean) {
        return Err(CfsError::parse_fragment(
            "expected a boolean \"success\" field",
            fragment(&payload),
        ));
    }
    typed("result", &payload)
}

/// The object carrying the data: `result` when present, else the top level.
fn payload(value: Value) -> CfsResult<Map<String, Value>> {
    match value {
        Value::Object(mut map) => match map.remove("result") {
            Some(Value::Object(inner)) => Ok(inner),
            Some(other) => {
                map.insert("result".into(), other);
                Ok(map)
            }
            None => Ok(map),
        },
        other => Err(CfsError::parse_fragment(
            "expected a JSON object",
            fragment(&other),
        )),
    }
}

fn take_object(payload: &mut Map<String, Value>, key: &str) -> CfsResult<Value> {
    match payload.remove(key) {
        Some(value @ Value::Object(_)) => Ok(value),
        Some(other) => Err(CfsError::parse_fragment(
            format!("\"{key}\" is not an object"),
            fragment(&other),
        )),
        None => Err(CfsError::parse_fragment(
            format!("missing \"{key}\" object"),
            fragment(&Value::Object(payload.clone())),
        )),
    }
}

fn typed<T: DeserializeOwned>(what: &str, value: &Value) -> CfsResult<T> {
    T::deserialize(value)
        .map_err(|e| CfsError::parse_fragment(format!("invalid {what}: {e}"), fragment(value)))
}

/// Compact JSON text of `value`, truncated for error reporting.
fn fragment(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= MAX_ERROR_FRAGMENT_LEN {
        return text;
    }
    let mut truncated: String = text.chars().take(MAX_ERROR_FRAGMENT_LEN).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::transport::ResponseEnvelope;

    const PROFILE: &str = r#"{
        "account": {
            "id": "acct-42",
            "storage_usage": 1024,
            "storage_limit": 10737418240,
            "over_storage_limit": false,
            "state_id": "active",
            "state_display_name": "Active",
            "plan_id": "free",
            "plan_display_name": "Free",
            "locale": "en"
        },
        "user": {
            "id": "user-7",
            "username": "ada",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "created_at": 1380000000000,
            "last_login": 1380000500000
        }
    }"#;

    #[test]
    fn test_profile_fields() {
        let profile = decode_profile(PROFILE.as_bytes()).unwrap();
        let account = profile.account_data();
        assert_eq!(account.id, "acct-42");
        assert_eq!(account.storage_usage, 1024);
        assert_eq!(account.storage_limit, Some(10_737_418_240));
        assert_eq!(account.plan_display_name.as_deref(), Some("Free"));

        let user = profile.user_data();
        assert_eq!(user.id, "user-7");
        assert_eq!(user.username, "ada");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.last_login, Some(1_380_000_500_000));
    }

    #[test]
    fn test_profile_parse_is_idempotent() {
        let first = decode_profile(PROFILE.as_bytes()).unwrap();
        let second = decode_profile(PROFILE.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_profile_in_result_wrapper() {
        let wrapped = format!(r#"{{"result": {PROFILE}, "error": null}}"#);
        let profile = decode_profile(wrapped.as_bytes()).unwrap();
        assert_eq!(profile, decode_profile(PROFILE.as_bytes()).unwrap());
    }

    #[test]
    fn test_minimal_profile_uses_defaults() {
        let profile = decode_profile(
            br#"{"account":{"id":"a","storage_usage":0},"user":{"id":"u","username":"n"}}"#,
        )
        .unwrap();
        assert!(profile.account_data().storage_limit.is_none());
        assert!(!profile.account_data().over_storage_limit);
        assert!(profile.user_data().email.is_none());
    }

    #[test]
    fn test_missing_user_is_parse_error() {
        let err = decode_profile(br#"{"account":{"id":"a","storage_usage":0}}"#).unwrap_err();
        match err {
            CfsError::Parse { message, fragment, .. } => {
                assert!(message.contains("user"));
                assert!(fragment.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_account_field_is_parse_error() {
        let err = decode_profile(
            br#"{"account":{"storage_usage":0},"user":{"id":"u","username":"n"}}"#,
        )
        .unwrap_err();
        match err {
            CfsError::Parse { message, fragment, .. } => {
                assert!(message.contains("account"));
                assert_eq!(fragment.as_deref(), Some(r#"{"storage_usage":0}"#));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = decode_profile(
            br#"{"account":{"id":"a","storage_usage":"lots"},"user":{"id":"u","username":"n"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CfsError::Parse { .. }));
    }

    #[test]
    fn test_malformed_json_reports_position() {
        let err = decode_profile(b"{\"account\": {\"id\": ").unwrap_err();
        match err {
            CfsError::Parse { line, column, .. } => {
                assert_eq!(line, Some(1));
                assert!(column.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let err = decode_profile(b"[1, 2, 3]").unwrap_err();
        match err {
            CfsError::Parse { fragment, .. } => assert_eq!(fragment.as_deref(), Some("[1,2,3]")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_general_true_and_false() {
        assert!(decode_general(br#"{"success": true}"#).unwrap().success);
        assert!(!decode_general(br#"{"success": false}"#).unwrap().success);
    }

    #[test]
    fn test_general_echoes_message() {
        let result = decode_general(br#"{"result":{"success":true,"message":"saved"}}"#).unwrap();
        assert_eq!(
            result,
            GeneralResult {
                success: true,
                message: Some("saved".into())
            }
        );
    }

    #[test]
    fn test_general_requires_boolean_success() {
        assert!(matches!(
            decode_general(br#"{"success": "yes"}"#),
            Err(CfsError::Parse { .. })
        ));
        assert!(matches!(
            decode_general(br#"{"message": "hi"}"#),
            Err(CfsError::Parse { .. })
        ));
    }

    fn body(json: &str) -> ResponseBody {
        crate::classify::classify(ResponseEnvelope::from_bytes(StatusCode::OK, json.to_string()))
            .unwrap()
    }

    #[test]
    fn test_parse_selects_profile_shape() {
        match parse(body(PROFILE), ResultShape::Profile).unwrap() {
            Parsed::Profile(profile) => assert_eq!(profile.user_data().username, "ada"),
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_selects_general_shape() {
        let parsed = parse(
            body(r#"{"success":true,"message":"ok"}"#),
            ResultShape::General,
        )
        .unwrap();
        assert_eq!(
            parsed,
            Parsed::General(GeneralResult {
                success: true,
                message: Some("ok".into())
            })
        );
        assert!(parsed.into_profile().is_none());
    }

    #[test]
    fn test_parse_shape_mismatch_is_parse_error() {
        let err = parse(body(r#"{"success":true}"#), ResultShape::Profile).unwrap_err();
        assert!(matches!(err, CfsError::Parse { .. }));

        let err = parse(body(PROFILE), ResultShape::General).unwrap_err();
        assert!(matches!(err, CfsError::Parse { .. }));
    }

    #[test]
    fn test_parse_empty_body_is_parse_error() {
        let err = parse(body(""), ResultShape::General).unwrap_err();
        assert!(matches!(err, CfsError::Parse { .. }));
    }

    #[test]
    fn test_typed_wrappers_match_selector() {
        let profile = parse_profile(body(PROFILE)).unwrap();
        let selected = parse(body(PROFILE), ResultShape::Profile).unwrap();
        assert_eq!(Some(profile), selected.into_profile());

        let general = parse_general(body(r#"{"success":false}"#)).unwrap();
        assert!(!general.success);
    }

    #[test]
    fn test_fragment_is_truncated() {
        let long = Value::String("x".repeat(1000));
        let text = fragment(&long);
        assert_eq!(text.chars().count(), MAX_ERROR_FRAGMENT_LEN + 3);
        assert!(text.ends_with("..."));
    }
}
