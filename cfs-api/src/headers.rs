//! Header injection and request body encoding.

use std::collections::{BTreeMap, HashMap};

use cfs_core::constants::{self, content_type};
use cfs_core::Credential;

/// Headers attached to every request made with `credential`.
///
/// `Content-Type` is only set when a form body is written.
pub fn request_headers(credential: &Credential, has_body: bool) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Authorization".to_string(), credential.authorization_value()),
        ("Accept".to_string(), content_type::JSON.to_string()),
        ("User-Agent".to_string(), constants::user_agent()),
    ];
    if has_body {
        headers.push(("Content-Type".to_string(), content_type::FORM.to_string()));
    }
    headers
}

/// Serialize key/value pairs as an `application/x-www-form-urlencoded` body.
///
/// Keys are emitted in sorted order.
pub fn form_body(pairs: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
