//! Request URL construction.
//!
//! Composes `<origin>/<api version>/<method>[/<sub-method>][?query]` from a
//! credential's endpoint. Pure: no network access and no state.

use url::Url;

use cfs_core::constants::API_VERSION;
use cfs_core::error::{CfsError, CfsResult};
use cfs_core::Credential;

/// Build the fully-qualified URL for an API method.
///
/// Path segments are trimmed of surrounding slashes and percent-encoded.
/// Query values are form-url-encoded in the order given. Auth material is
/// never placed in the URL; see [`crate::headers`].
pub fn build_request_url(
    credential: &Credential,
    primary: &str,
    secondary: Option<&str>,
    params: &[(&str, &str)],
) -> CfsResult<Url> {
    let primary = clean_segment(primary)
        .ok_or_else(|| CfsError::InvalidEndpoint("primary method segment is empty".into()))?;
    let secondary = match secondary {
        Some(segment) => Some(clean_segment(segment).ok_or_else(|| {
            CfsError::InvalidEndpoint("secondary method segment is empty".into())
        })?),
        None => None,
    };
    if params.iter().any(|(key, _)| key.is_empty()) {
        return Err(CfsError::InvalidEndpoint("query parameter with empty name".into()));
    }

    let base = credential.base_url();
    let mut url = Url::parse(base)
        .map_err(|e| CfsError::InvalidEndpoint(format!("{base}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CfsError::InvalidEndpoint(format!("{base}: not an http(s) origin")));
    }

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CfsError::InvalidEndpoint(format!("{base}: cannot be a base URL")))?;
        segments.pop_if_empty().push(API_VERSION).push(primary);
        if let Some(secondary) = secondary {
            segments.push(secondary);
        }
    }

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter().copied());
    }

    Ok(url)
}

fn clean_segment(segment: &str) -> Option<&str> {
    let trimmed = segment.trim().trim_matches('/');
    (!trimmed.is_empty()).then_some(trimmed)
}
