//! Turning raw response bodies into domain values.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Decode a success body, naming `endpoint` on mismatch.
pub fn decode_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(endpoint, e.to_string()))
}

/// Best-effort human detail from an error body.
///
/// The backend reports errors as `{"detail": "..."}`; validation failures
/// carry a list of `{"msg": ...}` objects instead. Anything else is passed
/// through trimmed.
pub fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sweepstake;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(error_detail(r#"{"detail": "Sweepstake not found"}"#), "Sweepstake not found");
        assert_eq!(
            error_detail(
                r#"{"detail": [{"loc": ["body", "participant_names"], "msg": "too short"}, {"msg": "bad method"}]}"#
            ),
            "too short; bad method"
        );
        assert_eq!(error_detail("  Internal Server Error\n"), "Internal Server Error");
        assert_eq!(error_detail(""), "");
    }

    #[test]
    fn test_decode_names_endpoint() {
        let err = decode_body::<Sweepstake>("GET /api/sweepstakes/abc", r#"{"id": "abc"}"#)
            .unwrap_err();
        match err {
            Error::Decode { endpoint, .. } => assert_eq!(endpoint, "GET /api/sweepstakes/abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
