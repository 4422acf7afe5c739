//! Error types for the superhero API client.
//!
//! # Design
//! Two layers. `DecodeError` describes why a response body did not match the
//! wire schema and is produced by the pure decoder. `ApiError` is what every
//! fetch or parse call returns; it wraps `DecodeError` and adds the transport,
//! status and configuration failures. Every variant is terminal for the call
//! that produced it: nothing in this crate retries.

use thiserror::Error;

/// Errors returned by `HeroClient` parse methods and `HeroFetcher` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The round trip itself failed: DNS, connection refused, timeout.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. The body is kept as-is
    /// for debugging and is never decoded.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx body that does not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Missing or invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True for a 404 answer from the server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

/// Why a payload could not be decoded. A decode failure discards the whole
/// payload; there is no per-field salvage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A mandatory field (`id`, `name`, `image.url`, `response`, `results`)
    /// was absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field was present with the wrong JSON type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The body is not valid JSON.
    #[error("malformed JSON: {0}")]
    Syntax(String),

    /// The provider reported a failure in-band (`"response": "error"`).
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => {
                let msg = err.to_string();
                match missing_field_name(&msg) {
                    Some(field) => DecodeError::MissingField(field.to_string()),
                    None => DecodeError::TypeMismatch(msg),
                }
            }
            Category::Syntax | Category::Eof | Category::Io => DecodeError::Syntax(err.to_string()),
        }
    }
}

/// Extract `id` from serde's "missing field `id` at line 1 column 9".
fn missing_field_name(msg: &str) -> Option<&str> {
    let rest = msg.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Probe {
        id: String,
        count: u32,
    }

    #[test]
    fn missing_field_is_classified_with_its_name() {
        let err = serde_json::from_str::<Probe>(r#"{"count":1}"#).unwrap_err();
        assert_eq!(DecodeError::from(err), DecodeError::MissingField("id".to_string()));
    }

    #[test]
    fn wrong_type_is_a_type_mismatch() {
        let err = serde_json::from_str::<Probe>(r#"{"id":"1","count":"many"}"#).unwrap_err();
        assert!(matches!(DecodeError::from(err), DecodeError::TypeMismatch(_)));
    }

    #[test]
    fn truncated_body_is_a_syntax_error() {
        let err = serde_json::from_str::<Probe>(r#"{"id":"1""#).unwrap_err();
        assert!(matches!(DecodeError::from(err), DecodeError::Syntax(_)));
    }

    #[test]
    fn not_found_only_matches_404() {
        let not_found = ApiError::Http {
            status: 404,
            body: "{}".to_string(),
        };
        let server = ApiError::Http {
            status: 500,
            body: String::new(),
        };
        assert!(not_found.is_not_found());
        assert!(!server.is_not_found());
        assert!(!ApiError::Transport("refused".to_string()).is_not_found());
    }
}
