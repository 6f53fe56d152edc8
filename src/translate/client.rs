//! Core `Translator` trait and the HTTP implementation.
//!
//! `HttpTranslator` issues a GET against a gtx-style translation endpoint.
//! All connection details (`base_url`, `client`, `timeout_secs`) come from
//! [`TranslationConfig`]; nothing is hardcoded.
//!
//! The endpoint's response body is a loosely-typed JSON array: `body[0]` is
//! an ordered sequence of fragment arrays and each fragment's element `[0]`
//! is a text segment.  The full translation is the in-order concatenation of
//! the segments — see [`concat_fragments`].

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranslationConfig;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("Translation request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("Translation request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("Translation endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected nested-array structure.
    #[error("Failed to parse translation response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for text translation between two translation-engine locale
/// codes.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn Translator>`).
///
/// # Contract
///
/// - Empty or whitespace-only `text` is a no-op: implementations return
///   `Ok(String::new())` immediately, with no request and no side effects.
/// - On failure the caller must leave any prior buffer contents untouched.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from_code: &str,
        to_code: &str,
    ) -> Result<String, TranslateError>;
}

// ---------------------------------------------------------------------------
// HttpTranslator
// ---------------------------------------------------------------------------

/// Calls a gtx-style translation endpoint over HTTP GET.
///
/// Query parameters: `client` (configured identifier), `sl` (source code),
/// `tl` (target code), `dt=t` (fixed output-format flag) and `q` (the text,
/// url-encoded by reqwest's query serializer).
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl HttpTranslator {
    /// Build an `HttpTranslator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TranslationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from_code: &str,
        to_code: &str,
    ) -> Result<String, TranslateError> {
        // Blank input never constructs a request.
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("client", self.config.client.as_str()),
                ("sl", from_code),
                ("tl", to_code),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        concat_fragments(&body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extract the translated text from a gtx response body.
///
/// `body[0]` must be an array of fragments; each fragment's element `[0]`
/// must be a string.  The translation is the concatenation of all fragment
/// strings in order.
///
/// # Errors
///
/// [`TranslateError::Parse`] when the expected nested structure is absent.
pub fn concat_fragments(body: &serde_json::Value) -> Result<String, TranslateError> {
    let fragments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::Parse("body[0] is not an array".into()))?;

    let mut text = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        let segment = fragment
            .get(0)
            .and_then(|v| v.as_str())
            .ok_or_else(|| TranslateError::Parse(format!("fragment {i}[0] is not a string")))?;
        text.push_str(segment);
    }

    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config() -> TranslationConfig {
        TranslationConfig {
            // Unroutable address — any accidental request in these tests
            // would fail loudly rather than reach a live endpoint.
            base_url: "http://127.0.0.1:9/translate".into(),
            client: "gtx".into(),
            timeout_secs: 1,
        }
    }

    // --- concat_fragments ---

    #[test]
    fn single_fragment_body() {
        let body = json!([[["こんにちは", "Hello", null, null, 1]]]);
        assert_eq!(concat_fragments(&body).unwrap(), "こんにちは");
    }

    #[test]
    fn multiple_fragments_concatenate_in_order() {
        let body = json!([[
            ["Bonjour ", "Hello ", null, null, 1],
            ["le monde", "world", null, null, 1]
        ]]);
        assert_eq!(concat_fragments(&body).unwrap(), "Bonjour le monde");
    }

    #[test]
    fn empty_fragment_list_yields_empty_string() {
        let body = json!([[]]);
        assert_eq!(concat_fragments(&body).unwrap(), "");
    }

    #[test]
    fn missing_outer_array_is_a_parse_error() {
        let body = json!({ "error": "quota exceeded" });
        let err = concat_fragments(&body).unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
    }

    #[test]
    fn non_string_fragment_is_a_parse_error() {
        let body = json!([[[42, "Hello", null, null, 1]]]);
        let err = concat_fragments(&body).unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
    }

    #[test]
    fn null_body_is_a_parse_error() {
        let body = serde_json::Value::Null;
        assert!(matches!(
            concat_fragments(&body).unwrap_err(),
            TranslateError::Parse(_)
        ));
    }

    // --- empty-input no-op ---

    #[tokio::test]
    async fn empty_text_returns_without_a_request() {
        let translator = HttpTranslator::from_config(&make_config());
        // The base_url is unroutable; an immediate Ok("") proves no request
        // was attempted.
        let result = translator.translate("", "en", "ja").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn whitespace_only_text_is_also_a_no_op() {
        let translator = HttpTranslator::from_config(&make_config());
        let result = translator.translate("  \t\n ", "en", "ja").await.unwrap();
        assert_eq!(result, "");
    }

    // --- construction ---

    #[test]
    fn from_config_builds_without_panic() {
        let _translator = HttpTranslator::from_config(&make_config());
    }

    /// Verify that `HttpTranslator` is object-safe (usable as `dyn Translator`).
    #[test]
    fn translator_is_object_safe() {
        let translator: Box<dyn Translator> = Box::new(HttpTranslator::from_config(&make_config()));
        drop(translator);
    }

    // --- error display ---

    #[test]
    fn status_error_includes_code() {
        assert!(TranslateError::Status(429).to_string().contains("429"));
    }
}
