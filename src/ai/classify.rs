//! Classification of upstream error responses into typed errors.
//!
//! The provider reports failures either as `{"error":{"message":...}}` or as
//! `{"detail":...}`; categories are decided by substring checks over the most
//! specific detail available. Priority is strict: sensitive content wins over
//! credit exhaustion, which wins over the generic upstream failure, so a
//! message mentioning both "nudity" and "credit" is classified sensitive.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::errors::KreatorError;

/// Substrings that mark a moderation rejection. Lowercase; matching is
/// case-insensitive.
pub const SENSITIVE_CONTENT_KEYWORDS: &[&str] = &[
    "sensitive",
    "flagged",
    "violence",
    "sexual",
    "hate speech",
    "policy violation",
    "safety policy",
    "adult content",
    "nudity",
    "self-harm",
];

const NO_DETAIL_FALLBACK: &str = "Tidak ada detail error.";

/// Error body shape returned by the provider. All fields are optional; a
/// non-JSON body deserializes to the empty default and classification falls
/// back to the HTTP status text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<ProviderErrorDetail>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

/// Returns true when the message contains any moderation keyword.
#[must_use]
pub fn is_sensitive_content_message(message: &str) -> bool {
    if message.is_empty() {
        return false;
    }
    let lowered = message.to_lowercase();
    SENSITIVE_CONTENT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Classifies a non-success provider response.
///
/// The detail is resolved as `error.message`, then `detail`, then the HTTP
/// status text; empty strings fall through like absent fields.
#[must_use]
pub fn classify_api_error(
    operation: &str,
    status: StatusCode,
    body: &ProviderErrorBody,
) -> KreatorError {
    let detail = body
        .error
        .as_ref()
        .and_then(|e| e.message.as_deref())
        .filter(|s| !s.is_empty())
        .or(body.detail.as_deref().filter(|s| !s.is_empty()))
        .or(status.canonical_reason())
        .unwrap_or(NO_DETAIL_FALLBACK);

    classify_error_detail(operation, status, detail)
}

/// Classifies a resolved error detail string. Shared with the generation
/// client, whose error envelope carries its message at the top level.
#[must_use]
pub fn classify_error_detail(operation: &str, status: StatusCode, detail: &str) -> KreatorError {
    if is_sensitive_content_message(detail) {
        return KreatorError::SensitiveContent {
            operation: operation.to_string(),
        };
    }

    let lowered = detail.to_lowercase();
    if status == StatusCode::PAYMENT_REQUIRED
        || lowered.contains("credit")
        || lowered.contains("token")
    {
        return KreatorError::InsufficientCredit {
            operation: operation.to_string(),
        };
    }

    KreatorError::Upstream {
        operation: operation.to_string(),
        status: status.as_u16(),
    }
}
