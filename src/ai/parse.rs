//! Parsing of successful assistant responses.
//!
//! Image analysis asks the model for two prompt versions separated by a
//! literal `---`, each under a localized header. That contract is fragile —
//! models occasionally drop the separator or a header — so each section
//! falls back to a fixed sentence instead of surfacing an empty string.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::core::models::BilingualPrompt;
use crate::errors::KreatorError;

use super::transport::ChatCompletion;

pub const INDONESIAN_PROMPT_FALLBACK: &str =
    "Tidak dapat menghasilkan prompt versi Indonesia dari layanan AI pendukung.";
pub const ENGLISH_PROMPT_FALLBACK: &str =
    "Could not generate English version prompt from supporting AI service.";

static INDONESIAN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Versi Indonesia:\s*").expect("header regex compiles"));
static ENGLISH_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^English Version:\s*").expect("header regex compiles"));

/// Extracts the first choice's message content.
///
/// Absent and empty content are both invalid; whitespace-only content is
/// accepted and left for the per-operation parsers to trim.
///
/// # Errors
///
/// Returns an invalid-response error when no usable content is present.
pub fn message_text(operation: &str, completion: &ChatCompletion) -> Result<String, KreatorError> {
    completion
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| KreatorError::InvalidResponse {
            operation: operation.to_string(),
        })
}

/// Splits analysis output into its Indonesian and English prompt versions.
///
/// The content is trimmed and split on every `---`; only the first two
/// sections are used. Each section is trimmed, stripped of its header
/// (case-insensitive) and trimmed again; a missing or empty result keeps the
/// fixed fallback sentence for that language.
#[must_use]
pub fn bilingual_prompt(content: &str) -> BilingualPrompt {
    let full = content.trim();
    let mut sections = full.split("---");

    let indonesian = cleaned_section(sections.next(), &INDONESIAN_HEADER).unwrap_or_else(|| {
        warn!("analysis output missing the Indonesian section");
        INDONESIAN_PROMPT_FALLBACK.to_string()
    });
    let english = cleaned_section(sections.next(), &ENGLISH_HEADER).unwrap_or_else(|| {
        warn!("analysis output missing the English section");
        ENGLISH_PROMPT_FALLBACK.to_string()
    });

    BilingualPrompt {
        indonesian,
        english,
    }
}

fn cleaned_section(section: Option<&str>, header: &Regex) -> Option<String> {
    let section = section?;
    if section.is_empty() {
        return None;
    }
    let cleaned = header.replace(section.trim(), "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
