//! Chat data model and wire types shared across the crate.
//!
//! The outbound chat-completions format allows message content to be either a
//! plain string or an ordered list of typed parts; `MessageContent` mirrors
//! that with an untagged serde enum so history produced by callers and
//! payloads built here share one representation.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::errors::KreatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One typed content part of a multimodal message.
///
/// Serializes to `{"type":"text","text":...}` or
/// `{"type":"image_url","image_url":{"url":...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrlRef },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrlRef {
    pub url: String,
}

impl ContentPart {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrlRef { url: url.into() },
        }
    }
}

/// Message content: a plain string or an ordered part list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Returns the plain text form, if this content is a plain string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parts(_) => None,
        }
    }
}

/// A single turn in a conversation, as kept by callers and as sent on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, content: MessageContent) -> Self {
        Self { role, content }
    }

    /// A plain-text user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, MessageContent::Text(text.into()))
    }

    /// A plain-text assistant turn.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, MessageContent::Text(text.into()))
    }

    /// A plain-text system turn.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(ChatRole::System, MessageContent::Text(text.into()))
    }
}

/// Outbound body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Lowercases a MIME type, drops any parameters and maps the common
/// `image/jpg` misspelling to `image/jpeg`.
#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    let main = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match main.as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        other => other.to_string(),
    }
}

/// An image attachment held as base64 data plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub base64_data: String,
    pub mime_type: String,
}

impl UploadedFile {
    #[must_use]
    pub fn new(base64_data: impl Into<String>, mime_type: &str) -> Self {
        Self {
            base64_data: base64_data.into(),
            mime_type: canonicalize_mime(mime_type),
        }
    }

    /// Encodes raw bytes into an attachment.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self::new(BASE64.encode(bytes), mime_type)
    }

    /// Reads a file from disk, guessing the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, KreatorError> {
        let bytes = std::fs::read(path)
            .map_err(|e| KreatorError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::from_bytes(&bytes, mime.essence_str()))
    }

    /// Renders the `data:{mime};base64,{data}` URL form used in image parts.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Result of analyzing an image: one generation prompt per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualPrompt {
    pub indonesian: String,
    pub english: String,
}
