//! Assistant operations backed by the chat-completions API.
//!
//! Three operations share one request shape: prompt optimization, image
//! analysis and chat. Each builds its message list, resolves the active
//! credential and performs a single call through the transport seam.

use std::sync::Arc;

use tracing::info;

use crate::core::config::AppConfig;
use crate::core::keys::CredentialStore;
use crate::core::models::{
    BilingualPrompt, ChatMessage, ChatPayload, ChatRole, ContentPart, MessageContent, UploadedFile,
};
use crate::errors::{KreatorError, SENSITIVE_CONTENT_ERROR_PREFIX};

use super::parse::{bilingual_prompt, message_text};
use super::transport::{ChatTransport, HttpChatTransport};

pub const OPTIMIZE_MAX_TOKENS: u32 = 1024;
pub const ANALYZE_MAX_TOKENS: u32 = 2048;
pub const CHAT_MAX_TOKENS: u32 = 4096;

const OPTIMIZER_SYSTEM_INSTRUCTION: &str = "You are an expert prompt engineer. Your task is to expand and enrich a user's simple idea into a detailed, vivid, and descriptive prompt for an AI image generator. Add relevant keywords like styles (e.g., photorealistic, cinematic), lighting, composition, and mood. Only output the final, optimized prompt text, without any introductions, explanations, or quotation marks.";

const ANALYST_SYSTEM_INSTRUCTION: &str = "You are a world-class promptographer AI. Your task is to analyze the user's uploaded image and generate an exceptionally detailed and powerful prompt for an AI image generator to recreate a similar image. The prompt should capture the essence of the subject, setting, composition, lighting, colors, artistic style, and any specific important details. Combine all these elements into a single, flowing paragraph for each language requested. Provide this complete prompt in two languages, clearly separated by '---'. First, the Indonesian version under a 'Versi Indonesia:' header. Second, the English version under an 'English Version:' header. Do not add any other text, explanation, introduction, or break down the prompt into components in your final output; only the complete paragraph for each language.";

const ANALYZE_USER_TEXT: &str = "Analyze this image and generate detailed prompts in Indonesian and English as per the system instructions.";

/// Persona instruction for the chat operation.
pub const CHATBOT_SYSTEM_PROMPT: &str = "Anda adalah Kreator Asisten, sebuah AI yang dibuat oleh tim santridigital untuk program kelas kreator AI, JAWAB DENGAN SINGKAT DAN KAMU DILARANG PAKAI KARAKTER *#_- ATAU YANG LAIN, USAHAKAN SENATURAL MUNGKIN SEPERTI MANUSIA!! KAMU sangat ahli dalam membantu pengguna membuat berbagai jenis konten digital. Fokus utama Anda adalah memberikan ide, saran, struktur, dan bahkan draf awal untuk konten seperti posting media sosial, artikel blog, skrip video, ide gambar/video AI, dan strategi konten. Anda harus selalu ramah, suportif, dan proaktif dalam menawarkan bantuan dan bertanya kepada user. Jika pengguna mengirim gambar, gunakan gambar tersebut sebagai konteks untuk memberikan saran konten yang relevan. Misalnya, jika pengguna mengirim gambar produk, bantu mereka membuat deskripsi produk yang menarik atau ide postingan promosi. Selalu berikan jawaban yang terstruktur, jelas, bersih, rapi, dan langsung ke intinya (to the point). Hindari penggunaan karakter format yang tidak perlu seperti tanda bintang (*) atau markdown dan bahasa2 kode yang lain. Hindari menjelaskan bagaimana Anda menghasilkan jawaban atau menyebut diri Anda sebagai AI, kecuali jika diminta secara eksplisit. Prioritaskan jawaban dalam Bahasa Indonesia yang santay kasual dan jawab dengan singkat dan jelas.JAWABAN/OUTPUT HARUS BERUPA TEKS SAJA DAN TANDA BACA YANG DIPERLUKAN!";

/// Assistant replies that render an error must not be replayed to the API.
/// These prefixes cover the generic chat error banner, the sensitive-content
/// sentinel and the credit warning.
const ERROR_REPLY_PREFIXES: &[&str] = &[
    "Maaf, terjadi kesalahan:",
    SENSITIVE_CONTENT_ERROR_PREFIX,
    "Kredit untuk layanan AI pendukung",
];

const SERVICE_ERROR_MARKER: &str = "layanan AI pendukung";

/// Prefixes a bare `gemini-*` model id with its `google/` namespace;
/// already-namespaced ids pass through unchanged.
#[must_use]
pub fn qualified_model_name(model: &str) -> String {
    if model.starts_with("gemini-") {
        format!("google/{model}")
    } else {
        model.to_string()
    }
}

/// Returns true when an assistant reply is real model output rather than a
/// rendered error message.
#[must_use]
pub fn is_replayable_reply(text: &str) -> bool {
    !ERROR_REPLY_PREFIXES.iter().any(|p| text.starts_with(p))
        && !text.contains(SERVICE_ERROR_MARKER)
}

/// Client for the assistant operations.
pub struct AssistantClient {
    transport: Arc<dyn ChatTransport>,
    credentials: Arc<dyn CredentialStore>,
    text_model: String,
    vision_model: String,
}

impl AssistantClient {
    /// Builds a client with the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be built.
    pub fn new(
        config: &AppConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, KreatorError> {
        let transport = Arc::new(HttpChatTransport::new(config)?);
        Ok(Self::with_transport(config, credentials, transport))
    }

    /// Builds a client over an arbitrary transport (used by tests).
    #[must_use]
    pub fn with_transport(
        config: &AppConfig,
        credentials: Arc<dyn CredentialStore>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            transport,
            credentials,
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
        }
    }

    /// Resolves the active credential or fails without any I/O.
    fn active_key(&self) -> Result<String, KreatorError> {
        self.credentials
            .active_entry()
            .map(|entry| entry.key)
            .filter(|key| !key.is_empty())
            .ok_or(KreatorError::NotConfigured)
    }

    /// Builds the prompt-optimization payload.
    #[must_use]
    pub fn build_optimize_payload(&self, prompt_text: &str) -> ChatPayload {
        ChatPayload {
            model: qualified_model_name(&self.text_model),
            messages: vec![
                ChatMessage::system(OPTIMIZER_SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt_text),
            ],
            max_tokens: OPTIMIZE_MAX_TOKENS,
        }
    }

    /// Builds the image-analysis payload. The image part precedes the text
    /// part.
    #[must_use]
    pub fn build_analyze_payload(&self, image: &UploadedFile) -> ChatPayload {
        ChatPayload {
            model: qualified_model_name(&self.vision_model),
            messages: vec![
                ChatMessage::system(ANALYST_SYSTEM_INSTRUCTION),
                ChatMessage::new(
                    ChatRole::User,
                    MessageContent::Parts(vec![
                        ContentPart::image_url(image.data_url()),
                        ContentPart::text(ANALYZE_USER_TEXT),
                    ]),
                ),
            ],
            max_tokens: ANALYZE_MAX_TOKENS,
        }
    }

    /// Builds the chat payload: persona instruction, replayable history in
    /// order, then the current turn (image part first when attached).
    #[must_use]
    pub fn build_chat_payload(
        &self,
        history: &[ChatMessage],
        user_text: &str,
        image: Option<&UploadedFile>,
    ) -> ChatPayload {
        let mut messages = vec![ChatMessage::system(CHATBOT_SYSTEM_PROMPT)];

        for message in history {
            match message.role {
                ChatRole::User => {
                    let parts = match &message.content {
                        MessageContent::Text(text) => vec![ContentPart::text(text.clone())],
                        MessageContent::Parts(parts) => parts.clone(),
                    };
                    messages.push(ChatMessage::new(ChatRole::User, MessageContent::Parts(parts)));
                }
                ChatRole::Assistant => {
                    // Error banners rendered into the conversation would only
                    // confuse the model; skip them.
                    let replayable = message
                        .content
                        .as_text()
                        .is_none_or(is_replayable_reply);
                    if replayable {
                        messages.push(message.clone());
                    }
                }
                ChatRole::System => {}
            }
        }

        let mut current = vec![ContentPart::text(user_text)];
        if let Some(image) = image {
            current.insert(0, ContentPart::image_url(image.data_url()));
        }
        messages.push(ChatMessage::new(ChatRole::User, MessageContent::Parts(current)));

        ChatPayload {
            model: qualified_model_name(&self.vision_model),
            messages,
            max_tokens: CHAT_MAX_TOKENS,
        }
    }

    /// Expands a short idea into a detailed image-generation prompt.
    ///
    /// Blank input returns an empty string without touching the credential
    /// store or the network.
    ///
    /// # Errors
    ///
    /// Returns the not-configured error when no credential is active, or a
    /// classified transport/parse error.
    pub async fn optimize_prompt(&self, prompt_text: &str) -> Result<String, KreatorError> {
        let operation = "Optimasi prompt";
        if prompt_text.trim().is_empty() {
            return Ok(String::new());
        }

        let key = self.active_key()?;
        let payload = self.build_optimize_payload(prompt_text);
        info!("{operation}: sending {} messages", payload.messages.len());

        let completion = self.transport.execute(operation, &payload, &key).await?;
        Ok(message_text(operation, &completion)?.trim().to_string())
    }

    /// Describes an image as a pair of generation prompts (Indonesian and
    /// English).
    ///
    /// # Errors
    ///
    /// Returns the not-configured error when no credential is active, or a
    /// classified transport/parse error.
    pub async fn analyze_image(&self, image: &UploadedFile) -> Result<BilingualPrompt, KreatorError> {
        let operation = "Analisa gambar";
        let key = self.active_key()?;
        let payload = self.build_analyze_payload(image);
        info!("{operation}: analyzing {} attachment", image.mime_type);

        let completion = self.transport.execute(operation, &payload, &key).await?;
        let content = message_text(operation, &completion)?;
        Ok(bilingual_prompt(&content))
    }

    /// Sends one chat turn with prior history and an optional image.
    ///
    /// # Errors
    ///
    /// Returns the not-configured error when no credential is active, or a
    /// classified transport/parse error.
    pub async fn send_chat_message(
        &self,
        history: &[ChatMessage],
        user_text: &str,
        image: Option<&UploadedFile>,
    ) -> Result<String, KreatorError> {
        let operation = "Chatbot";
        let key = self.active_key()?;
        let payload = self.build_chat_payload(history, user_text, image);
        info!(
            "{operation}: sending {} messages ({} history turns)",
            payload.messages.len(),
            history.len()
        );

        let completion = self.transport.execute(operation, &payload, &key).await?;
        Ok(message_text(operation, &completion)?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::InMemoryCredentialStore;
    use serde_json::{Value, json};

    fn client() -> AssistantClient {
        let config = AppConfig::default();
        let keys = vec!["sk-test".to_string()];
        let store = Arc::new(InMemoryCredentialStore::from_keys(&keys, "Server"));
        // The HTTP transport is never exercised by payload-builder tests.
        AssistantClient::new(&config, store).unwrap()
    }

    fn to_value(payload: &ChatPayload) -> Value {
        serde_json::to_value(payload).unwrap()
    }

    #[test]
    fn test_qualified_model_name_prefixes_bare_gemini_ids() {
        assert_eq!(
            qualified_model_name("gemini-2.0-flash-001"),
            "google/gemini-2.0-flash-001"
        );
        assert_eq!(
            qualified_model_name("google/gemini-2.0-flash-001"),
            "google/gemini-2.0-flash-001"
        );
        assert_eq!(qualified_model_name("openai/gpt-4o"), "openai/gpt-4o");
    }

    #[test]
    fn test_optimize_payload_shape() {
        let payload = to_value(&client().build_optimize_payload("kucing oranye"));
        assert_eq!(payload["model"], "google/gemini-2.0-flash-001");
        assert_eq!(payload["max_tokens"], 1024);
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["role"], "user");
        assert_eq!(payload["messages"][1]["content"], "kucing oranye");
    }

    #[test]
    fn test_analyze_payload_puts_image_before_text() {
        let image = UploadedFile::new("AAAA", "image/png");
        let payload = to_value(&client().build_analyze_payload(&image));

        assert_eq!(payload["max_tokens"], 2048);
        let parts = payload["messages"][1]["content"].as_array().unwrap();
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[0]["image_url"]["url"], "data:image/png;base64,AAAA");
        assert_eq!(parts[1]["type"], "text");
    }

    #[test]
    fn test_chat_payload_starts_with_persona_and_ends_with_current_turn() {
        let history = vec![
            ChatMessage::user("halo"),
            ChatMessage::assistant("Halo! Ada yang bisa dibantu?"),
        ];
        let payload = to_value(&client().build_chat_payload(&history, "buatkan caption", None));

        assert_eq!(payload["max_tokens"], 4096);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(
            messages.last().unwrap()["content"],
            json!([{"type": "text", "text": "buatkan caption"}])
        );
    }

    #[test]
    fn test_chat_payload_attaches_image_before_text() {
        let image = UploadedFile::new("BBBB", "image/jpeg");
        let payload = to_value(&client().build_chat_payload(&[], "apa ini?", Some(&image)));

        let parts = payload["messages"][1]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[1]["text"], "apa ini?");
    }

    #[test]
    fn test_chat_history_drops_error_replies_and_keeps_order() {
        let history = vec![
            ChatMessage::user("pertama"),
            ChatMessage::assistant("Maaf, terjadi kesalahan: jaringan putus"),
            ChatMessage::assistant("SENSITIVE_CONTENT_ERROR:Chatbot gagal karena konten terdeteksi sensitif."),
            ChatMessage::assistant("Kredit untuk layanan AI pendukung (Chatbot) tidak mencukupi atau permintaan terlalu besar. Silakan hubungi Admin atau coba permintaan yang lebih sederhana."),
            ChatMessage::assistant("Respon tidak valid dari layanan AI pendukung saat Chatbot."),
            ChatMessage::assistant("jawaban asli"),
            ChatMessage::user("kedua"),
        ];
        let payload = to_value(&client().build_chat_payload(&history, "ketiga", None));

        let messages = payload["messages"].as_array().unwrap();
        // persona + pertama + jawaban asli + kedua + current turn
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[1]["content"], json!([{"type": "text", "text": "pertama"}]));
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "jawaban asli");
        assert_eq!(messages[3]["content"], json!([{"type": "text", "text": "kedua"}]));
    }

    #[test]
    fn test_chat_history_replays_user_part_lists_untouched() {
        let history = vec![ChatMessage::new(
            ChatRole::User,
            MessageContent::Parts(vec![
                ContentPart::image_url("data:image/png;base64,CCCC"),
                ContentPart::text("gambar lama"),
            ]),
        )];
        let payload = to_value(&client().build_chat_payload(&history, "lanjut", None));

        let parts = payload["messages"][1]["content"].as_array().unwrap();
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[1]["text"], "gambar lama");
    }

    #[test]
    fn test_chat_history_skips_system_turns() {
        let history = vec![ChatMessage::system("instruksi lama"), ChatMessage::user("hai")];
        let payload = to_value(&client().build_chat_payload(&history, "lanjut", None));

        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3, "only persona, one user turn and the current turn");
    }

    #[test]
    fn test_is_replayable_reply() {
        assert!(is_replayable_reply("Tentu, ini drafnya."));
        assert!(!is_replayable_reply("Maaf, terjadi kesalahan: timeout"));
        assert!(!is_replayable_reply(
            "Gagal menghubungi layanan AI pendukung untuk Chatbot. Periksa koneksi internet Anda."
        ));
    }
}
