//! WaveSpeed generation client: submit a job, poll until it settles.
//!
//! Every operation follows the same contract: `POST {base}/{model_path}`
//! enqueues the job, then `GET {base}/predictions/{id}/result` is polled at a
//! fixed interval until the job completes or fails. HTTP-level failures run
//! through the shared error classifier; job-level failures surface as task
//! errors with the provider's reason.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

use crate::ai::classify::classify_error_detail;
use crate::core::config::AppConfig;
use crate::core::keys::CredentialStore;
use crate::core::models::UploadedFile;
use crate::core::options::{VideoDuration, find_style};
use crate::errors::KreatorError;

use super::models::{ErrorEnvelope, ResultEnvelope, SubmitEnvelope, TaskStatus};

const TEXT_TO_IMAGE_MODEL: &str = "wavespeed-ai/flux-dev";
const IMAGE_EDIT_MODEL: &str = "wavespeed-ai/flux-kontext-dev";
const IMAGE_MERGE_MODEL: &str = "wavespeed-ai/flux-kontext-dev/multi";
const IMAGE_TO_3D_MODEL: &str = "wavespeed-ai/hunyuan3d-v2-multi-view";
const TEXT_TO_VIDEO_MODEL: &str = "wavespeed-ai/wan-2.1/t2v-480p";
const IMAGE_TO_VIDEO_MODEL: &str = "wavespeed-ai/wan-2.1/i2v-480p";

const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Video jobs can take minutes; 150 polls at 2s bounds the wait at ~5min.
const MAX_POLL_ATTEMPTS: u32 = 150;

const TIMEOUT_REASON: &str = "waktu tunggu pemrosesan habis";
const NO_REASON: &str = "tanpa keterangan dari layanan";

/// Appends the style label to a prompt for non-default styles. Unknown
/// style values pass the prompt through untouched.
#[must_use]
pub fn styled_prompt(prompt: &str, style: &str) -> String {
    match find_style(style) {
        Some(option) if option.value != "default" => {
            format!("{prompt}, {} style", option.label)
        }
        _ => prompt.to_string(),
    }
}

/// Client for the WaveSpeed generation endpoints.
pub struct WaveSpeedClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl WaveSpeedClient {
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be built.
    pub fn new(
        config: &AppConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, KreatorError> {
        let http = Client::builder()
            .build()
            .map_err(|e| KreatorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.wavespeed_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn active_key(&self) -> Result<String, KreatorError> {
        self.credentials
            .active_entry()
            .map(|entry| entry.key)
            .filter(|key| !key.is_empty())
            .ok_or(KreatorError::WaveSpeedNotConfigured)
    }

    /// Generates images from a prompt.
    ///
    /// # Errors
    ///
    /// Fails without I/O when no WaveSpeed credential is active; otherwise
    /// propagates classified HTTP errors or the job's failure reason.
    pub async fn create_image(
        &self,
        prompt: &str,
        style: &str,
        size: &str,
    ) -> Result<Vec<String>, KreatorError> {
        let body = json!({
            "prompt": styled_prompt(prompt, style),
            "size": size,
        });
        self.run("Buat gambar", TEXT_TO_IMAGE_MODEL, &body).await
    }

    /// Applies an edit instruction to an existing image.
    ///
    /// # Errors
    ///
    /// See [`Self::create_image`].
    pub async fn edit_image(
        &self,
        image: &UploadedFile,
        instruction: &str,
    ) -> Result<Vec<String>, KreatorError> {
        let body = json!({
            "prompt": instruction,
            "image": image.data_url(),
        });
        self.run("Edit gambar", IMAGE_EDIT_MODEL, &body).await
    }

    /// Combines several images according to a prompt.
    ///
    /// # Errors
    ///
    /// See [`Self::create_image`].
    pub async fn merge_images(
        &self,
        images: &[UploadedFile],
        prompt: &str,
    ) -> Result<Vec<String>, KreatorError> {
        let body = json!({
            "prompt": prompt,
            "images": images.iter().map(UploadedFile::data_url).collect::<Vec<_>>(),
        });
        self.run("Gabung gambar", IMAGE_MERGE_MODEL, &body).await
    }

    /// Converts a still image into a 3D model.
    ///
    /// # Errors
    ///
    /// See [`Self::create_image`].
    pub async fn image_to_3d(&self, image: &UploadedFile) -> Result<Vec<String>, KreatorError> {
        let body = json!({ "image": image.data_url() });
        self.run("Image to 3D", IMAGE_TO_3D_MODEL, &body).await
    }

    /// Generates a video clip from a prompt. Returns the clip URL.
    ///
    /// # Errors
    ///
    /// See [`Self::create_image`].
    pub async fn text_to_video(
        &self,
        prompt: &str,
        aspect_ratio: &str,
        duration: VideoDuration,
    ) -> Result<String, KreatorError> {
        let operation = "Teks ke Video";
        let body = json!({
            "prompt": prompt,
            "aspect_ratio": aspect_ratio,
            "duration": duration.seconds(),
        });
        let outputs = self.run(operation, TEXT_TO_VIDEO_MODEL, &body).await?;
        first_output(operation, outputs)
    }

    /// Animates a still image into a video clip. Returns the clip URL.
    ///
    /// # Errors
    ///
    /// See [`Self::create_image`].
    pub async fn image_to_video(
        &self,
        image: &UploadedFile,
        prompt: &str,
        duration: VideoDuration,
    ) -> Result<String, KreatorError> {
        let operation = "Gambar ke Video";
        let body = json!({
            "image": image.data_url(),
            "prompt": prompt,
            "duration": duration.seconds(),
        });
        let outputs = self.run(operation, IMAGE_TO_VIDEO_MODEL, &body).await?;
        first_output(operation, outputs)
    }

    async fn run(
        &self,
        operation: &str,
        model_path: &str,
        body: &Value,
    ) -> Result<Vec<String>, KreatorError> {
        let key = self.active_key()?;
        let task_id = self.submit(operation, model_path, body, &key).await?;
        info!("{operation}: job {task_id} accepted");
        self.wait_for_outputs(operation, &task_id, &key).await
    }

    async fn submit(
        &self,
        operation: &str,
        model_path: &str,
        body: &Value,
        api_key: &str,
    ) -> Result<String, KreatorError> {
        let url = format!("{}/{model_path}", self.base_url);

        #[cfg(feature = "debug-logs")]
        info!("{operation} request payload:\n{body}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{operation}: submit failed: {e}");
                KreatorError::Network {
                    operation: operation.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("{operation}: submit rejected with {status}: {text}");
            return Err(classify_wavespeed_error(operation, status, &text));
        }

        let envelope: SubmitEnvelope = response.json().await.map_err(|e| {
            warn!("{operation}: unexpected submit response: {e}");
            KreatorError::InvalidResponse {
                operation: operation.to_string(),
            }
        })?;
        Ok(envelope.data.id)
    }

    async fn wait_for_outputs(
        &self,
        operation: &str,
        task_id: &str,
        api_key: &str,
    ) -> Result<Vec<String>, KreatorError> {
        let url = format!("{}/predictions/{task_id}/result", self.base_url);

        for attempt in 0..MAX_POLL_ATTEMPTS {
            if attempt > 0 {
                sleep(POLL_INTERVAL).await;
            }

            let response = self
                .http
                .get(&url)
                .bearer_auth(api_key)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!("{operation}: poll failed: {e}");
                    KreatorError::Network {
                        operation: operation.to_string(),
                    }
                })?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                warn!("{operation}: poll rejected with {status}: {text}");
                return Err(classify_wavespeed_error(operation, status, &text));
            }

            let envelope: ResultEnvelope = response.json().await.map_err(|e| {
                warn!("{operation}: unexpected poll response: {e}");
                KreatorError::InvalidResponse {
                    operation: operation.to_string(),
                }
            })?;
            let result = envelope.data;

            match result.status {
                TaskStatus::Completed => {
                    if result.outputs.is_empty() {
                        return Err(KreatorError::InvalidResponse {
                            operation: operation.to_string(),
                        });
                    }
                    info!("{operation}: job {task_id} completed with {} output(s)", result.outputs.len());
                    return Ok(result.outputs);
                }
                TaskStatus::Failed => {
                    let reason = result
                        .error
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| NO_REASON.to_string());
                    return Err(KreatorError::Task {
                        operation: operation.to_string(),
                        reason,
                    });
                }
                TaskStatus::Created | TaskStatus::Processing | TaskStatus::Unknown => {
                    if attempt > 0 && attempt % 15 == 0 {
                        info!("{operation}: job {task_id} still running (poll {attempt})");
                    }
                }
            }
        }

        Err(KreatorError::Task {
            operation: operation.to_string(),
            reason: TIMEOUT_REASON.to_string(),
        })
    }
}

fn first_output(operation: &str, outputs: Vec<String>) -> Result<String, KreatorError> {
    outputs
        .into_iter()
        .next()
        .ok_or_else(|| KreatorError::InvalidResponse {
            operation: operation.to_string(),
        })
}

/// Resolves the WaveSpeed error message and hands it to the shared
/// classifier; a non-JSON body falls back to the HTTP status text.
fn classify_wavespeed_error(operation: &str, status: StatusCode, body: &str) -> KreatorError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let detail = envelope
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .or(status.canonical_reason())
        .unwrap_or("Tidak ada detail error.");
    classify_error_detail(operation, status, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_prompt_appends_label_for_known_styles() {
        assert_eq!(
            styled_prompt("kucing di pantai", "anime"),
            "kucing di pantai, Anime & Manga style"
        );
    }

    #[test]
    fn test_styled_prompt_leaves_default_and_unknown_untouched() {
        assert_eq!(styled_prompt("kucing", "default"), "kucing");
        assert_eq!(styled_prompt("kucing", "not-a-style"), "kucing");
    }

    #[test]
    fn test_classify_wavespeed_error_reads_envelope_message() {
        let err = classify_wavespeed_error(
            "Buat gambar",
            StatusCode::BAD_REQUEST,
            r#"{"code":400,"message":"prompt flagged as adult content"}"#,
        );
        assert!(matches!(err, KreatorError::SensitiveContent { .. }));
    }

    #[test]
    fn test_classify_wavespeed_error_handles_non_json_bodies() {
        let err = classify_wavespeed_error("Buat gambar", StatusCode::BAD_GATEWAY, "<html>");
        assert!(matches!(
            err,
            KreatorError::Upstream { status: 502, .. }
        ));
    }

    #[test]
    fn test_payment_required_maps_to_insufficient_credit() {
        let err = classify_wavespeed_error("Teks ke Video", StatusCode::PAYMENT_REQUIRED, "");
        assert!(matches!(err, KreatorError::InsufficientCredit { .. }));
    }
}
