//! Wire types for the WaveSpeed v3 prediction API.
//!
//! Both the submit and result endpoints wrap their payload in a
//! `{code, message, data}` envelope. Unknown status strings map to a
//! catch-all variant so new provider states degrade to "still running"
//! handling instead of a decode failure.

use serde::Deserialize;

/// Lifecycle of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Created,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether the job has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEnvelope {
    pub data: SubmittedTask,
}

/// Acknowledgement returned when a job is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedTask {
    pub id: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultEnvelope {
    pub data: TaskResult,
}

/// Current state of a job as reported by the result endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskResult {
    pub id: String,
    pub status: TaskStatus,
    /// Output URLs, present once the job completes.
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned by WaveSpeed endpoints; the message sits at the top
/// level of the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}
