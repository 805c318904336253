use thiserror::Error;

/// Sentinel prefix carried by sensitive-content errors.
///
/// Callers (and the chat history filter) rely on this literal prefix to
/// recognize sensitive-content failures in rendered messages, so it must
/// stay in sync with the `SensitiveContent` Display implementation below.
pub const SENSITIVE_CONTENT_ERROR_PREFIX: &str = "SENSITIVE_CONTENT_ERROR:";

/// Crate-wide error type. Every variant renders the exact user-facing
/// (Indonesian) message the app shows for that failure.
#[derive(Debug, Error)]
pub enum KreatorError {
    /// No active OpenRouter credential is configured.
    #[error("Layanan AI pendukung tidak aktif atau tidak valid. Silakan atur di halaman Pengaturan.")]
    NotConfigured,

    /// No active WaveSpeed credential is configured.
    #[error("API Key WaveSpeed tidak aktif atau tidak valid. Silakan atur di halaman Pengaturan.")]
    WaveSpeedNotConfigured,

    /// The provider rejected the request because the content was flagged.
    #[error("SENSITIVE_CONTENT_ERROR:{operation} gagal karena konten terdeteksi sensitif.")]
    SensitiveContent { operation: String },

    /// The provider reported exhausted credit or an oversized request.
    #[error(
        "Kredit untuk layanan AI pendukung ({operation}) tidak mencukupi atau permintaan terlalu besar. Silakan hubungi Admin atau coba permintaan yang lebih sederhana."
    )]
    InsufficientCredit { operation: String },

    /// The provider answered with a non-success HTTP status that matched no
    /// more specific category.
    #[error(
        "{operation} gagal. Layanan AI pendukung tidak merespon dengan benar (Status: {status}). Silakan coba beberapa saat lagi."
    )]
    Upstream { operation: String, status: u16 },

    /// The provider answered 2xx but the body did not contain usable content.
    #[error("Respon tidak valid dari layanan AI pendukung saat {operation}.")]
    InvalidResponse { operation: String },

    /// The provider could not be reached at all.
    #[error("Gagal menghubungi layanan AI pendukung untuk {operation}. Periksa koneksi internet Anda.")]
    Network { operation: String },

    /// A generation job was accepted but ended in failure (or never settled).
    #[error("{operation} gagal diproses: {reason}")]
    Task { operation: String, reason: String },

    /// The local display-credit balance cannot cover a feature.
    #[error("Kredit tampilan tidak mencukupi untuk {feature}. Dibutuhkan {cost} kredit, sisa {balance}.")]
    DisplayCredit {
        feature: String,
        cost: u32,
        balance: u32,
    },

    /// Invalid deployment configuration (bad env values, client build).
    #[error("Konfigurasi tidak valid: {0}")]
    Config(String),
}
