//! WaveSpeed generation API (images, 3D, video)

pub mod client;
pub mod models;

// Re-export main types for convenience
pub use client::WaveSpeedClient;
pub use models::TaskStatus;
