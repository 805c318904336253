//! Kreator - the core of an AI creation assistant for prompts, images, 3D and video.
//!
//! This crate implements the service layer behind the Kreator app:
//! 1. An assistant client that talks to OpenRouter chat completions for prompt
//!    optimization, image analysis and the Kreator Asisten chatbot
//! 2. A WaveSpeed client that submits generation tasks (images, 3D models,
//!    video) and polls them to completion
//!
//! # Architecture
//!
//! The system uses:
//! - reqwest for HTTP calls to OpenRouter and WaveSpeed
//! - serde for the wire payloads on both APIs
//! - thiserror for the typed, user-facing error taxonomy
//! - Tokio for async runtime and poll timing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use kreator::ai::AssistantClient;
//! use kreator::core::config::AppConfig;
//! use kreator::core::keys::InMemoryCredentialStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Set up structured logging
//!     kreator::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let keys = Arc::new(InMemoryCredentialStore::from_env(
//!         "OPENROUTER_API_KEYS",
//!         "Server",
//!     ));
//!
//!     let assistant = AssistantClient::new(&config, keys)?;
//!     let optimized = assistant.optimize_prompt("kucing oren di pantai").await?;
//!     println!("{optimized}");
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod wavespeed;

pub use errors::KreatorError;

/// Configure structured logging for console output.
///
/// This function sets up tracing-subscriber with the default formatter. It
/// should be called once at process start, before any client is built.
///
/// # Example
///
/// ```
/// // Initialize structured logging at process start
/// kreator::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
