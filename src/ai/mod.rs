//! Assistant (chat-completions) functionality

pub mod classify;
pub mod client;
pub mod parse;
pub mod transport;

// Re-export main types for convenience
pub use client::AssistantClient;
pub use transport::{ChatCompletion, ChatTransport};
