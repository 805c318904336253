//! Credential entries and the store the API clients resolve them from.
//!
//! Key selection (which entry is active) is owned by the caller; the clients
//! only require that an active, non-empty credential exists when an
//! operation runs.

use serde::{Deserialize, Serialize};

/// A named API key with an activation flag. At most one entry per store is
/// expected to be active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyEntry {
    pub id: String,
    pub name: String,
    pub key: String,
    pub is_active: bool,
}

/// Source of the credential used for outbound API calls.
///
/// Passed to the clients explicitly so tests can substitute an empty or
/// fixed store without touching process environment.
pub trait CredentialStore: Send + Sync {
    /// Returns the currently active entry, if any.
    fn active_entry(&self) -> Option<ApiKeyEntry>;
}

/// Splits a raw multi-key string on commas, semicolons and whitespace.
#[must_use]
pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n', '\t', ' '])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// In-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: Vec<ApiKeyEntry>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new(entries: Vec<ApiKeyEntry>) -> Self {
        Self { entries }
    }

    /// Builds a store from a multi-key environment variable. Entries are
    /// named `{label} 1..N` with ids `{label-lowercased}-1..N`; the first one
    /// starts active. A missing or empty variable yields an empty store, so
    /// operations fail with the not-configured error instead of panicking.
    #[must_use]
    pub fn from_env(var: &str, label: &str) -> Self {
        let raw = std::env::var(var).unwrap_or_default();
        Self::from_keys(&parse_api_keys(&raw), label)
    }

    /// Builds entries from bare key strings, activating the first.
    #[must_use]
    pub fn from_keys(keys: &[String], label: &str) -> Self {
        let entries = keys
            .iter()
            .enumerate()
            .map(|(i, key)| ApiKeyEntry {
                id: format!("{}-{}", label.to_lowercase(), i + 1),
                name: format!("{} {}", label, i + 1),
                key: key.clone(),
                is_active: i == 0,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ApiKeyEntry] {
        &self.entries
    }

    /// Marks the entry with the given id active and deactivates the rest.
    /// Returns false (leaving the store untouched) when the id is unknown.
    pub fn set_active(&mut self, id: &str) -> bool {
        if !self.entries.iter().any(|e| e.id == id) {
            return false;
        }
        for entry in &mut self.entries {
            entry.is_active = entry.id == id;
        }
        true
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn active_entry(&self) -> Option<ApiKeyEntry> {
        self.entries.iter().find(|e| e.is_active).cloned()
    }
}
