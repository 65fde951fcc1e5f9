//! Client configuration.
//!
//! The only recognized option is `grouped`, sent verbatim as the `grouped`
//! query parameter of the strings endpoint. The process-level default comes
//! from the environment; callers that need another value pass a
//! `ClientConfig` explicitly.

/// Environment variable holding the process-level `grouped` default.
pub const GROUPED_ENV: &str = "BILINGUAL_GROUPED";

/// Value used when nothing is configured.
pub const DEFAULT_GROUPED: &str = "false";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub grouped: String,
}

impl ClientConfig {
    pub fn new(grouped: impl Into<String>) -> Self {
        Self {
            grouped: grouped.into(),
        }
    }

    /// Reads `BILINGUAL_GROUPED`, falling back to `"false"` when it is unset
    /// or blank.
    pub fn from_env() -> Self {
        let grouped = std::env::var(GROUPED_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GROUPED.to_string());
        Self { grouped }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GROUPED)
    }
}
