//! Stateless request builder and response parser for the translation API.
//!
//! # Design
//! `ApiClient` holds the project token, the base URL and a `ClientConfig`,
//! and never changes after construction. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The round-trip in between belongs to the
//! caller or to `BilingualClient`, keeping this module free of I/O.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Language, LanguageStrings, Project, StringRecord, SyncStrings};

/// Header carrying the project-scoped credential.
pub const PROJECT_KEY_HEADER: &str = "X-PROJECT-KEY";

pub const INVALID_API_KEY: &str = "Invalid api key";
pub const LANGUAGES_FAILED: &str = "Error retrieving project languages";
pub const STRINGS_FAILED: &str = "Error retrieving language strings";
pub const PUSH_FAILED: &str = "Error pushing language strings";

/// Synchronous, stateless client for the translation API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    token: String,
    base_url: String,
    config: ClientConfig,
}

impl ApiClient {
    /// Client using the process-level configuration from the environment.
    pub fn new(token: &str, base_url: &str) -> Self {
        Self::with_config(token, base_url, ClientConfig::from_env())
    }

    /// Token and base URL are stored verbatim; nothing is validated here.
    pub fn with_config(token: &str, base_url: &str, config: ClientConfig) -> Self {
        Self {
            token: token.to_string(),
            base_url: base_url.to_string(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_get_project(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/api/projects", self.base_url), None)
    }

    pub fn build_get_project_languages(&self) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("{}/api/projects/languages", self.base_url),
            None,
        )
    }

    /// The `grouped` query value comes from the client's configuration.
    pub fn build_get_language_strings(&self, language: &str) -> HttpRequest {
        let grouped: String =
            url::form_urlencoded::byte_serialize(self.config.grouped.as_bytes()).collect();
        self.request(
            HttpMethod::Get,
            format!(
                "{}/api/projects/languages/{language}/strings?grouped={grouped}",
                self.base_url
            ),
            None,
        )
    }

    pub fn build_push_language_strings(
        &self,
        language: &str,
        strings: &[StringRecord],
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&SyncStrings { strings })
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(
            HttpMethod::Post,
            format!(
                "{}/api/projects/languages/{language}/sync-strings",
                self.base_url
            ),
            Some(body),
        ))
    }

    pub fn parse_get_project(&self, response: HttpResponse) -> Result<Project, ApiError> {
        check_status(&response, INVALID_API_KEY)?;
        parse_body(&response)
    }

    pub fn parse_get_project_languages(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Language>, ApiError> {
        check_status(&response, LANGUAGES_FAILED)?;
        parse_body(&response)
    }

    pub fn parse_get_language_strings(
        &self,
        response: HttpResponse,
    ) -> Result<LanguageStrings, ApiError> {
        check_status(&response, STRINGS_FAILED)?;
        parse_body(&response)
    }

    pub fn parse_push_language_strings(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response, PUSH_FAILED)?;
        parse_body(&response)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                (PROJECT_KEY_HEADER.to_string(), self.token.clone()),
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

/// Map a non-2xx response to `ApiError::Remote` carrying its JSON body.
///
/// A body that is not valid JSON surfaces as `DeserializationError` instead.
fn check_status(response: &HttpResponse, message: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let details = if response.body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?
    };
    warn!(status = response.status, reason = message, "remote request failed");
    Err(ApiError::Remote {
        status: response.status,
        message: message.to_string(),
        details,
    })
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
