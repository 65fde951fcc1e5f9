//! Async facade pairing an `ApiClient` with a `Transport`.
//!
//! Each call builds one request, sends it once and parses the response.
//! Nothing is shared or mutated between calls, so callers may run several
//! concurrently; ordering between them is the caller's business.

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Language, LanguageStrings, Project, StringRecord};

#[derive(Debug, Clone)]
pub struct BilingualClient<T> {
    api: ApiClient,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl BilingualClient<crate::transport::ReqwestTransport> {
    /// Client over HTTP with the process-level configuration.
    pub fn new(token: &str, base_url: &str) -> Self {
        Self::with_transport(
            ApiClient::new(token, base_url),
            crate::transport::ReqwestTransport::new(),
        )
    }
}

impl<T: Transport> BilingualClient<T> {
    pub fn with_transport(api: ApiClient, transport: T) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fails with "Invalid api key" when the server rejects the request.
    pub async fn get_project(&self) -> Result<Project, ApiError> {
        let response = self.execute(self.api.build_get_project()).await?;
        self.api.parse_get_project(response)
    }

    pub async fn get_project_languages(&self) -> Result<Vec<Language>, ApiError> {
        let response = self.execute(self.api.build_get_project_languages()).await?;
        self.api.parse_get_project_languages(response)
    }

    pub async fn get_language_strings(&self, language: &str) -> Result<LanguageStrings, ApiError> {
        let response = self
            .execute(self.api.build_get_language_strings(language))
            .await?;
        self.api.parse_get_language_strings(response)
    }

    /// Returns the server's JSON reply unchanged.
    pub async fn push_language_strings(
        &self,
        language: &str,
        strings: &[StringRecord],
    ) -> Result<Value, ApiError> {
        let request = self.api.build_push_language_strings(language, strings)?;
        let response = self.execute(request).await?;
        self.api.parse_push_language_strings(response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
