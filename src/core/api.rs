use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;

use crate::error::{MediScribeError, Result};
use crate::settings::ApiSettings;
use crate::types::{HealthStatus, TranscriptionResult};

const USER_AGENT: &str = "mediscribe";

/// Blocking client for the MediScribe backend. One request at a time; no
/// retries. The calling flow blocks until a response or transport error.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let timeout = if settings.timeout_secs > 0 {
            Some(Duration::from_secs(settings.timeout_secs))
        } else {
            // No client-side deadline; the transport decides when to give up.
            None
        };

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base().to_string(),
        })
    }

    /// Upload an audio file as a multipart form and parse the transcription
    /// response. Non-2xx statuses surface as an error carrying the code.
    pub fn transcribe(&self, path: &Path) -> Result<TranscriptionResult> {
        let form = Form::new().file("file", path)?;
        let url = format!("{}/api/transcribe", self.base_url);
        tracing::debug!("POST {url}");

        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediScribeError::Api {
                status: status.as_u16(),
            });
        }

        response
            .json::<TranscriptionResult>()
            .map_err(|err| MediScribeError::ApiParse(err.to_string()))
    }

    /// Probe the backend's health endpoint.
    pub fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        tracing::debug!("GET {url}");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediScribeError::Api {
                status: status.as_u16(),
            });
        }

        response
            .json::<HealthStatus>()
            .map_err(|err| MediScribeError::ApiParse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn client_builds_with_and_without_timeout() {
        let mut settings = Settings::default();
        ApiClient::new(&settings.api).expect("no timeout");

        settings.api.timeout_secs = 30;
        ApiClient::new(&settings.api).expect("with timeout");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let mut settings = Settings::default();
        settings.api.base_url = "http://example.test:8000/".to_string();
        let client = ApiClient::new(&settings.api).expect("client");
        assert_eq!(client.base_url, "http://example.test:8000");
    }
}
