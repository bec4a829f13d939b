use std::time::Duration;

use reqwest::multipart;
use serde::Deserialize;

use crate::types::{ExtractError, ExtractedOutline, FailureKind, HealthReport};

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Large scans take a while server-side; the batch waits for each
            // file in turn, so this bounds a hung call rather than a slow one.
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[async_trait::async_trait]
pub trait OutlineService: Send + Sync {
    /// Submits one file's bytes and awaits the structured outline or a
    /// classified failure. Stateless across invocations.
    async fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractedOutline, ExtractError>;

    async fn health(&self) -> Result<HealthReport, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestOutlineService {
    client: reqwest::Client,
    settings: ExtractSettings,
}

/// Success body shape; field names are the service's wire contract.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    title: String,
    outline: Vec<crate::types::OutlineItem>,
}

/// Error body shape; the service reports failures as `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ReqwestOutlineService {
    pub fn new(settings: ExtractSettings) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ExtractError::new(FailureKind::Unknown, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl OutlineService for ReqwestOutlineService {
    async fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractedOutline, ExtractError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|err| ExtractError::new(FailureKind::Unknown, err.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("extract"))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(ExtractError::new(
                FailureKind::Service {
                    status: status.as_u16(),
                },
                error_detail(&body),
            ));
        }

        let parsed: ExtractResponse = serde_json::from_slice(&body)
            .map_err(|err| ExtractError::new(FailureKind::Unknown, err.to_string()))?;
        Ok(ExtractedOutline {
            title: parsed.title,
            outline: parsed.outline,
            raw_json: body.to_vec(),
        })
    }

    async fn health(&self) -> Result<HealthReport, ExtractError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::new(
                FailureKind::Service {
                    status: status.as_u16(),
                },
                "health check failed",
            ));
        }
        response
            .json::<HealthReport>()
            .await
            .map_err(|err| ExtractError::new(FailureKind::Unknown, err.to_string()))
    }
}

/// Message used whenever the service's error body cannot tell us more.
const GENERIC_ERROR: &str = "Unknown error";

fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) if !parsed.detail.is_empty() => parsed.detail,
        _ => GENERIC_ERROR.to_string(),
    }
}

fn map_transport_error(err: reqwest::Error) -> ExtractError {
    // Connect-phase failures mean the whole batch will likely fail, so they
    // get their own class; everything else is an unknown wrapping the cause.
    if err.is_connect() {
        return ExtractError::new(
            FailureKind::Connectivity,
            format!("unable to reach the extraction service: {err}"),
        );
    }
    ExtractError::new(FailureKind::Unknown, err.to_string())
}
