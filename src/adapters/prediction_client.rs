//! HTTP client for the risk-prediction service

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ServiceSettings;
use crate::domain::prediction::{ErrorBody, PredictionPayload, PredictionPort, PredictionResponse};
use crate::submission::error::{PredictionError, PredictionResult};

/// `POST {base_url}/predict` with the payload as JSON
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(settings: &ServiceSettings) -> PredictionResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

#[async_trait]
impl PredictionPort for HttpPredictionClient {
    async fn predict(&self, payload: &PredictionPayload) -> PredictionResult<PredictionResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .ok()
                .and_then(ErrorBody::into_message);
            tracing::debug!(status = status.as_u16(), "Prediction service returned an error");
            return Err(PredictionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PredictionResponse>()
            .await
            .map_err(|e| PredictionError::Parse(format!("Failed to parse response: {}", e)))
    }
}
