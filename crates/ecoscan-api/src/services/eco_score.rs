//! Client for the external eco-score (ML scoring) service.
//!
//! The scoring payload is opaque here: the product descriptor is forwarded as-is
//! and whatever JSON the service answers with is handed back.

use std::time::Duration;

use anyhow::Context;
use ecoscan_core::AppError;
use serde_json::Value;

const ECO_SCORE_PATH: &str = "/api/get-eco-score";

#[derive(Clone)]
pub struct EcoScoreClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl EcoScoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create eco-score HTTP client")?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ECO_SCORE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forward `product` and return the service's JSON answer.
    ///
    /// Unreachable service, non-2xx status and non-JSON bodies all fail with `AppError::Upstream`.
    pub async fn get_eco_score(&self, product: &Value) -> Result<Value, AppError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(product)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "Eco-score service unreachable");
                AppError::Upstream("Eco-score service is unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                body = %body,
                endpoint = %self.endpoint,
                "Eco-score service returned an error status"
            );
            return Err(AppError::Upstream(format!(
                "Eco-score service returned status {}",
                status.as_u16()
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::warn!(error = %e, endpoint = %self.endpoint, "Eco-score response is not JSON");
            AppError::Upstream("Eco-score service returned an invalid response".to_string())
        })
    }
}
