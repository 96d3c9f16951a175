//! Thin reqwest wrapper for exercising the API in integration tests.

use veridict::constants::VERIDICT_STATUS_HEADER;
use veridict::policy::Prediction;

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn root(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    pub async fn health(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    /// Posts text to /predict, returning the parsed prediction and the
    /// outcome class from the status header.
    pub async fn predict(&self, text: &str) -> Result<(Prediction, String), reqwest::Error> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;

        let status = header_value(&response);
        let prediction = response.json().await?;

        Ok((prediction, status))
    }

    /// Posts text to /predict without failing on error statuses, returning
    /// the HTTP status code and raw JSON body.
    pub async fn predict_raw(
        &self,
        body: &serde_json::Value,
    ) -> Result<(reqwest::StatusCode, serde_json::Value), reqwest::Error> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.json().await?;

        Ok((status, body))
    }
}

fn header_value(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(VERIDICT_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
