use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ScoringError;
use crate::pipeline::encoder::FeatureRecord;

/// Scoring result returned by the model service. `explanation` is an
/// opaque, model-supplied payload stored and returned verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub prediction: String,
    pub confidence: f64,
    #[serde(default)]
    pub explanation: Option<serde_json::Value>,
}

/// Abstraction over the external scoring service, so the orchestrator
/// and router tests can run against a mock.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Score one feature record. Any failure aborts the caller's request.
    async fn score(&self, features: &FeatureRecord) -> Result<ScoreResponse, ScoringError>;

    /// Fetch the model's feature schema, passed through to clients verbatim.
    async fn schema(&self) -> Result<serde_json::Value, ScoringError>;
}

/// Request body for the model service `/predict` endpoint.
#[derive(Serialize)]
struct ScoreRequest<'a> {
    features: &'a FeatureRecord,
}

/// HTTP client for the externally hosted scoring service.
pub struct HttpScoringClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpScoringClient {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs: timeout.as_secs(),
        }
    }

    /// Client for the configured model service URL and timeout.
    pub fn from_config() -> Self {
        Self::new(
            &crate::config::model_service_url(),
            crate::config::model_service_timeout(),
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ScoringError {
        if e.is_connect() {
            ScoringError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ScoringError::Timeout(self.timeout_secs)
        } else {
            ScoringError::HttpClient(e.to_string())
        }
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn score(&self, features: &FeatureRecord) -> Result<ScoreResponse, ScoringError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(%url, "scoring request");

        let response = self
            .client
            .post(&url)
            .json(&ScoreRequest { features })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ScoreResponse>()
            .await
            .map_err(|e| ScoringError::ResponseParsing(e.to_string()))
    }

    async fn schema(&self) -> Result<serde_json::Value, ScoringError> {
        let url = format!("{}/schema", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ScoringError::ResponseParsing(e.to_string()))
    }
}

/// Mock scoring client for tests — returns a fixed response or a
/// fixed failure, and records whether it was called.
pub struct MockScoringClient {
    response: Result<ScoreResponse, String>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockScoringClient {
    pub fn with_prediction(prediction: &str, confidence: f64) -> Self {
        Self {
            response: Ok(ScoreResponse {
                prediction: prediction.to_string(),
                confidence,
                explanation: None,
            }),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn with_response(response: ScoreResponse) -> Self {
        Self {
            response: Ok(response),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoringClient for MockScoringClient {
    async fn score(&self, _features: &FeatureRecord) -> Result<ScoreResponse, ScoringError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(r) => Ok(r.clone()),
            Err(msg) => Err(ScoringError::Connection(msg.clone())),
        }
    }

    async fn schema(&self) -> Result<serde_json::Value, ScoringError> {
        Ok(serde_json::json!({
            "numeric": ["Age"],
            "categorical": ["Sex", "SmokingHistory", "DietType", "ExerciseFrequency"],
            "symptoms": crate::pipeline::encoder::SYMPTOM_VOCABULARY,
        }))
    }
}
