/// Predictor Client — the single point of entry for calls to the prediction service.
///
/// No other module talks to the service over HTTP. Callers depend on the
/// [`Predictor`] trait so the session can be driven by a fake in tests.
///
/// One request per call: no retries, no client-side timeout, no cancellation.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::PredictionRequest;

const PREDICT_PATH: &str = "/api/predict";
const HEALTH_PATH: &str = "/api/health";

/// Shown for every failure that is not a validation error from the service.
pub const FALLBACK_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Error)]
pub enum PredictError {
    /// The service rejected the request and listed why.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PredictError {
    /// The text shown to the user inline under the form.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Validation(errors) => errors.join("; "),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Successful response body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub predicted_salary_inr: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
}

/// Response body of `GET /api/health` on the prediction service.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    errors: Option<Vec<String>>,
}

/// Anything that can turn a form into a salary prediction.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError>;

    async fn health(&self) -> Result<ServiceHealth, PredictError>;
}

/// HTTP client for the prediction service.
#[derive(Clone)]
pub struct PredictorClient {
    client: Client,
    base_url: String,
}

impl PredictorClient {
    /// `base_url` must not end with a slash; see `config::normalize_base`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PredictError> {
        Ok(Self {
            client: Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Predictor for PredictorClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let url = format!("{}{PREDICT_PATH}", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(failure_from_body(status.as_u16(), body));
        }

        let prediction: Prediction = serde_json::from_str(&body)?;

        debug!(
            "Prediction succeeded: predicted_salary_inr={}, model_version={:?}",
            prediction.predicted_salary_inr, prediction.model_version
        );

        Ok(prediction)
    }

    async fn health(&self) -> Result<ServiceHealth, PredictError> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PredictError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Maps a non-2xx body to an error. A non-empty `errors` list becomes a
/// validation error; any other shape is a plain status error.
fn failure_from_body(status: u16, body: String) -> PredictError {
    match serde_json::from_str::<FailureBody>(&body) {
        Ok(FailureBody {
            errors: Some(errors),
        }) if !errors.is_empty() => PredictError::Validation(errors),
        _ => {
            warn!("Prediction service returned {}: {}", status, body);
            PredictError::Status { status, body }
        }
    }
}
