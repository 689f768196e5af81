use std::sync::Arc;

use crate::config::Config;
use crate::predictor_client::Predictor;
use crate::session::PredictorSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single UI session served by this process.
    pub session: Arc<PredictorSession>,
    /// Prediction backend. `PredictorClient` in production.
    pub predictor: Arc<dyn Predictor>,
    pub config: Config,
}
