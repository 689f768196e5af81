//! One UI session: the editable form, the displayed result, and the busy flag.
//!
//! A request cycle goes `Idle -> Pending -> {Success, Failed} -> Idle`.
//! Overlapping cycles are allowed; whichever resolves last owns the display.

pub mod handlers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::result::ResultView;
use crate::models::{FormError, PredictionRequest, PredictionResult};
use crate::predictor_client::Predictor;

#[derive(Debug, Default)]
struct Outcome {
    result: PredictionResult,
    model_version: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

/// JSON view of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub form: PredictionRequest,
    pub result: ResultView,
    pub busy: bool,
    pub model_version: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct PredictorSession {
    form: RwLock<PredictionRequest>,
    outcome: RwLock<Outcome>,
    in_flight: AtomicUsize,
}

/// Holds the busy flag for the lifetime of one cycle, including when the
/// cycle's future is dropped mid-request.
struct BusyGuard<'a> {
    in_flight: &'a AtomicUsize,
    overlapping: bool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(in_flight: &'a AtomicUsize) -> Self {
        let previous = in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight,
            overlapping: previous > 0,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PredictorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> PredictionRequest {
        read(&self.form).clone()
    }

    pub fn result(&self) -> PredictionResult {
        read(&self.outcome).result.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Applies one raw edit and returns the updated form.
    pub fn apply_edit(&self, field: &str, raw: &str) -> Result<PredictionRequest, FormError> {
        let mut form = write(&self.form);
        form.apply_edit(field, raw)?;
        Ok(form.clone())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let form = self.form();
        let outcome = read(&self.outcome);
        SessionSnapshot {
            form,
            result: outcome.result.view(),
            busy: self.is_busy(),
            model_version: outcome.model_version.clone(),
            updated_at: outcome.updated_at,
        }
    }

    /// Runs one prediction cycle against the current form and records the outcome.
    ///
    /// Never fails: service errors become `PredictionResult::Error` so the form
    /// stays usable.
    pub async fn submit(&self, predictor: &dyn Predictor) -> PredictionResult {
        let cycle_id = Uuid::new_v4();
        self.run_cycle(predictor)
            .instrument(info_span!("prediction_cycle", %cycle_id))
            .await
    }

    async fn run_cycle(&self, predictor: &dyn Predictor) -> PredictionResult {
        let request = self.form();
        let busy = BusyGuard::acquire(&self.in_flight);
        if busy.overlapping {
            // Not de-duplicated: the later resolution overwrites the earlier one.
            warn!("Prediction started while another is in flight");
        }

        let (result, model_version) = match predictor.predict(&request).await {
            Ok(prediction) => {
                info!(
                    "Prediction received: {} {}",
                    prediction.predicted_salary_inr,
                    prediction.currency.as_deref().unwrap_or("INR")
                );
                (
                    PredictionResult::Value(prediction.predicted_salary_inr),
                    prediction.model_version,
                )
            }
            Err(e) => {
                warn!("Prediction failed: {e}");
                (PredictionResult::Error(e.user_message()), None)
            }
        };

        {
            let mut outcome = write(&self.outcome);
            outcome.result = result.clone();
            outcome.model_version = model_version;
            outcome.updated_at = Some(Utc::now());
        }

        drop(busy);
        result
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
