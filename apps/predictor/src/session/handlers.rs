use std::collections::HashMap;

use axum::{extract::State, response::Html, Form, Json};

use crate::errors::AppError;
use crate::models::request::FORM_FIELDS;
use crate::models::{FieldEdit, FormError, PredictionRequest};
use crate::render::render_page;
use crate::session::SessionSnapshot;
use crate::state::AppState;

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    let session = &state.session;
    Html(render_page(
        &session.form(),
        &session.result(),
        session.is_busy(),
        None,
    ))
}

/// POST /
///
/// Applies the submitted form fields, then runs a prediction. Rejected
/// edits are shown inline, the accepted ones are kept, and the service is
/// not called.
pub async fn handle_page_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let session = &state.session;

    let rejected = apply_form_fields(&state, &fields);
    let notice = if rejected.is_empty() {
        session.submit(state.predictor.as_ref()).await;
        None
    } else {
        Some(
            rejected
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        )
    };

    Html(render_page(
        &session.form(),
        &session.result(),
        session.is_busy(),
        notice.as_deref(),
    ))
}

/// GET /api/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

/// PATCH /api/session/form
pub async fn handle_edit_form(
    State(state): State<AppState>,
    Json(edit): Json<FieldEdit>,
) -> Result<Json<PredictionRequest>, AppError> {
    if edit.field.trim().is_empty() {
        return Err(AppError::Validation("field cannot be empty".to_string()));
    }

    let form = state.session.apply_edit(&edit.field, &edit.raw())?;
    Ok(Json(form))
}

/// POST /api/session/predict
///
/// Always 200: a failed prediction is reported in `result.error`.
pub async fn handle_predict(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.submit(state.predictor.as_ref()).await;
    Json(state.session.snapshot())
}

/// Applies every known field in form order and returns the rejected edits.
/// A rejected field keeps its previous value. Unknown keys (such as the
/// submit button) are ignored.
fn apply_form_fields(state: &AppState, fields: &HashMap<String, String>) -> Vec<FormError> {
    FORM_FIELDS
        .iter()
        .filter_map(|&name| fields.get(name).map(|raw| (name, raw)))
        .filter_map(|(name, raw)| state.session.apply_edit(name, raw).err())
        .collect()
}
