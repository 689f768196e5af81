pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form page
        .route(
            "/",
            get(handlers::handle_page).post(handlers::handle_page_submit),
        )
        // Session API
        .route("/api/session", get(handlers::handle_get_session))
        .route("/api/session/form", patch(handlers::handle_edit_form))
        .route("/api/session/predict", post(handlers::handle_predict))
        .with_state(state)
}
