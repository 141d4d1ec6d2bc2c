use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::handlers::{self, DirectoryState};

pub fn doctor_routes(state: Arc<DirectoryState>) -> Router {
    // Read-only, no authentication
    Router::new()
        .route("/search", get(handlers::search_doctors))
        .route("/specialties", get(handlers::get_specialties))
        .route("/suggestions", get(handlers::get_suggestions))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
