use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use directory_cell::{doctor_routes, DirectoryState};

pub fn create_router(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctor Directory API is running!" }))
        .nest("/doctors", doctor_routes(state))
}
