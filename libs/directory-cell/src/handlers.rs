use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{DoctorId, LoadError};
use crate::services::{
    catalog::DoctorCatalog,
    loader::{load_catalog, DoctorSource, HttpDoctorSource},
    query,
};

/// Feed loaded once at startup, shared read-only by every request.
pub struct DirectoryState {
    pub config: AppConfig,
    catalog: Result<Arc<DoctorCatalog>, LoadError>,
}

impl DirectoryState {
    pub async fn load(config: AppConfig) -> Self {
        let source = HttpDoctorSource::new(&config);
        Self::from_source(config, &source).await
    }

    pub async fn from_source(config: AppConfig, source: &dyn DoctorSource) -> Self {
        let catalog = load_catalog(source).await.map(Arc::new);
        if catalog.is_err() {
            warn!("Doctor directory will answer 503 until restarted");
        }
        Self { config, catalog }
    }

    pub fn with_catalog(config: AppConfig, catalog: DoctorCatalog) -> Self {
        Self {
            config,
            catalog: Ok(Arc::new(catalog)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.catalog.is_ok()
    }

    pub fn catalog(&self) -> Result<&DoctorCatalog, AppError> {
        match &self.catalog {
            Ok(catalog) => Ok(catalog.as_ref()),
            Err(e) => Err(AppError::ServiceUnavailable(e.user_message().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub q: Option<String>,
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<DirectoryState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, AppError> {
    let catalog = state.catalog()?;

    let filters = query::decode(raw.as_deref().unwrap_or_default());
    let doctors = catalog.search(&filters);

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len(),
        "query": query::encode(&filters),
        "filters": filters
    })))
}

#[axum::debug_handler]
pub async fn get_specialties(
    State(state): State<Arc<DirectoryState>>,
) -> Result<Json<Value>, AppError> {
    let catalog = state.catalog()?;

    Ok(Json(json!({
        "specialties": catalog.specialties(),
        "total": catalog.specialties().len()
    })))
}

#[axum::debug_handler]
pub async fn get_suggestions(
    State(state): State<Arc<DirectoryState>>,
    Query(params): Query<SuggestionQuery>,
) -> Result<Json<Value>, AppError> {
    let catalog = state.catalog()?;
    let input = params.q.unwrap_or_default();
    let suggestions = catalog.suggest(&input);

    Ok(Json(json!({
        "suggestions": suggestions,
        "total": suggestions.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DirectoryState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog = state.catalog()?;

    let doctor = catalog.find(&DoctorId::new(doctor_id))
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}
