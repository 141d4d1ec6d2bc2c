// libs/directory-cell/src/services/loader.rs
use async_trait::async_trait;
use tracing::{debug, error, info};

use shared_config::AppConfig;
use shared_source::StaticJsonClient;

use crate::models::{DoctorRecord, LoadError};
use crate::services::catalog::DoctorCatalog;

/// Anything that can hand over the doctor feed in one shot.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, LoadError>;
}

/// The remote static JSON file.
pub struct HttpDoctorSource {
    client: StaticJsonClient,
    url: String,
}

impl HttpDoctorSource {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_url(&config.doctors_data_url)
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            client: StaticJsonClient::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, LoadError> {
        debug!("Fetching doctor feed from {}", self.url);
        let doctors: Vec<DoctorRecord> = self.client.get(&self.url).await?;
        Ok(doctors)
    }
}

/// A feed that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDoctorSource {
    doctors: Vec<DoctorRecord>,
}

impl StaticDoctorSource {
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DoctorSource for StaticDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, LoadError> {
        Ok(self.doctors.clone())
    }
}

/// Fetch the feed once and derive the catalog. No retry.
pub async fn load_catalog(source: &dyn DoctorSource) -> Result<DoctorCatalog, LoadError> {
    match source.fetch_doctors().await {
        Ok(doctors) => {
            let catalog = DoctorCatalog::new(doctors);
            info!(
                "Loaded {} doctors across {} specialties",
                catalog.len(),
                catalog.specialties().len()
            );
            Ok(catalog)
        }
        Err(e) => {
            error!("Failed to load doctor feed: {}", e);
            Err(e)
        }
    }
}
