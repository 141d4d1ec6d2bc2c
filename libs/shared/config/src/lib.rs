use std::env;
use tracing::warn;

pub const DEFAULT_DOCTORS_DATA_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctors_data_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            doctors_data_url: env::var("DOCTORS_DATA_URL")
                .unwrap_or_else(|_| {
                    warn!("DOCTORS_DATA_URL not set, using default");
                    DEFAULT_DOCTORS_DATA_URL.to_string()
                }),
            port: match env::var("DIRECTORY_PORT") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("DIRECTORY_PORT={} is not a valid port, using {}", raw, DEFAULT_PORT);
                    DEFAULT_PORT
                }),
                Err(_) => DEFAULT_PORT,
            },
        };

        if !config.is_configured() {
            warn!("Doctor directory not fully configured - dataset URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.doctors_data_url.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doctors_data_url: DEFAULT_DOCTORS_DATA_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
