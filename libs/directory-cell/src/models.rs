use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use shared_source::FetchError;

/// Message shown to the user when the dataset cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load doctors. Please try again later.";

/// Opaque doctor identifier. The feed ships either strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DoctorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => DoctorId(text),
            RawId::Number(number) => DoctorId(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicAddress {
    pub locality: String,
    pub city: String,
    #[serde(alias = "addressLine1", alias = "line1")]
    pub address_line1: String,
    pub location: String,
    #[serde(alias = "logoUrl")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clinic {
    pub name: String,
    pub address: ClinicAddress,
}

/// One entry of the remote doctor feed. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    #[serde(default)]
    pub id: DoctorId,
    pub name: String,
    #[serde(default, alias = "nameInitials")]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, rename = "doctor_introduction", alias = "doctorIntroduction", alias = "introduction")]
    pub introduction: Option<String>,
    #[serde(default)]
    pub specialities: Vec<Speciality>,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub clinic: Clinic,
    #[serde(default, alias = "videoConsult")]
    pub video_consult: bool,
    #[serde(default, alias = "inClinic")]
    pub in_clinic: bool,
}

impl DoctorRecord {
    /// Fee with every non-digit stripped, `None` when nothing numeric remains.
    pub fn fee_amount(&self) -> Option<u64> {
        parse_fee(&self.fees)
    }

    /// Integer prefix of the experience text, e.g. `15` for "15 Years".
    pub fn experience_years(&self) -> Option<u32> {
        parse_experience(&self.experience)
    }

    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    pub fn has_any_speciality(&self, selected: &[String]) -> bool {
        self.speciality_names()
            .any(|name| selected.iter().any(|wanted| wanted == name))
    }

    pub fn supports(&self, mode: ConsultMode) -> bool {
        match mode {
            ConsultMode::Video => self.video_consult,
            ConsultMode::Clinic => self.in_clinic,
        }
    }

    pub fn name_contains(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

pub fn parse_fee(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

pub fn parse_experience(raw: &str) -> Option<u32> {
    let token = raw.split_whitespace().next()?;
    let digits: String = token.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultMode {
    Video,
    Clinic,
}

impl ConsultMode {
    pub fn as_query_value(self) -> &'static str {
        match self {
            ConsultMode::Video => "video",
            ConsultMode::Clinic => "clinic",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ConsultMode::Video),
            "clinic" => Some(ConsultMode::Clinic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "fees")]
    FeeAscending,
    #[serde(rename = "experience")]
    ExperienceDescending,
}

impl SortKey {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::FeeAscending => "fees",
            SortKey::ExperienceDescending => "experience",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::FeeAscending),
            "experience" => Some(SortKey::ExperienceDescending),
            _ => None,
        }
    }
}

/// Everything that drives the visible list. Replaced as a whole on every action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_text: String,
    pub consult_mode: Option<ConsultMode>,
    /// Set semantics, insertion order kept for serialization.
    pub selected_specialties: Vec<String>,
    pub sort_key: Option<SortKey>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.consult_mode.is_none()
            && self.selected_specialties.is_empty()
            && self.sort_key.is_none()
    }

    pub fn with_search_text(&self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..self.clone()
        }
    }

    /// Selecting the active mode clears it, any other mode replaces it.
    pub fn toggle_consult_mode(&self, mode: ConsultMode) -> Self {
        Self {
            consult_mode: if self.consult_mode == Some(mode) { None } else { Some(mode) },
            ..self.clone()
        }
    }

    pub fn toggle_sort_key(&self, key: SortKey) -> Self {
        Self {
            sort_key: if self.sort_key == Some(key) { None } else { Some(key) },
            ..self.clone()
        }
    }

    /// Add or remove `name`. Empty names cannot be carried in the URL and are ignored.
    pub fn toggle_specialty(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        let mut selected = self.selected_specialties.clone();
        match selected.iter().position(|s| s == name) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(name.to_string()),
        }
        Self {
            selected_specialties: selected,
            ..self.clone()
        }
    }

    pub fn is_specialty_selected(&self, name: &str) -> bool {
        self.selected_specialties.iter().any(|s| s == name)
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network error while fetching doctors: {0}")]
    Network(String),

    #[error("Doctor feed returned status {status}")]
    Status { status: u16 },

    #[error("Malformed doctor feed: {0}")]
    Malformed(String),
}

impl LoadError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }
}

impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(e) if e.is_decode() => LoadError::Malformed(e.to_string()),
            FetchError::Network(e) => LoadError::Network(e.to_string()),
            FetchError::Status { status, .. } => LoadError::Status { status: status.as_u16() },
            FetchError::Decode(e) => LoadError::Malformed(e.to_string()),
        }
    }
}
