use std::collections::BTreeSet;

use crate::models::{DoctorId, DoctorRecord, FilterState};
use crate::services::engine;
use crate::services::suggestions;

/// Immutable snapshot of the loaded feed plus the specialty list derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorCatalog {
    doctors: Vec<DoctorRecord>,
    specialties: Vec<String>,
}

impl DoctorCatalog {
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        let specialties = collect_specialties(&doctors);
        Self { doctors, specialties }
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    /// Every specialty name across the feed, deduplicated and sorted.
    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn find(&self, id: &DoctorId) -> Option<&DoctorRecord> {
        self.doctors.iter().find(|doctor| &doctor.id == id)
    }

    pub fn search(&self, filters: &FilterState) -> Vec<&DoctorRecord> {
        engine::apply_filters(&self.doctors, filters)
    }

    pub fn suggest(&self, input: &str) -> Vec<&DoctorRecord> {
        suggestions::suggest(&self.doctors, input)
    }
}

fn collect_specialties(doctors: &[DoctorRecord]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(DoctorRecord::speciality_names)
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
