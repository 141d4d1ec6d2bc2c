// libs/directory-cell/src/services/engine.rs
use std::cmp::Reverse;

use crate::models::{DoctorRecord, FilterState, SortKey};

/// Positions of the visible records within `dataset`, in display order.
///
/// Filters run first (search, consultation mode, specialties), the sort runs
/// last. Records whose fee or experience has no number sort after every
/// record that has one, in either direction, and keep dataset order among
/// themselves.
pub fn visible_indices(dataset: &[DoctorRecord], filters: &FilterState) -> Vec<usize> {
    let needle = filters.search_text.to_lowercase();

    let mut indices: Vec<usize> = dataset
        .iter()
        .enumerate()
        .filter(|(_, doctor)| needle.is_empty() || doctor.name_contains(&needle))
        .filter(|(_, doctor)| filters.consult_mode.map_or(true, |mode| doctor.supports(mode)))
        .filter(|(_, doctor)| {
            filters.selected_specialties.is_empty()
                || doctor.has_any_speciality(&filters.selected_specialties)
        })
        .map(|(index, _)| index)
        .collect();

    // sort_by_cached_key is stable
    match filters.sort_key {
        Some(SortKey::FeeAscending) => {
            indices.sort_by_cached_key(|&i| {
                let fee = dataset[i].fee_amount();
                (fee.is_none(), fee)
            });
        }
        Some(SortKey::ExperienceDescending) => {
            indices.sort_by_cached_key(|&i| {
                let years = dataset[i].experience_years();
                (years.is_none(), Reverse(years))
            });
        }
        None => {}
    }

    indices
}

/// The visible list as borrowed records. Never mutates `dataset`.
pub fn apply_filters<'a>(dataset: &'a [DoctorRecord], filters: &FilterState) -> Vec<&'a DoctorRecord> {
    visible_indices(dataset, filters)
        .into_iter()
        .map(|i| &dataset[i])
        .collect()
}
