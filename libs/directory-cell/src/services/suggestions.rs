use crate::models::DoctorRecord;

pub const MAX_SUGGESTIONS: usize = 5;

/// Up to [`MAX_SUGGESTIONS`] records whose name contains `input`, in dataset order.
/// Blank input yields nothing.
pub fn suggest<'a>(dataset: &'a [DoctorRecord], input: &str) -> Vec<&'a DoctorRecord> {
    suggestion_indices(dataset, input)
        .into_iter()
        .map(|i| &dataset[i])
        .collect()
}

pub fn suggestion_indices(dataset: &[DoctorRecord], input: &str) -> Vec<usize> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    dataset
        .iter()
        .enumerate()
        .filter(|(_, doctor)| doctor.name_contains(&needle))
        .map(|(index, _)| index)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// The dismissible suggestion dropdown under the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    entries: Vec<usize>,
    visible: bool,
}

impl SuggestionPanel {
    /// Recompute on a keystroke. Blank input clears and hides the panel.
    pub fn update(&mut self, dataset: &[DoctorRecord], input: &str) {
        self.entries = suggestion_indices(dataset, input);
        self.visible = !input.trim().is_empty();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Dataset positions of the current suggestions.
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn entry(&self, position: usize) -> Option<usize> {
        self.entries.get(position).copied()
    }
}
