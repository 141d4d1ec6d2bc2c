// libs/directory-cell/src/services/directory.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{ConsultMode, DoctorRecord, FilterState, LoadError, SortKey};
use crate::services::catalog::DoctorCatalog;
use crate::services::engine;
use crate::services::loader::{load_catalog, DoctorSource};
use crate::services::query::{self, Location, QuerySync};
use crate::services::suggestions::SuggestionPanel;

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(LoadError),
}

/// Hydration from the URL waits until both the feed and the location are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessGate {
    pub dataset_loaded: bool,
    pub location_read: bool,
    hydrated: bool,
}

impl ReadinessGate {
    pub fn can_hydrate(&self) -> bool {
        self.dataset_loaded && self.location_read && !self.hydrated
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    fn mark_hydrated(&mut self) {
        self.hydrated = true;
    }
}

/// One browsing session over the doctor feed.
///
/// Every user action replaces the [`FilterState`] as a whole, recomputes the
/// visible list and, once hydrated, rewrites the URL through the same
/// encoder used to read it. Before hydration the initial URL is left alone.
pub struct DoctorDirectory<L: Location> {
    load_state: LoadState,
    catalog: Arc<DoctorCatalog>,
    filters: FilterState,
    visible: Vec<usize>,
    suggestions: SuggestionPanel,
    gate: ReadinessGate,
    sync: QuerySync<L>,
}

impl<L: Location> DoctorDirectory<L> {
    pub fn new(location: L) -> Self {
        Self {
            load_state: LoadState::Loading,
            catalog: Arc::new(DoctorCatalog::default()),
            filters: FilterState::default(),
            visible: Vec::new(),
            suggestions: SuggestionPanel::default(),
            gate: ReadinessGate::default(),
            sync: QuerySync::new(location),
        }
    }

    /// Read the location and load the feed, then hydrate from the URL.
    pub async fn mount(location: L, source: &dyn DoctorSource) -> Self {
        let mut directory = Self::new(location);
        directory.read_location();
        directory.load(source).await;
        directory
    }

    pub fn read_location(&mut self) {
        self.sync.read();
        self.gate.location_read = true;
        self.try_hydrate();
    }

    /// Fetch the feed. Only the first call does anything; failure is final.
    pub async fn load(&mut self, source: &dyn DoctorSource) {
        if !matches!(self.load_state, LoadState::Loading) {
            warn!("Doctor feed already requested for this session, ignoring reload");
            return;
        }

        match load_catalog(source).await {
            Ok(catalog) => self.install_catalog(catalog),
            Err(e) => {
                self.load_state = LoadState::Failed(e);
            }
        }
    }

    fn install_catalog(&mut self, catalog: DoctorCatalog) {
        self.catalog = Arc::new(catalog);
        self.load_state = LoadState::Ready;
        self.gate.dataset_loaded = true;
        self.recompute();
        self.try_hydrate();
    }

    fn try_hydrate(&mut self) {
        if !self.gate.can_hydrate() {
            return;
        }
        let Some(params) = self.sync.params() else {
            return;
        };

        let filters = query::from_params(params);
        info!("Hydrating filters from URL: {:?}", filters);
        self.gate.mark_hydrated();
        self.apply(filters);
    }

    fn apply(&mut self, next: FilterState) {
        self.filters = next;
        self.recompute();
        if self.gate.is_hydrated() {
            self.sync.push_filters(&self.filters);
        }
    }

    fn recompute(&mut self) {
        self.visible = engine::visible_indices(self.catalog.doctors(), &self.filters);
        debug!("{} of {} doctors visible", self.visible.len(), self.catalog.len());
    }

    /// Keystroke in the search box: updates the filter and the suggestion panel.
    pub fn type_search(&mut self, input: &str) {
        self.suggestions.update(self.catalog.doctors(), input);
        let next = self.filters.with_search_text(input);
        self.apply(next);
    }

    /// Pick the `position`-th suggestion. Returns the chosen record, if any.
    pub fn select_suggestion(&mut self, position: usize) -> Option<&DoctorRecord> {
        let index = self.suggestions.entry(position).filter(|_| self.suggestions.is_visible())?;
        let name = self.catalog.doctors()[index].name.clone();

        self.suggestions.hide();
        let next = self.filters.with_search_text(name);
        self.apply(next);
        self.catalog.doctors().get(index)
    }

    /// Interaction outside the suggestion panel.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.hide();
    }

    pub fn toggle_consult_mode(&mut self, mode: ConsultMode) {
        let next = self.filters.toggle_consult_mode(mode);
        self.apply(next);
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        let next = self.filters.toggle_specialty(name);
        self.apply(next);
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        let next = self.filters.toggle_sort_key(key);
        self.apply(next);
    }

    /// Reset every filter. The emptied search box also clears the suggestion panel.
    pub fn clear_all(&mut self) {
        self.suggestions.update(self.catalog.doctors(), "");
        self.apply(FilterState::default());
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn visible(&self) -> Vec<&DoctorRecord> {
        self.visible
            .iter()
            .map(|&i| &self.catalog.doctors()[i])
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn suggestions(&self) -> Vec<&DoctorRecord> {
        if !self.suggestions.is_visible() {
            return Vec::new();
        }
        self.suggestions
            .entries()
            .iter()
            .map(|&i| &self.catalog.doctors()[i])
            .collect()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions.is_visible()
    }

    pub fn specialties(&self) -> &[String] {
        self.catalog.specialties()
    }

    pub fn catalog(&self) -> Arc<DoctorCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// User-facing message when the feed failed to load.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.load_state {
            LoadState::Failed(e) => Some(e.user_message()),
            _ => None,
        }
    }

    pub fn readiness(&self) -> ReadinessGate {
        self.gate
    }

    pub fn location(&self) -> &L {
        self.sync.location()
    }
}
