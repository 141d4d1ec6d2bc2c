// libs/directory-cell/src/services/query.rs
use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::models::{ConsultMode, FilterState, SortKey};

pub const SEARCH_KEY: &str = "search";
pub const CONSULT_TYPE_KEY: &str = "consultType";
pub const SPECIALTIES_KEY: &str = "specialties";
pub const SORT_BY_KEY: &str = "sortBy";

/// Decoded query parameters. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut values = HashMap::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values
                .entry(decode_component(key).into_owned())
                .or_insert_with(|| decode_component(value).into_owned());
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['+', '%']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize the filters into a query string without the leading `?`.
///
/// Keys are written in a fixed order and empty dimensions are omitted, so the
/// all-unset state encodes to an empty string.
pub fn encode(filters: &FilterState) -> String {
    let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(4);

    if !filters.search_text.is_empty() {
        pairs.push((SEARCH_KEY, Cow::Borrowed(filters.search_text.as_str())));
    }
    if let Some(mode) = filters.consult_mode {
        pairs.push((CONSULT_TYPE_KEY, Cow::Borrowed(mode.as_query_value())));
    }
    if !filters.selected_specialties.is_empty() {
        pairs.push((SPECIALTIES_KEY, Cow::Owned(filters.selected_specialties.join(","))));
    }
    if let Some(key) = filters.sort_key {
        pairs.push((SORT_BY_KEY, Cow::Borrowed(key.as_query_value())));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn decode(query: &str) -> FilterState {
    from_params(&QueryParams::parse(query))
}

/// Unknown values for `consultType` and `sortBy` leave that dimension unset.
pub fn from_params(params: &QueryParams) -> FilterState {
    let mut selected_specialties: Vec<String> = Vec::new();
    if let Some(raw) = params.get(SPECIALTIES_KEY) {
        for name in raw.split(',').filter(|name| !name.is_empty()) {
            if !selected_specialties.iter().any(|s| s == name) {
                selected_specialties.push(name.to_string());
            }
        }
    }

    FilterState {
        search_text: params.get(SEARCH_KEY).unwrap_or_default().to_string(),
        consult_mode: params.get(CONSULT_TYPE_KEY).and_then(ConsultMode::from_query_value),
        selected_specialties,
        sort_key: params.get(SORT_BY_KEY).and_then(SortKey::from_query_value),
    }
}

/// Where the directory's URL lives: a browser address bar or an in-memory stand-in.
pub trait Location {
    fn path(&self) -> &str;

    /// Raw query string, without the leading `?`.
    fn query(&self) -> &str;

    /// Swap the current URL in place without adding a history entry.
    fn replace(&mut self, url: &str);
}

/// In-memory location with a browser-like history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    query: String,
    history: Vec<String>,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(url: &str) -> Self {
        let (path, query) = split_url(url);
        let history = vec![join_url(&path, &query)];
        Self {
            path,
            query,
            history,
            replacements: 0,
        }
    }

    pub fn url(&self) -> String {
        join_url(&self.path, &self.query)
    }

    /// Navigate to `url`, appending a history entry.
    pub fn navigate(&mut self, url: &str) {
        let (path, query) = split_url(url);
        self.path = path;
        self.query = query;
        self.history.push(self.url());
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn replace(&mut self, url: &str) {
        let (path, query) = split_url(url);
        self.path = path;
        self.query = query;
        let current = self.url();
        match self.history.last_mut() {
            Some(entry) => *entry = current,
            None => self.history.push(current),
        }
        self.replacements += 1;
    }
}

fn split_url(url: &str) -> (String, String) {
    let url = url.split('#').next().unwrap_or_default();
    match url.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (url.to_string(), String::new()),
    }
}

fn join_url(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Reads the location's query parameters once and writes filter changes back.
#[derive(Debug)]
pub struct QuerySync<L: Location> {
    location: L,
    params: Option<QueryParams>,
}

impl<L: Location> QuerySync<L> {
    pub fn new(location: L) -> Self {
        Self {
            location,
            params: None,
        }
    }

    /// Snapshot the current query string. Marks the synchronizer ready.
    pub fn read(&mut self) -> &QueryParams {
        let params = QueryParams::parse(self.location.query());
        debug!("Read {} query parameters from {}", params.len(), self.location.path());
        self.params.insert(params)
    }

    pub fn is_ready(&self) -> bool {
        self.params.is_some()
    }

    pub fn params(&self) -> Option<&QueryParams> {
        self.params.as_ref()
    }

    pub fn push(&mut self, url: &str) {
        debug!("Replacing location with {}", url);
        self.location.replace(url);
        self.params = Some(QueryParams::parse(self.location.query()));
    }

    /// Rewrite the URL on the current path so it reflects `filters`.
    pub fn push_filters(&mut self, filters: &FilterState) {
        let url = join_url(self.location.path(), &encode(filters));
        self.push(&url);
    }

    pub fn location(&self) -> &L {
        &self.location
    }
}
