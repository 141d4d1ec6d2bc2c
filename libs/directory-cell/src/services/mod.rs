pub mod catalog;
pub mod directory;
pub mod engine;
pub mod loader;
pub mod query;
pub mod suggestions;

pub use catalog::DoctorCatalog;
pub use directory::{DoctorDirectory, LoadState, ReadinessGate};
pub use loader::{load_catalog, DoctorSource, HttpDoctorSource, StaticDoctorSource};
pub use query::{Location, MemoryLocation, QueryParams, QuerySync};
pub use suggestions::{SuggestionPanel, MAX_SUGGESTIONS};
