pub mod static_json;

pub use static_json::{FetchError, StaticJsonClient};
