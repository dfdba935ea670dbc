mod content_provider;
mod store;
mod validate;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider, MemoryContentProvider};
pub use store::ConfigStore;
pub use validate::Validate;
