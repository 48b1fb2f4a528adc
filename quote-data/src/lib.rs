pub mod loader;

pub use loader::{CatalogLoader, CatalogLoaderError, SAMPLE_CATALOG_TOML};
