//! refcat core library exports

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{reorder_catalog, sort_catalog_file, Catalog, CatalogNode, NodeKind};
pub use error::{CatalogError, Result};
