//! Material catalog - page ordering for refractive-index catalogs
//!
//! This module loads a Shelf → Book → Page catalog, reorders the pages of
//! every book newest-first by the year in their name, and writes the result
//! back while keeping dividers and all other entries in place.
//!
//! # Overview
//!
//! ```text
//! catalog-nk.yml
//!     │
//!     ▼
//! Catalog::load_from_path   ← document.rs
//!     │
//!     ▼
//! reorder_catalog           ← reorder.rs (per shelf → per book)
//!     │                        uses extract_year (year.rs)
//!     ▼
//! Catalog::save_to_path     ← document.rs
//!     │
//!     ▼
//! catalog-nk.yml.sorted
//! ```

mod document;
mod node;
mod reorder;
mod rows;
mod year;

pub use node::{Catalog, CatalogNode, CatalogStats, NodeKind};
pub use reorder::{
    is_canonical, reorder_book, reorder_book_children, reorder_catalog,
    reorder_catalog_with_report, BookReport, ReorderReport,
};
pub use rows::{flatten_rows, CatalogRow};
pub use year::{extract_year, UNKNOWN_YEAR};

use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Load `input`, reorder every book, and write the result to `output`
///
/// `input` and `output` may be the same path. Nothing is written if loading
/// or reordering fails.
pub fn sort_catalog_file(input: &Path, output: &Path) -> Result<ReorderReport> {
    let catalog = Catalog::load_from_path(input)?;
    let (sorted, report) = reorder_catalog_with_report(catalog)?;
    sorted.save_to_path(output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        books_changed = report.books_changed(),
        "Sorted catalog written"
    );
    Ok(report)
}
