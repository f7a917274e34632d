//! Flat row view of a catalog
//!
//! One row per page, carrying the ids and names of its shelf and book.
//! Used by the CLI's tabular and JSON exports.

use serde::{Deserialize, Serialize};

use super::node::{Catalog, CatalogNode};

/// A single page together with its containing shelf and book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub shelf_id: Option<String>,
    pub shelf_name: Option<String>,
    pub book_id: Option<String>,
    pub book_name: Option<String>,
    pub page_id: Option<String>,
    pub page_name: Option<String>,
}

impl CatalogRow {
    fn new(shelf: &CatalogNode, book: &CatalogNode, page: &CatalogNode) -> Self {
        Self {
            shelf_id: shelf.id.clone(),
            shelf_name: shelf.display_name.clone(),
            book_id: book.id.clone(),
            book_name: book.display_name.clone(),
            page_id: page.id.clone(),
            page_name: page.display_name.clone(),
        }
    }

    /// Publication year of the page, or the unknown-year sentinel
    pub fn year(&self) -> u32 {
        super::extract_year(self.page_name.as_deref().unwrap_or(""))
    }
}

/// Flatten every page under a shelf's books, in document order
///
/// Dividers are skipped at every level.
pub fn flatten_rows(catalog: &Catalog) -> Vec<CatalogRow> {
    catalog
        .books()
        .flat_map(|(shelf, book)| {
            book.children
                .iter()
                .filter(|c| c.is_page())
                .map(move |page| CatalogRow::new(shelf, book, page))
        })
        .collect()
}
