//! Page reordering
//!
//! Pages inside each book are sorted newest-first by the year in their
//! display name. Every non-page child (dividers, anything unknown) keeps its
//! exact index; pages are threaded back into the slots pages occupied before.
//! Shelves and books are never reordered.
//!
//! All functions take their input by value and return a new tree. Each book
//! is handled independently, so no state is shared across books.

use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, error, info};

use super::node::{Catalog, CatalogNode, NodeKind};
use crate::error::{CatalogError, Result};

/// Outcome of reordering a single book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookReport {
    pub shelf: Option<String>,
    pub book: Option<String>,
    /// Number of page children
    pub pages: usize,
    /// Page slots whose occupant changed
    pub moved: usize,
}

impl BookReport {
    pub fn changed(&self) -> bool {
        self.moved > 0
    }
}

/// Summary of a catalog walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    pub books: Vec<BookReport>,
}

impl ReorderReport {
    pub fn books_changed(&self) -> usize {
        self.books.iter().filter(|b| b.changed()).count()
    }

    pub fn pages_total(&self) -> usize {
        self.books.iter().map(|b| b.pages).sum()
    }

    pub fn pages_moved(&self) -> usize {
        self.books.iter().map(|b| b.moved).sum()
    }

    /// Books whose page order was not already canonical
    pub fn changed_books(&self) -> impl Iterator<Item = &BookReport> {
        self.books.iter().filter(|b| b.changed())
    }

    pub fn is_unchanged(&self) -> bool {
        self.books_changed() == 0
    }
}

/// Reorder the page children of one book
///
/// Pages are stable-sorted by descending year; pages without a year sort
/// last. Non-page children stay at their original index. A child list with
/// no pages is returned as is.
pub fn reorder_book_children(children: Vec<CatalogNode>) -> Result<Vec<CatalogNode>> {
    reorder_pages("<anonymous>", children).map(|(children, _)| children)
}

/// Return a copy of `book` with its pages reordered
pub fn reorder_book(book: CatalogNode) -> Result<CatalogNode> {
    reorder_book_with_moves(book).map(|(book, _)| book)
}

/// Reorder every book of every shelf, producing a new catalog
pub fn reorder_catalog(catalog: Catalog) -> Result<Catalog> {
    reorder_catalog_with_report(catalog).map(|(catalog, _)| catalog)
}

/// Reorder every book and report which books changed
pub fn reorder_catalog_with_report(catalog: Catalog) -> Result<(Catalog, ReorderReport)> {
    let stats = catalog.stats();
    let mut report = ReorderReport::default();
    let mut shelves = Vec::with_capacity(catalog.shelves.len());

    for shelf in catalog.shelves {
        if shelf.kind != NodeKind::Shelf {
            shelves.push(shelf);
            continue;
        }

        let CatalogNode {
            kind,
            id,
            display_name,
            attributes,
            children,
            layout,
        } = shelf;

        let mut reordered = Vec::with_capacity(children.len());
        for child in children {
            if !child.is_book() {
                reordered.push(child);
                continue;
            }

            let book_id = child.id.clone();
            let pages = child.children.iter().filter(|c| c.is_page()).count();
            let (book, moved) = reorder_book_with_moves(child)?;

            debug!(
                shelf = id.as_deref().unwrap_or(""),
                book = book_id.as_deref().unwrap_or(""),
                pages,
                moved,
                "Reordered book"
            );
            report.books.push(BookReport {
                shelf: id.clone(),
                book: book_id,
                pages,
                moved,
            });
            reordered.push(book);
        }

        shelves.push(CatalogNode {
            kind,
            id,
            display_name,
            attributes,
            children: reordered,
            layout,
        });
    }

    info!(
        shelves = stats.shelves,
        books = stats.books,
        pages = stats.pages,
        books_changed = report.books_changed(),
        "Catalog reordered"
    );

    Ok((Catalog { shelves }, report))
}

/// Whether every book's pages are already in canonical order
pub fn is_canonical(catalog: &Catalog) -> Result<bool> {
    let (_, report) = reorder_catalog_with_report(catalog.clone())?;
    Ok(report.is_unchanged())
}

fn reorder_book_with_moves(book: CatalogNode) -> Result<(CatalogNode, usize)> {
    let label = book.label();
    let CatalogNode {
        kind,
        id,
        display_name,
        attributes,
        children,
        layout,
    } = book;

    let (children, moved) = reorder_pages(&label, children)?;

    Ok((
        CatalogNode {
            kind,
            id,
            display_name,
            attributes,
            children,
            layout,
        },
        moved,
    ))
}

/// Partition, stable-sort, and re-thread. Returns the new children and the
/// number of page slots whose occupant changed.
fn reorder_pages(book: &str, children: Vec<CatalogNode>) -> Result<(Vec<CatalogNode>, usize)> {
    if !children.iter().any(CatalogNode::is_page) {
        return Ok((children, 0));
    }

    let expected = children.len();

    // Pages leave their slot empty; everything else stays put
    let mut pages = Vec::new();
    let mut slots = Vec::with_capacity(expected);
    for child in children {
        if child.is_page() {
            pages.push((pages.len(), child));
            slots.push(None);
        } else {
            slots.push(Some(child));
        }
    }

    // `sort_by_cached_key` is stable, which keeps same-year pages in source order
    pages.sort_by_cached_key(|(_, page)| Reverse(page.year()));

    let moved = pages
        .iter()
        .enumerate()
        .filter(|(rank, (original, _))| rank != original)
        .count();

    let mut sorted = pages.into_iter().map(|(_, page)| page);
    let reordered: Vec<CatalogNode> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| sorted.next()))
        .collect();

    let leftover = sorted.len();
    if reordered.len() != expected || leftover != 0 {
        error!(
            book,
            expected,
            actual = reordered.len(),
            leftover,
            "Page reordering changed the child count"
        );
        return Err(CatalogError::ReconstructionInvariantViolation {
            book: book.to_string(),
            expected,
            actual: reordered.len(),
        });
    }

    Ok((reordered, moved))
}
