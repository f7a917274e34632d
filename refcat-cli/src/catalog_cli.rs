//! Catalog subcommands
//!
//! `sort` writes a reordered copy of the catalog, `check` reports books
//! whose pages are out of order, and `rows` lists every page with its
//! shelf and book.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::{debug, info};

use refcat_core::catalog::{
    flatten_rows, reorder_catalog_with_report, sort_catalog_file, Catalog, CatalogRow,
    ReorderReport,
};
use refcat_core::config::Settings;

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Reorder the pages of every book newest-first
    Sort {
        /// Catalog to read (defaults to the configured database catalog)
        input: Option<PathBuf>,

        /// Where to write the result (defaults to INPUT plus the output suffix)
        output: Option<PathBuf>,

        /// Overwrite the input file
        #[clap(long, conflicts_with = "output")]
        in_place: bool,

        /// Report what would change without writing anything
        #[clap(long)]
        dry_run: bool,
    },

    /// Exit with status 1 if any book has pages out of order
    Check {
        /// Catalog to read (defaults to the configured database catalog)
        input: Option<PathBuf>,
    },

    /// List every page with its shelf and book
    Rows {
        /// Catalog to read (defaults to the configured database catalog)
        input: Option<PathBuf>,

        /// Output format
        #[clap(long, value_enum, default_value = "table")]
        format: RowFormat,

        /// Only list pages on this shelf
        #[clap(long)]
        shelf: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RowFormat {
    Table,
    Json,
    Yaml,
}

/// Settings shared by every subcommand
pub struct CommandContext {
    pub settings: Settings,
    pub database: Option<PathBuf>,
}

impl CommandContext {
    fn input_path(&self, input: Option<PathBuf>) -> PathBuf {
        input.unwrap_or_else(|| self.settings.catalog_path(self.database.as_deref()))
    }
}

impl CatalogCommand {
    pub fn execute(self, context: &CommandContext) -> Result<ExitCode> {
        match self {
            CatalogCommand::Sort {
                input,
                output,
                in_place,
                dry_run,
            } => {
                let input = context.input_path(input);
                let output = if in_place {
                    input.clone()
                } else {
                    output.unwrap_or_else(|| context.settings.output_path_for(&input))
                };
                execute_sort(&input, &output, dry_run)
            }
            CatalogCommand::Check { input } => execute_check(&context.input_path(input)),
            CatalogCommand::Rows {
                input,
                format,
                shelf,
            } => execute_rows(&context.input_path(input), format, shelf.as_deref()),
        }
    }
}

fn execute_sort(input: &Path, output: &Path, dry_run: bool) -> Result<ExitCode> {
    if dry_run {
        debug!("Dry run: nothing will be written");
        let (_, report) = load_and_reorder(input)?;
        print_changes(&report);
        return Ok(ExitCode::SUCCESS);
    }

    let report = sort_catalog_file(input, output)
        .with_context(|| format!("Failed to sort {}", input.display()))?;

    println!(
        "✅ Sorted {} of {} books, wrote {}",
        report.books_changed(),
        report.books.len(),
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn execute_check(input: &Path) -> Result<ExitCode> {
    let (_, report) = load_and_reorder(input)?;

    if report.is_unchanged() {
        println!(
            "✅ All {} books in {} are in order",
            report.books.len(),
            input.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    print_changes(&report);
    println!(
        "❌ {} of {} books in {} are out of order",
        report.books_changed(),
        report.books.len(),
        input.display()
    );
    Ok(ExitCode::FAILURE)
}

fn execute_rows(input: &Path, format: RowFormat, shelf: Option<&str>) -> Result<ExitCode> {
    let catalog = load(input)?;
    let rows: Vec<CatalogRow> = flatten_rows(&catalog)
        .into_iter()
        .filter(|row| shelf.is_none() || row.shelf_id.as_deref() == shelf)
        .collect();
    info!(rows = rows.len(), "Flattened catalog");

    match format {
        RowFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        RowFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&rows)?),
        RowFormat::Table => {
            if rows.is_empty() {
                println!("No pages found.");
            } else {
                let table_rows: Vec<PageRow> = rows.iter().map(PageRow::from).collect();
                println!("{}", render_table(&table_rows));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load(input: &Path) -> Result<Catalog> {
    Catalog::load_from_path(input).with_context(|| format!("Failed to load {}", input.display()))
}

fn load_and_reorder(input: &Path) -> Result<(Catalog, ReorderReport)> {
    let catalog = load(input)?;
    Ok(reorder_catalog_with_report(catalog)?)
}

/// Table row for a book whose page order changes
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Shelf")]
    shelf: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Pages")]
    pages: usize,
    #[tabled(rename = "Moved")]
    moved: usize,
}

/// Table row for a single page
#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "Shelf")]
    shelf: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Page")]
    page: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&CatalogRow> for PageRow {
    fn from(row: &CatalogRow) -> Self {
        let year = row.year();
        Self {
            shelf: row.shelf_id.clone().unwrap_or_default(),
            book: row.book_id.clone().unwrap_or_default(),
            page: row.page_id.clone().unwrap_or_default(),
            year: if year == refcat_core::catalog::UNKNOWN_YEAR {
                "-".to_string()
            } else {
                year.to_string()
            },
            name: row.page_name.clone().unwrap_or_default(),
        }
    }
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

fn print_changes(report: &ReorderReport) {
    let rows: Vec<ChangeRow> = report
        .changed_books()
        .map(|book| ChangeRow {
            shelf: book.shelf.clone().unwrap_or_default(),
            book: book.book.clone().unwrap_or_default(),
            pages: book.pages,
            moved: book.moved,
        })
        .collect();

    if rows.is_empty() {
        println!("No books need reordering.");
    } else {
        println!("{}", render_table(&rows));
        println!(
            "{} pages would move across {} books",
            report.pages_moved(),
            rows.len()
        );
    }
}
