//! Compatibility dataset module: the read-only lookup table mapping
//! pesticide categories to tables of pair rows with a verdict.
//!
//! The dataset is loaded once at startup from a directory of CSV files,
//! one file per category (the file stem is the category name), and never
//! mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

/// Required CSV header columns, validated at load time.
pub const COLUMN_ITEM_A: &str = "pesticide_1";
pub const COLUMN_ITEM_B: &str = "pesticide_2";
pub const COLUMN_VERDICT: &str = "compatibility";

/// Errors raised while loading the dataset from disk.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read data directory {path}: {source}")]
    ReadDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to open {file}: {source}")]
    OpenFile {
        file: String,
        source: csv::Error,
    },

    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: String, column: String },

    #[error("{file}: malformed record: {source}")]
    MalformedRecord {
        file: String,
        source: csv::Error,
    },
}

/// One row of a category table: a pair of pesticides and its verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatibilityRow {
    pub item_a: String,
    pub item_b: String,
    pub verdict: String,
}

/// The ordered rows of one category.
#[derive(Clone, Debug, Default)]
pub struct CategoryTable {
    rows: Vec<CompatibilityRow>,
}

impl CategoryTable {
    pub fn new(rows: Vec<CompatibilityRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CompatibilityRow] {
        &self.rows
    }

    /// First-column entries, deduplicated, order preserved, blanks skipped.
    pub fn first_items(&self) -> Vec<String> {
        dedup_preserving_order(self.rows.iter().map(|row| row.item_a.as_str()))
    }

    /// Second-column entries, deduplicated, order preserved, blanks skipped.
    pub fn second_items(&self) -> Vec<String> {
        dedup_preserving_order(self.rows.iter().map(|row| row.item_b.as_str()))
    }

    /// Exact-match join on both columns; the first matching row wins.
    ///
    /// The lookup is not commutative unless the table is populated
    /// symmetrically, which is a property of the data, not of this code.
    pub fn lookup(&self, item_a: &str, item_b: &str) -> Option<&CompatibilityRow> {
        self.rows
            .iter()
            .find(|row| row.item_a == item_a && row.item_b == item_b)
    }
}

fn dedup_preserving_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_string()))
        .map(|item| item.to_string())
        .collect()
}

/// The full compatibility dataset: an ordered mapping from category name
/// to its table.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    categories: Vec<(String, CategoryTable)>,
}

impl Dataset {
    /// An empty dataset, used when no data directory is present.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset directly from in-memory tables (test fixtures).
    pub fn from_tables(categories: Vec<(String, CategoryTable)>) -> Self {
        Self { categories }
    }

    /// Load every `*.csv` file under `dir` as one category each.
    ///
    /// Files are read in sorted file-name order so the numbered category
    /// menu is stable across runs. A missing directory degrades to an
    /// empty dataset; a present but malformed file is a hard error.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "data directory not found, starting with an empty dataset");
            return Ok(Self::empty());
        }

        let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::ReadDir {
            path: dir.display().to_string(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("csv"))
            .collect();
        paths.sort();

        let mut categories = Vec::new();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let table = load_table(&path)?;
            info!(category = name, rows = table.rows().len(), "loaded category table");
            categories.push((name.to_string(), table));
        }

        Ok(Self { categories })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Ordered category names.
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn table(&self, category: &str) -> Option<&CategoryTable> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, table)| table)
    }
}

/// Read one category CSV, validating the header schema up front.
fn load_table(path: &Path) -> Result<CategoryTable, DatasetError> {
    let file = path.display().to_string();

    let mut reader = csv::Reader::from_path(path).map_err(|source| DatasetError::OpenFile {
        file: file.clone(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| DatasetError::MalformedRecord {
            file: file.clone(),
            source,
        })?
        .clone();

    let column_index = |column: &str| -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| DatasetError::MissingColumn {
                file: file.clone(),
                column: column.to_string(),
            })
    };

    let item_a_idx = column_index(COLUMN_ITEM_A)?;
    let item_b_idx = column_index(COLUMN_ITEM_B)?;
    let verdict_idx = column_index(COLUMN_VERDICT)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DatasetError::MalformedRecord {
            file: file.clone(),
            source,
        })?;

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        rows.push(CompatibilityRow {
            item_a: field(item_a_idx),
            item_b: field(item_b_idx),
            verdict: field(verdict_idx),
        });
    }

    Ok(CategoryTable::new(rows))
}
