//! Shared domain types.
//!
//! Raw input (`Cell`, `Table`) stays loosely typed; everything after the
//! rating extractor works on `RatingSeries`, whose invariant is checked once.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Lowest rating accepted into a [`RatingSeries`].
pub const RATING_MIN: f64 = 0.0;
/// Highest rating accepted into a [`RatingSeries`].
pub const RATING_MAX: f64 = 10.0;

/// One raw value read from a CSV or spreadsheet cell.
///
/// CSV cells are always `Text` (or `Empty`); spreadsheet cells keep the type
/// the workbook stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A loaded table: ordered, unique header names plus rows of cells.
///
/// Rows may be ragged; a missing trailing cell reads as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Position of `name` among the headers (exact, case-sensitive).
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of column `idx`, top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(EMPTY))
    }
}

/// NPS classification bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Promoter,
    Passive,
    Detractor,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Promoter, Bucket::Passive, Bucket::Detractor];

    /// Classify a rating in `[0, 10]`.
    ///
    /// Integer ratings follow the usual 9-10 / 7-8 / 0-6 split. Fractional
    /// ratings fall to the lower bucket until they reach the next threshold
    /// (8.5 is a passive, 6.5 a detractor), so every rating lands in exactly
    /// one bucket.
    pub fn classify(rating: f64) -> Bucket {
        if rating >= 9.0 {
            Bucket::Promoter
        } else if rating >= 7.0 {
            Bucket::Passive
        } else {
            Bucket::Detractor
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Bucket::Promoter => "Promoters",
            Bucket::Passive => "Passives",
            Bucket::Detractor => "Detractors",
        }
    }

    /// Inclusive integer range label used in reports.
    pub fn range_label(self) -> &'static str {
        match self {
            Bucket::Promoter => "9-10",
            Bucket::Passive => "7-8",
            Bucket::Detractor => "0-6",
        }
    }
}

/// Whether a rating column reads as whole numbers or as floats.
///
/// A column is `Float` as soon as one cell is fractional, written as a float
/// (`9.0`), or not a number at all. Min/max print as `9` or `9.0` accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberForm {
    Integer,
    Float,
}

impl NumberForm {
    /// `Integer` only if every value is a whole number.
    pub fn of_values(values: &[f64]) -> Self {
        if values.iter().all(|v| v.fract() == 0.0) {
            NumberForm::Integer
        } else {
            NumberForm::Float
        }
    }
}

/// Validated ratings: non-empty, every value finite and within `[0, 10]`.
///
/// Only the rating extractor builds these, so downstream stages can rely on
/// the invariant without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSeries {
    values: Vec<f64>,
    form: NumberForm,
}

impl RatingSeries {
    /// Wrap values that already passed coercion and range filtering.
    ///
    /// Returns `None` if `values` is empty or any value is outside `[0, 10]`.
    /// The form is inferred from the values themselves.
    pub(crate) fn from_validated(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() || !values.iter().all(|v| is_in_range(*v)) {
            return None;
        }
        let form = NumberForm::of_values(&values);
        Some(Self { values, form })
    }

    /// Override the inferred form with the one of the source column.
    pub(crate) fn with_form(mut self, form: NumberForm) -> Self {
        self.form = form;
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn form(&self) -> NumberForm {
        self.form
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `true` if `v` is a usable rating.
pub fn is_in_range(v: f64) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&v)
}

/// How the rating distribution is drawn after the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartMode {
    /// Full-screen terminal window, dismissed with q/Esc/Enter.
    Window,
    /// Plain-text histogram on stdout.
    Ascii,
    /// No chart.
    None,
}

/// Resolved, validated inputs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file_path: PathBuf,
    pub column: String,
    pub chart: ChartMode,
    pub export_json: Option<PathBuf>,
}
