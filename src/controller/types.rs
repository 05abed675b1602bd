//! Delegate traits and helpers controlling how records are rendered.
//!
//! The controller owns state and behavior; what a row actually looks like
//! is delegated. Most admin lists are flat tables, so [`ColumnDelegate`]
//! covers the common case: declare columns with widths, rows render
//! themselves from [`Record::field`] lookups. Anything fancier implements
//! [`RecordDelegate`] directly.

use super::Model;
use crate::record::Record;

/// Controls how one record renders as a table row.
///
/// The delegate receives the whole model plus the record's original index
/// in the unfiltered collection, so custom delegates can consult filter or
/// selection state. The controller itself adds the cursor marker and the
/// selection checkbox; the delegate only produces the row body.
pub trait RecordDelegate<R: Record> {
    /// Renders the row body for one record.
    ///
    /// `index` is the record's original index in the full collection, not
    /// its position on the current page.
    fn render(&self, m: &Model<R>, index: usize, record: &R) -> String;

    /// Renders the column header line, or an empty string for none.
    fn header(&self, m: &Model<R>) -> String {
        let _ = m;
        String::new()
    }

    /// Height of one row in terminal lines.
    fn height(&self) -> usize {
        1
    }

    /// Blank lines between rows.
    fn spacing(&self) -> usize {
        0
    }
}

/// One declared table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field key looked up through [`Record::field`].
    pub key: String,
    /// Header label.
    pub title: String,
    /// Rendered cell width in characters.
    pub width: usize,
}

impl Column {
    /// Creates a column for a record field.
    pub fn new(key: &str, title: &str, width: usize) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            width: width.max(1),
        }
    }
}

/// Fixed-width cell formatting: pad with spaces, truncate with an ellipsis.
fn cell(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count > width {
        let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{value:<width$}")
    }
}

/// A [`RecordDelegate`] that renders records as fixed-width table rows.
///
/// Missing fields render as blank cells, consistent with the fail-closed
/// behavior of the filter engine.
///
/// # Examples
///
/// ```rust
/// use recordlist::controller::{Column, ColumnDelegate};
///
/// let delegate = ColumnDelegate::new(vec![
///     Column::new("fullName", "Name", 24),
///     Column::new("email", "Email", 28),
///     Column::new("status", "Status", 10),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDelegate {
    columns: Vec<Column>,
}

impl ColumnDelegate {
    /// Creates a delegate for the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Returns the declared columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl<R: Record> RecordDelegate<R> for ColumnDelegate {
    fn render(&self, _m: &Model<R>, _index: usize, record: &R) -> String {
        self.columns
            .iter()
            .map(|col| cell(&record.field(&col.key).unwrap_or_default(), col.width))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn header(&self, _m: &Model<R>) -> String {
        self.columns
            .iter()
            .map(|col| cell(&col.title, col.width))
            .collect::<Vec<_>>()
            .join("  ")
    }
}
