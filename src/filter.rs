//! Client-side filter composition for record lists.
//!
//! A [`FilterSet`] combines up to three kinds of independent predicates —
//! free-text search, exact-match categorical filters, and a calendar-date
//! filter — into a single AND-combined predicate. Applying it is a stable
//! filter: surviving records keep their original relative order, and
//! [`FilteredRecord`] remembers each record's index in the unfiltered
//! collection so cursor and selection logic keep working against original
//! positions.

use crate::record::Record;
use std::collections::BTreeMap;
use time::macros::format_description;
use time::Date;

/// Sentinel categorical value meaning "no restriction".
///
/// Category dropdowns in admin panels conventionally offer an "all" option;
/// setting a categorical filter to this value (or to the empty string)
/// removes the restriction instead of matching it literally.
pub const FILTER_ALL: &str = "all";

/// A record that survived filtering, tagged with its original index.
#[derive(Debug, Clone)]
pub struct FilteredRecord<R> {
    /// Index of this record in the full, unfiltered collection.
    pub index: usize,
    /// The record itself.
    pub record: R,
}

/// An exact calendar-date restriction on one named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    /// The record field holding the stored date text.
    pub field: String,
    /// The date to match, compared by calendar date only.
    pub date: Date,
}

/// The active filters of a record list.
///
/// All parts combine with logical AND; inactive parts (empty query, no
/// categorical entries, no date) match everything. The set itself is plain
/// data — the list controller owns one and reapplies it after every refresh
/// or filter change.
///
/// # Examples
///
/// ```rust
/// use recordlist::filter::FilterSet;
///
/// let mut filters = FilterSet::new();
/// filters.set_query("maria");
/// filters.set_exact("status", "pending");
/// assert!(!filters.is_empty());
///
/// filters.clear();
/// assert!(filters.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    query: String,
    exact: BTreeMap<String, String>,
    date: Option<DateFilter>,
}

impl FilterSet {
    /// Creates an empty filter set that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.exact.is_empty() && self.date.is_none()
    }

    /// Returns the current free-text query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sets the free-text query. An empty query matches everything.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Sets an exact-match restriction on a field.
    ///
    /// Passing the empty string or [`FILTER_ALL`] removes the restriction
    /// for that field.
    ///
    /// ```rust
    /// use recordlist::filter::{FilterSet, FILTER_ALL};
    ///
    /// let mut filters = FilterSet::new();
    /// filters.set_exact("status", "approved");
    /// filters.set_exact("status", FILTER_ALL);
    /// assert!(filters.is_empty());
    /// ```
    pub fn set_exact(&mut self, field: &str, value: &str) {
        if value.is_empty() || value == FILTER_ALL {
            self.exact.remove(field);
        } else {
            self.exact.insert(field.to_string(), value.to_string());
        }
    }

    /// Restricts a field to an exact calendar date.
    pub fn set_date(&mut self, field: &str, date: Date) {
        self.date = Some(DateFilter {
            field: field.to_string(),
            date,
        });
    }

    /// Removes the date restriction.
    pub fn clear_date(&mut self) {
        self.date = None;
    }

    /// Removes every active filter.
    pub fn clear(&mut self) {
        self.query.clear();
        self.exact.clear();
        self.date = None;
    }

    /// Tests a single record against every active filter.
    ///
    /// Missing fields fail closed: they count as empty strings for text
    /// search and never match categorical or date restrictions.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            let hit = record
                .search_values()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        for (field, expected) in &self.exact {
            match record.field(field) {
                Some(value) if &value == expected => {}
                _ => return false,
            }
        }

        if let Some(filter) = &self.date {
            match record
                .field(&filter.field)
                .and_then(|stored| parse_stored_date(&stored))
            {
                Some(stored) if stored == filter.date => {}
                _ => return false,
            }
        }

        true
    }

    /// Applies the filter set to a collection.
    ///
    /// This is a stable filter: relative order is preserved and each
    /// survivor carries its original index. Applying the same set twice is
    /// the same as applying it once, and an empty set returns the full
    /// collection unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recordlist::filter::FilterSet;
    /// use recordlist::Record;
    ///
    /// #[derive(Clone)]
    /// struct Row(String);
    ///
    /// impl Record for Row {
    ///     fn id(&self) -> &str {
    ///         &self.0
    ///     }
    ///     fn search_values(&self) -> Vec<String> {
    ///         vec![self.0.clone()]
    ///     }
    ///     fn field(&self, _key: &str) -> Option<String> {
    ///         None
    ///     }
    /// }
    ///
    /// let rows = vec![Row("Maria Santos".into()), Row("Juan Dela Cruz".into())];
    /// let mut filters = FilterSet::new();
    /// filters.set_query("maria");
    ///
    /// let visible = filters.apply(&rows);
    /// assert_eq!(visible.len(), 1);
    /// assert_eq!(visible[0].index, 0);
    /// ```
    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<FilteredRecord<R>> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(*record))
            .map(|(index, record)| FilteredRecord {
                index,
                record: record.clone(),
            })
            .collect()
    }
}

/// Parses a stored date field into a calendar date.
///
/// Stored dates come from a document store that writes `MM-DD-YYYY`; ISO
/// `YYYY-MM-DD` is accepted as well since both appear in exported data.
/// Anything else is `None`, which an active date filter treats as
/// non-matching.
///
/// # Examples
///
/// ```rust
/// use recordlist::filter::parse_stored_date;
/// use time::macros::date;
///
/// assert_eq!(parse_stored_date("03-10-2025"), Some(date!(2025 - 03 - 10)));
/// assert_eq!(parse_stored_date("2025-03-10"), Some(date!(2025 - 03 - 10)));
/// assert_eq!(parse_stored_date("next tuesday"), None);
/// ```
pub fn parse_stored_date(stored: &str) -> Option<Date> {
    const STORED: &[time::format_description::BorrowedFormatItem<'static>] =
        format_description!("[month]-[day]-[year]");
    const ISO: &[time::format_description::BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]");

    let stored = stored.trim();
    Date::parse(stored, STORED)
        .or_else(|_| Date::parse(stored, ISO))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[derive(Clone)]
    struct Applicant {
        id: &'static str,
        full_name: &'static str,
        email: &'static str,
        status: Option<&'static str>,
        submitted_at: Option<&'static str>,
    }

    impl Record for Applicant {
        fn id(&self) -> &str {
            self.id
        }

        fn search_values(&self) -> Vec<String> {
            vec![
                self.full_name.to_string(),
                self.id.to_string(),
                self.email.to_string(),
            ]
        }

        fn field(&self, key: &str) -> Option<String> {
            match key {
                "status" => self.status.map(str::to_string),
                "submittedAt" => self.submitted_at.map(str::to_string),
                _ => None,
            }
        }
    }

    fn applicants() -> Vec<Applicant> {
        vec![
            Applicant {
                id: "APP-001",
                full_name: "Maria Santos",
                email: "maria@example.com",
                status: Some("pending"),
                submitted_at: Some("03-10-2025"),
            },
            Applicant {
                id: "APP-002",
                full_name: "Juan Dela Cruz",
                email: "juan@example.com",
                status: Some("approved"),
                submitted_at: Some("garbled"),
            },
            Applicant {
                id: "APP-003",
                full_name: "Ana Reyes",
                email: "ana@example.com",
                status: None,
                submitted_at: None,
            },
        ]
    }

    #[test]
    fn text_search_is_case_insensitive_substring_over_any_value() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_query("maria");
        let visible = filters.apply(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].record.full_name, "Maria Santos");

        // Matching the email also counts.
        filters.set_query("JUAN@");
        let visible = filters.apply(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].record.id(), "APP-002");
    }

    #[test]
    fn empty_query_matches_everything() {
        let rows = applicants();
        let filters = FilterSet::new();
        assert_eq!(filters.apply(&rows).len(), rows.len());
    }

    #[test]
    fn categorical_filter_is_exact_and_fails_closed() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_exact("status", "pending");
        let visible = filters.apply(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].record.id(), "APP-001");

        // "pend" is not an exact match, and the record missing the field
        // never matches.
        filters.set_exact("status", "pend");
        assert!(filters.apply(&rows).is_empty());
    }

    #[test]
    fn sentinel_value_clears_a_categorical_filter() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_exact("status", "approved");
        assert_eq!(filters.apply(&rows).len(), 1);
        filters.set_exact("status", FILTER_ALL);
        assert_eq!(filters.apply(&rows).len(), rows.len());
        filters.set_exact("status", "approved");
        filters.set_exact("status", "");
        assert_eq!(filters.apply(&rows).len(), rows.len());
    }

    #[test]
    fn date_filter_compares_calendar_dates_across_formats() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        // Filter-side 2025-03-10 against stored "03-10-2025".
        filters.set_date("submittedAt", date!(2025 - 03 - 10));
        let visible = filters.apply(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].record.id(), "APP-001");
    }

    #[test]
    fn unparseable_or_missing_dates_never_match() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_date("submittedAt", date!(2025 - 03 - 10));
        let ids: Vec<&str> = filters.apply(&rows).iter().map(|f| f.record.id).collect();
        assert!(!ids.contains(&"APP-002")); // "garbled"
        assert!(!ids.contains(&"APP-003")); // field absent
    }

    #[test]
    fn filters_combine_with_logical_and() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_query("app");
        filters.set_exact("status", "pending");
        filters.set_date("submittedAt", date!(2025 - 03 - 10));
        assert_eq!(filters.apply(&rows).len(), 1);

        filters.set_exact("status", "approved");
        assert!(filters.apply(&rows).is_empty());
    }

    #[test]
    fn apply_is_idempotent_and_order_preserving() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_query("app-");
        let once = filters.apply(&rows);
        let twice_src: Vec<Applicant> = once.iter().map(|f| f.record.clone()).collect();
        let twice = filters.apply(&twice_src);
        assert_eq!(once.len(), twice.len());

        let indices: Vec<usize> = once.iter().map(|f| f.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn clearing_filters_restores_the_full_collection_in_order() {
        let rows = applicants();
        let mut filters = FilterSet::new();
        filters.set_query("maria");
        filters.set_exact("status", "pending");
        filters.clear();
        assert!(filters.is_empty());
        let visible = filters.apply(&rows);
        assert_eq!(visible.len(), rows.len());
        let indices: Vec<usize> = visible.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn stored_date_parsing_accepts_both_observed_formats() {
        assert_eq!(parse_stored_date("03-10-2025"), Some(date!(2025 - 03 - 10)));
        assert_eq!(parse_stored_date(" 2025-03-10 "), Some(date!(2025 - 03 - 10)));
        assert_eq!(parse_stored_date(""), None);
        assert_eq!(parse_stored_date("13-40-2025"), None);
    }
}
