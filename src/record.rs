//! The [`Record`] trait connecting domain rows to the list controller.
//!
//! A record is one row in an admin list view: an applicant, a student, a
//! staff member, a log entry. The controller treats records as opaque beyond
//! the three things it needs: a stable identifier, searchable text, and
//! named field access for categorical and date filters.

/// A domain row that can be listed, filtered, selected, and acted on.
///
/// Field access is deliberately `Option`-returning so that records missing
/// an expected field fail closed: text search treats the field as empty and
/// categorical/date filters simply don't match, instead of panicking.
///
/// # Examples
///
/// ```rust
/// use recordlist::Record;
///
/// #[derive(Clone)]
/// struct Applicant {
///     id: String,
///     full_name: String,
///     email: String,
///     status: String,
/// }
///
/// impl Record for Applicant {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn search_values(&self) -> Vec<String> {
///         vec![self.full_name.clone(), self.id.clone(), self.email.clone()]
///     }
///
///     fn field(&self, key: &str) -> Option<String> {
///         match key {
///             "fullName" => Some(self.full_name.clone()),
///             "email" => Some(self.email.clone()),
///             "status" => Some(self.status.clone()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Returns the stable identifier used for selection and mutations.
    fn id(&self) -> &str;

    /// Returns the values searched by the free-text filter.
    ///
    /// A record matches a query when any one of these values contains the
    /// lower-cased query as a substring. Typical implementations return the
    /// display name, identifier, and email.
    fn search_values(&self) -> Vec<String>;

    /// Returns the value of a named field, or `None` when the record does
    /// not carry it.
    ///
    /// Categorical and date filters look fields up by key through this
    /// method; a `None` never matches an active filter.
    fn field(&self, key: &str) -> Option<String>;
}
