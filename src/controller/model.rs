//! Core state for the record list controller.

use std::sync::Arc;

use bubbletea_widgets::{help, textinput};
use time::Date;

use super::keys::ControllerKeyMap;
use super::modal::{AlertTone, Modal};
use super::refresh::Subscription;
use super::style::ControllerStyles;
use super::types::RecordDelegate;
use crate::client::{ActionKind, RecordApi};
use crate::filter::{FilterSet, FilteredRecord};
use crate::pagination::Pager;
use crate::record::Record;
use crate::selection::{PageState, SelectionSet};

/// A paginated, filterable, selectable list of server-backed records.
///
/// The controller owns the full collection, the derived visible subset,
/// pagination, selection, and modal state. Records arrive through
/// [`Model::activate`] / [`Model::refresh`] fetches or are injected with
/// [`Model::set_records`] for offline use.
///
/// # Examples
///
/// ```rust
/// use recordlist::controller::{Column, ColumnDelegate, Model};
/// use recordlist::record::Record;
///
/// #[derive(Clone)]
/// struct Applicant {
///     id: String,
///     name: String,
/// }
///
/// impl Record for Applicant {
///     fn id(&self) -> &str {
///         &self.id
///     }
///     fn search_values(&self) -> Vec<String> {
///         vec![self.name.clone()]
///     }
///     fn field(&self, key: &str) -> Option<String> {
///         match key {
///             "name" => Some(self.name.clone()),
///             _ => None,
///         }
///     }
/// }
///
/// let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 24)]);
/// let mut list: Model<Applicant> = Model::new(delegate, 80, 24).with_title("Applications");
/// list.set_records(vec![Applicant {
///     id: "a-1".into(),
///     name: "Maria Gonzalez".into(),
/// }]);
/// assert_eq!(list.total_len(), 1);
/// ```
pub struct Model<R: Record> {
    pub(super) title: String,
    /// The full collection, in server order.
    pub(super) records: Vec<R>,
    /// Records passing the active filters, original order preserved.
    pub(super) visible: Vec<FilteredRecord<R>>,
    pub(super) filters: FilterSet,
    pub(super) search_input: textinput::Model,
    pub(super) searching: bool,
    pub(super) pager: Pager,
    pub(super) selection: SelectionSet,
    pub(super) selecting: bool,
    /// Cursor offset within the current page.
    pub(super) cursor: usize,
    /// The action currently in flight, if any.
    pub(super) pending: Option<ActionKind>,
    pub(super) modal: Option<Modal>,
    /// Transient notification, cleared on the next key press.
    pub(super) status: Option<String>,
    pub(super) pending_count: Option<u64>,
    pub(super) track_pending_count: bool,
    pub(super) api: Option<Arc<dyn RecordApi<R>>>,
    pub(super) subscription: Option<Subscription>,
    /// Fetch generation; responses from older generations are discarded.
    pub(super) generation: u64,
    pub(super) loading: bool,
    pub(super) last_completed: Option<ActionKind>,
    pub(super) delegate: Box<dyn RecordDelegate<R> + Send + Sync>,
    pub(super) keymap: ControllerKeyMap,
    pub(super) styles: ControllerStyles,
    pub(super) help: help::Model,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl<R: Record> Model<R> {
    /// Creates an empty controller with the given row delegate and size.
    pub fn new(delegate: impl RecordDelegate<R> + Send + Sync + 'static, width: usize, height: usize) -> Self {
        Self {
            title: "Records".to_string(),
            records: Vec::new(),
            visible: Vec::new(),
            filters: FilterSet::new(),
            search_input: textinput::new(),
            searching: false,
            pager: Pager::new(),
            selection: SelectionSet::new(),
            selecting: false,
            cursor: 0,
            pending: None,
            modal: None,
            status: None,
            pending_count: None,
            track_pending_count: false,
            api: None,
            subscription: None,
            generation: 0,
            loading: false,
            last_completed: None,
            delegate: Box::new(delegate),
            keymap: ControllerKeyMap::default(),
            styles: ControllerStyles::default(),
            help: help::Model::new(),
            width,
            height,
        }
    }

    /// Sets the list title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pager.set_page_size(page_size);
        self
    }

    /// Attaches the server API used for fetches and mutations.
    pub fn with_api(mut self, api: impl RecordApi<R> + 'static) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    /// Attaches a live refresh subscription.
    ///
    /// The listener is armed by [`Model::activate`]; dropping the model (or
    /// replacing the subscription) lets any outstanding listener lapse
    /// without buffering further events.
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Enables the pending-count badge next to the title.
    ///
    /// The count is fetched alongside every collection refresh.
    pub fn with_pending_badge(mut self) -> Self {
        self.track_pending_count = true;
        self
    }

    /// Replaces the default styles.
    pub fn with_styles(mut self, styles: ControllerStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the default key bindings.
    pub fn with_keymap(mut self, keymap: ControllerKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the full collection.
    ///
    /// Active filters are re-applied, the page is clamped into range, and
    /// selected identifiers no longer present in the collection are pruned
    /// silently.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        let valid = self.records.iter().map(|r| r.id());
        self.selection.retain(valid);
        self.reapply_filters();
    }

    /// Re-derives the visible subset and keeps pagination and cursor sane.
    pub(super) fn reapply_filters(&mut self) {
        self.visible = self.filters.apply(&self.records);
        self.pager.set_total_items(self.visible.len());
        self.clamp_cursor();
    }

    /// Applies a filter change: derives the subset and resets to page one.
    pub(super) fn filters_changed(&mut self) {
        self.visible = self.filters.apply(&self.records);
        self.pager.set_total_items(self.visible.len());
        self.pager.reset();
        self.cursor = 0;
    }

    /// Sets the free-text search query and resets to page one.
    pub fn set_search_query(&mut self, query: &str) {
        self.filters.set_query(query);
        self.filters_changed();
    }

    /// Sets or clears an exact-match filter and resets to page one.
    ///
    /// Passing [`crate::filter::FILTER_ALL`] as the value clears the
    /// filter for that field.
    pub fn set_exact_filter(&mut self, field: &str, value: &str) {
        self.filters.set_exact(field, value);
        self.filters_changed();
    }

    /// Sets the calendar-date filter and resets to page one.
    pub fn set_date_filter(&mut self, field: &str, date: Date) {
        self.filters.set_date(field, date);
        self.filters_changed();
    }

    /// Clears every active filter and resets to page one.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search_input.set_value("");
        self.filters_changed();
    }

    /// The records on the current page, with their original indices.
    pub fn page_records(&self) -> &[FilteredRecord<R>] {
        let (start, end) = self.pager.slice_bounds(self.visible.len());
        &self.visible[start..end]
    }

    /// Identifiers of the records on the current page.
    pub fn page_ids(&self) -> Vec<String> {
        self.page_records()
            .iter()
            .map(|fr| fr.record.id().to_string())
            .collect()
    }

    /// The record under the cursor, if the page is non-empty.
    pub fn cursor_record(&self) -> Option<&R> {
        self.page_records().get(self.cursor).map(|fr| &fr.record)
    }

    /// Selection state of the current page.
    pub fn page_selection_state(&self) -> PageState {
        self.selection.page_state(&self.page_ids())
    }

    pub(super) fn clamp_cursor(&mut self) {
        let len = self.page_records().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    pub(super) fn open_alert(&mut self, tone: AlertTone, message: String) {
        self.modal = Some(Modal::Alert {
            tone,
            message,
            resume: None,
        });
    }

    /// The list title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of records in the full collection.
    pub fn total_len(&self) -> usize {
        self.records.len()
    }

    /// Number of records passing the active filters.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no records pass the active filters.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The current page number (1-based).
    pub fn page(&self) -> usize {
        self.pager.page()
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    /// The active filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Whether selection mode is active.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Whether search input mode is active.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Whether a collection fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The action currently in flight, if any.
    pub fn pending_action(&self) -> Option<ActionKind> {
        self.pending
    }

    /// The last fetched pending-review count, when badge tracking is on.
    pub fn pending_count(&self) -> Option<u64> {
        self.pending_count
    }

    /// The transient status notification, if one is showing.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Takes the kind of the most recently completed action.
    ///
    /// Host applications poll this after feeding messages through
    /// `update` to refresh dependent views of their own, such as an
    /// action history panel.
    pub fn take_last_completed(&mut self) -> Option<ActionKind> {
        self.last_completed.take()
    }

    /// Resizes the controller.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Returns the controller's `(width, height)` in terminal cells.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
