//! Pagination state and the page-button window calculator.
//!
//! This module is purely about pagination arithmetic; it does not render
//! pages of content. [`Pager`] tracks the current page over a collection of
//! known size, and [`compute_window`] maps that state to the ordered row of
//! page buttons an admin list shows: prev/next controls, a centered run of
//! page numbers, and ellipsis markers collapsing the gaps to page 1 and the
//! last page.

/// Default width of the centered page-number window.
///
/// Odd so the current page sits in the middle of the run.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Default number of records shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One entry in a rendered pagination control.
///
/// A window is an ordered sequence of slots: a previous-page control, page
/// numbers (possibly separated by ellipsis markers), and a next-page
/// control.
///
/// # Examples
///
/// ```rust
/// use recordlist::pagination::{compute_window, PageSlot};
///
/// let window = compute_window(1, 3, 5);
/// assert_eq!(window[0], PageSlot::Prev { disabled: true });
/// assert_eq!(window[1], PageSlot::Page { number: 1, current: true });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// The previous-page control; disabled on the first page.
    Prev {
        /// Whether the control should be inert.
        disabled: bool,
    },
    /// A concrete page button.
    Page {
        /// 1-based page number.
        number: usize,
        /// Whether this is the page currently shown.
        current: bool,
    },
    /// A collapsed run of pages between the window and page 1 or the last
    /// page.
    Ellipsis,
    /// The next-page control; disabled on the last page.
    Next {
        /// Whether the control should be inert.
        disabled: bool,
    },
}

/// Computes the visible page-button window for a pagination control.
///
/// Returns an ordered list of [`PageSlot`]s: a prev control, page buttons
/// with ellipsis collapsing, and a next control. The window of page numbers
/// is centered on `current` and clamped to `[1, total]`; when clamping at
/// the top shortens the window, its start shifts backward to preserve the
/// window width. Page 1 and page `total` always appear explicitly, with an
/// [`PageSlot::Ellipsis`] inserted when the gap to the centered window
/// exceeds one page.
///
/// Pure and deterministic for every input in the stated domain:
/// `current ∈ [1, total]` and `max_visible` odd (the default is
/// [`DEFAULT_MAX_VISIBLE`]). When `total` is zero there is nothing to page
/// through and the result is empty.
///
/// # Examples
///
/// ```rust
/// use recordlist::pagination::{compute_window, PageSlot};
///
/// // 12 pages, currently on page 6: « 1 … 4 5 [6] 7 8 … 12 »
/// let window = compute_window(6, 12, 5);
/// let pages: Vec<usize> = window
///     .iter()
///     .filter_map(|slot| match slot {
///         PageSlot::Page { number, .. } => Some(*number),
///         _ => None,
///     })
///     .collect();
/// assert_eq!(pages, vec![1, 4, 5, 6, 7, 8, 12]);
///
/// // Empty collections produce an empty control.
/// assert!(compute_window(1, 0, 5).is_empty());
/// ```
pub fn compute_window(current: usize, total: usize, max_visible: usize) -> Vec<PageSlot> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let max_visible = max_visible.max(1);

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    // Clamping at `total` may shorten the run; pull the start back to keep
    // the window width, without going below page 1.
    if end + 1 - start < max_visible {
        start = end.saturating_sub(max_visible - 1).max(1);
    }

    let mut slots = Vec::with_capacity(max_visible + 6);
    slots.push(PageSlot::Prev {
        disabled: current == 1,
    });

    if start > 1 {
        slots.push(PageSlot::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            slots.push(PageSlot::Ellipsis);
        }
    }

    for number in start..=end {
        slots.push(PageSlot::Page {
            number,
            current: number == current,
        });
    }

    if end < total {
        if end + 1 < total {
            slots.push(PageSlot::Ellipsis);
        }
        slots.push(PageSlot::Page {
            number: total,
            current: false,
        });
    }

    slots.push(PageSlot::Next {
        disabled: current == total,
    });
    slots
}

/// Pagination state for a record list.
///
/// Pages are 1-based: an empty collection still has one (empty) page, and
/// `page` is always within `[1, total_pages]`. The pager only does the
/// arithmetic; the list controller decides when to move and feeds it the
/// current (filtered) collection size.
///
/// # Examples
///
/// ```rust
/// use recordlist::pagination::Pager;
///
/// let mut pager = Pager::new().with_page_size(10);
/// pager.set_total_items(23);
/// assert_eq!(pager.total_pages(), 3);
/// assert!(pager.on_first_page());
///
/// pager.next_page();
/// assert_eq!(pager.page(), 2);
/// assert_eq!(pager.slice_bounds(23), (10, 20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total_pages: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 1,
        }
    }
}

impl Pager {
    /// Creates a pager on page 1 with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page capacity (builder pattern). Values below 1 are clamped
    /// to 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the page capacity in place. Values below 1 are clamped to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Returns the current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page capacity.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the total page count, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recalculates the page count from a collection size, clamping the
    /// current page back into range when the collection shrank.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recordlist::pagination::Pager;
    ///
    /// let mut pager = Pager::new().with_page_size(10);
    /// pager.set_total_items(95);
    /// assert_eq!(pager.total_pages(), 10);
    ///
    /// pager.go_to(10);
    /// pager.set_total_items(11);
    /// assert_eq!(pager.page(), 2); // clamped to the new last page
    ///
    /// pager.set_total_items(0);
    /// assert_eq!(pager.total_pages(), 1); // an empty list is one empty page
    /// assert_eq!(pager.page(), 1);
    /// ```
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = if items == 0 {
            1
        } else {
            items.div_ceil(self.page_size)
        };
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    /// Moves to a specific page, clamped into `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Moves back to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Advances one page, saturating at the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Steps back one page, saturating at page 1.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    /// Returns true when on page 1.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns true when on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Returns `(start, end)` slice bounds into a collection of `length`
    /// items for the current page; `end` is exclusive.
    ///
    /// ```rust
    /// use recordlist::pagination::Pager;
    ///
    /// let mut pager = Pager::new().with_page_size(10);
    /// pager.set_total_items(23);
    /// pager.go_to(3);
    /// assert_eq!(pager.slice_bounds(23), (20, 23));
    /// ```
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.page_size).min(length);
        let end = (start + self.page_size).min(length);
        (start, end)
    }

    /// Returns how many items sit on the current page, which may be less
    /// than the page capacity on the last page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Computes the page-button window for the current state.
    ///
    /// See [`compute_window`]; `total` is the pager's page count, so the
    /// window can never reference a page past the last one.
    pub fn window(&self, max_visible: usize) -> Vec<PageSlot> {
        compute_window(self.page, self.total_pages, max_visible)
    }
}
