//! Styling for the record list controller.
//!
//! All default styles use `AdaptiveColor` so the controller stays readable
//! in both light and dark terminal themes. Every element can be restyled
//! individually by mutating the corresponding field of [`ControllerStyles`].
//!
//! ## Example
//!
//! ```rust
//! use recordlist::controller::ControllerStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = ControllerStyles::default();
//! styles.title = Style::new()
//!     .background(Color::from("#7D56F4"))
//!     .foreground(Color::from("#FFFFFF"))
//!     .bold(true)
//!     .padding(0, 1, 0, 1);
//! ```

use lipgloss_extras::prelude::*;

/// Unicode ellipsis character (…) used for truncated cells and elided
/// pagination ranges.
pub const ELLIPSIS: &str = "…";

/// Styling configuration for all controller UI elements.
#[derive(Debug, Clone)]
pub struct ControllerStyles {
    /// Style for the title bar container.
    pub title_bar: Style,
    /// Style for the list title text.
    pub title: Style,
    /// Style for the pending-count badge next to the title.
    pub badge: Style,
    /// Style for the search prompt label.
    pub search_prompt: Style,
    /// Style for the table column header line.
    pub table_header: Style,
    /// Style for an ordinary row.
    pub row: Style,
    /// Style for the row under the cursor.
    pub cursor_row: Style,
    /// Style for a selected row.
    pub selected_row: Style,
    /// Style for the "No records" message.
    pub no_records: Style,
    /// Style for the pagination area.
    pub pagination: Style,
    /// Style for the current page number.
    pub active_page: Style,
    /// Style for other page numbers and enabled arrows.
    pub inactive_page: Style,
    /// Style for disabled pagination arrows and elided ranges.
    pub disabled_page: Style,
    /// Style for the status bar container.
    pub status_bar: Style,
    /// Style for the transient status notification.
    pub status_message: Style,
    /// Style for the loading marker shown while a fetch is in flight.
    pub loading: Style,
    /// Style for modal titles.
    pub modal_title: Style,
    /// Style for error text inside modals.
    pub modal_error: Style,
    /// Style for key hints at the bottom of modals.
    pub modal_hint: Style,
    /// Style for the help text area.
    pub help_style: Style,
}

impl Default for ControllerStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let very_subdued_color = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };

        Self {
            title_bar: Style::new().padding(0, 0, 1, 2),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            badge: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B91C1C",
                    Dark: "#F87171",
                })
                .bold(true),
            search_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            table_header: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true)
                .padding_left(2),
            row: Style::new().padding_left(2),
            cursor_row: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
            selected_row: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            no_records: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            pagination: Style::new().padding_left(2),
            active_page: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true),
            inactive_page: Style::new().foreground(subdued_color.clone()),
            disabled_page: Style::new().foreground(very_subdued_color),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(0, 0, 1, 2),
            status_message: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#04B575",
            }),
            loading: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            modal_title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            modal_error: Style::new().foreground(AdaptiveColor {
                Light: "#B91C1C",
                Dark: "#F87171",
            }),
            modal_hint: Style::new().foreground(subdued_color),
            help_style: Style::new().padding(1, 0, 0, 2),
        }
    }
}
