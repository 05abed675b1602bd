#![warn(missing_docs)]

//! # recordlist
//!
//! A record list controller for admin-style terminal applications built on
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs): client-side
//! pagination, combinable filters, identifier-based multi-selection, and
//! server-backed record actions composed into one reusable component.
//!
//! ## Overview
//!
//! Admin screens repeat the same shape: fetch a collection, show a page of
//! it, let the operator search and filter, select several records, and run
//! lifecycle actions (approve, reject, delete, schedule) against a REST
//! backend. This crate packages that shape following the Elm Architecture
//! pattern, so the controller drops into any bubbletea-rs program as a
//! `Model` with `init()`, `update()`, and `view()`.
//!
//! ## Components
//!
//! - [`pagination`]: page window calculator and a 1-based [`pagination::Pager`]
//! - [`filter`]: combinable substring, exact-match, and calendar-date filters
//! - [`selection`]: order-independent record selection with tri-state pages
//! - [`record`]: the [`record::Record`] trait your data type implements
//! - [`client`]: the [`client::RecordApi`] seam and its reqwest-backed
//!   [`client::HttpApi`] implementation
//! - [`controller`]: the composed list component
//!
//! ## Quick Start
//!
//! ```rust
//! use recordlist::prelude::*;
//!
//! #[derive(Clone)]
//! struct Applicant {
//!     id: String,
//!     name: String,
//!     status: String,
//! }
//!
//! impl Record for Applicant {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!     fn search_values(&self) -> Vec<String> {
//!         vec![self.name.clone()]
//!     }
//!     fn field(&self, key: &str) -> Option<String> {
//!         match key {
//!             "name" => Some(self.name.clone()),
//!             "status" => Some(self.status.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let delegate = ColumnDelegate::new(vec![
//!     Column::new("name", "Name", 24),
//!     Column::new("status", "Status", 10),
//! ]);
//! let mut list: Model<Applicant> = Model::new(delegate, 80, 24).with_title("Applications");
//! list.set_records(vec![Applicant {
//!     id: "APP-001".into(),
//!     name: "Maria Gonzalez".into(),
//!     status: "pending".into(),
//! }]);
//! assert_eq!(list.total_pages(), 1);
//! ```
//!
//! Attach a [`client::HttpApi`] with [`controller::Model::with_api`] for a
//! server-backed list, and a [`controller::Subscription`] for live refresh;
//! see the [`controller`] module docs for the full wiring.

pub mod client;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod selection;

pub use record::Record;

/// Convenient re-exports for typical usage.
///
/// ```rust
/// use recordlist::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{Action, ActionKind, Endpoints, HttpApi, RecordApi, ScheduleNotice};
    pub use crate::controller::{
        channel, Column, ColumnDelegate, ControllerKeyMap, ControllerStyles, Model,
        RecordDelegate, RefreshEvent, Subscription,
    };
    pub use crate::filter::{FilterSet, FILTER_ALL};
    pub use crate::pagination::{compute_window, PageSlot, Pager};
    pub use crate::record::Record;
    pub use crate::selection::{PageState, SelectionSet};
}
