//! Listview - filtering, sorting, pagination and selection state for
//! client-side data tables.
//!
//! The crate has two halves:
//!
//! - The **normalizer** ([`Normalizer`]) is a pure function from a record
//!   collection, a [`PredicateSet`] and a [`SortSpec`] to the ordered rows a
//!   table shows.
//! - The **controller** ([`ViewController`]) owns the interactive state of a
//!   table (search box, filters, sort, page cursor, selection, column
//!   visibility) and keeps it consistent as the user interacts with it.
//!
//! Records are read through the [`Record`] trait, usually derived.
//!
//! # Quick Start
//!
//! ```rust
//! use listview::{Column, DateRange, Record, RecordEnum, ViewConfig, ViewController};
//!
//! #[derive(Clone, Copy)]
//! enum Status {
//!     Pending,
//!     Received,
//! }
//!
//! impl RecordEnum for Status {
//!     fn label(&self) -> &str {
//!         match self {
//!             Status::Pending => "pending",
//!             Status::Received => "received",
//!         }
//!     }
//! }
//!
//! #[derive(Record)]
//! struct Payroll {
//!     #[record(String, key)]
//!     payroll_id: String,
//!     #[record(String)]
//!     employee_name: String,
//!     #[record(Enum)]
//!     status: Status,
//!     #[record(Timestamp)]
//!     processed_at: Option<i64>,
//! }
//!
//! let payrolls: Vec<Payroll> = (0..12)
//!     .map(|i| Payroll {
//!         payroll_id: format!("PR-{i:03}"),
//!         employee_name: format!("Employee {i}"),
//!         status: if i < 5 { Status::Pending } else { Status::Received },
//!         processed_at: None,
//!     })
//!     .collect();
//!
//! let config = ViewConfig::new([
//!     Column::new(Payroll::PAYROLL_ID).label("Payroll ID"),
//!     Column::new(Payroll::EMPLOYEE_NAME).label("Employee"),
//!     Column::new(Payroll::STATUS).label("Status"),
//!     Column::new(Payroll::PROCESSED_AT).hidden(),
//! ])
//! .with_searchable([Payroll::PAYROLL_ID, Payroll::EMPLOYEE_NAME])
//! .with_timestamp_field(Payroll::PROCESSED_AT)
//! .with_categorical([Payroll::STATUS]);
//!
//! let mut view = ViewController::new(payrolls, config)?;
//! view.set_categorical_filter(Payroll::STATUS, "pending")?;
//!
//! let snapshot = view.view();
//! assert_eq!(snapshot.rows.len(), 5);
//! assert_eq!(snapshot.summary.page_count, 1);
//! assert_eq!(snapshot.showing.to_string(), "Showing 1 to 5 of 5 entries");
//!
//! // records without a timestamp never match an active date filter
//! view.set_date_range(DateRange::Today)?;
//! assert_eq!(view.filtered_len(), 0);
//! # Ok::<(), listview::ViewError>(())
//! ```
//!
//! # Debounced search
//!
//! [`ViewController::set_search_text`] updates the search box immediately
//! but only schedules the filter update. The event loop calls
//! [`ViewController::poll`]; once the quiet period (500 ms by default) has
//! passed without another keystroke, the last text is committed, the page
//! cursor resets and the text is mirrored into the query string.
//!
//! # Logging
//!
//! State transitions are logged with `tracing` at `debug` level, normalizer
//! runs at `trace` level. Install a subscriber to see them.

mod clock;
mod columns;
mod config;
mod controller;
mod date_range;
mod debounce;
mod error;
mod normalize;
mod ordering;
mod pagination;
mod predicate;
mod query_string;
mod record;
mod selection;
mod state;
mod value;

// Re-export public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use columns::{Column, ColumnSet};
pub use config::{TableOptions, ViewConfig, DEFAULT_SEARCH_PARAM};
pub use controller::ViewController;
pub use date_range::{DateRange, DateWindow};
pub use debounce::{Debouncer, TaskHandle, DEFAULT_DEBOUNCE};
pub use error::{Result, ViewError};
pub use normalize::Normalizer;
pub use ordering::{compare_values, SortDirection, SortKey, SortSpec};
pub use pagination::{
    page_count, PageButton, PageSummary, Pagination, ShowingRange, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_SIZES,
};
pub use predicate::{FilterValue, PredicateSet};
pub use query_string::QueryParams;
pub use record::{Record, RecordEnum, RecordKey, RecordText, RecordTimestamp};
pub use selection::{CheckState, SelectionSet};
pub use state::{PageRow, ViewSnapshot, ViewState};
pub use value::{Number, Timestamp, Value};

pub use listview_macros::Record;
