//! Report aggregation over filtered inspection controls and the state
//! machine backing the report view.

pub mod page;
pub mod stats;

pub use page::{ReportPage, ReportState, RequestTicket};
pub use stats::{ReportStats, body_display_name};
