//! `nadzor-controls` — inspection controls: dated events linking one
//! inspection body and one product with a safety verdict.

pub mod control;

pub use control::{ControlDraft, InspectionControl};
