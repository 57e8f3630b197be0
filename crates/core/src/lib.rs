//! `nadzor-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no network or UI concerns).

pub mod error;
pub mod id;
pub mod validate;

pub use error::DomainError;
pub use id::{BodyId, ControlId, ProductId, UserId};
pub use validate::{FieldErrors, FieldResult};
