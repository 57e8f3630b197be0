//! `nadzor-client` — authenticated REST client for the inspection backend.
//!
//! The backend owns all data; this crate composes requests (including the
//! multi-field search/filter queries), issues them with a bearer credential
//! when a session exists, and maps responses into the domain types.

pub mod api;
pub mod client;
pub mod error;
pub mod request;
pub mod session;

pub use api::ControlsApi;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use request::{BodySearch, BodySearchRequest, ControlFilter, Request};
pub use session::{AuthUser, SessionError, SessionStore};
