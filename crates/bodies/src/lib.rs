//! `nadzor-bodies` — inspection bodies: organizations with jurisdiction and
//! competency authority, each with exactly one contact person.

pub mod body;

pub use body::{BodyDraft, Competency, ContactPerson, InspectionBody, Jurisdiction};
