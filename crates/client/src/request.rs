//! Filter/search request composition.
//!
//! Given a sparse set of optional filter fields, build the request the HTTP
//! client should issue. Composition is pure and cannot fail; only the
//! resulting network call can.

use chrono::NaiveDate;

use nadzor_bodies::{Competency, Jurisdiction};
use nadzor_core::BodyId;

pub(crate) const BODIES_PATH: &str = "/inspekcijska-tijela";
pub(crate) const PRODUCTS_PATH: &str = "/proizvodi";
pub(crate) const CONTROLS_PATH: &str = "/inspekcijske-kontrole";

/// A composed request description: endpoint path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Keys of the query parameters, in composition order.
    pub fn query_keys(&self) -> Vec<&str> {
        self.query.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// What the composed body-search request yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySearchRequest {
    /// Endpoint returns a list of bodies.
    List(Request),
    /// Endpoint returns a single body, with 404 meaning "no result".
    Lookup(Request),
}

impl BodySearchRequest {
    pub fn request(&self) -> &Request {
        match self {
            BodySearchRequest::List(req) | BodySearchRequest::Lookup(req) => req,
        }
    }
}

/// Sparse search/filter input for inspection bodies.
///
/// Precedence is strict and mutually exclusive: branches are evaluated top
/// to bottom, the first populated one wins and the remaining fields are
/// ignored. Blank or whitespace-only text fields count as absent.
///
/// 1. name substring search
/// 2. contact first + last name (both required)
/// 3. contact email exact lookup
/// 4. contact phone exact lookup
/// 5. jurisdiction and competency combined
/// 6. jurisdiction only
/// 7. competency only
/// 8. no filter: all bodies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySearch {
    pub name: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub jurisdiction: Option<Jurisdiction>,
    pub competency: Option<Competency>,
}

impl BodySearch {
    fn text(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn compose(&self) -> BodySearchRequest {
        use BodySearchRequest::{List, Lookup};

        if let Some(name) = Self::text(&self.name) {
            return List(Request::new(format!("{BODIES_PATH}/pretraga")).param("naziv", name));
        }

        if let (Some(first), Some(last)) = (
            Self::text(&self.contact_first_name),
            Self::text(&self.contact_last_name),
        ) {
            return List(
                Request::new(format!("{BODIES_PATH}/kontakt/osoba"))
                    .param("ime", first)
                    .param("prezime", last),
            );
        }

        if let Some(email) = Self::text(&self.contact_email) {
            return Lookup(Request::new(format!("{BODIES_PATH}/kontakt/email/{email}")));
        }

        if let Some(phone) = Self::text(&self.contact_phone) {
            return Lookup(Request::new(format!("{BODIES_PATH}/kontakt/telefon/{phone}")));
        }

        match (self.jurisdiction, self.competency) {
            (Some(jurisdiction), Some(competency)) => List(
                Request::new(format!("{BODIES_PATH}/filter"))
                    .param("inspektorat", jurisdiction.wire_name())
                    .param("nadleznost", competency.wire_name()),
            ),
            (Some(jurisdiction), None) => List(Request::new(format!(
                "{BODIES_PATH}/inspektorat/{}",
                jurisdiction.wire_name()
            ))),
            (None, Some(competency)) => List(Request::new(format!(
                "{BODIES_PATH}/nadleznost/{}",
                competency.wire_name()
            ))),
            (None, None) => List(Request::new(BODIES_PATH)),
        }
    }
}

/// Filter input for inspection controls.
///
/// Unlike body search, these fields are not mutually exclusive: all present
/// fields are sent together and combined by the backend as a logical AND.
/// Absent fields are omitted from the query, never sent empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFilter {
    pub body_id: Option<BodyId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub safe: Option<bool>,
}

impl ControlFilter {
    pub fn is_empty(&self) -> bool {
        self.body_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.safe.is_none()
    }

    pub fn compose(&self) -> Request {
        let mut request = Request::new(format!("{CONTROLS_PATH}/filter"));
        if let Some(body_id) = self.body_id {
            request = request.param("tijeloId", body_id.to_string());
        }
        if let Some(start) = self.start_date {
            request = request.param("startDatum", start.to_string());
        }
        if let Some(end) = self.end_date {
            request = request.param("endDatum", end.to_string());
        }
        if let Some(safe) = self.safe {
            request = request.param("siguran", safe.to_string());
        }
        request
    }
}
