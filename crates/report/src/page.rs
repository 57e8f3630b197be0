//! Report page state machine.
//!
//! `Idle → Loading → Generated`; resubmission re-enters `Loading`. A detail
//! sub-view shows one record of a generated report and returns to the
//! report on close. No other states.
//!
//! Rapid resubmission is resolved by sequencing: every submission gets a
//! fresh ticket, and only a response carrying the newest ticket is applied.
//! The last-issued request wins; stale responses are discarded.

use nadzor_client::ControlFilter;
use nadzor_controls::InspectionControl;
use nadzor_core::ControlId;

use crate::stats::ReportStats;

/// Identifies one submitted fetch; responses must present it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

/// The report view's main state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportState {
    /// No query submitted yet.
    Idle,
    /// A list fetch is in flight.
    Loading,
    /// Results and summary counts are available.
    Generated {
        controls: Vec<InspectionControl>,
        stats: ReportStats,
    },
}

/// Driver for the report view.
#[derive(Debug)]
pub struct ReportPage {
    state: ReportState,
    filter: ControlFilter,
    newest: u64,
    detail: Option<InspectionControl>,
}

impl Default for ReportPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPage {
    pub fn new() -> Self {
        Self {
            state: ReportState::Idle,
            filter: ControlFilter::default(),
            newest: 0,
            detail: None,
        }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn filter(&self) -> &ControlFilter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReportState::Loading)
    }

    pub fn stats(&self) -> Option<ReportStats> {
        match &self.state {
            ReportState::Generated { stats, .. } => Some(*stats),
            _ => None,
        }
    }

    /// Submit (or resubmit) the report query.
    ///
    /// Supersedes any in-flight fetch: its ticket becomes stale and its
    /// eventual response will be discarded.
    pub fn submit(&mut self, filter: ControlFilter) -> RequestTicket {
        self.newest += 1;
        self.filter = filter;
        self.detail = None;
        self.state = ReportState::Loading;
        RequestTicket(self.newest)
    }

    /// Apply a completed fetch. Returns whether the response was applied;
    /// a stale ticket is discarded without touching the state.
    pub fn complete(&mut self, ticket: RequestTicket, controls: Vec<InspectionControl>) -> bool {
        if ticket.0 != self.newest || !matches!(self.state, ReportState::Loading) {
            return false;
        }
        let stats = ReportStats::from_controls(&controls);
        self.state = ReportState::Generated { controls, stats };
        true
    }

    /// Record a failed fetch. The page falls back to `Idle` so the user can
    /// resubmit; stale failures are ignored like stale responses.
    pub fn fail(&mut self, ticket: RequestTicket) -> bool {
        if ticket.0 != self.newest || !matches!(self.state, ReportState::Loading) {
            return false;
        }
        self.state = ReportState::Idle;
        true
    }

    /// Enter the detail sub-view for one record of the generated report.
    pub fn open_detail(&mut self, id: ControlId) -> Option<&InspectionControl> {
        let ReportState::Generated { controls, .. } = &self.state else {
            return None;
        };
        let control = controls.iter().find(|c| c.id == Some(id))?.clone();
        self.detail = Some(control);
        self.detail.as_ref()
    }

    pub fn detail(&self) -> Option<&InspectionControl> {
        self.detail.as_ref()
    }

    /// Close the detail sub-view, returning to the generated report.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nadzor_bodies::{BodyDraft, Competency, Jurisdiction};
    use nadzor_core::BodyId;
    use nadzor_products::ProductDraft;

    fn control(id: i64, safe: bool) -> InspectionControl {
        let mut body = BodyDraft {
            name: "Tržišna inspekcija".to_string(),
            jurisdiction: Some(Jurisdiction::Fbih),
            competency: Some(Competency::TrzisnaInspekcija),
            first_name: "Lejla".to_string(),
            last_name: "Ferhatović".to_string(),
            email: "lejla@example.com".to_string(),
            phone_prefix: "+387".to_string(),
            phone_number: "62111222".to_string(),
            ..BodyDraft::default()
        }
        .validate()
        .unwrap();
        body.id = Some(BodyId::new(1));

        let product = ProductDraft {
            name: "Čaj".to_string(),
            manufacturer: "Biljar".to_string(),
            country: "TURSKA".to_string(),
            ..ProductDraft::default()
        }
        .validate()
        .unwrap();

        InspectionControl {
            id: Some(ControlId::new(id)),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            body,
            product,
            narrative: "Bez primjedbi.".to_string(),
            product_safe: safe,
        }
    }

    #[test]
    fn starts_idle_and_submits_into_loading() {
        let mut page = ReportPage::new();
        assert_eq!(*page.state(), ReportState::Idle);

        page.submit(ControlFilter::default());
        assert!(page.is_loading());
        assert_eq!(page.stats(), None);
    }

    #[test]
    fn completion_generates_stats() {
        let mut page = ReportPage::new();
        let ticket = page.submit(ControlFilter::default());

        assert!(page.complete(ticket, vec![control(1, true), control(2, false)]));
        let stats = page.stats().unwrap();
        assert_eq!((stats.total, stats.safe, stats.unsafe_count), (2, 1, 1));
    }

    #[test]
    fn resubmission_reenters_loading_and_supersedes() {
        let mut page = ReportPage::new();
        let first = page.submit(ControlFilter::default());
        let second = page.submit(ControlFilter {
            safe: Some(true),
            ..ControlFilter::default()
        });

        // The first response arrives late and is discarded.
        assert!(!page.complete(first, vec![control(1, false)]));
        assert!(page.is_loading());

        // The newest response is applied.
        assert!(page.complete(second, vec![control(2, true)]));
        let stats = page.stats().unwrap();
        assert_eq!((stats.total, stats.safe), (1, 1));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut page = ReportPage::new();
        let first = page.submit(ControlFilter::default());
        let second = page.submit(ControlFilter::default());

        assert!(!page.fail(first));
        assert!(page.is_loading());

        assert!(page.fail(second));
        assert_eq!(*page.state(), ReportState::Idle);
    }

    #[test]
    fn detail_view_opens_from_generated_and_closes_back() {
        let mut page = ReportPage::new();
        let ticket = page.submit(ControlFilter::default());
        page.complete(ticket, vec![control(7, true)]);

        assert!(page.open_detail(ControlId::new(7)).is_some());
        assert!(page.detail().is_some());

        page.close_detail();
        assert!(page.detail().is_none());
        assert!(matches!(page.state(), ReportState::Generated { .. }));
    }

    #[test]
    fn detail_view_requires_a_generated_report() {
        let mut page = ReportPage::new();
        assert!(page.open_detail(ControlId::new(1)).is_none());

        page.submit(ControlFilter::default());
        assert!(page.open_detail(ControlId::new(1)).is_none());
    }

    #[test]
    fn resubmission_closes_any_open_detail() {
        let mut page = ReportPage::new();
        let ticket = page.submit(ControlFilter::default());
        page.complete(ticket, vec![control(7, true)]);
        page.open_detail(ControlId::new(7));

        page.submit(ControlFilter::default());
        assert!(page.detail().is_none());
    }
}
