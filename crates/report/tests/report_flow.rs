//! End-to-end flow over the `ControlsApi` seam: create a control, filter it
//! back by body id, drive the report page, then delete and confirm removal.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use nadzor_bodies::{BodyDraft, Competency, InspectionBody, Jurisdiction};
use nadzor_client::{ApiError, ApiResult, ControlFilter, ControlsApi};
use nadzor_controls::InspectionControl;
use nadzor_core::{BodyId, ControlId, ProductId};
use nadzor_products::{Product, ProductDraft};
use nadzor_report::{ReportPage, ReportState};

/// In-memory stand-in for the backend's controls collection. Applies the
/// same AND semantics to filters that the real backend does.
#[derive(Default)]
struct FakeControlsApi {
    records: Mutex<Vec<InspectionControl>>,
    next_id: Mutex<i64>,
}

impl FakeControlsApi {
    fn matches(control: &InspectionControl, filter: &ControlFilter) -> bool {
        if let Some(body_id) = filter.body_id {
            if control.body.id != Some(body_id) {
                return false;
            }
        }
        if let Some(start) = filter.start_date {
            if control.date < start {
                return false;
            }
        }
        if let Some(end) = filter.end_date {
            if control.date > end {
                return false;
            }
        }
        if let Some(safe) = filter.safe {
            if control.product_safe != safe {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ControlsApi for FakeControlsApi {
    async fn list_controls(&self) -> ApiResult<Vec<InspectionControl>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn filter_controls(&self, filter: &ControlFilter) -> ApiResult<Vec<InspectionControl>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|c| Self::matches(c, filter))
            .cloned()
            .collect())
    }

    async fn create_control(&self, control: &InspectionControl) -> ApiResult<InspectionControl> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let mut created = control.clone();
        created.id = Some(ControlId::new(*next_id));
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_control(&self, id: ControlId) -> ApiResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|c| c.id != Some(id));
        if records.len() == before {
            return Err(ApiError::Api(404, "not found".to_string()));
        }
        Ok(())
    }
}

fn body_with_id(id: i64) -> InspectionBody {
    let mut body = BodyDraft {
        name: "Federalna tržišna inspekcija".to_string(),
        jurisdiction: Some(Jurisdiction::Fbih),
        competency: Some(Competency::TrzisnaInspekcija),
        first_name: "Adna".to_string(),
        last_name: "Salkić".to_string(),
        email: "adna.salkic@example.com".to_string(),
        phone_prefix: "+387".to_string(),
        phone_number: "61700800".to_string(),
        ..BodyDraft::default()
    }
    .validate()
    .unwrap();
    body.id = Some(BodyId::new(id));
    body
}

fn product_with_id(id: i64) -> Product {
    let mut product = ProductDraft {
        name: "Kafa mljevena".to_string(),
        manufacturer: "Pržionica".to_string(),
        country: "BRAZIL".to_string(),
        ..ProductDraft::default()
    }
    .validate()
    .unwrap();
    product.id = Some(ProductId::new(id));
    product
}

fn control_for(body_id: i64, product_id: i64, date: &str, safe: bool) -> InspectionControl {
    InspectionControl {
        id: None,
        date: date.parse::<NaiveDate>().unwrap(),
        body: body_with_id(body_id),
        product: product_with_id(product_id),
        narrative: "Kontrola izvršena.".to_string(),
        product_safe: safe,
    }
}

#[tokio::test]
async fn create_filter_delete_round_trip() {
    let api = FakeControlsApi::default();

    let created = api
        .create_control(&control_for(3, 7, "2024-01-10", true))
        .await
        .unwrap();
    let id = created.id.unwrap();

    // Unrelated record that must never match the body filter.
    api.create_control(&control_for(5, 7, "2024-01-11", false))
        .await
        .unwrap();

    let filter = ControlFilter {
        body_id: Some(BodyId::new(3)),
        ..ControlFilter::default()
    };
    let matched = api.filter_controls(&filter).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, Some(id));
    assert!(matched[0].product_safe);

    api.delete_control(id).await.unwrap();
    assert!(api.filter_controls(&filter).await.unwrap().is_empty());
    assert_eq!(api.list_controls().await.unwrap().len(), 1);
}

#[tokio::test]
async fn report_page_driven_through_the_seam() {
    let api = FakeControlsApi::default();
    api.create_control(&control_for(3, 7, "2024-01-10", true))
        .await
        .unwrap();
    api.create_control(&control_for(3, 8, "2024-02-20", false))
        .await
        .unwrap();
    api.create_control(&control_for(4, 7, "2024-01-15", true))
        .await
        .unwrap();

    let mut page = ReportPage::new();
    let filter = ControlFilter {
        body_id: Some(BodyId::new(3)),
        ..ControlFilter::default()
    };
    let ticket = page.submit(filter);
    assert!(page.is_loading());

    let controls = api.filter_controls(page.filter()).await.unwrap();
    assert!(page.complete(ticket, controls));

    let stats = page.stats().unwrap();
    assert_eq!((stats.total, stats.safe, stats.unsafe_count), (2, 1, 1));
    assert!(matches!(page.state(), ReportState::Generated { .. }));
}

#[tokio::test]
async fn superseding_search_discards_the_slow_first_response() {
    let api = FakeControlsApi::default();
    api.create_control(&control_for(3, 7, "2024-01-10", true))
        .await
        .unwrap();

    let mut page = ReportPage::new();

    // First search goes out, then the user immediately narrows the filter.
    let first = page.submit(ControlFilter::default());
    let first_results = api.list_controls().await.unwrap();

    let second = page.submit(ControlFilter {
        safe: Some(false),
        ..ControlFilter::default()
    });
    let second_results = api.filter_controls(page.filter()).await.unwrap();

    // The slow first response lands after the second submission.
    assert!(!page.complete(first, first_results));
    assert!(page.is_loading());

    assert!(page.complete(second, second_results));
    let stats = page.stats().unwrap();
    assert_eq!(stats.total, 0);
}
