//! Trait seam between the transport and the code that consumes controls.
//!
//! The report and presentation layers only need a handful of operations on
//! the controls collection. `ApiClient` implements them over HTTP; tests
//! substitute an in-memory fake.

use async_trait::async_trait;

use nadzor_controls::InspectionControl;
use nadzor_core::ControlId;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::ControlFilter;

/// Operations on the inspection-control collection.
#[async_trait]
pub trait ControlsApi {
    async fn list_controls(&self) -> ApiResult<Vec<InspectionControl>>;

    async fn filter_controls(&self, filter: &ControlFilter) -> ApiResult<Vec<InspectionControl>>;

    async fn create_control(&self, control: &InspectionControl) -> ApiResult<InspectionControl>;

    async fn delete_control(&self, id: ControlId) -> ApiResult<()>;
}

#[async_trait]
impl ControlsApi for ApiClient {
    async fn list_controls(&self) -> ApiResult<Vec<InspectionControl>> {
        self.controls().await
    }

    async fn filter_controls(&self, filter: &ControlFilter) -> ApiResult<Vec<InspectionControl>> {
        ApiClient::filter_controls(self, filter).await
    }

    async fn create_control(&self, control: &InspectionControl) -> ApiResult<InspectionControl> {
        ApiClient::create_control(self, control).await
    }

    async fn delete_control(&self, id: ControlId) -> ApiResult<()> {
        ApiClient::delete_control(self, id).await
    }
}
