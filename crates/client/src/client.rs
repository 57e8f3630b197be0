//! HTTP client wrapper over the inspection backend.
//!
//! Issues authenticated REST calls against the three resource collections
//! and the auth endpoints, attaching `Authorization: Bearer <token>` when a
//! session token is present. Raw failures are logged here; callers show the
//! user a generic message.

use serde::Serialize;
use serde::de::DeserializeOwned;

use nadzor_bodies::InspectionBody;
use nadzor_controls::InspectionControl;
use nadzor_core::{BodyId, ControlId, ProductId};
use nadzor_products::Product;

use crate::error::{ApiError, ApiResult};
use crate::request::{
    BODIES_PATH, BodySearch, BodySearchRequest, CONTROLS_PATH, ControlFilter, PRODUCTS_PATH,
    Request,
};
use crate::session::AuthUser;

#[derive(Serialize)]
struct SignUpPayload<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignInPayload<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authenticated REST client.
///
/// The token is set at construction and read on every request, never
/// mutated mid-flight; a login produces a new client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let resp = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %message, "api request failed");
            return Err(ApiError::Api(status.as_u16(), message));
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        resp.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to decode api response");
            ApiError::Parse(e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, request: &Request) -> ApiResult<T> {
        let mut builder = self.http.get(self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        let resp = self.send(builder).await?;
        Self::decode(resp).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.send(self.http.post(self.url(path)).json(body)).await?;
        Self::decode(resp).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.send(self.http.put(self.url(path)).json(body)).await?;
        Self::decode(resp).await
    }

    /// DELETE returning no content.
    async fn delete_empty(&self, path: &str) -> ApiResult<()> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    // ── auth ────────────────────────────────────────────────────────────

    /// `POST /api/auth/signup`. The success body is a plain message.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> ApiResult<()> {
        let payload = SignUpPayload {
            username,
            email,
            password,
        };
        self.send(self.http.post(self.url("/api/auth/signup")).json(&payload))
            .await?;
        Ok(())
    }

    /// `POST /api/auth/signin`. Returns the signed-in user with its token.
    pub async fn sign_in(&self, username: &str, password: &str) -> ApiResult<AuthUser> {
        let payload = SignInPayload { username, password };
        self.post_json("/api/auth/signin", &payload).await
    }

    // ── inspection bodies ───────────────────────────────────────────────

    pub async fn bodies(&self) -> ApiResult<Vec<InspectionBody>> {
        self.get_json(&Request::new(BODIES_PATH)).await
    }

    /// All bodies sorted by name, server-side.
    pub async fn bodies_sorted(&self) -> ApiResult<Vec<InspectionBody>> {
        self.get_json(&Request::new(format!("{BODIES_PATH}/sortirano")))
            .await
    }

    pub async fn body(&self, id: BodyId) -> ApiResult<InspectionBody> {
        self.get_json(&Request::new(format!("{BODIES_PATH}/{id}")))
            .await
    }

    pub async fn create_body(&self, body: &InspectionBody) -> ApiResult<InspectionBody> {
        self.post_json(BODIES_PATH, body).await
    }

    pub async fn update_body(&self, id: BodyId, body: &InspectionBody) -> ApiResult<InspectionBody> {
        self.put_json(&format!("{BODIES_PATH}/{id}"), body).await
    }

    pub async fn delete_body(&self, id: BodyId) -> ApiResult<()> {
        self.delete_empty(&format!("{BODIES_PATH}/{id}")).await
    }

    /// Run a composed body search.
    ///
    /// Single-entity lookups (email, phone) answer 404 when nothing
    /// matches; that is "no result", not an error, so it becomes an empty
    /// list here.
    pub async fn search_bodies(&self, search: &BodySearch) -> ApiResult<Vec<InspectionBody>> {
        match search.compose() {
            BodySearchRequest::List(request) => self.get_json(&request).await,
            BodySearchRequest::Lookup(request) => {
                match self.get_json::<InspectionBody>(&request).await {
                    Ok(body) => Ok(vec![body]),
                    Err(e) if e.is_not_found() => Ok(Vec::new()),
                    Err(e) => Err(e),
                }
            }
        }
    }

    // ── products ────────────────────────────────────────────────────────

    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get_json(&Request::new(PRODUCTS_PATH)).await
    }

    pub async fn product(&self, id: ProductId) -> ApiResult<Product> {
        self.get_json(&Request::new(format!("{PRODUCTS_PATH}/{id}")))
            .await
    }

    pub async fn create_product(&self, product: &Product) -> ApiResult<Product> {
        self.post_json(PRODUCTS_PATH, product).await
    }

    pub async fn update_product(&self, id: ProductId, product: &Product) -> ApiResult<Product> {
        self.put_json(&format!("{PRODUCTS_PATH}/{id}"), product).await
    }

    pub async fn delete_product(&self, id: ProductId) -> ApiResult<()> {
        self.delete_empty(&format!("{PRODUCTS_PATH}/{id}")).await
    }

    /// Products whose name contains the given fragment.
    pub async fn search_products(&self, name: &str) -> ApiResult<Vec<Product>> {
        let mut request = Request::new(format!("{PRODUCTS_PATH}/pretraga/naziv"));
        request.query.push(("naziv".to_string(), name.to_string()));
        self.get_json(&request).await
    }

    /// The country-of-origin list the backend accepts.
    pub async fn countries(&self) -> ApiResult<Vec<String>> {
        self.get_json(&Request::new(format!("{PRODUCTS_PATH}/drzave")))
            .await
    }

    // ── inspection controls ─────────────────────────────────────────────

    pub async fn controls(&self) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&Request::new(CONTROLS_PATH)).await
    }

    pub async fn control(&self, id: ControlId) -> ApiResult<InspectionControl> {
        self.get_json(&Request::new(format!("{CONTROLS_PATH}/{id}")))
            .await
    }

    pub async fn create_control(&self, control: &InspectionControl) -> ApiResult<InspectionControl> {
        self.post_json(CONTROLS_PATH, control).await
    }

    pub async fn update_control(
        &self,
        id: ControlId,
        control: &InspectionControl,
    ) -> ApiResult<InspectionControl> {
        self.put_json(&format!("{CONTROLS_PATH}/{id}"), control).await
    }

    pub async fn delete_control(&self, id: ControlId) -> ApiResult<()> {
        self.delete_empty(&format!("{CONTROLS_PATH}/{id}")).await
    }

    /// Combined AND filter; absent fields are omitted from the query.
    pub async fn filter_controls(&self, filter: &ControlFilter) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&filter.compose()).await
    }

    pub async fn controls_by_period(
        &self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> ApiResult<Vec<InspectionControl>> {
        let mut request = Request::new(format!("{CONTROLS_PATH}/period"));
        request
            .query
            .push(("startDatum".to_string(), start.to_string()));
        request.query.push(("endDatum".to_string(), end.to_string()));
        self.get_json(&request).await
    }

    pub async fn controls_by_body(&self, id: BodyId) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&Request::new(format!("{CONTROLS_PATH}/tijelo/{id}")))
            .await
    }

    pub async fn controls_by_product(&self, id: ProductId) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&Request::new(format!("{CONTROLS_PATH}/proizvod/{id}")))
            .await
    }

    pub async fn controls_by_safety(&self, safe: bool) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&Request::new(format!("{CONTROLS_PATH}/sigurnost/{safe}")))
            .await
    }

    pub async fn controls_by_body_and_safety(
        &self,
        id: BodyId,
        safe: bool,
    ) -> ApiResult<Vec<InspectionControl>> {
        self.get_json(&Request::new(format!(
            "{CONTROLS_PATH}/tijelo/{id}/sigurnost/{safe}"
        )))
        .await
    }
}
