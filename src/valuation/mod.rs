//! Client for the property valuation API.

use std::time::Duration;

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ToctocConfig;
use crate::error::{Result, ToctocError};
use crate::provider::http::{bearer_headers, shared_client, status_to_error};
use crate::util::timeout::bounded;

pub const DEFAULT_BASE_URL: &str = "https://gw.toctoc.com/1.0";

const SALE_APPRAISAL_ENDPOINT: &str = "/valorization/appraisal/sale";

/// Attributes of a property to appraise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct PropertyDetails {
    pub latitude: f64,
    pub longitude: f64,
    /// 1 for a house, 2 for an apartment.
    pub property_family_type_id: u32,
    /// Square meters.
    pub usable_area: f64,
    pub balcony_area: Option<f64>,
    pub parking_lots: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub year_construction: Option<u32>,
    /// 1 if the property has a storage unit, 0 otherwise.
    pub warehouse: Option<u32>,
    pub common_expense: Option<f64>,
    pub role: Option<String>,
}

impl PropertyDetails {
    /// Query parameters for the sale appraisal endpoint. Absent options are
    /// omitted.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", self.latitude.to_string()),
            ("long", self.longitude.to_string()),
            ("propertyFamilyTypeId", self.property_family_type_id.to_string()),
            ("usableArea", self.usable_area.to_string()),
        ];

        let optional = [
            ("balconyArea", self.balcony_area.map(|v| v.to_string())),
            ("parkingLots", self.parking_lots.map(|v| v.to_string())),
            ("bedrooms", self.bedrooms.map(|v| v.to_string())),
            ("bathrooms", self.bathrooms.map(|v| v.to_string())),
            ("yearConstruction", self.year_construction.map(|v| v.to_string())),
            ("warehouse", self.warehouse.map(|v| v.to_string())),
            ("commonExpense", self.common_expense.map(|v| v.to_string())),
            ("role", self.role.clone()),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        params
    }
}

/// Reject coordinates outside the valid ranges (NaN included).
pub fn validate_coordinates(lat: f64, long: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ToctocError::InvalidArgument(format!(
            "latitude must be between -90 and 90 degrees, got {lat}"
        )));
    }
    if !(-180.0..=180.0).contains(&long) {
        return Err(ToctocError::InvalidArgument(format!(
            "longitude must be between -180 and 180 degrees, got {long}"
        )));
    }
    Ok(())
}

/// Bearer-authenticated client for the valuation API.
pub struct ValuationClient {
    access_token: String,
    base_url: String,
    timeout: Duration,
}

impl ValuationClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &ToctocConfig) -> Result<Self> {
        let client = Self::new(config.require_access_token()?).with_timeout(config.timeout());
        Ok(match &config.valuation_base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appraise a property for sale. Coordinates are validated before any
    /// request is made.
    pub async fn get_sale_appraisal(&self, details: &PropertyDetails) -> Result<serde_json::Value> {
        validate_coordinates(details.latitude, details.longitude)?;
        let params = details.query_params();
        self.call_endpoint(SALE_APPRAISAL_ENDPOINT, Method::GET, Some(params.as_slice()), None)
            .await
    }

    /// Call any endpoint under the base URL and return its JSON body.
    pub async fn call_endpoint(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&[(&str, String)]>,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "valuation request");

        let mut request = shared_client()
            .request(method, &url)
            .headers(bearer_headers(&self.access_token));
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        bounded(endpoint, self.timeout, send_json(request)).await
    }
}

async fn send_json(request: reqwest::RequestBuilder) -> Result<serde_json::Value> {
    let resp = request.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body_text = resp.text().await.unwrap_or_default();
        return Err(status_to_error(status.as_u16(), &body_text));
    }
    Ok(resp.json().await?)
}
