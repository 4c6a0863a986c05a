//! Valuation client against a mock HTTP server.

use std::collections::HashMap;

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toctoc::agent::AppraisalRequest;
use toctoc::config::ToctocConfig;
use toctoc::error::ToctocError;
use toctoc::valuation::{PropertyDetails, ValuationClient};

fn providencia_depto() -> PropertyDetails {
    PropertyDetails::builder()
        .latitude(-33.4263)
        .longitude(-70.6170)
        .property_family_type_id(2)
        .usable_area(72.0)
        .bedrooms(2)
        .bathrooms(2)
        .parking_lots(1)
        .build()
}

#[tokio::test]
async fn sale_appraisal_sends_query_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/valorization/appraisal/sale"))
        .and(header("authorization", "Bearer tok-123"))
        .and(query_param("lat", "-33.4263"))
        .and(query_param("long", "-70.617"))
        .and(query_param("propertyFamilyTypeId", "2"))
        .and(query_param("usableArea", "72"))
        .and(query_param("bedrooms", "2"))
        .and(query_param("parkingLots", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"price": 5800, "currency": "UF"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ValuationClient::new("tok-123").with_base_url(server.uri());
    let appraisal = client
        .get_sale_appraisal(&providencia_depto())
        .await
        .unwrap();

    assert_eq!(appraisal["data"]["price"], 5800);

    let received = server.received_requests().await.unwrap();
    let query: HashMap<String, String> = received[0].url.query_pairs().into_owned().collect();
    assert!(!query.contains_key("balconyArea"));
    assert!(!query.contains_key("role"));
    assert_eq!(query.len(), 7);
}

#[tokio::test]
async fn invalid_latitude_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ValuationClient::new("tok-123").with_base_url(server.uri());
    let mut details = providencia_depto();
    details.latitude = 95.0;

    let err = client.get_sale_appraisal(&details).await.unwrap_err();
    assert!(matches!(err, ToctocError::InvalidArgument(ref m) if m.contains("latitude")));
}

#[tokio::test]
async fn invalid_longitude_is_rejected() {
    let client = ValuationClient::new("tok-123").with_base_url("http://127.0.0.1:9");
    let mut details = providencia_depto();
    details.longitude = -181.0;

    let err = client.get_sale_appraisal(&details).await.unwrap_err();
    assert!(matches!(err, ToctocError::InvalidArgument(ref m) if m.contains("longitude")));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/valorization/appraisal/sale"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no comparables"))
        .mount(&server)
        .await;

    let client = ValuationClient::new("tok-123").with_base_url(server.uri());
    let err = client
        .get_sale_appraisal(&providencia_depto())
        .await
        .unwrap_err();

    match err {
        ToctocError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no comparables");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn call_endpoint_sends_method_params_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/info/role"))
        .and(query_param("idCommune", "13123"))
        .and(body_json(json!({"role": "1234-22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ValuationClient::new("tok-123").with_base_url(server.uri());
    let params = [("idCommune", "13123".to_string())];
    let body = json!({"role": "1234-22"});
    let response = client
        .call_endpoint("/info/role", Method::POST, Some(&params[..]), Some(&body))
        .await
        .unwrap();

    assert_eq!(response["data"]["ok"], true);
}

#[tokio::test]
async fn collected_appraisal_request_flows_into_valuation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/valorization/appraisal/sale"))
        .and(query_param("lat", "-33.4489"))
        .and(query_param("warehouse", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"price": 4200}})))
        .expect(1)
        .mount(&server)
        .await;

    let request: AppraisalRequest = serde_json::from_value(json!({
        "lat": -33.4489,
        "long": -70.6693,
        "propertyFamilyTypeId": 1,
        "communeId": 13101,
        "warehouse": 1,
        "usableArea": 120.0
    }))
    .unwrap();

    let config = ToctocConfig {
        access_token: Some("tok-123".into()),
        valuation_base_url: Some(server.uri()),
        ..Default::default()
    };
    let client = ValuationClient::from_config(&config).unwrap();
    let appraisal = client.get_sale_appraisal(&request.into()).await.unwrap();

    assert_eq!(appraisal["data"]["price"], 4200);
}

#[test]
fn missing_access_token_is_an_authentication_error() {
    let err = ValuationClient::from_config(&ToctocConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, ToctocError::Authentication(_)));
}
