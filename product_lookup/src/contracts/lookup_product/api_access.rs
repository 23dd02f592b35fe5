use crate::config::LookupSettings;
use crate::contracts::lookup_product::LookupProduct;
use crate::product::{Product, ProductId};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_kernel::http_client::HttpClient;
use std::collections::HashMap;
use url::Url;

/// Looks products up through the external "get product" endpoint.
pub struct HttpProductLookup {
    endpoint: Url,
}

impl HttpProductLookup {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    pub fn from_settings(settings: &LookupSettings) -> anyhow::Result<Self> {
        Ok(Self::new(settings.endpoint()?))
    }
}

#[async_trait]
impl LookupProduct for HttpProductLookup {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn get_product(&self, id: &ProductId) -> anyhow::Result<Option<Product>> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting product");
        let response = HttpClient::post_json::<Value>(
            self.endpoint.clone(),
            HashMap::new(),
            json!({ "id": id }),
        )
        .await?;
        decode_lookup_response(response)
    }
}

#[derive(Deserialize, Debug)]
enum ServiceError {
    NotFound { msg: String },
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Turns a response body into zero-or-one record.
///
/// Falsy bodies mean "not found". `{"Ok": record}` and
/// `{"Err": {"NotFound": {..}}}` envelopes are unwrapped. Everything else must
/// be a record.
pub(crate) fn decode_lookup_response(value: Value) -> anyhow::Result<Option<Product>> {
    if is_falsy(&value) {
        return Ok(None);
    }

    let value = match value {
        Value::Object(mut envelope) if envelope.len() == 1 && envelope.contains_key("Ok") => {
            envelope.remove("Ok").unwrap_or(Value::Null)
        }
        Value::Object(mut envelope) if envelope.len() == 1 && envelope.contains_key("Err") => {
            let error = envelope.remove("Err").unwrap_or(Value::Null);
            return match serde_json::from_value::<ServiceError>(error.clone()) {
                Ok(ServiceError::NotFound { msg }) => {
                    tracing::info!(%msg, "Lookup service reported product as missing");
                    Ok(None)
                }
                Err(_) => Err(anyhow!("Lookup service returned an error: {error}")),
            };
        }
        other => other,
    };

    serde_json::from_value::<Product>(value.clone())
        .map(Some)
        .with_context(|| format!("Response is not a product record: {value}"))
}

#[cfg(test)]
mod tests {
    use super::{decode_lookup_response, HttpProductLookup};
    use crate::contracts::lookup_product::LookupProduct;
    use crate::product::{ProductId, RecordId};
    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    const PATH: &str = "/canister-api-endpoint/get_product";

    fn lookup_for(server: &MockServer) -> HttpProductLookup {
        HttpProductLookup::new(Url::parse(&server.url(PATH)).unwrap())
    }

    #[tokio::test]
    async fn test_record_is_returned_for_known_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(PATH)
                    .header("content-type", "application/json")
                    .json_body(json!({ "id": "42" }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "id": 42, "name": "Widget", "origin": "Canada" }));
            })
            .await;

        let product = lookup_for(&server)
            .get_product(&ProductId::from("42"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(product.id, RecordId::Number(42u64.into()));
        assert_eq!(product.name, "Widget");
        assert_eq!(product.origin, "Canada");
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_empty_id_is_sent_unchanged() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(PATH).json_body(json!({ "id": "" }));
                then.status(200)
                    .header("content-type", "application/json")
                    .body("null");
            })
            .await;

        let product = lookup_for(&server)
            .get_product(&ProductId::from(""))
            .await
            .unwrap();

        assert!(product.is_none());
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_null_response_means_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(200)
                    .header("content-type", "application/json")
                    .body("null");
            })
            .await;

        let product = lookup_for(&server)
            .get_product(&ProductId::from("999"))
            .await
            .unwrap();

        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_a_failure_and_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(503);
            })
            .await;

        let result = lookup_for(&server).get_product(&ProductId::from("1")).await;

        assert!(result.is_err());
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_failure() {
        let lookup = HttpProductLookup::new(Url::parse("http://127.0.0.1:1/get_product").unwrap());

        let result = lookup.get_product(&ProductId::from("1")).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_falsy_values_mean_not_found() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(
                decode_lookup_response(value.clone()).unwrap().is_none(),
                "{value} should be treated as not found"
            );
        }
    }

    #[test]
    fn test_ok_envelope_is_unwrapped() {
        let product = decode_lookup_response(json!({
            "Ok": { "id": 3, "name": "Gadget", "origin": "Peru" }
        }))
        .unwrap()
        .unwrap();

        assert_eq!(product.name, "Gadget");
    }

    #[test]
    fn test_not_found_envelope_means_not_found() {
        let product = decode_lookup_response(json!({
            "Err": { "NotFound": { "msg": "A product with id=9 not found" } }
        }))
        .unwrap();

        assert!(product.is_none());
    }

    #[test]
    fn test_unknown_error_envelope_is_a_failure() {
        let result = decode_lookup_response(json!({ "Err": { "Unauthorized": {} } }));

        assert!(result.is_err());
    }

    #[test]
    fn test_truthy_non_records_are_failures() {
        for value in [
            json!(true),
            json!(7),
            json!("widget"),
            json!([]),
            json!({ "id": 1, "name": "Widget" }),
        ] {
            assert!(
                decode_lookup_response(value.clone()).is_err(),
                "{value} should not decode"
            );
        }
    }
}
