use anyhow::Context;
use lazy_static::lazy_static;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error as ThisError;
use url::Url;

lazy_static! {
    // No retry middleware: each call is exactly one request on the wire.
    static ref CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

pub struct HttpClient;

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] anyhow::Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in value.into_iter() {
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {value}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

impl HttpClient {
    /// POSTs `body` as JSON and decodes the JSON reply.
    ///
    /// Transport failures, non-success statuses and undecodable bodies
    /// (an empty body included) all surface as `ResponseError`.
    pub async fn post_json<DTO: DeserializeOwned>(
        url: Url,
        headers: HashMap<&'static str, String>,
        body: Value,
    ) -> Result<DTO, HttpClientError> {
        let generator = HeadersMapGenerator::try_from(headers)?;
        let header_map = generator.into_inner();
        let payload = serde_json::to_vec(&body)
            .map_err(|err| HttpClientError::HTTPBuilderError(err.to_string()))?;

        let response = CLIENT
            .post(url.clone())
            .headers(header_map)
            .body(payload)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?
            .error_for_status()
            .with_context(|| format!("Unsuccessful response from {url}"))?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        serde_json::from_slice::<DTO>(&bytes)
            .with_context(|| {
                format!(
                    "Failed to deserialize response {:?}",
                    String::from_utf8_lossy(&bytes)
                )
            })
            .map_err(HttpClientError::ResponseError)
    }
}
