use rand::{distributions::Alphanumeric, Rng};
use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::prelude::*;
use yelptools_core::credentials::Credentials;
use yelptools_core::oauth::{self, Nonce};
use yelptools_core::request::{
    build_business_request, build_search_request, ApiRequest, SearchOptions,
};

const NONCE_LENGTH: usize = 32;

/// Signed client for the Yelp API v2
///
/// One request per call: no retries, no caching.
#[derive(Debug, Clone)]
pub struct YelpClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl YelpClient {
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("yelptools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /v2/search` by term and location; returns the raw body
    pub async fn search_by_location(
        &self,
        term: &str,
        location: &str,
        options: &SearchOptions,
    ) -> Result<String> {
        let request = build_search_request(&self.base_url, term, location, options)?;
        self.send(&request).await
    }

    /// `GET /v2/business/{id}`; returns the raw body
    pub async fn lookup_by_id(&self, business_id: &str) -> Result<String> {
        let request = build_business_request(&self.base_url, business_id)?;
        self.send(&request).await
    }

    async fn send(&self, request: &ApiRequest) -> Result<String> {
        let url = request.complete_url();
        log::info!("Querying {url} ...");

        let authorization = oauth::authorization_header(
            &self.credentials,
            "GET",
            &request.url,
            &request.query,
            &fresh_nonce(),
        )
        .map_err(|e| Error::Configuration(format!("failed to sign request: {e}")))?;

        let authorization = HeaderValue::from_str(&authorization)
            .map_err(|e| Error::Configuration(format!("invalid Authorization header: {e}")))?;

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| Error::Network(format!("failed to send request to {url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(body)
    }
}

fn fresh_nonce() -> Nonce {
    let nonce = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect();

    Nonce {
        nonce,
        timestamp: chrono::Utc::now().timestamp(),
    }
}
