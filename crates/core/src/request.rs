//! Request construction for the Yelp API v2 endpoints
//!
//! Builds the endpoint URL and ordered query parameters for each call.
//! Nothing here touches the network; the shell signs and sends the
//! resulting [`ApiRequest`].

pub const DEFAULT_BASE_URL: &str = "http://api.yelp.com";
pub const SEARCH_PATH: &str = "/v2/search";
pub const BUSINESS_PATH: &str = "/v2/business";

/// Number of results requested when the caller does not say otherwise
pub const DEFAULT_SEARCH_LIMIT: u32 = 3;

/// Error type for invalid request arguments
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("search term must not be empty")]
    EmptyTerm,

    #[error("location must not be empty")]
    EmptyLocation,

    #[error("limit must be a positive integer")]
    InvalidLimit,

    #[error("radius must be a positive number of meters")]
    InvalidRadius,

    #[error("business id must not be empty")]
    EmptyBusinessId,
}

/// Options for a search-by-location call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results; the server applies its own cap on top
    pub limit: u32,
    /// Search radius in meters
    pub radius: Option<u32>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            radius: None,
        }
    }
}

/// An unsigned GET request against one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Endpoint URL without query string
    pub url: String,
    /// Query parameters, in the order they are sent
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Full URL with the percent-encoded query string appended
    pub fn complete_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url, query)
    }
}

/// Build the request for `GET /v2/search`
pub fn build_search_request(
    base_url: &str,
    term: &str,
    location: &str,
    options: &SearchOptions,
) -> Result<ApiRequest, RequestError> {
    if term.trim().is_empty() {
        return Err(RequestError::EmptyTerm);
    }
    if location.trim().is_empty() {
        return Err(RequestError::EmptyLocation);
    }
    if options.limit == 0 {
        return Err(RequestError::InvalidLimit);
    }

    let mut query = vec![
        ("term".to_string(), term.to_string()),
        ("location".to_string(), location.to_string()),
        ("limit".to_string(), options.limit.to_string()),
    ];

    match options.radius {
        Some(0) => return Err(RequestError::InvalidRadius),
        Some(radius) => query.push(("radius_filter".to_string(), radius.to_string())),
        None => {}
    }

    Ok(ApiRequest {
        url: endpoint(base_url, SEARCH_PATH),
        query,
    })
}

/// Build the request for `GET /v2/business/{id}`
pub fn build_business_request(base_url: &str, business_id: &str) -> Result<ApiRequest, RequestError> {
    let business_id = business_id.trim();
    if business_id.is_empty() {
        return Err(RequestError::EmptyBusinessId);
    }

    let path = format!("{BUSINESS_PATH}/{}", urlencoding::encode(business_id));

    Ok(ApiRequest {
        url: endpoint(base_url, &path),
        query: Vec::new(),
    })
}

// Handle base_url that may or may not have trailing slash
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
