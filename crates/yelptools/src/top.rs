use serde::{Deserialize, Serialize};

use crate::client::YelpClient;
use crate::prelude::{eprintln, println, *};
use yelptools_core::business::Business;
use yelptools_core::mapper::first_business_id;
use yelptools_core::request::SearchOptions;

/// Options for the search-then-lookup flow
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct TopOptions {
    /// Search term
    pub term: String,

    /// Location: address, neighborhood, city or postal code
    pub location: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search, then look up the top result by id
pub async fn top_business_data(
    client: &YelpClient,
    term: &str,
    location: &str,
    verbose: bool,
) -> Result<Business> {
    let body = client
        .search_by_location(term, location, &SearchOptions::default())
        .await?;
    let id = first_business_id(&body)?;

    if verbose {
        eprintln!("Querying business info for the top result \"{id}\" ...");
    }

    crate::business::business_data(client, &id).await
}

/// Handle the top command
pub async fn handler(options: TopOptions, client: &YelpClient, verbose: bool) -> Result<()> {
    let business = top_business_data(client, &options.term, &options.location, verbose).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&business)?);
    } else {
        crate::business::display_business(&business);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use yelptools_core::credentials::Credentials;

    fn hat() -> serde_json::Value {
        json!({
            "id": "the-hat-brea",
            "name": "The Hat",
            "url": "http://www.yelp.com/biz/the-hat-brea",
            "phone": "7145290370",
            "rating": 4.5,
            "location": {
                "address": ["1 W Imperial Hwy"],
                "city": "Brea",
                "state_code": "CA",
                "postal_code": "92821",
                "country_code": "US",
                "coordinate": {"latitude": 33.9167, "longitude": -117.9}
            }
        })
    }

    #[tokio::test]
    async fn test_top_business_looks_up_first_result() {
        // Arrange: the second search entry has no id
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                json!({"total": 2, "businesses": [hat(), {"name": "No Id"}]}).to_string(),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/business/the-hat-brea"))
            .respond_with(ResponseTemplate::new(200).set_body_string(hat().to_string()))
            .expect(1)
            .mount(&server)
            .await;

        let credentials =
            Credentials::new("consumer-key", "consumer-secret", "token", "token-secret").unwrap();
        let client = YelpClient::new(credentials, server.uri()).unwrap();

        // Act
        let business = top_business_data(&client, "dinner", "Brea, CA", true)
            .await
            .unwrap();

        // Assert
        assert_eq!(business.name(), "The Hat");
        assert_eq!(business.city(), "Brea");
    }
}
