//! Flat business record

use serde::Serialize;

/// Flat projection of one search result
///
/// Built only by the mapper in [`crate::mapper`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub(crate) name: String,
    pub(crate) address: Option<String>,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) zip_code: String,
    pub(crate) country_code: String,
    pub(crate) url: String,
    pub(crate) phone: String,
    pub(crate) rating: f64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl Business {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First line of the street address, if the listing has one
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// State or region code
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> Business {
    Business {
        name: name.to_string(),
        address: Some("1 Main St".to_string()),
        city: "Brea".to_string(),
        state: "CA".to_string(),
        zip_code: "92821".to_string(),
        country_code: "US".to_string(),
        url: format!("http://www.yelp.com/biz/{}", name.to_lowercase().replace(' ', "-")),
        phone: "7145550100".to_string(),
        rating: 4.5,
        latitude: 33.9167,
        longitude: -117.9,
    }
}
