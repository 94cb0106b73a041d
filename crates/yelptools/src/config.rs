use std::collections::HashMap;
use std::path::Path;

use crate::prelude::*;
use yelptools_core::credentials::{
    parse_properties, Credentials, CONSUMER_KEY, CONSUMER_SECRET, TOKEN, TOKEN_SECRET,
};

/// Environment variables that override the credential file, keyed by
/// the properties key they replace
pub const ENV_OVERRIDES: [(&str, &str); 4] = [
    (CONSUMER_KEY, "YELP_CONSUMER_KEY"),
    (CONSUMER_SECRET, "YELP_CONSUMER_SECRET"),
    (TOKEN, "YELP_TOKEN"),
    (TOKEN_SECRET, "YELP_TOKEN_SECRET"),
];

/// Load credentials from the properties file, with environment overrides
///
/// The file may be absent when every value comes from the environment.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(Error::Configuration(format!(
                "failed to read credential file {}: {}",
                path.display(),
                e
            ))
            .into())
        }
    };

    resolve_credentials(text.as_deref(), |name| std::env::var(name).ok())
        .wrap_err_with(|| format!("Failed to load credentials from {}", path.display()))
}

/// Merge file contents and environment lookups into a credential set
fn resolve_credentials(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Credentials> {
    let mut props: HashMap<String, String> = file.map(parse_properties).unwrap_or_default();

    for (key, var) in ENV_OVERRIDES {
        if let Some(value) = env(var).filter(|v| !v.trim().is_empty()) {
            props.insert(key.to_string(), value);
        }
    }

    if file.is_none() && props.is_empty() {
        return Err(Error::Configuration(
            "credential file not found and no YELP_* environment variables set".to_string(),
        )
        .into());
    }

    Credentials::from_properties(&props).map_err(|e| Error::Configuration(e.to_string()).into())
}
