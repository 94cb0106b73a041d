use std::path::Path;

use crate::prelude::*;
use yelptools_core::business::Business;
use yelptools_core::export::render_csv;

/// Write business records to `path` as CSV, replacing any existing file
pub fn write_csv(path: &Path, businesses: &[Business]) -> Result<()> {
    let csv = render_csv(businesses)?;

    std::fs::write(path, csv)
        .wrap_err_with(|| format!("Failed to write CSV export to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use yelptools_core::mapper::extract_businesses;

    #[test]
    fn test_write_csv_creates_file() {
        // Arrange
        let body = serde_json::json!({
            "businesses": [{
                "name": "The Famous",
                "url": "http://www.yelp.com/biz/the-famous-beverly-hills",
                "phone": "3102717330",
                "rating": 4.0,
                "location": {
                    "address": ["8500 Wilshire Blvd"],
                    "city": "Beverly Hills",
                    "state_code": "CA",
                    "postal_code": "90211",
                    "country_code": "US",
                    "coordinate": {"latitude": 34.0666, "longitude": -118.3779}
                }
            }]
        })
        .to_string();
        let batch = extract_businesses(&body).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.csv");

        // Act
        write_csv(&path, &batch.records).unwrap();

        // Assert
        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name,Address,City"));
        assert!(lines[1].starts_with("The Famous,8500 Wilshire Blvd,Beverly Hills,CA,90211,US,"));
    }

    #[test]
    fn test_write_csv_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("test.csv");

        let err = write_csv(&path, &[]).unwrap_err();

        assert!(err.to_string().contains("Failed to write CSV export"));
    }
}
