//! CSV rendering for business records

use crate::business::Business;

pub const CSV_HEADER: [&str; 11] = [
    "Name",
    "Address",
    "City",
    "State",
    "ZipCode",
    "CountryCode",
    "URL",
    "Phone",
    "Rating",
    "Latitude",
    "Longitude",
];

/// Error type for CSV rendering
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Flush(String),
}

/// Render records as CSV text with the fixed 11-column header
///
/// A missing street address becomes an empty cell.
pub fn render_csv(businesses: &[Business]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for b in businesses {
        let rating = b.rating().to_string();
        let latitude = b.latitude().to_string();
        let longitude = b.longitude().to_string();

        let row: [&str; 11] = [
            b.name(),
            b.address().unwrap_or_default(),
            b.city(),
            b.state(),
            b.zip_code(),
            b.country_code(),
            b.url(),
            b.phone(),
            &rating,
            &latitude,
            &longitude,
        ];
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ExportError::Flush(e.to_string()))
}
