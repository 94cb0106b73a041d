use std::path::PathBuf;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::client::YelpClient;
use crate::prelude::{eprintln, println, *};
use yelptools_core::business::Business;
use yelptools_core::mapper::{extract_businesses, extract_field, BusinessBatch};
use yelptools_core::request::{self, DEFAULT_SEARCH_LIMIT};

/// Options for searching businesses by term and location
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Top 3 happy hours in Beverly Hills:
  yelptools search \"Happy Hour\" 91210

  # Ten results within a mile, exported to CSV:
  yelptools search tacos \"Brea, CA\" --limit 10 --radius 1600 --export tacos.csv

  # Only the Yelp page of each result:
  yelptools search \"The Hat\" 91210 --limit 1 --field url")]
pub struct SearchOptions {
    /// Search term (e.g. "Happy Hour", "tacos")
    pub term: String,

    /// Location: address, neighborhood, city or postal code
    pub location: String,

    /// Maximum number of results (the API applies its own cap)
    #[arg(short, long, env = "YELP_LIMIT", default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: u32,

    /// Search radius in meters
    #[arg(short, long)]
    pub radius: Option<u32>,

    /// Print a single top-level field of each result instead of full records
    #[arg(short, long)]
    pub field: Option<String>,

    /// Write the results to a CSV file (full records only)
    #[arg(short, long, value_name = "PATH", conflicts_with = "field")]
    pub export: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchOptions {
    fn request_options(&self) -> request::SearchOptions {
        request::SearchOptions {
            limit: self.limit,
            radius: self.radius,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    term: &'a str,
    location: &'a str,
    businesses: &'a [Business],
    rejected: Vec<usize>,
}

/// Search and map every result into a flat record
///
/// Results missing a required field are logged and left out.
pub async fn search_businesses_data(
    client: &YelpClient,
    term: &str,
    location: &str,
    options: &request::SearchOptions,
) -> Result<BusinessBatch> {
    let body = client.search_by_location(term, location, options).await?;
    let batch = extract_businesses(&body)?;

    for rejected in &batch.rejected {
        log::warn!("Skipping business #{}: {}", rejected.index, rejected.error);
    }

    Ok(batch)
}

/// Search and pull one top-level field out of every result
pub async fn search_field_data(
    client: &YelpClient,
    term: &str,
    location: &str,
    options: &request::SearchOptions,
    field: &str,
) -> Result<Vec<String>> {
    let body = client.search_by_location(term, location, options).await?;
    Ok(extract_field(&body, field)?)
}

/// Handle the search command
pub async fn handler(options: SearchOptions, client: &YelpClient) -> Result<()> {
    if options.field.is_some() && options.export.is_some() {
        return Err(eyre!(
            "--export writes full records and cannot be combined with --field"
        ));
    }

    let request_options = options.request_options();

    if let Some(field) = &options.field {
        let values = search_field_data(
            client,
            &options.term,
            &options.location,
            &request_options,
            field,
        )
        .await?;

        if options.json {
            println!("{}", serde_json::to_string_pretty(&values)?);
        } else {
            for value in &values {
                println!("{value}");
            }
        }
        return Ok(());
    }

    let batch =
        search_businesses_data(client, &options.term, &options.location, &request_options).await?;

    if let Some(path) = &options.export {
        crate::export::write_csv(path, &batch.records)?;
        eprintln!(
            "{} {} businesses to {}",
            "Exported".green(),
            batch.records.len(),
            path.display()
        );
    }

    if options.json {
        let output = SearchOutput {
            term: &options.term,
            location: &options.location,
            businesses: &batch.records,
            rejected: batch.rejected.iter().map(|r| r.index).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_businesses_text(&batch, &options));
    }

    Ok(())
}

/// Convert search results to formatted text with colors
fn format_businesses_text(batch: &BusinessBatch, options: &SearchOptions) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "\"{}\" NEAR {} ({} results)",
            options.term.to_uppercase(),
            options.location.to_uppercase(),
            batch.records.len()
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if batch.records.is_empty() {
        result.push_str(&format!("\n{}\n", "No businesses found.".yellow()));
    }

    for (idx, business) in batch.records.iter().enumerate() {
        result.push_str(&format!(
            "\n{} {}\n",
            format!("[{}]", idx + 1).yellow().bold(),
            business.name().white().bold()
        ));

        let street = business.address().unwrap_or("(no street address)");
        result.push_str(&format!(
            "    {}: {}, {}, {} {} {}\n",
            "Address".green(),
            street,
            business.city(),
            business.state(),
            business.zip_code(),
            business.country_code()
        ));

        result.push_str(&format!(
            "    {}: {} | {}: {} | {}: {:.4}, {:.4}\n",
            "Rating".green(),
            business.rating().to_string().bright_yellow(),
            "Phone".green(),
            business.phone().bright_white(),
            "Coordinates".green(),
            business.latitude(),
            business.longitude()
        ));

        result.push_str(&format!(
            "    {}: {}\n",
            "URL".green(),
            business.url().cyan().underline()
        ));
    }

    if !batch.rejected.is_empty() {
        result.push_str(&format!(
            "\n{} {} result(s) skipped for missing fields (run with RUST_LOG=warn for details)\n",
            "Warning:".yellow().bold(),
            batch.rejected.len()
        ));
    }

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_options(term: &str, location: &str) -> SearchOptions {
        SearchOptions {
            term: term.to_string(),
            location: location.to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
            radius: None,
            field: None,
            export: None,
            json: false,
        }
    }

    fn create_test_batch(names: &[&str]) -> BusinessBatch {
        let businesses: Vec<_> = names
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "url": format!("http://www.yelp.com/biz/{}", name.to_lowercase()),
                    "phone": "9095909424",
                    "rating": 4.0,
                    "location": {
                        "address": [],
                        "city": "Chino Hills",
                        "state_code": "CA",
                        "postal_code": "91709",
                        "country_code": "US",
                        "coordinate": {"latitude": 33.99, "longitude": -117.73}
                    }
                })
            })
            .collect();

        extract_businesses(&json!({ "businesses": businesses }).to_string()).unwrap()
    }

    #[test]
    fn test_cli_rejects_export_with_field() {
        use clap::Parser;

        let result = crate::App::try_parse_from([
            "yelptools", "search", "The Hat", "91210", "--field", "url", "--export", "out.csv",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_accepts_export_alone() {
        use clap::Parser;

        let app = crate::App::try_parse_from([
            "yelptools", "search", "The Hat", "91210", "--export", "out.csv",
        ])
        .unwrap();

        match app.command {
            crate::SubCommands::Search(options) => {
                assert_eq!(options.export, Some(PathBuf::from("out.csv")));
                assert_eq!(options.field, None);
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handler_refuses_export_with_field() {
        // Arrange: options built directly, bypassing clap
        let credentials = yelptools_core::credentials::Credentials::new(
            "key",
            "secret",
            "token",
            "token-secret",
        )
        .unwrap();
        let client = YelpClient::new(credentials, "http://127.0.0.1:9").unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut options = create_test_options("The Hat", "91210");
        options.field = Some("url".to_string());
        options.export = Some(path.clone());

        // Act
        let err = handler(options, &client).await.unwrap_err();

        // Assert: reported instead of silently skipping the export
        assert!(err.to_string().contains("--export"));
        assert!(!path.exists());
    }

    #[test]
    fn test_request_options_from_cli() {
        let mut options = create_test_options("tacos", "Brea");
        options.limit = 7;
        options.radius = Some(500);

        let request_options = options.request_options();

        assert_eq!(request_options.limit, 7);
        assert_eq!(request_options.radius, Some(500));
    }

    #[test]
    fn test_format_businesses_text_lists_every_result() {
        // Arrange
        let batch = create_test_batch(&["Yard House", "Chili's"]);
        let options = create_test_options("Yard House", "Chino Hills");

        // Act
        let text = format_businesses_text(&batch, &options);

        // Assert
        assert!(text.contains("Yard House"));
        assert!(text.contains("Chili's"));
        assert!(text.contains("9095909424"));
        assert!(text.contains("(no street address)"));
        assert!(!text.contains("skipped"));
    }

    #[test]
    fn test_format_businesses_text_empty() {
        let batch = BusinessBatch::default();
        let options = create_test_options("nothing", "nowhere");

        let text = format_businesses_text(&batch, &options);

        assert!(text.contains("No businesses found."));
    }

    #[test]
    fn test_search_output_json_shape() {
        let batch = create_test_batch(&["Yard House"]);
        let output = SearchOutput {
            term: "Yard House",
            location: "Chino Hills",
            businesses: &batch.records,
            rejected: vec![],
        };

        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["businesses"][0]["name"], "Yard House");
        assert_eq!(value["businesses"][0]["phone"], "9095909424");
        assert!(value["businesses"][0]["address"].is_null());
    }
}
