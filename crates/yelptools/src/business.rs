use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::client::YelpClient;
use crate::prelude::{println, *};
use yelptools_core::business::Business;
use yelptools_core::mapper::map_business_detail;

/// Options for looking up a single business
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct BusinessOptions {
    /// Yelp business id (e.g. "the-hat-brea")
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the raw API response body
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,
}

/// Look up a business by id and map it into a flat record
pub async fn business_data(client: &YelpClient, id: &str) -> Result<Business> {
    let body = client.lookup_by_id(id).await?;
    map_business_detail(&body).wrap_err_with(|| format!("Failed to map business {id}"))
}

/// Handle the business command
pub async fn handler(options: BusinessOptions, client: &YelpClient) -> Result<()> {
    if options.raw {
        println!("{}", client.lookup_by_id(&options.id).await?);
        return Ok(());
    }

    let business = business_data(client, &options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&business)?);
    } else {
        display_business(&business);
    }

    Ok(())
}

/// Display a business as a formatted CLI table.
pub(crate) fn display_business(business: &Business) {
    std::println!("\n{}\n", business.name().bold().cyan());

    let mut table = new_table();

    if let Some(address) = business.address() {
        table.add_row(prettytable::row!["Address".bold().cyan(), address]);
    }
    table.add_row(prettytable::row![
        "City".bold().cyan(),
        format!(
            "{}, {} {}",
            business.city(),
            business.state(),
            business.zip_code()
        )
    ]);
    table.add_row(prettytable::row![
        "Country".bold().cyan(),
        business.country_code()
    ]);
    table.add_row(prettytable::row![
        "Phone".bold().cyan(),
        business.phone().bright_white().to_string()
    ]);
    table.add_row(prettytable::row![
        "Rating".bold().cyan(),
        business.rating().to_string().bright_yellow().to_string()
    ]);
    table.add_row(prettytable::row![
        "Coordinates".bold().cyan(),
        format!("{}, {}", business.latitude(), business.longitude())
    ]);
    table.add_row(prettytable::row![
        "URL".bold().cyan(),
        business.url().cyan().underline().to_string()
    ]);

    table.printstd();
    std::println!();
}
