use std::path::PathBuf;

use crate::prelude::{eprintln, *};
use clap::Parser;
use yelptools_core::request::DEFAULT_BASE_URL;

mod business;
mod client;
mod config;
mod error;
mod export;
mod prelude;
mod search;
mod top;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search the Yelp API v2 for businesses and export the results"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Credential properties file (CKEY, CSECRET, TOKEN, TOKENSECRET)
    #[clap(long, env = "YELP_CONFIG", global = true, default_value = "key.cfg")]
    config: PathBuf,

    /// Yelp API base URL
    #[clap(long, env = "YELP_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "YELPTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search businesses by term and location
    Search(crate::search::SearchOptions),

    /// Look up a single business by id
    Business(crate::business::BusinessOptions),

    /// Search, then show details for the top result
    Top(crate::top::TopOptions),
}

/// Default log filter when `RUST_LOG` is unset
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "warn"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    let global = app.global;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(global.verbose)),
    )
    .init();
    color_eyre::install()?;

    let credentials = config::load_credentials(&global.config)?;
    let client = client::YelpClient::new(credentials, global.base_url.clone())?;

    if global.verbose {
        eprintln!("Credentials: {}", global.config.display());
        eprintln!("Yelp API Base: {}", client.base_url());
    }

    match app.command {
        SubCommands::Search(options) => search::handler(options, &client).await,
        SubCommands::Business(options) => business::handler(options, &client).await,
        SubCommands::Top(options) => top::handler(options, &client, global.verbose).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_log_filter() {
        assert_eq!(log_filter(true), "info");
        assert_eq!(log_filter(false), "warn");
    }

    #[test]
    fn test_verbose_is_global() {
        let app = App::try_parse_from(["yelptools", "top", "dinner", "Brea", "--verbose"]).unwrap();

        assert!(app.global.verbose);
    }
}
