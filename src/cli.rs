// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Options shared by several subcommands live in their own structs and are
// pulled in with #[command(flatten)].
// =============================================================================

use crate::config::{ScraperConfig, DEFAULT_USER_AGENT};
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "site-harvest",
    version = "0.1.0",
    about = "Crawl a website and extract structured data from its pages",
    long_about = "site-harvest crawls a website breadth-first, staying on the same host, \
                  and extracts the title, main text, metadata, images, links and headings \
                  of every page it visits. It can also scrape the articles of a news \
                  category page or the details of a shop product page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from one URL
    ///
    /// Example: site-harvest crawl https://example.com --max-pages 20 --max-depth 2
    Crawl {
        /// Where to start (e.g., https://example.com or just example.com)
        url: String,

        /// Stop after this many pages have been scraped
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        max_pages: u64,

        /// How many link hops to follow from the start page
        ///
        /// Depth 0 = just the starting page
        /// Depth 1 = starting page + all pages it links to
        #[arg(long, default_value_t = 3)]
        max_depth: usize,

        /// Give up on the whole crawl after this many seconds
        #[arg(long, value_name = "SECONDS")]
        deadline: Option<u64>,

        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Scrape one or more pages without following links
    ///
    /// Example: site-harvest page https://example.com/a https://example.com/b
    Page {
        /// Pages to scrape
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Scrape the articles listed on a news category page
    ///
    /// Example: site-harvest news https://example.com/world --max-articles 5
    News {
        /// The category (listing) page
        url: String,

        /// Stop after this many articles have been scraped
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        max_articles: u64,

        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Scrape a shop product page (name, price, photos, specifications)
    ///
    /// Example: site-harvest product https://shop.example.com/p/kettle
    Product {
        /// The product page
        url: String,

        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// How we talk to the server
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Seconds to wait after each request
    #[arg(long, default_value = "1.0", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Attempts per page before giving up
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// User-Agent header to send
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Where results go
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Save results to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// File format for --output
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl FetchArgs {
    // Builds the scraper config from the command line
    pub fn to_config(&self) -> ScraperConfig {
        ScraperConfig {
            user_agent: self.user_agent.clone(),
            delay_between_requests: self.delay,
            max_retries: self.retries,
            timeout: Duration::from_secs(self.timeout),
            ..ScraperConfig::default()
        }
    }
}

// Parses "1.5" into 1.5 seconds, rejecting negative and non-finite values
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{}' must be a non-negative number of seconds", value));
    }

    Ok(Duration::from_secs_f64(seconds))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[command(subcommand)]?
//    - Tells clap the first word after the program name picks a variant
//    - "site-harvest news URL" becomes Commands::News { url, .. }
//    - Each variant is a struct-like enum variant holding its own options
//
// 2. What is #[command(flatten)]?
//    - Copies all the fields of another Args struct into this subcommand
//    - FetchArgs and OutputArgs are written once, used by every subcommand
//
// 3. What is value_parser!(u64).range(1..)?
//    - Makes clap reject "--max-pages 0" before our code ever runs
//    - The user gets a normal clap error message
//
// 4. Why a custom parse_seconds function?
//    - clap can call any fn(&str) -> Result<T, String> to parse a value
//    - We want "1.5" to become a Duration, which clap can't do on its own
//
// 5. Why Option<u64> for deadline?
//    - A flag that's not given is None
//    - No need for a magic value like 0 meaning "no deadline"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::parse_from(["site-harvest", "crawl", "example.com"]);
        match cli.command {
            Commands::Crawl {
                url,
                max_pages,
                max_depth,
                deadline,
                fetch,
                output,
            } => {
                assert_eq!(url, "example.com");
                assert_eq!(max_pages, 10);
                assert_eq!(max_depth, 3);
                assert_eq!(deadline, None);
                assert_eq!(fetch.delay, Duration::from_secs(1));
                assert_eq!(fetch.retries, 3);
                assert_eq!(output.format, OutputFormat::Json);
                assert!(output.output.is_none());
            }
            _ => panic!("expected crawl subcommand"),
        }
    }

    #[test]
    fn test_page_takes_many_urls() {
        let cli = Cli::parse_from(["site-harvest", "page", "a.com", "b.com", "--format", "csv"]);
        match cli.command {
            Commands::Page { urls, output, .. } => {
                assert_eq!(urls, vec!["a.com", "b.com"]);
                assert_eq!(output.format, OutputFormat::Csv);
            }
            _ => panic!("expected page subcommand"),
        }
    }

    #[test]
    fn test_news_defaults() {
        let cli = Cli::parse_from(["site-harvest", "news", "example.com/world"]);
        match cli.command {
            Commands::News {
                url, max_articles, ..
            } => {
                assert_eq!(url, "example.com/world");
                assert_eq!(max_articles, 10);
            }
            _ => panic!("expected news subcommand"),
        }
    }

    #[test]
    fn test_news_max_articles() {
        let cli = Cli::parse_from(["site-harvest", "news", "a.com", "--max-articles", "3"]);
        let Commands::News { max_articles, .. } = cli.command else {
            panic!("expected news subcommand");
        };
        assert_eq!(max_articles, 3);

        let zero = Cli::try_parse_from(["site-harvest", "news", "a.com", "--max-articles", "0"]);
        assert!(zero.is_err());
    }

    #[test]
    fn test_product_takes_one_url() {
        let cli = Cli::parse_from(["site-harvest", "product", "shop.com/p/1", "--json"]);
        match cli.command {
            Commands::Product { url, output, .. } => {
                assert_eq!(url, "shop.com/p/1");
                assert!(output.json);
            }
            _ => panic!("expected product subcommand"),
        }

        let two = Cli::try_parse_from(["site-harvest", "product", "a.com", "b.com"]);
        assert!(two.is_err());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let result = Cli::try_parse_from(["site-harvest", "crawl", "a.com", "--max-pages", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.5").unwrap(), Duration::from_millis(500));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_fetch_args_to_config() {
        let cli = Cli::parse_from([
            "site-harvest",
            "page",
            "a.com",
            "--delay",
            "0",
            "--timeout",
            "5",
            "--retries",
            "1",
        ]);
        let Commands::Page { fetch, .. } = cli.command else {
            panic!("expected page subcommand");
        };
        let config = fetch.to_config();
        assert!(config.delay_between_requests.is_zero());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
    }
}
