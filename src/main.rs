// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls verbosity, default "info")
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print or save the scraped pages
// 5. Exit with proper code (0 = pages scraped, 1 = nothing scraped, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod output;
mod record;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use crawl::Crawler;
use fetch::HttpFetcher;
use log::error;
use record::PageRecord;
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = at least one page scraped
//   Ok(1) = nothing could be scraped
//   Err   = bad input or output failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            url,
            max_pages,
            max_depth,
            deadline,
            fetch,
            output,
        } => {
            let mut config = fetch.to_config();
            config.crawl_deadline = deadline.map(Duration::from_secs);

            let crawler = Crawler::new(HttpFetcher::new(&config)?, config);
            let max_pages = usize::try_from(max_pages).unwrap_or(usize::MAX);
            let report = crawler
                .crawl(&url, max_pages, max_depth)
                .await
                .with_context(|| format!("cannot crawl {}", url))?;

            println!(
                "📄 Crawled {} page(s): {} attempted, {} failed ({:?})",
                report.pages.len(),
                report.attempted,
                report.failed,
                report.stopped_by
            );
            finish(&report.pages, &output)
        }
        Commands::Page { urls, fetch, output } => {
            let config = fetch.to_config();
            let crawler = Crawler::new(HttpFetcher::new(&config)?, config);
            let pages = crawler.scrape_pages(&urls).await;

            println!("📄 Scraped {} of {} page(s)", pages.len(), urls.len());
            finish(&pages, &output)
        }
        Commands::News {
            url,
            max_articles,
            fetch,
            output,
        } => {
            let config = fetch.to_config();
            let crawler = Crawler::new(HttpFetcher::new(&config)?, config);
            let max_articles = usize::try_from(max_articles).unwrap_or(usize::MAX);
            let articles = crawler.scrape_news_category(&url, max_articles).await;

            println!("📰 Scraped {} article(s) from {}", articles.len(), url);
            finish(&articles, &output)
        }
        Commands::Product { url, fetch, output } => {
            let config = fetch.to_config();
            let crawler = Crawler::new(HttpFetcher::new(&config)?, config);
            let pages: Vec<PageRecord> = crawler.scrape_product(&url).await.into_iter().collect();

            if let Some(product) = pages.first().and_then(|p| p.attributes.product.as_ref()) {
                println!(
                    "🛒 {} | price: {} | availability: {}",
                    product.name, product.price, product.availability
                );
            }
            finish(&pages, &output)
        }
    }
}

// Prints and/or saves results, then picks the exit code
fn finish(pages: &[PageRecord], args: &OutputArgs) -> Result<i32> {
    if pages.is_empty() {
        println!("❌ No pages could be scraped");
        return Ok(1);
    }

    if args.json {
        output::write_json(pages, std::io::stdout().lock())?;
    } else {
        output::print_table(pages);
    }

    if let Some(path) = &args.output {
        output::save(pages, path, args.format)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("📁 Results saved to: {}", path.display());
    }

    Ok(0)
}
