pub mod analyzer;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod history;
pub mod http_client;
pub mod keyword;
pub mod models;
pub mod pagespeed;
pub mod scoring;
pub mod server;

use analyzer::Analyzer;
use anyhow::Result;
use auth::{StaticTokenVerifier, TokenVerifier};
use cli::Cli;
use colored::*;
use config::Config;
use fetcher::PageFetcher;
use history::SqliteHistoryStore;
use pagespeed::PageSpeedClient;
use server::AppState;
use std::path::Path;
use std::sync::Arc;

pub async fn run(args: Cli) -> Result<()> {
    println!(
        "{}",
        "Sitegrade - SEO & Performance Auditing Service"
            .bright_cyan()
            .bold()
    );
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    // Config file values fill in whatever the CLI left at its defaults
    let config = match &args.config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::from_default_paths()?.unwrap_or_default(),
    };
    let args = config.merge_with_cli(&args);

    let auth_tokens = config.auth_tokens.clone().unwrap_or_default();
    if auth_tokens.is_empty() {
        tracing::warn!("no auth tokens configured, every request will be rejected with 401");
    }

    let endpoint = args
        .pagespeed_endpoint
        .clone()
        .unwrap_or_else(|| pagespeed::DEFAULT_ENDPOINT.to_string());
    if args.pagespeed_api_key.is_none() {
        tracing::warn!("no PageSpeed API key configured, audit calls may be throttled");
    }

    let fetcher = PageFetcher::new(args.fetch_timeout)?;
    let pagespeed_client =
        PageSpeedClient::new(endpoint, args.pagespeed_api_key.clone(), args.audit_timeout)?;
    let analyzer = Analyzer::new(fetcher, pagespeed_client);

    let store = SqliteHistoryStore::connect(&args.database_url).await?;
    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(auth_tokens));

    println!(
        "{} {}:{}",
        "Listening on".bright_white().bold(),
        args.bind,
        args.port
    );

    let state = AppState {
        analyzer,
        store: Arc::new(store),
    };

    server::serve(state, verifier, &args.bind, args.port).await?;

    Ok(())
}
