//! Transit route search CLI
//!
//! Searches routes and station names against the routing API, or maps a
//! saved API response offline.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{RouteSearchService, format_routes, format_routes_detailed};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use domain::{Route, Suggestion};
use infrastructure::config::DEFAULT_CONFIG_FILE;
use infrastructure::{AppConfig, InMemoryHistoryStore, TransitAdapter, init_logging};
use integration_transit::{WireResponse, map_response};
use tracing::debug;

/// Transit route search CLI
#[derive(Parser)]
#[command(name = "transit-cli")]
#[command(author, version, about = "Public transit route search", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (extension optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: String,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search routes between two places
    ///
    /// Example: transit-cli search 押上 三越前 --at 2025-08-29T20:30:00+09:00
    Search {
        /// Origin place name
        from: String,

        /// Destination place name
        to: String,

        /// Departure time (RFC 3339, default: now)
        #[arg(long, value_parser = parse_departure)]
        at: Option<DateTime<Utc>>,

        /// Show every segment of each route
        #[arg(short, long)]
        detailed: bool,

        /// Replace each name with its best autocomplete match first
        #[arg(short, long)]
        resolve: bool,
    },

    /// Suggest stations, landmarks and addresses for a partial name
    Suggest {
        /// Partial place name
        query: String,
    },

    /// Map a saved routing API response without network access
    MapFile {
        /// Path to the JSON response body
        path: PathBuf,

        /// Show every segment of each route
        #[arg(short, long)]
        detailed: bool,
    },

    /// Check whether the routing API is reachable
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn parse_departure(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {e}"))
}

fn render_routes(routes: &[Route], detailed: bool, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(routes)?);
    }
    Ok(if detailed {
        format_routes_detailed(routes)
    } else {
        format_routes(routes)
    })
}

fn render_suggestions(suggestions: &[Suggestion], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(suggestions)?);
    }
    if suggestions.is_empty() {
        return Ok("No matches".to_string());
    }
    Ok(suggestions
        .iter()
        .map(|s| format!("{} ({})", s.name, s.kind.label()))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn build_service(config: &AppConfig) -> anyhow::Result<RouteSearchService> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    let adapter = TransitAdapter::from_config(&config.transit)?;
    Ok(RouteSearchService::new(
        Arc::new(adapter),
        Arc::new(InMemoryHistoryStore::new()),
    ))
}

/// Best autocomplete match for a typed name
async fn resolve_place(service: &RouteSearchService, name: &str) -> anyhow::Result<Suggestion> {
    let suggestion = service
        .suggest(name)
        .await?
        .into_iter()
        .next()
        .with_context(|| format!("No place matches \"{name}\""))?;
    debug!(%name, resolved = %suggestion.name, kind = %suggestion.kind, "Place resolved");
    Ok(suggestion)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(
        &cli.config,
        std::env::var(infrastructure::config::BASE_URL_ENV).ok(),
    )
    .context("Failed to load configuration")?;
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging)?;
    debug!(
        config = %cli.config,
        base_url = %config.transit.base_url,
        timezone = %config.transit.timezone,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Search {
            from,
            to,
            at,
            detailed,
            resolve,
        } => {
            let service = build_service(&config)?;
            let routes = if resolve {
                let from = resolve_place(&service, &from).await?;
                let to = resolve_place(&service, &to).await?;
                println!("{} → {}", from.name, to.name);
                service.search_between(&from, &to, at).await?
            } else {
                service.search_routes(&from, &to, at).await?
            };
            println!("{}", render_routes(&routes, detailed, cli.json)?);
        },

        Commands::Suggest { query } => {
            let service = build_service(&config)?;
            let suggestions = service.suggest(&query).await?;
            println!("{}", render_suggestions(&suggestions, cli.json)?);
        },

        Commands::MapFile { path, detailed } => {
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let response = WireResponse::from_json(&body)
                .with_context(|| format!("{} is not a routing API response", path.display()))?;
            let routes = map_response(&response);
            debug!(
                items = response.item_count(),
                routes = routes.len(),
                "Mapped saved response"
            );
            println!("{}", render_routes(&routes, detailed, cli.json)?);
        },

        Commands::Health => {
            let service = build_service(&config)?;
            if service.is_available().await {
                println!("✅ Healthy");
            } else {
                println!("❌ Unreachable: {}", config.transit.base_url);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::{Segment, SuggestionKind, TransportKind};

    use super::*;

    fn sample_route() -> Route {
        let dep = DateTime::parse_from_rfc3339("2025-08-29T20:31:00+09:00").unwrap();
        let arr = DateTime::parse_from_rfc3339("2025-08-29T20:43:00+09:00").unwrap();
        Route::new("押上", "三越前", dep, arr, 12, 210, 0).with_segments(vec![
            Segment::new(TransportKind::Train, "押上", "三越前", dep, arr, 12)
                .with_line(Some("東京メトロ半蔵門線".to_string())),
        ])
    }

    #[test]
    fn log_filter_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn parses_search_with_departure() {
        let cli = Cli::try_parse_from([
            "transit-cli",
            "search",
            "押上",
            "三越前",
            "--at",
            "2025-08-29T20:30:00+09:00",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Search {
                from, at, resolve, ..
            } => {
                assert_eq!(from, "押上");
                assert!(!resolve);
                assert_eq!(at.unwrap().to_rfc3339(), "2025-08-29T11:30:00+00:00");
            },
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn parses_search_resolve_flag() {
        let cli = Cli::try_parse_from(["transit-cli", "search", "新宿", "東京タワー", "-r"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { resolve: true, .. }));
    }

    #[test]
    fn rejects_malformed_departure() {
        let result = Cli::try_parse_from(["transit-cli", "search", "A", "B", "--at", "8:30"]);
        assert!(result.is_err());
    }

    #[test]
    fn search_requires_both_endpoints() {
        assert!(Cli::try_parse_from(["transit-cli", "search", "A"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["transit-cli", "health", "-vv", "--config", "alt"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, "alt");
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn renders_routes_as_text() {
        let text = render_routes(&[sample_route()], false, false).unwrap();
        assert!(text.contains("20:31 → 20:43"));
        assert!(text.contains("東京メトロ半蔵門線"));

        assert_eq!(render_routes(&[], false, false).unwrap(), "No routes found");
    }

    #[test]
    fn renders_routes_as_json() {
        let json = render_routes(&[sample_route()], false, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["total_fare"], 210);
        assert_eq!(value[0]["segments"][0]["kind"], "train");
    }

    #[test]
    fn renders_suggestions() {
        let suggestions = vec![
            Suggestion::new("1", "新宿", SuggestionKind::Station),
            Suggestion::new("2", "新宿御苑", SuggestionKind::Landmark),
        ];
        assert_eq!(
            render_suggestions(&suggestions, false).unwrap(),
            "新宿 (Station)\n新宿御苑 (Landmark)"
        );
        assert_eq!(render_suggestions(&[], false).unwrap(), "No matches");
    }

    #[test]
    fn build_service_requires_base_url() {
        assert!(build_service(&AppConfig::default()).is_err());
    }
}
