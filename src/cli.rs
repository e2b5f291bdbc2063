//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::cache::{derive_key, CacheCoordinator, CacheStore};
use crate::core::render::{OutputFormat, RenderConfig, Renderer, Report};
use crate::core::util::{format_age, MaxAge};
use crate::fetch::HttpFetcher;

/// feedcache - fetch RSS feeds through a digest-keyed on-disk cache.
#[derive(Parser, Debug)]
#[command(name = "feedcache")]
#[command(
    author,
    version,
    about,
    long_about = r#"feedcache fetches RSS 2.0 feeds and caches each one as a JSON file named
after the MD5 digest of its URL. Requests within the freshness window are
served from disk without touching the network.

Examples:
    feedcache --cache-dir ~/.cache/feeds get https://blog.rust-lang.org/feed.xml
    feedcache get https://example.com/rss --max-age 15m --format md
    feedcache key http://www.google.com
    feedcache inspect https://example.com/rss
"#
)]
pub struct Cli {
    /// Directory holding cache entries.
    #[arg(
        long,
        global = true,
        env = "FEEDCACHE_DIR",
        default_value = ".",
        value_name = "DIR",
        long_help = "Directory holding cache entries (one <md5>.json file per URL).\n\n\
The directory must already exist and be writable; it is never created."
    )]
    pub cache_dir: PathBuf,

    /// Output format (jsonl/json/md).
    #[arg(long, global = true, default_value = "jsonl", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More diagnostics on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a feed, from cache when fresh, otherwise from the network.
    #[command(
        long_about = "Return the cached entry for URL when it is no older than --max-age;\n\
otherwise fetch the feed, write it to the cache and return it.\n\n\
Any cache read error other than a missing entry aborts without fetching.\n\
A fetched feed that cannot be written to the cache is reported as an error.\n\n\
Examples:\n\
  feedcache get https://example.com/rss\n\
  feedcache get https://example.com/rss --max-age 0   # always refetch\n"
    )]
    Get {
        /// Feed URL (http, https or file).
        #[arg(value_name = "URL")]
        url: String,

        /// Freshness window, e.g. 90, 30s, 15m, 2h, 1d.
        #[arg(
            long,
            env = "FEEDCACHE_MAX_AGE",
            default_value = "1h",
            value_name = "DURATION",
            allow_hyphen_values = true
        )]
        max_age: MaxAge,
    },

    /// Print the cache key and entry path for a URL.
    Key {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Show the cached entry for a URL without fetching.
    #[command(
        long_about = "Read the cache entry for URL and report whether it is missing, fresh or\n\
stale relative to --max-age. Never touches the network."
    )]
    Inspect {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(
            long,
            env = "FEEDCACHE_MAX_AGE",
            default_value = "1h",
            value_name = "DURATION",
            allow_hyphen_values = true
        )]
        max_age: MaxAge,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let renderer = Renderer::with_config(RenderConfig::with_pretty(cli.format, cli.pretty));
    let store = CacheStore::new(&cli.cache_dir);

    let report = match cli.command {
        Commands::Get { url, max_age } => run_get(store, &url, max_age)?,
        Commands::Key { url } => run_key(&store, &url),
        Commands::Inspect { url, max_age } => run_inspect(&store, &url, max_age)?,
    };

    println!("{}", renderer.render(&report));
    Ok(())
}

fn run_get(store: CacheStore, url: &str, max_age: MaxAge) -> Result<Report> {
    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
    let coordinator = CacheCoordinator::new(store, fetcher);

    let cached = coordinator
        .get_feed_with_status(url, max_age.0)
        .with_context(|| format!("Failed to get feed {}", url))?;

    Ok(Report {
        url: url.to_string(),
        key: cached.key,
        path: cached.path.display().to_string(),
        status: Some(cached.status.as_str().to_string()),
        age: Some(format_age(cached.entry.age_at(Utc::now()))),
        entry: Some(cached.entry),
    })
}

fn run_key(store: &CacheStore, url: &str) -> Report {
    let key = derive_key(url);
    Report {
        url: url.to_string(),
        path: store.entry_path(&key).display().to_string(),
        key,
        status: None,
        age: None,
        entry: None,
    }
}

fn run_inspect(store: &CacheStore, url: &str, max_age: MaxAge) -> Result<Report> {
    let mut report = run_key(store, url);

    match store.read(&report.key) {
        Ok(entry) => {
            let age = entry.age_at(Utc::now());
            let status = if age <= max_age.0 { "fresh" } else { "stale" };
            report.status = Some(status.to_string());
            report.age = Some(format_age(age));
            report.entry = Some(entry);
        }
        Err(e) if e.is_not_found() => report.status = Some("missing".to_string()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect cache entry for {}", url))
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CachedEntry, FeedDocument};
    use chrono::TimeDelta;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_get() {
        let cli = Cli::try_parse_from([
            "feedcache",
            "--cache-dir",
            "/tmp/c",
            "get",
            "http://example.com/rss",
            "--max-age",
            "-5m",
        ])
        .unwrap();
        assert_eq!(cli.cache_dir, PathBuf::from("/tmp/c"));
        match cli.command {
            Commands::Get { url, max_age } => {
                assert_eq!(url, "http://example.com/rss");
                assert_eq!(max_age.0, TimeDelta::minutes(-5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_duration() {
        let result = Cli::try_parse_from(["feedcache", "get", "http://x/", "--max-age", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verbose_count() {
        let cli = Cli::try_parse_from(["feedcache", "-vv", "key", "http://x/"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_key() {
        let store = CacheStore::new("/cache");
        let report = run_key(&store, "http://www.google.com");
        assert_eq!(report.key, "ed646a3334ca891fd3467db131372140");
        assert!(report.path.ends_with("ed646a3334ca891fd3467db131372140.json"));
    }

    #[test]
    fn test_run_inspect_states() {
        let temp = tempdir().unwrap();
        let store = CacheStore::new(temp.path());
        let url = "http://example.com/rss";
        let hour = MaxAge(TimeDelta::hours(1));

        let report = run_inspect(&store, url, hour).unwrap();
        assert_eq!(report.status.as_deref(), Some("missing"));

        let entry = CachedEntry::new(url, FeedDocument::default(), Utc::now());
        store.write(&derive_key(url), &entry).unwrap();
        let report = run_inspect(&store, url, hour).unwrap();
        assert_eq!(report.status.as_deref(), Some("fresh"));

        let report = run_inspect(&store, url, MaxAge(TimeDelta::seconds(-1))).unwrap();
        assert_eq!(report.status.as_deref(), Some("stale"));
    }

    #[test]
    fn test_run_inspect_corrupt_is_error() {
        let temp = tempdir().unwrap();
        let store = CacheStore::new(temp.path());
        let url = "http://example.com/rss";
        std::fs::write(store.entry_path(&derive_key(url)), "{").unwrap();

        assert!(run_inspect(&store, url, MaxAge(TimeDelta::hours(1))).is_err());
    }
}
