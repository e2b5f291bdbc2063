//! feedcache - fetch RSS feeds through a digest-keyed on-disk cache

use anyhow::Result;
use clap::Parser;

use feedcache::cli;
use feedcache::logging::init_logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    cli::run(cli)
}
