//! Logging setup
//!
//! `log` facade with an `env_logger` backend writing to stderr, so stdout
//! stays machine-readable. Level priority:
//!
//! 1. `RUST_LOG` (if set)
//! 2. `--quiet` (errors only), `-v` (debug), `-vv` (trace)
//! 3. Default: warn

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize logging from CLI flags. Call once, before any log macros.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let level_style = buf.default_level_style(record.level());
        if verbose >= 2 {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                record.level(),
                record.args()
            )
        }
    });

    // a second init (e.g. from tests) is harmless
    let _ = builder.try_init();
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_level() {
        assert_eq!(determine_level(0, false), LevelFilter::Warn);
        assert_eq!(determine_level(1, false), LevelFilter::Debug);
        assert_eq!(determine_level(5, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(determine_level(2, true), LevelFilter::Error);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(0, true);
        init_logging(1, false);
    }
}
