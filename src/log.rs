//! The `log` module provides initialisation and configuration of the program logger.
//!
//! Log messages go to stderr so that the instance document can be written to stdout. Colours are
//! used for the level name when stderr is a terminal.
use anyhow::{Result, bail};
use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::env;
use std::io::IsTerminal;
use std::sync::OnceLock;

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the `LINERGEN_LOG_LEVEL`
/// environment variable or the settings file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable which overrides the configured log level
const LOG_LEVEL_ENV_VAR: &str = "LINERGEN_LOG_LEVEL";

/// Whether the program logger has been initialised
static LOGGER_INITIALISED: OnceLock<()> = OnceLock::new();

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INITIALISED.get().is_some()
}

/// Parse a log level string into a [`LevelFilter`]
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    Ok(match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    })
}

/// Initialise the program logger.
///
/// The `LINERGEN_LOG_LEVEL` environment variable takes precedence over `log_level_from_settings`.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in the settings file
pub fn init(log_level_from_settings: &str) -> Result<()> {
    let log_level = env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| log_level_from_settings.into());
    let level_filter = parse_log_level(&log_level)?;

    // Tests may call this more than once
    if is_logger_initialised() {
        log::set_max_level(level_filter);
        return Ok(());
    }

    let use_colour = std::io::stderr().is_terminal();
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = Local::now().format("%H:%M:%S");
            if use_colour {
                out.finish(format_args!(
                    "[{timestamp} {} {}] {message}",
                    colours.color(record.level()),
                    record.target()
                ));
            } else {
                out.finish(format_args!(
                    "[{timestamp} {} {}] {message}",
                    record.level(),
                    record.target()
                ));
            }
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()?;

    LOGGER_INITIALISED.set(()).ok();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("off", LevelFilter::Off)]
    #[case("WARN", LevelFilter::Warn)]
    #[case("info", LevelFilter::Info)]
    #[case("Trace", LevelFilter::Trace)]
    fn parse_log_level_valid(#[case] input: &str, #[case] expected: LevelFilter) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test]
    fn parse_log_level_invalid() {
        assert!(parse_log_level("loud").is_err());
    }
}
