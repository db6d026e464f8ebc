use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

pub const LOG_LEVEL_NAMES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Case doesn't matter
pub fn log_level_filter(log_level_name: &str) -> Option<LevelFilter> {
    match &log_level_name.to_lowercase()[..] {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Installs the global logger. Can only succeed once per process; later calls are reported and
/// ignored.
pub fn set_global_log_level(log_level_name: impl AsRef<str>) {
    let log_level_name = log_level_name.as_ref();
    let (log_level_filter, is_known) = match log_level_filter(log_level_name) {
        Some(log_level_filter) => (log_level_filter, true),
        None => (LevelFilter::Info, false),
    };
    if let Err(error) = SimpleLogger::new().with_level(log_level_filter).init() {
        eprintln!("The logger was already set up. Details: {}", error);
        return;
    }
    if !is_known {
        error!(
            "Log level {:?} isn't in {:?}! Using \"info\" for now",
            log_level_name, LOG_LEVEL_NAMES
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_names_are_case_insensitive() {
        assert_eq!(log_level_filter("WARN"), Some(LevelFilter::Warn));
        assert_eq!(log_level_filter("Trace"), Some(LevelFilter::Trace));
        assert_eq!(log_level_filter("verbose"), None);
    }

    #[test]
    fn every_listed_name_is_known() {
        for name in LOG_LEVEL_NAMES {
            assert!(log_level_filter(name).is_some(), "{}", name);
        }
    }
}
