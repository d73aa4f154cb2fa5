//! Setup for the application logging.
//!
//! It redirects the log info to the standard output with the threshold defined
//! in the configuration.
//!
//! - `Off`
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! Refer to the [configuration crate documentation](https://docs.rs/torrust-swarm-tracker-configuration)
//! to know how to change log settings.
use std::sync::Once;

use torrust_swarm_tracker_configuration::{Configuration, Threshold};
use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the threshold defined
/// in the configuration. Only the first call has any effect.
pub fn setup(cfg: &Configuration) {
    let tracing_level = map_to_tracing_level_filter(&cfg.logging.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level);
    });
}

fn map_to_tracing_level_filter(threshold: &Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter) {
    // Another subscriber may already be installed, for example by a test harness.
    if tracing_subscriber::fmt().with_max_level(filter).with_ansi(true).try_init().is_ok() {
        info!("Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use torrust_swarm_tracker_configuration::Threshold;
    use tracing::level_filters::LevelFilter;

    use super::map_to_tracing_level_filter;

    #[test]
    fn each_threshold_should_map_to_the_same_tracing_level() {
        assert_eq!(map_to_tracing_level_filter(&Threshold::Off), LevelFilter::OFF);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Error), LevelFilter::ERROR);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Warn), LevelFilter::WARN);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Info), LevelFilter::INFO);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Debug), LevelFilter::DEBUG);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Trace), LevelFilter::TRACE);
    }
}
