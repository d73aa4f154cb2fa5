//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `TORRUST_SWARM_TRACKER_`.
//!
//! There are two methods to inject the configuration:
//!
//! 1. A TOML file, `./share/default/config/tracker.toml` unless
//!    `TORRUST_SWARM_TRACKER_CONFIG_TOML_PATH` points somewhere else.
//! 2. The `TORRUST_SWARM_TRACKER_CONFIG_TOML` env var, with the same content
//!    as the file. It has priority over the file.
//!
//! Refer to the [configuration documentation](https://docs.rs/torrust-swarm-tracker-configuration)
//! for the configuration options.
use torrust_swarm_tracker_configuration::{Configuration, Error, Info, DEFAULT_PATH_CONFIG};

/// It loads the application configuration from the environment.
///
/// # Errors
///
/// Will return an error if the configuration can not be loaded or it is
/// invalid.
pub fn initialize_configuration() -> Result<Configuration, Error> {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string())?;

    Configuration::load(&info)
}

#[cfg(test)]
mod tests {
    use torrust_swarm_tracker_configuration::StoreDriver;

    use crate::bootstrap::config::initialize_configuration;

    #[test]
    fn it_should_load_the_default_config_file() {
        let configuration = initialize_configuration().expect("the default configuration should load");

        assert_eq!(configuration.store.driver, StoreDriver::Redis);
        assert_eq!(configuration.http_tracker.bind_address.port(), 18312);
    }
}
