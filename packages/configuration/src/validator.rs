//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The minimum announce interval ({interval_min}) can not be greater than the announce interval ({interval}).")]
    MinIntervalGreaterThanInterval { interval: u32, interval_min: u32 },

    #[error("The default number of peers ({default_numwant}) can not be greater than the maximum ({max_numwant}).")]
    DefaultNumwantGreaterThanMax { default_numwant: u32, max_numwant: u32 },

    #[error("The peer TTL can not be zero.")]
    ZeroPeerTtl,

    #[error("The store timeout can not be zero.")]
    ZeroStoreTimeout,

    #[error("Invalid store url `{url}`: {reason}")]
    InvalidStoreUrl { url: String, reason: String },
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
