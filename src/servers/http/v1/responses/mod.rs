//! HTTP responses for the HTTP tracker.
//!
//! Refer to the generic [HTTP server documentation](crate::servers::http) for
//! more information about the HTTP tracker.
pub mod announce;
pub mod error;

pub use announce::{Announce, CompactPeer, NormalPeer, Peers};

/// Trait for responses that are sent as a bencoded body.
pub trait Response: axum::response::IntoResponse {
    /// Returns the bencoded body.
    ///
    /// # Errors
    ///
    /// If unable to generate the response, it will return an error.
    fn body(self) -> Result<Vec<u8>, error::Error>;
}
