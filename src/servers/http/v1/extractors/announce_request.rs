//! Axum [`extractor`](axum::extract) for the [`Announce`]
//! request.
//!
//! It parses the query parameters returning an [`Announce`]
//! request.
//!
//! Refer to [`Announce`](crate::servers::http::v1::requests::announce) for more
//! information about the returned structure.
//!
//! It returns a bencoded [`Error`](crate::servers::http::v1::responses::error)
//! response (`400`) if the query parameters are missing or invalid. Nothing
//! reaches the tracker in that case.
//!
//! **Sample announce request**
//!
//! <http://0.0.0.0:18312/announce?info_hash=%81%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00&peer_id=-qB00000000000000001&port=17548&uploaded=0&downloaded=0&left=0&event=started>
//!
//! **Sample error response**
//!
//! Missing `info_hash`: <http://0.0.0.0:18312/announce?peer_id=-qB00000000000000001&port=17548&uploaded=0&downloaded=0&left=0>
//!
//! ```text
//! d14:failure reason115:Cannot parse query params for announce request: missing param info_hash in src/servers/http/v1/requests/announce.rs:197:40e
//! ```
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::servers::http::v1::query::Query;
use crate::servers::http::v1::requests::announce::Announce;
use crate::servers::http::v1::responses;

/// Extractor for the [`Announce`]
/// request.
pub struct ExtractRequest(pub Announce);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match extract_announce_from(parts.uri.query()) {
            Ok(announce_request) => Ok(ExtractRequest(announce_request)),
            Err(error) => Err(error.into_response()),
        }
    }
}

/// A request without query is parsed as an empty query, so the error names
/// the first missing param.
fn extract_announce_from(maybe_raw_query: Option<&str>) -> Result<Announce, responses::error::Error> {
    let query = maybe_raw_query.unwrap_or_default().parse::<Query>()?;

    Ok(Announce::try_from(query)?)
}
