//! The URL query component of a tracker request.
//!
//! ```text
//! URI = scheme ":" ["//" authority] path ["?" query] ["#" fragment]
//! ```
//!
//! Values are kept exactly as they arrive, still percent encoded. Binary
//! params like `info_hash` and `peer_id` are only decoded by the code that
//! knows how to interpret them.
use std::panic::Location;
use std::str::FromStr;

use multimap::MultiMap;
use thiserror::Error;

/// Param name to raw (percent encoded) values, in arrival order.
#[derive(Debug, Default)]
pub struct Query {
    params: MultiMap<String, String>,
}

impl Query {
    /// The first value of the param, if it is present.
    ///
    /// ```rust
    /// use torrust_swarm_tracker::servers::http::v1::query::Query;
    ///
    /// let query = "numwant=10&numwant=20&compact".parse::<Query>().unwrap();
    ///
    /// assert_eq!(query.get_param("numwant"), Some("10"));
    /// assert_eq!(query.get_param("compact"), Some(""));
    /// assert_eq!(query.get_param("event"), None);
    /// ```
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Every value of the param, in arrival order.
    #[must_use]
    pub fn get_param_vec(&self, name: &str) -> Option<Vec<&str>> {
        self.params
            .get_vec(name)
            .map(|values| values.iter().map(String::as_str).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.iter_all().map(|(_, values)| values.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Errors parsing a [`Query`].
#[derive(Error, Debug)]
pub enum ParseQueryError {
    /// A param without a name, for example `=value`.
    #[error("param without name `{raw_param}` in {location}")]
    MissingParamName {
        location: &'static Location<'static>,
        raw_param: String,
    },
    /// A value with an unescaped `=`, for example `name=value=value`.
    #[error("invalid param `{raw_param}` in {location}")]
    InvalidParam {
        location: &'static Location<'static>,
        raw_param: String,
    },
}

impl FromStr for Query {
    type Err = ParseQueryError;

    /// Empty segments (`a=1&&b=2`) are ignored. A name without `=` is a param
    /// with an empty value.
    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        let mut params = MultiMap::new();

        for raw_param in raw_query.trim().trim_start_matches('?').split('&') {
            if raw_param.is_empty() {
                continue;
            }

            let (name, value) = raw_param.split_once('=').unwrap_or((raw_param, ""));

            if name.is_empty() {
                return Err(ParseQueryError::MissingParamName {
                    location: Location::caller(),
                    raw_param: raw_param.to_owned(),
                });
            }

            if value.contains('=') {
                return Err(ParseQueryError::InvalidParam {
                    location: Location::caller(),
                    raw_param: raw_param.to_owned(),
                });
            }

            params.insert(name.to_owned(), value.to_owned());
        }

        Ok(Self { params })
    }
}

impl From<Vec<(&str, &str)>> for Query {
    fn from(raw_params: Vec<(&str, &str)>) -> Self {
        Self {
            params: raw_params
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
        }
    }
}
