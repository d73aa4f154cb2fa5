use chrono::{DateTime, Utc};
use torrust_swarm_tracker_primitives::DurationSinceUnixEpoch;

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Returns `None` if the seconds do not fit the range `chrono` can represent.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(duration.as_secs()).ok()?, duration.subsec_nanos())
}

/// It converts a signed Unix timestamp in seconds, as found in `.torrent`
/// files, to an ISO 8601 string like `2023-03-27T15:12:00+00:00`.
#[must_use]
pub fn convert_from_unix_seconds_to_iso_8601(seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|datetime| datetime.to_rfc3339())
}
