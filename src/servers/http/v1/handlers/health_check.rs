//! Health check endpoint: `GET /health_check`.
//!
//! It also pings the swarm store, so a tracker that can not reach Redis
//! reports itself as unhealthy.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Tracker;

pub async fn handler(State(tracker): State<Arc<Tracker>>) -> (StatusCode, Json<Report>) {
    match tracker.check_store().await {
        Ok(()) => (StatusCode::OK, Json(Report::ok())),
        Err(err) => {
            warn!(target: "HTTP TRACKER", %err, "health check failed");

            (StatusCode::SERVICE_UNAVAILABLE, Json(Report::error(err.to_string())))
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl Report {
    #[must_use]
    pub fn ok() -> Report {
        Self {
            status: Status::Ok,
            err: None,
        }
    }

    #[must_use]
    pub fn error(message: String) -> Report {
        Self {
            status: Status::Error,
            err: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use torrust_swarm_tracker_configuration::{Store, StoreDriver};
    use torrust_swarm_tracker_test_helpers::configuration;

    use super::{handler, Report, Status};
    use crate::core::store::memory::Memory;
    use crate::core::store::redis::Redis;
    use crate::core::store::KeyValueStore;
    use crate::core::Tracker;

    #[test]
    fn a_healthy_report_should_be_serialized_as_status_ok_only() {
        assert_eq!(serde_json::to_string(&Report::ok()).unwrap(), r#"{"status":"Ok"}"#);
    }

    #[tokio::test]
    async fn it_should_report_ok_when_the_store_answers() {
        let config = configuration::ephemeral();
        let store: Arc<dyn KeyValueStore> = Arc::new(Memory::new(&Store::default()).unwrap());
        let tracker = Arc::new(Tracker::with_store(&config.core, store, &config.store.key_prefix));

        let (status, report) = handler(State(tracker)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.0, Report::ok());
    }

    #[tokio::test]
    async fn it_should_report_an_error_when_the_store_is_unreachable() {
        let config = configuration::ephemeral();
        let store_config = Store {
            driver: StoreDriver::Redis,
            url: "redis://192.0.2.1:6379/".to_string(),
            timeout_ms: 100,
            ..Store::default()
        };
        let store: Arc<dyn KeyValueStore> = Arc::new(Redis::new(&store_config).unwrap());
        let tracker = Arc::new(Tracker::with_store(&config.core, store, &config.store.key_prefix));

        let (status, report) = handler(State(tracker)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.0.status, Status::Error);
    }
}
