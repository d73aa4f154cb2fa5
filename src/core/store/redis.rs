//! The Redis store.
//!
//! Each swarm is one Redis hash. The client keeps a connection manager,
//! opened on first use and cloned for every command. When the connection
//! drops, the command in flight fails and the manager reconnects for the
//! next one.
use std::future::Future;
use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Client;
use tokio::sync::OnceCell;
use torrust_swarm_tracker_configuration::{Store, StoreDriver};
use tracing::debug;

use super::error::Error;
use super::{Fields, KeyValueStore};

const DRIVER: StoreDriver = StoreDriver::Redis;

pub struct Redis {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    timeout: Duration,
}

impl Redis {
    async fn connection(&self) -> Result<ConnectionManager, Error> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                debug!(target: "STORE", "connecting to redis");
                self.client
                    .get_connection_manager()
                    .await
                    .map_err(|e| Error::ConnectionError {
                        location: Location::caller(),
                        driver: DRIVER,
                        message: e.to_string(),
                    })
            })
            .await?;

        Ok(connection.clone())
    }

    /// Runs one round trip (connection included) bounded by the configured timeout.
    async fn bounded<T, F>(&self, command: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                location: Location::caller(),
                driver: DRIVER,
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl KeyValueStore for Redis {
    fn new(config: &Store) -> Result<Self, Error> {
        let client = Client::open(config.url.as_str()).map_err(|e| Error::ConnectionError {
            location: Location::caller(),
            driver: DRIVER,
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            timeout: config.timeout(),
        })
    }

    fn driver(&self) -> StoreDriver {
        DRIVER
    }

    async fn set_field(&self, key: &str, field: &[u8], value: &str, ttl: Duration) -> Result<(), Error> {
        self.bounded(async {
            let mut conn = self.connection().await?;

            let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

            // MULTI HSET EXPIRE EXEC
            redis::pipe()
                .atomic()
                .cmd("HSET")
                .arg(key)
                .arg(field)
                .arg(value)
                .ignore()
                .cmd("EXPIRE")
                .arg(key)
                .arg(ttl_secs)
                .ignore()
                .query_async::<()>(&mut conn)
                .await?;

            Ok(())
        })
        .await
    }

    async fn get_all(&self, key: &str) -> Result<Fields, Error> {
        self.bounded(async {
            let mut conn = self.connection().await?;

            let fields: Fields = redis::cmd("HGETALL").arg(key).query_async(&mut conn).await?;

            Ok(fields)
        })
        .await
    }

    async fn delete_fields(&self, key: &str, fields: &[Vec<u8>]) -> Result<(), Error> {
        if fields.is_empty() {
            return Ok(());
        }

        self.bounded(async {
            let mut conn = self.connection().await?;

            let mut hdel = redis::cmd("HDEL");
            hdel.arg(key);
            for field in fields {
                hdel.arg(field.as_slice());
            }

            hdel.query_async::<()>(&mut conn).await?;

            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), Error> {
        self.bounded(async {
            let mut conn = self.connection().await?;

            redis::cmd("PING").query_async::<String>(&mut conn).await?;

            Ok(())
        })
        .await
    }
}
