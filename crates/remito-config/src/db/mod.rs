//! Database bootstrap from the merged `[db]` entry
//!
//! remito does not speak SQL. The merged entry is handed verbatim to a
//! [`ConnectionFactory`] supplied by the application.

use async_trait::async_trait;
use remito_core::error::{BoxError, RemitoError};
use remito_core::types::{ConfigMapping, ConfigValue};
use tracing::{debug, error};

use crate::ConfigResult;

/// Name of the configuration entry passed to the connection factory
pub const DB_SECTION: &str = "db";

/// External SQL connection factory
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    type Connection: Send;

    /// Open a connection from the raw `[db]` entry
    async fn connect(&self, settings: &ConfigValue) -> Result<Self::Connection, BoxError>;
}

/// Open a database connection using the merged `[db]` entry
///
/// An absent entry is passed as an empty section. Failures are logged and
/// returned as [`RemitoError::Database`] with the factory's error as source.
pub async fn open_connection<F>(factory: &F, config: &ConfigMapping) -> ConfigResult<F::Connection>
where
    F: ConnectionFactory,
{
    let empty = ConfigValue::empty_section();
    let settings = config.get(DB_SECTION).unwrap_or(&empty);

    if let Some(section) = settings.as_section() {
        debug!(keys = ?section.keys().collect::<Vec<_>>(), "opening database connection");
    } else {
        debug!("opening database connection from scalar [db] entry");
    }

    factory.connect(settings).await.map_err(|e| {
        error!(error = %e, "database connection failed");
        RemitoError::database(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::sync::Mutex;

    /// Records the settings it receives and fails on demand
    struct RecordingFactory {
        fail_with: Option<&'static str>,
        seen: Mutex<Vec<ConfigValue>>,
    }

    impl RecordingFactory {
        fn new(fail_with: Option<&'static str>) -> Self {
            Self {
                fail_with,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConnectionFactory for RecordingFactory {
        type Connection = String;

        async fn connect(&self, settings: &ConfigValue) -> Result<String, BoxError> {
            self.seen.lock().unwrap().push(settings.clone());
            match self.fail_with {
                Some(message) => Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    message,
                )
                .into()),
                None => Ok(format!("connected:{}", settings)),
            }
        }
    }

    #[tokio::test]
    async fn test_passes_db_section_verbatim() {
        let mut config = ConfigMapping::new();
        config.insert(
            DB_SECTION,
            ConfigValue::section([("host", "localhost"), ("database", "erp")]),
        );
        config.insert("report", ConfigValue::section([("remito", "ZREMITO")]));

        let factory = RecordingFactory::new(None);
        let connection = open_connection(&factory, &config).await.unwrap();

        assert_eq!(connection, "connected:database=erp\nhost=localhost");
        assert_eq!(factory.seen.lock().unwrap()[0], *config.get(DB_SECTION).unwrap());
    }

    #[tokio::test]
    async fn test_missing_db_section_passes_empty_section() {
        let factory = RecordingFactory::new(None);
        open_connection(&factory, &ConfigMapping::new()).await.unwrap();

        assert_eq!(factory.seen.lock().unwrap()[0], ConfigValue::empty_section());
    }

    #[tokio::test]
    async fn test_scalar_db_entry_is_passed_through() {
        let mut config = ConfigMapping::new();
        config.insert(DB_SECTION, "mysql://app@localhost/erp");

        let factory = RecordingFactory::new(None);
        open_connection(&factory, &config).await.unwrap();

        assert_eq!(
            factory.seen.lock().unwrap()[0],
            ConfigValue::scalar("mysql://app@localhost/erp")
        );
    }

    #[tokio::test]
    async fn test_failure_is_wrapped_with_source() {
        let factory = RecordingFactory::new(Some("access denied"));
        let result = open_connection(&factory, &ConfigMapping::new()).await;

        match result {
            Err(err @ RemitoError::Database { .. }) => {
                assert!(err.to_string().contains("access denied"));
                let source = err.source().unwrap();
                let io = source.downcast_ref::<std::io::Error>().unwrap();
                assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
            }
            _ => panic!("Expected Database error"),
        }
    }
}
