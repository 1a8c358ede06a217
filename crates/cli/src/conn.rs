use crate::error::CliError;
use reports::config::{ReportsConfig, redact_url};
use tracing::{error, info};

/// Opens one connection with the configured settings and runs `SELECT 1`.
pub async fn test_connection(config: &ReportsConfig) -> Result<(), CliError> {
    info!(
        "Pinging {} at '{}'",
        config.format,
        redact_url(&config.db_url)
    );

    let connector = config.connector()?;
    match connector.ping().await {
        Ok(()) => {
            info!("Connection to {} succeeded", config.format);
            Ok(())
        }
        Err(err) => {
            error!("Connection to {} failed: {}", config.format, err);
            Err(CliError::Connection(err))
        }
    }
}
