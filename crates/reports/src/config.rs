use connectors::{
    adapter::{Adapter, DataFormat},
    error::AdapterError,
    sql::base::connector::SqlConnector,
};
use std::{collections::HashMap, fmt, sync::Arc, time::Duration};
use thiserror::Error;

pub const DB_URL_VAR: &str = "FOOD_CONNECT_DB_URL";
pub const LEGACY_DB_URL_VAR: &str = "DB_URL";
pub const QUERY_TIMEOUT_VAR: &str = "FOOD_CONNECT_QUERY_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No database URL configured; set FOOD_CONNECT_DB_URL or DB_URL")]
    MissingUrl,

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Connection settings resolved from the environment.
#[derive(Clone)]
pub struct ReportsConfig {
    pub db_url: String,
    pub format: DataFormat,
    pub query_timeout: Option<Duration>,
}

impl ReportsConfig {
    /// Reads settings from `vars`; `format` overrides scheme inference.
    pub fn from_vars(
        vars: &HashMap<String, String>,
        format: Option<DataFormat>,
    ) -> Result<Self, ConfigError> {
        let db_url = [DB_URL_VAR, LEGACY_DB_URL_VAR]
            .iter()
            .filter_map(|var| vars.get(*var))
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
            .ok_or(ConfigError::MissingUrl)?
            .to_string();

        let format = match format {
            Some(format) => format,
            None => DataFormat::infer(&db_url)?,
        };

        let query_timeout = match vars.get(QUERY_TIMEOUT_VAR) {
            Some(raw) => Some(parse_timeout(QUERY_TIMEOUT_VAR, raw)?),
            None => None,
        };

        Ok(Self {
            db_url,
            format,
            query_timeout,
        })
    }

    /// Validates the URL and returns a connector; no connection is opened.
    pub fn connector(&self) -> Result<Arc<dyn SqlConnector>, ConfigError> {
        Ok(Adapter::sql(self.format, &self.db_url)?.into_shared())
    }
}

/// Parses a positive number of seconds.
pub fn parse_timeout(var: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Hides credentials when the config is logged.
impl fmt::Debug for ReportsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportsConfig")
            .field("db_url", &redact_url(&self.db_url))
            .field("format", &self.format)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}
