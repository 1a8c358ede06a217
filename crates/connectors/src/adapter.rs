use crate::{
    error::AdapterError,
    sql::{
        base::connector::SqlConnector, mysql::connector::MySqlConnector,
        postgres::connector::PgConnector, sqlite::connector::SqliteConnector,
    },
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFormat {
    MySql,
    Postgres,
    Sqlite,
}

impl DataFormat {
    /// Guesses the backend from a connection string's scheme, or from a
    /// bare SQLite file path.
    pub fn infer(url: &str) -> Result<Self, AdapterError> {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("mysql://") || lower.starts_with("mariadb://") {
            Ok(DataFormat::MySql)
        } else if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Ok(DataFormat::Postgres)
        } else if lower.starts_with("sqlite:")
            || [".db", ".sqlite", ".sqlite3"]
                .iter()
                .any(|ext| lower.ends_with(ext))
        {
            Ok(DataFormat::Sqlite)
        } else {
            Err(AdapterError::UnknownFormat(url.to_string()))
        }
    }
}

impl FromStr for DataFormat {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DataFormat::MySql),
            "pg" | "postgres" | "postgresql" => Ok(DataFormat::Postgres),
            "sqlite" => Ok(DataFormat::Sqlite),
            other => Err(AdapterError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataFormat::MySql => "mysql",
            DataFormat::Postgres => "postgres",
            DataFormat::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlConnector),
    Postgres(PgConnector),
    Sqlite(SqliteConnector),
}

impl Adapter {
    /// Validates the connection string without opening a connection.
    pub fn sql(format: DataFormat, conn_str: &str) -> Result<Self, AdapterError> {
        let adapter = match format {
            DataFormat::MySql => {
                let url = match conn_str.strip_prefix("mariadb://") {
                    Some(rest) => format!("mysql://{rest}"),
                    None => conn_str.to_string(),
                };
                Adapter::MySql(MySqlConnector::from_url(&url)?)
            }
            DataFormat::Postgres => Adapter::Postgres(PgConnector::from_url(conn_str)?),
            DataFormat::Sqlite => Adapter::Sqlite(SqliteConnector::from_url(conn_str)?),
        };
        Ok(adapter)
    }

    pub fn into_shared(self) -> Arc<dyn SqlConnector> {
        match self {
            Adapter::MySql(connector) => Arc::new(connector),
            Adapter::Postgres(connector) => Arc::new(connector),
            Adapter::Sqlite(connector) => Arc::new(connector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::base::connector::DatabaseKind;

    #[test]
    fn test_infer_format_from_url() {
        assert_eq!(
            DataFormat::infer("mysql://u:p@localhost/food").unwrap(),
            DataFormat::MySql
        );
        assert_eq!(
            DataFormat::infer("postgresql://localhost/food").unwrap(),
            DataFormat::Postgres
        );
        assert_eq!(
            DataFormat::infer("sqlite:///var/data/food.db").unwrap(),
            DataFormat::Sqlite
        );
        assert_eq!(DataFormat::infer("./food.sqlite3").unwrap(), DataFormat::Sqlite);
        assert!(matches!(
            DataFormat::infer("oracle://db"),
            Err(AdapterError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!("MariaDB".parse::<DataFormat>().unwrap(), DataFormat::MySql);
        assert_eq!("pg".parse::<DataFormat>().unwrap(), DataFormat::Postgres);
        assert!("csv".parse::<DataFormat>().is_err());
        assert_eq!(DataFormat::Postgres.to_string(), "postgres");
    }

    #[test]
    fn test_mariadb_scheme_is_accepted() {
        let adapter = Adapter::sql(DataFormat::MySql, "mariadb://u:p@localhost:3306/food").unwrap();
        assert_eq!(adapter.into_shared().kind(), DatabaseKind::MySql);
    }

    #[test]
    fn test_shared_connector_keeps_kind() {
        let adapter = Adapter::sql(DataFormat::Sqlite, "sqlite://food.db").unwrap();
        assert_eq!(adapter.into_shared().kind(), DatabaseKind::Sqlite);
    }
}
