use crate::sql::{
    base::{
        connector::{DatabaseKind, SqlConnector},
        error::{ConnectorError, DbError},
    },
    sqlite::{
        params::SqliteParamStore,
        row::{cell, header_type},
    },
};
use async_trait::async_trait;
use model::{
    core::{data_type::DataType, value::Value},
    records::table::{ColumnHeader, ResultTable},
};
use planner::query::dialect::{self, Dialect};
use rusqlite::{Connection, InterruptHandle, OpenFlags, params_from_iter};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

/// Where the blocking task stands, as seen by the caller waiting on it.
enum Slot {
    Opening,
    Running(InterruptHandle),
    Abandoned,
}

/// Interrupts the running statement if the caller stops waiting for it.
struct InterruptGuard(Option<Arc<Mutex<Slot>>>);

impl InterruptGuard {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        let Some(slot) = self.0.take() else {
            return;
        };
        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Slot::Running(handle) = std::mem::replace(&mut *slot, Slot::Abandoned) {
            debug!("Interrupting abandoned SQLite statement");
            handle.interrupt();
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    dialect: dialect::Sqlite,
}

impl SqliteConnector {
    fn open(path: &Path) -> Result<Connection, DbError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(ConnectorError::Sqlite)?;
        Ok(conn)
    }

    /// Opens the file and runs `work` on the blocking pool. Dropping the
    /// returned future interrupts the statement and closes the connection.
    async fn run_blocking<T, F>(&self, work: F) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, DbError> + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(Slot::Opening));
        let guard = InterruptGuard(Some(Arc::clone(&slot)));
        let path = self.path.clone();

        let result = tokio::task::spawn_blocking(move || {
            let conn = Self::open(&path)?;
            {
                let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if matches!(*slot, Slot::Abandoned) {
                    return Err(DbError::Task("statement abandoned before it started".into()));
                }
                *slot = Slot::Running(conn.get_interrupt_handle());
            }
            work(&conn)
        })
        .await
        .map_err(|e| DbError::Task(e.to_string()))?;

        guard.disarm();
        result
    }
}

fn fetch_table(conn: &Connection, sql: &str, params: &[Value]) -> Result<ResultTable, DbError> {
    let mut stmt = conn.prepare(sql)?;
    let declared = stmt
        .columns()
        .iter()
        .map(|col| {
            (
                col.name().to_string(),
                col.decl_type().map(DataType::from_sqlite_decl),
            )
        })
        .collect::<Vec<_>>();

    let store = SqliteParamStore::from_values(params);
    let mut rows = stmt.query(params_from_iter(store.params.iter()))?;

    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Vec::with_capacity(declared.len());
        for (idx, (_, data_type)) in declared.iter().enumerate() {
            record.push(cell(row.get_ref(idx)?, *data_type));
        }
        values.push(record);
    }
    debug!("SQLite returned {} rows", values.len());

    let headers = declared
        .iter()
        .enumerate()
        .map(|(idx, (name, data_type))| {
            ColumnHeader::new(name, header_type(*data_type, &values, idx))
        })
        .collect();

    Ok(ResultTable::new(headers, values))
}

#[async_trait]
impl SqlConnector for SqliteConnector {
    fn from_url(url: &str) -> Result<Self, ConnectorError> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url)
            .trim();

        if path.is_empty() || path == ":memory:" {
            return Err(ConnectorError::InvalidUrl(format!(
                "'{url}' does not name a database file"
            )));
        }

        Ok(SqliteConnector {
            path: PathBuf::from(path),
            dialect: dialect::Sqlite,
        })
    }

    async fn query_table(&self, sql: &str, params: Vec<Value>) -> Result<ResultTable, DbError> {
        let sql = sql.to_string();
        self.run_blocking(move |conn| fetch_table(conn, &sql, &params))
            .await
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.run_blocking(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}
