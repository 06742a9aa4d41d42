mod value;
pub(crate) use value::Value;

use joinorm_core::{
    driver::{Executor, Rows},
    stmt::{self, DeleteRecord, Query, WriteRecord},
    Error, Result,
};
use joinorm_sql::{Serializer, Statement};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection. Every in-memory connection gets a fresh database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        let sqlite = Self { connection };
        Ok(sqlite)
    }

    /// Runs semicolon-separated SQL without parameters, e.g. to create
    /// tables.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }

    fn execute(&mut self, statement: Statement<'_>) -> Result<u64> {
        let mut params = Vec::<stmt::Value>::new();
        let sql = Serializer::sqlite().serialize(statement, &mut params);
        debug!(%sql, params = params.len(), "execute");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut stmt = self
            .connection
            .prepare_cached(&sql)
            .map_err(Error::driver_operation_failed)?;

        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        Ok(count as u64)
    }

    fn control(&mut self, sql: &str) -> Result<()> {
        self.connection
            .execute(sql, [])
            .map_err(Error::driver_operation_failed)?;
        Ok(())
    }
}

impl Executor for Connection {
    type Cursor = Rows;

    fn query(&mut self, query: &Query) -> Result<Rows> {
        let mut params = Vec::<stmt::Value>::new();
        let sql = Serializer::sqlite().serialize(query, &mut params);
        debug!(%sql, "query");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut stmt = self
            .connection
            .prepare_cached(&sql)
            .map_err(Error::driver_operation_failed)?;

        let width = stmt.column_count();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(width);

                    for index in 0..width {
                        items.push(Value::from_sql(row, index)?.into_inner());
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::driver_operation_failed(err));
                }
            }
        }

        Ok(Rows::new(ret))
    }

    fn insert(&mut self, record: &WriteRecord) -> Result<u64> {
        self.execute(record.into())
    }

    fn delete(&mut self, record: &DeleteRecord) -> Result<u64> {
        self.execute(record.into())
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.control("BEGIN")
    }

    fn commit(&mut self) -> Result<()> {
        self.control("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.control("ROLLBACK")
    }

    fn release(&mut self) -> Result<()> {
        self.connection.flush_prepared_statement_cache();
        Ok(())
    }
}
