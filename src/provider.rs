use std::ops::Deref;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::debug;

use crate::error::TableError;

/// Scoped access to one store connection. Dropping the handle releases the
/// connection, so every exit path of an operation releases what it acquired.
pub type ConnectionHandle<'a> = Box<dyn Deref<Target = Connection> + 'a>;

/// Capability to hand out store connections.
///
/// Implementations must be safe for concurrent use; each table operation
/// acquires one connection for its own scope and never holds it across
/// operations. Tables take the provider at construction time, so any table
/// can be pointed at a substitute store in tests.
pub trait ConnectionProvider: Send + Sync {
    fn connection(&self) -> Result<ConnectionHandle<'_>, TableError>;
}

/// A single SQLite connection behind a mutex, shared across tables.
///
/// Cloning is cheap and yields a handle to the same underlying connection.
#[derive(Clone)]
pub struct SharedConnection {
    inner: Arc<Mutex<Connection>>,
}

impl SharedConnection {
    /// Opens (or creates) a SQLite database at the given file path.
    pub fn open(path: &str) -> Result<Self, TableError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        debug!(path, "opened sqlite database");
        Ok(Self {
            inner: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory SQLite database (useful for testing).
    pub fn open_in_memory() -> Result<Self, TableError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        debug!("opened in-memory sqlite database");
        Ok(Self {
            inner: Arc::new(Mutex::new(conn)),
        })
    }
}

impl ConnectionProvider for SharedConnection {
    fn connection(&self) -> Result<ConnectionHandle<'_>, TableError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| TableError::Connection("connection mutex poisoned".to_string()))?;
        Ok(Box::new(guard))
    }
}
