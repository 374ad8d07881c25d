use thiserror::Error;

/// Errors surfaced by the table mapping layer.
///
/// Absence is never an error here: `get` returns `Option` and `find_by`
/// returns a possibly empty `Vec`.
#[derive(Debug, Error)]
pub enum TableError {
    /// A mapping produced a value for a column the table does not declare,
    /// omitted a required column, or produced two values for the same column.
    /// Raised before any statement is issued.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The entity's identity value(s) are absent or reference a column that
    /// is not part of the table's declared key. Raised before any statement
    /// is issued.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// The connection provider could not hand out a connection.
    #[error("connection unavailable: {0}")]
    Connection(String),

    /// Failure surfaced by the store itself (connectivity, constraint
    /// violation, ...). Propagated unwrapped; this layer never retries.
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}
