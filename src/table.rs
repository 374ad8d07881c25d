use std::sync::Arc;

use rusqlite::{params_from_iter, OptionalExtension, Row};
use tracing::{debug, instrument};

use crate::column::{Column, ColumnKind, ColumnValue, SqlValue};
use crate::error::TableError;
use crate::provider::ConnectionProvider;
use crate::scan::Scan;

/// Rows fetched per page during a full scan unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Maps an entity to the set of column values to store. Output is keyed by
/// column; producing two values for the same column is a schema mismatch.
pub type MapTo<T> = Box<dyn Fn(&T) -> Result<Vec<ColumnValue>, TableError> + Send + Sync>;

/// Maps an entity to the ordered column value(s) identifying its row.
pub type MapKey<T> = Box<dyn Fn(&T) -> Vec<ColumnValue> + Send + Sync>;

/// Maps a result row back to an entity. Column access is by name.
pub type MapFrom<T> = Box<dyn Fn(&Row<'_>) -> rusqlite::Result<T> + Send + Sync>;

/// Constructor-time configuration for a [`Table`].
pub struct TableConfig {
    pub(crate) name: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) page_size: usize,
    pub(crate) scan_column: Option<String>,
}

impl TableConfig {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            scan_column: None,
        }
    }

    /// Rows fetched per page when iterating the whole table. Must be at
    /// least one; [`Table::new`] rejects a zero page size.
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = rows;
        self
    }

    /// Monotonically increasing integer column used as the scan cursor.
    /// Defaults to the SQLite `rowid`.
    pub fn scan_column(mut self, name: impl Into<String>) -> Self {
        self.scan_column = Some(name.into());
        self
    }
}

/// A generated statement: SQL text plus its bind values in positional order.
/// Construction is pure and fully validated; nothing touches the store until
/// the statement executes.
#[derive(Debug)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) binds: Vec<SqlValue>,
}

/// The CRUD engine over one relation for entity type `T`.
///
/// A table is declared once (name, column set, identity) together with
/// two mapping directions supplied by the caller: entity to column values
/// and result row to entity. It then exposes insert, update, delete,
/// get-by-key, find-by-column and paginated full iteration, generating SQL
/// text and binding every value as a positional prepared-statement
/// parameter. Holds no mutable state; one instance may be used from many
/// threads as long as the connection provider allows it.
pub struct Table<T> {
    name: String,
    columns: Vec<Column>,
    key: Vec<Column>,
    page_size: usize,
    scan_column: Option<String>,
    provider: Arc<dyn ConnectionProvider>,
    map_to: MapTo<T>,
    map_key: MapKey<T>,
    map_from: MapFrom<T>,
}

impl<T> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("key", &self.key)
            .field("page_size", &self.page_size)
            .field("scan_column", &self.scan_column)
            .finish_non_exhaustive()
    }
}

impl<T> Table<T> {
    /// Builds a table over the given configuration and connection provider.
    ///
    /// Fails with [`TableError::SchemaMismatch`] when the column set is
    /// empty, declares the same name twice, or the scan page size is zero,
    /// and with [`TableError::MissingKey`] when no column is marked as
    /// identity.
    pub fn new(
        config: TableConfig,
        provider: Arc<dyn ConnectionProvider>,
        map_to: MapTo<T>,
        map_key: MapKey<T>,
        map_from: MapFrom<T>,
    ) -> Result<Self, TableError> {
        if config.columns.is_empty() {
            return Err(TableError::SchemaMismatch(format!(
                "table '{}' declares no columns",
                config.name
            )));
        }
        // a zero-row page could never drain the table during a scan
        if config.page_size == 0 {
            return Err(TableError::SchemaMismatch(format!(
                "table '{}' configures a scan page size of zero",
                config.name
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for col in &config.columns {
            if !seen.insert(col.name().to_string()) {
                return Err(TableError::SchemaMismatch(format!(
                    "table '{}' declares column '{}' twice",
                    config.name,
                    col.name()
                )));
            }
        }
        let key: Vec<Column> = config
            .columns
            .iter()
            .filter(|c| c.is_identity())
            .cloned()
            .collect();
        if key.is_empty() {
            return Err(TableError::MissingKey(format!(
                "table '{}' declares no key column",
                config.name
            )));
        }
        Ok(Self {
            name: config.name,
            columns: config.columns,
            key,
            page_size: config.page_size,
            scan_column: config.scan_column,
            provider,
            map_to,
            map_key,
            map_from,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared identity columns, in declaration order.
    pub fn key_columns(&self) -> &[Column] {
        &self.key
    }

    /// Inserts one entity.
    ///
    /// Values mapped to auto-generated key columns are accepted but not sent;
    /// the store assigns those. Fails with [`TableError::SchemaMismatch`]
    /// before touching the store when the mapping references an undeclared
    /// column, omits a required one, or maps a column twice.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn insert(&self, entity: &T) -> Result<(), TableError> {
        let values = (self.map_to)(entity)?;
        let stmt = self.insert_statement(&values)?;
        debug!(sql = %stmt.sql, "insert");
        let conn = self.provider.connection()?;
        conn.execute(&stmt.sql, params_from_iter(stmt.binds.iter()))?;
        Ok(())
    }

    /// Updates the row identified by the entity's key to the entity's state.
    ///
    /// All non-auto-generated mapped columns are written; the key columns
    /// select the row. Fails with [`TableError::MissingKey`] when an
    /// identity value is absent, before touching the store.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn update(&self, entity: &T) -> Result<(), TableError> {
        let mut values = (self.map_to)(entity)?;
        for key_value in (self.map_key)(entity) {
            // mapped output wins when it already covers a key column
            if !values.iter().any(|cv| cv.column() == key_value.column()) {
                values.push(key_value);
            }
        }
        let stmt = self.update_statement(&values)?;
        debug!(sql = %stmt.sql, "update");
        let conn = self.provider.connection()?;
        conn.execute(&stmt.sql, params_from_iter(stmt.binds.iter()))?;
        Ok(())
    }

    /// Deletes the row identified by the entity's key.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn delete(&self, entity: &T) -> Result<(), TableError> {
        let key_values = (self.map_key)(entity);
        let stmt = self.delete_statement(&key_values)?;
        debug!(sql = %stmt.sql, "delete");
        let conn = self.provider.connection()?;
        conn.execute(&stmt.sql, params_from_iter(stmt.binds.iter()))?;
        Ok(())
    }

    /// Fetches the row matching the given key value(s), if any.
    ///
    /// A composite key takes one value per key column; equality is
    /// conjunctive over all of them. Zero matching rows is `None`, not an
    /// error.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn get(&self, key_values: &[ColumnValue]) -> Result<Option<T>, TableError> {
        let stmt = self.key_query_statement(key_values, "get")?;
        debug!(sql = %stmt.sql, "get");
        let conn = self.provider.connection()?;
        let mut prepared = conn.prepare(&stmt.sql)?;
        let entity = prepared
            .query_row(params_from_iter(stmt.binds.iter()), |row| {
                (self.map_from)(row)
            })
            .optional()?;
        Ok(entity)
    }

    /// Fetches every row whose value for the probe's column equals the
    /// probe value. Zero matching rows is an empty vec, not an error.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn find_by(&self, probe: &ColumnValue) -> Result<Vec<T>, TableError> {
        let stmt = self.find_by_statement(probe)?;
        debug!(sql = %stmt.sql, "find_by");
        let conn = self.provider.connection()?;
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared.query_map(params_from_iter(stmt.binds.iter()), |row| {
            (self.map_from)(row)
        })?;
        let mut entities = Vec::new();
        for row in rows {
            entities.push(row?);
        }
        Ok(entities)
    }

    /// Iterates every row in the table, lazily, in pages of the configured
    /// size keyed on a monotonically increasing id (the SQLite `rowid`
    /// unless [`TableConfig::scan_column`] names another integer column).
    ///
    /// The scan is forward-only and non-restartable, and runs without
    /// snapshot isolation: rows inserted behind the cursor are not seen,
    /// rows inserted ahead of it may or may not be, and rows deleted ahead
    /// of it are skipped.
    pub fn all(&self) -> Scan<'_, T> {
        Scan::new(self)
    }

    // ------------------------------------------------------------------
    // Statement construction. Pure: no connection is touched here.
    // ------------------------------------------------------------------

    fn insert_statement(&self, values: &[ColumnValue]) -> Result<Statement, TableError> {
        self.reject_duplicates(values)?;
        // values aimed at auto-generated keys are dropped, not rejected
        let values: Vec<&ColumnValue> = values
            .iter()
            .filter(|cv| cv.column().kind() != ColumnKind::AutoGeneratedKey)
            .collect();
        let insertable: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.kind() != ColumnKind::AutoGeneratedKey)
            .filter(|c| {
                c.required() || values.iter().any(|cv| cv.column().name() == c.name())
            })
            .collect();
        for cv in &values {
            if !insertable.iter().any(|c| c.name() == cv.column().name()) {
                return Err(TableError::SchemaMismatch(format!(
                    "table '{}' does not declare column '{}'",
                    self.name,
                    cv.column().name()
                )));
            }
        }

        let mut names = Vec::with_capacity(insertable.len());
        let mut binds = Vec::with_capacity(insertable.len());
        for col in &insertable {
            match values.iter().find(|cv| cv.column().name() == col.name()) {
                Some(cv) => {
                    names.push(col.name());
                    binds.push(cv.value().clone());
                }
                None => {
                    return Err(TableError::SchemaMismatch(format!(
                        "required column '{}' missing from mapped values for table '{}'",
                        col.name(),
                        self.name
                    )))
                }
            }
        }
        let placeholders: Vec<String> = (1..=binds.len()).map(|i| format!("?{}", i)).collect();
        Ok(Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.name,
                names.join(", "),
                placeholders.join(", ")
            ),
            binds,
        })
    }

    fn update_statement(&self, values: &[ColumnValue]) -> Result<Statement, TableError> {
        self.reject_duplicates(values)?;
        for cv in values {
            if !self.columns.iter().any(|c| c.name() == cv.column().name()) {
                return Err(TableError::SchemaMismatch(format!(
                    "table '{}' does not declare column '{}'",
                    self.name,
                    cv.column().name()
                )));
            }
        }
        for key_col in &self.key {
            if !values.iter().any(|cv| cv.column().name() == key_col.name()) {
                return Err(TableError::MissingKey(format!(
                    "no value for key column '{}' of table '{}'",
                    key_col.name(),
                    self.name
                )));
            }
        }

        // SET covers every non-auto-generated mapped column, declared order
        let mut assignments = Vec::new();
        let mut binds = Vec::new();
        for col in &self.columns {
            if col.kind() == ColumnKind::AutoGeneratedKey {
                continue;
            }
            match values.iter().find(|cv| cv.column().name() == col.name()) {
                Some(cv) => {
                    assignments.push(col.name());
                    binds.push(cv.value().clone());
                }
                None if col.required() => {
                    return Err(TableError::SchemaMismatch(format!(
                        "required column '{}' missing from mapped values for table '{}'",
                        col.name(),
                        self.name
                    )))
                }
                None => {}
            }
        }
        let set_clause: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} = ?{}", name, i + 1))
            .collect();

        let mut conditions = Vec::new();
        for key_col in &self.key {
            // presence was checked above
            if let Some(cv) = values.iter().find(|cv| cv.column().name() == key_col.name()) {
                conditions.push(format!("{} = ?{}", key_col.name(), binds.len() + 1));
                binds.push(cv.value().clone());
            }
        }

        Ok(Statement {
            sql: format!(
                "UPDATE {} SET {} WHERE {}",
                self.name,
                set_clause.join(", "),
                conditions.join(" AND ")
            ),
            binds,
        })
    }

    fn delete_statement(&self, key_values: &[ColumnValue]) -> Result<Statement, TableError> {
        for cv in key_values {
            if !cv.column().is_identity()
                || !self.key.iter().any(|c| c.name() == cv.column().name())
            {
                return Err(TableError::MissingKey(format!(
                    "column '{}' is not a key column of table '{}'",
                    cv.column().name(),
                    self.name
                )));
            }
        }
        let (conditions, binds) = self.key_conditions(key_values)?;
        Ok(Statement {
            sql: format!("DELETE FROM {} WHERE {}", self.name, conditions),
            binds,
        })
    }

    fn key_query_statement(
        &self,
        key_values: &[ColumnValue],
        operation: &str,
    ) -> Result<Statement, TableError> {
        for cv in key_values {
            if !self.key.iter().any(|c| c.name() == cv.column().name()) {
                return Err(TableError::MissingKey(format!(
                    "{} on table '{}' was given non-key column '{}'",
                    operation,
                    self.name,
                    cv.column().name()
                )));
            }
        }
        let (conditions, binds) = self.key_conditions(key_values)?;
        Ok(Statement {
            sql: format!("SELECT * FROM {} WHERE {}", self.name, conditions),
            binds,
        })
    }

    fn find_by_statement(&self, probe: &ColumnValue) -> Result<Statement, TableError> {
        if !self.columns.iter().any(|c| c.name() == probe.column().name()) {
            return Err(TableError::SchemaMismatch(format!(
                "table '{}' does not declare column '{}'",
                self.name,
                probe.column().name()
            )));
        }
        Ok(Statement {
            sql: format!(
                "SELECT * FROM {} WHERE {} = ?1",
                self.name,
                probe.column().name()
            ),
            binds: vec![probe.value().clone()],
        })
    }

    pub(crate) fn page_statement(&self, cursor: i64) -> Statement {
        let id = self.scan_column.as_deref().unwrap_or("rowid");
        Statement {
            sql: format!(
                "SELECT {}, * FROM {} WHERE {} > ?1 ORDER BY {} LIMIT ?2",
                id, self.name, id, id
            ),
            binds: vec![
                SqlValue::Integer(cursor),
                SqlValue::Integer(self.page_size as i64),
            ],
        }
    }

    /// Builds `k1 = ?1 AND k2 = ?2 ...` over the declared key order,
    /// requiring one value per key column.
    fn key_conditions(
        &self,
        key_values: &[ColumnValue],
    ) -> Result<(String, Vec<SqlValue>), TableError> {
        let mut conditions = Vec::with_capacity(self.key.len());
        let mut binds = Vec::with_capacity(self.key.len());
        for key_col in &self.key {
            match key_values
                .iter()
                .find(|cv| cv.column().name() == key_col.name())
            {
                Some(cv) => {
                    conditions.push(format!("{} = ?{}", key_col.name(), binds.len() + 1));
                    binds.push(cv.value().clone());
                }
                None => {
                    return Err(TableError::MissingKey(format!(
                        "no value for key column '{}' of table '{}'",
                        key_col.name(),
                        self.name
                    )))
                }
            }
        }
        Ok((conditions.join(" AND "), binds))
    }

    fn reject_duplicates(&self, values: &[ColumnValue]) -> Result<(), TableError> {
        for (i, cv) in values.iter().enumerate() {
            if values[..i]
                .iter()
                .any(|earlier| earlier.column().name() == cv.column().name())
            {
                return Err(TableError::SchemaMismatch(format!(
                    "column '{}' mapped twice for table '{}'",
                    cv.column().name(),
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn page_size(&self) -> usize {
        self.page_size
    }

    pub(crate) fn provider(&self) -> &dyn ConnectionProvider {
        self.provider.as_ref()
    }

    pub(crate) fn map_row(&self, row: &Row<'_>) -> rusqlite::Result<T> {
        (self.map_from)(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::TypedColumn;
    use crate::provider::SharedConnection;

    struct User {
        id: i64,
        name: String,
        age: Option<i64>,
        fav_colour: Option<String>,
    }

    fn user_table() -> Table<User> {
        let id = TypedColumn::<i64>::new("id", true).key().auto_generated();
        let name = TypedColumn::<String>::new("name", true);
        let age = TypedColumn::<i64>::new("age", false);
        let fav_colour = TypedColumn::<String>::new("fav_colour", false);
        let columns = vec![
            id.column().clone(),
            name.column().clone(),
            age.column().clone(),
            fav_colour.column().clone(),
        ];
        let (id2, name2, age2, colour2) =
            (id.clone(), name.clone(), age.clone(), fav_colour.clone());
        Table::new(
            TableConfig::new("user", columns).page_size(2),
            Arc::new(SharedConnection::open_in_memory().unwrap()),
            Box::new(move |u: &User| {
                Ok(vec![
                    id2.with_value(&u.id),
                    name2.with_value(&u.name),
                    age2.with_optional(u.age.as_ref())?,
                    colour2.with_optional(u.fav_colour.as_ref())?,
                ])
            }),
            Box::new(move |u: &User| vec![id.with_value(&u.id)]),
            Box::new(|row| {
                Ok(User {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    age: row.get("age")?,
                    fav_colour: row.get("fav_colour")?,
                })
            }),
        )
        .unwrap()
    }

    #[test]
    fn insert_excludes_auto_generated_key_and_binds_in_column_order() {
        let table = user_table();
        let id = TypedColumn::<i64>::new("id", true).key().auto_generated();
        let name = TypedColumn::<String>::new("name", true);
        let age = TypedColumn::<i64>::new("age", false);
        let colour = TypedColumn::<String>::new("fav_colour", false);
        let stmt = table
            .insert_statement(&[
                id.with_value(&7),
                name.with_value(&"Betty".to_string()),
                age.with_value(&23),
                colour.with_value(&"Orange".to_string()),
            ])
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO user (name, age, fav_colour) VALUES (?1, ?2, ?3)"
        );
        assert_eq!(
            stmt.binds,
            vec![
                SqlValue::Text("Betty".to_string()),
                SqlValue::Integer(23),
                SqlValue::Text("Orange".to_string()),
            ]
        );
    }

    #[test]
    fn insert_omits_absent_optional_columns() {
        let table = user_table();
        let name = TypedColumn::<String>::new("name", true);
        let stmt = table
            .insert_statement(&[name.with_value(&"Betty".to_string())])
            .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO user (name) VALUES (?1)");
    }

    #[test]
    fn insert_rejects_undeclared_column() {
        let table = user_table();
        let rogue = TypedColumn::<String>::new("nickname", false);
        let name = TypedColumn::<String>::new("name", true);
        let err = table
            .insert_statement(&[
                name.with_value(&"Betty".to_string()),
                rogue.with_value(&"Bets".to_string()),
            ])
            .unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch(_)));
    }

    #[test]
    fn insert_rejects_missing_required_column() {
        let table = user_table();
        let age = TypedColumn::<i64>::new("age", false);
        let err = table.insert_statement(&[age.with_value(&23)]).unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch(_)));
    }

    #[test]
    fn insert_rejects_column_mapped_twice() {
        let table = user_table();
        let name = TypedColumn::<String>::new("name", true);
        let err = table
            .insert_statement(&[
                name.with_value(&"Betty".to_string()),
                name.with_value(&"Julie".to_string()),
            ])
            .unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch(_)));
    }

    #[test]
    fn update_sets_non_key_columns_then_binds_key_last() {
        let table = user_table();
        let id = TypedColumn::<i64>::new("id", true).key().auto_generated();
        let name = TypedColumn::<String>::new("name", true);
        let age = TypedColumn::<i64>::new("age", false);
        let colour = TypedColumn::<String>::new("fav_colour", false);
        let stmt = table
            .update_statement(&[
                id.with_value(&1),
                name.with_value(&"Julie".to_string()),
                age.with_value(&55),
                colour.with_value(&"Blue".to_string()),
            ])
            .unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE user SET name = ?1, age = ?2, fav_colour = ?3 WHERE id = ?4"
        );
        assert_eq!(
            stmt.binds,
            vec![
                SqlValue::Text("Julie".to_string()),
                SqlValue::Integer(55),
                SqlValue::Text("Blue".to_string()),
                SqlValue::Integer(1),
            ]
        );
    }

    #[test]
    fn update_requires_every_key_column() {
        let table = user_table();
        let name = TypedColumn::<String>::new("name", true);
        let err = table
            .update_statement(&[name.with_value(&"Julie".to_string())])
            .unwrap_err();
        assert!(matches!(err, TableError::MissingKey(_)));
    }

    #[test]
    fn delete_rejects_non_key_column() {
        let table = user_table();
        let name = TypedColumn::<String>::new("name", true);
        let err = table
            .delete_statement(&[name.with_value(&"Betty".to_string())])
            .unwrap_err();
        assert!(matches!(err, TableError::MissingKey(_)));
    }

    #[test]
    fn delete_builds_conjunction_over_key() {
        let table = user_table();
        let id = TypedColumn::<i64>::new("id", true).key().auto_generated();
        let stmt = table.delete_statement(&[id.with_value(&4)]).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM user WHERE id = ?1");
        assert_eq!(stmt.binds, vec![SqlValue::Integer(4)]);
    }

    #[test]
    fn get_rejects_probe_on_non_key_column() {
        let table = user_table();
        let name = TypedColumn::<String>::new("name", true);
        let err = table
            .key_query_statement(&[name.with_value(&"Betty".to_string())], "get")
            .unwrap_err();
        assert!(matches!(err, TableError::MissingKey(_)));
    }

    #[test]
    fn page_statement_scans_by_rowid_with_limit() {
        let table = user_table();
        let stmt = table.page_statement(i64::MIN);
        assert_eq!(
            stmt.sql,
            "SELECT rowid, * FROM user WHERE rowid > ?1 ORDER BY rowid LIMIT ?2"
        );
        assert_eq!(
            stmt.binds,
            vec![SqlValue::Integer(i64::MIN), SqlValue::Integer(2)]
        );
    }

    #[test]
    fn table_requires_a_key_column() {
        let name = TypedColumn::<String>::new("name", true);
        let err = Table::<User>::new(
            TableConfig::new("user", vec![name.column().clone()]),
            Arc::new(SharedConnection::open_in_memory().unwrap()),
            Box::new(|_| Ok(Vec::new())),
            Box::new(|_| Vec::new()),
            Box::new(|_| {
                Ok(User {
                    id: 0,
                    name: String::new(),
                    age: None,
                    fav_colour: None,
                })
            }),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::MissingKey(_)));
    }

    #[test]
    fn table_rejects_a_zero_scan_page_size() {
        let id = TypedColumn::<i64>::new("id", true).key();
        let err = Table::<User>::new(
            TableConfig::new("user", vec![id.column().clone()]).page_size(0),
            Arc::new(SharedConnection::open_in_memory().unwrap()),
            Box::new(|_| Ok(Vec::new())),
            Box::new(|_| Vec::new()),
            Box::new(|_| {
                Ok(User {
                    id: 0,
                    name: String::new(),
                    age: None,
                    fav_colour: None,
                })
            }),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch(_)));
    }

    #[test]
    fn table_rejects_duplicate_column_declarations() {
        let id = TypedColumn::<i64>::new("id", true).key();
        let err = Table::<User>::new(
            TableConfig::new("user", vec![id.column().clone(), id.column().clone()]),
            Arc::new(SharedConnection::open_in_memory().unwrap()),
            Box::new(|_| Ok(Vec::new())),
            Box::new(|_| Vec::new()),
            Box::new(|_| {
                Ok(User {
                    id: 0,
                    name: String::new(),
                    age: None,
                    fav_colour: None,
                })
            }),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch(_)));
    }
}
