use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::ToSql;

use crate::error::TableError;

/// A wire value bound into a prepared statement at a positional index.
///
/// One variant per typed setter the store exposes. Binding always goes
/// through [`ToSql`]; the rendered literal form produced by [`SqlValue::render`]
/// is for debug output only and is never interpolated into executable SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Renders the value as SQL literal text for logs and diagnostics.
    ///
    /// Renders the same value that [`ToSql`] binds, so the debug form and
    /// the bound parameter always agree.
    pub fn render(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(i) => i.to_string(),
            SqlValue::Decimal(d) => d.to_string(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            SqlValue::Timestamp(ts) => format!("'{}'", ts.to_rfc3339()),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Null => Ok(ToSqlOutput::Owned(Value::Null)),
            SqlValue::Integer(i) => Ok(ToSqlOutput::Owned(Value::Integer(*i))),
            SqlValue::Decimal(d) => Ok(ToSqlOutput::Owned(Value::Real(*d))),
            SqlValue::Text(s) => Ok(ToSqlOutput::Owned(Value::Text(s.clone()))),
            SqlValue::Timestamp(ts) => ts.to_sql(),
        }
    }
}

/// Conversion from a domain value to its wire representation.
///
/// Implemented for the primitive value types; domain newtypes implement it
/// by delegating to their inner value.
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue;
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl ToSqlValue for str {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Integer(*self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Integer(i64::from(*self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Decimal(*self)
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Timestamp(*self)
    }
}

/// Role a column plays in a table's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Ordinary attribute.
    Plain,
    /// Part of the row identity, supplied by the caller.
    Key,
    /// Part of the row identity, assigned by the store. Excluded from the
    /// column list on insert.
    AutoGeneratedKey,
}

/// A named relational attribute descriptor.
///
/// Identity is the name alone: two `Column`s with the same name refer to
/// the same attribute regardless of requiredness or kind. Declared once per
/// table and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    required: bool,
    kind: ColumnKind,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Whether this column is part of the row identity.
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, ColumnKind::Key | ColumnKind::AutoGeneratedKey)
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Column {}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A [`Column`] specialized to a value type `T`.
///
/// Stateless and reusable: one instance describes one logical attribute and
/// converts any number of values through [`TypedColumn::with_value`]. A
/// plain column becomes (part of) the table's key via [`TypedColumn::key`],
/// and a store-assigned key via a further [`TypedColumn::auto_generated`].
#[derive(Debug)]
pub struct TypedColumn<T: ?Sized> {
    column: Column,
    _value: PhantomData<fn(&T) -> SqlValue>,
}

// Manual impl: a descriptor is cloneable no matter what `T` is.
impl<T: ?Sized> Clone for TypedColumn<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: ToSqlValue + ?Sized> TypedColumn<T> {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            column: Column {
                name: name.into(),
                required,
                kind: ColumnKind::Plain,
            },
            _value: PhantomData,
        }
    }

    /// Marks this column as part of the row identity.
    pub fn key(mut self) -> Self {
        self.column.kind = ColumnKind::Key;
        self
    }

    /// Marks this key column as assigned by the store. It keeps behaving as
    /// an identity column for reads, updates and deletes, but is excluded
    /// from the column list on insert.
    pub fn auto_generated(mut self) -> Self {
        self.column.kind = ColumnKind::AutoGeneratedKey;
        self
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn name(&self) -> &str {
        self.column.name()
    }

    /// Pairs this column with a concrete value.
    pub fn with_value(&self, value: &T) -> ColumnValue {
        let wire = value.to_sql_value();
        ColumnValue {
            column: self.column.clone(),
            rendered: wire.render(),
            value: wire,
        }
    }

    /// Pairs this column with a possibly absent value.
    ///
    /// Absent and required is a caller error: the mapping must not omit a
    /// required attribute. Absent and optional binds a null parameter.
    pub fn with_optional(&self, value: Option<&T>) -> Result<ColumnValue, TableError> {
        match value {
            Some(v) => Ok(self.with_value(v)),
            None if self.column.required => Err(TableError::SchemaMismatch(format!(
                "required column '{}' was given no value",
                self.column.name
            ))),
            None => Ok(ColumnValue {
                column: self.column.clone(),
                rendered: SqlValue::Null.render(),
                value: SqlValue::Null,
            }),
        }
    }
}

/// A column paired with one concrete value: its debug rendering and the
/// wire value to bind. Produced per operation by a [`TypedColumn`] and
/// consumed immediately by statement construction.
///
/// Equality follows column identity, so a table's mapped output behaves as
/// a set keyed by column; two values for the same column are duplicates.
#[derive(Debug, Clone)]
pub struct ColumnValue {
    column: Column,
    rendered: String,
    value: SqlValue,
}

impl ColumnValue {
    pub fn column(&self) -> &Column {
        &self.column
    }

    /// Debug literal text for this value. Never part of executed SQL.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn value(&self) -> &SqlValue {
        &self.value
    }
}

impl PartialEq for ColumnValue {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column
    }
}

impl Eq for ColumnValue {}
