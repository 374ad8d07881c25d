//! Type-safe table mapping for SQLite.
//!
//! Maps typed domain values to rows of one relation without a query
//! language: columns are declared once as strongly-typed descriptors, SQL
//! text is generated per operation, and every value is bound as a
//! positional prepared-statement parameter. No value is ever interpolated
//! into executable SQL.
//!
//! A [`Table`] is built from a [`TableConfig`] (name, column set, scan page
//! size), a [`ConnectionProvider`], and two mapping directions supplied by
//! the caller: entity to column values, and result row to entity. It then
//! offers `insert`, `update`, `delete`, `get` by (composite) key, `find_by`
//! a column, and cursor-paginated iteration over the whole relation.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use rowmap::{SharedConnection, Table, TableConfig, TypedColumn};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User { id: i64, name: String, age: Option<i64> }
//!
//! let id = TypedColumn::<i64>::new("id", true).key().auto_generated();
//! let name = TypedColumn::<String>::new("name", true);
//! let age = TypedColumn::<i64>::new("age", false);
//!
//! let config = TableConfig::new(
//!     "user",
//!     vec![id.column().clone(), name.column().clone(), age.column().clone()],
//! );
//! let provider = Arc::new(SharedConnection::open("app.db").unwrap());
//!
//! let (id_m, name_m, age_m) = (id.clone(), name.clone(), age.clone());
//! let users: Table<User> = Table::new(
//!     config,
//!     provider,
//!     Box::new(move |u: &User| Ok(vec![
//!         id_m.with_value(&u.id),
//!         name_m.with_value(&u.name),
//!         age_m.with_optional(u.age.as_ref())?,
//!     ])),
//!     Box::new(move |u: &User| vec![id.with_value(&u.id)]),
//!     Box::new(|row| Ok(User {
//!         id: row.get("id")?,
//!         name: row.get("name")?,
//!         age: row.get("age")?,
//!     })),
//! ).unwrap();
//!
//! users.insert(&User { id: 0, name: "Betty".into(), age: Some(23) }).unwrap();
//! ```

pub mod column;
pub mod error;
pub mod provider;
pub mod scan;
pub mod table;

// Re-exports for convenience.
pub use column::{Column, ColumnKind, ColumnValue, SqlValue, ToSqlValue, TypedColumn};
pub use error::TableError;
pub use provider::{ConnectionHandle, ConnectionProvider, SharedConnection};
pub use scan::Scan;
pub use table::{MapFrom, MapKey, MapTo, Table, TableConfig, DEFAULT_PAGE_SIZE};
