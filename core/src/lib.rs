mod categories;
pub use categories::{Category, CategoryIndex};
mod client;
pub use client::ApiClient;
mod col_metadata;
pub use col_metadata::{part_column, ColMetadata, PartColumn, PART_COLUMNS};
mod columns;
pub use columns::TableColumns;
mod conn;
pub use conn::InventreeConnection;
mod err;
pub use err::{Error, PartsError, Result};
mod odbc_uri;
pub use odbc_uri::{ConnectionOptions, Credentials, Kom2Uri};
mod query;
pub use query::PartsQuery;
mod sql;
pub use sql::{parse_select, Filter, Literal, Projection, SelectQuery};
mod stmt;
pub use stmt::InventreeStatement;
mod tables;
pub use tables::CategoryTables;
