//! Connection traits for schema scanning

use crate::error::Result;
use crate::schema::{ColumnInfo, TableInfo};
use async_trait::async_trait;

/// Source of schema connections.
///
/// A generation run acquires exactly one connection from its provider and
/// holds it until every table has been processed.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Acquire a connection for one generation run.
    async fn connect(&self) -> Result<Box<dyn SchemaConnection>>;
}

#[async_trait]
impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Box<P> {
    async fn connect(&self) -> Result<Box<dyn SchemaConnection>> {
        (**self).connect().await
    }
}

/// A live handle capable of answering metadata queries.
///
/// Implementations only read metadata; they never execute other statements.
#[async_trait]
pub trait SchemaConnection: Send {
    /// List all base tables, sorted by name. Returned tables carry no columns.
    async fn list_tables(&mut self) -> Result<Vec<TableInfo>>;

    /// Look up a single table by name. Returned table carries no columns.
    async fn find_table(&mut self, table_name: &str) -> Result<Option<TableInfo>>;

    /// List the columns of a table in declaration order.
    async fn list_columns(&mut self, table_name: &str) -> Result<Vec<ColumnInfo>>;

    /// Release the connection. Calling this more than once is a no-op.
    async fn close(&mut self) -> Result<()>;
}
