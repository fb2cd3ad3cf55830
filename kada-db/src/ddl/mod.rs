//! Offline schema source reading `CREATE TABLE` scripts

mod parser;

pub use parser::parse_schema;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{ColumnInfo, TableInfo};
use crate::traits::{ConnectionProvider, SchemaConnection};

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Sql(String),
}

/// A schema source backed by a DDL script instead of a live server.
///
/// The script is read and parsed on every [`ConnectionProvider::connect`],
/// so edits to the file are picked up by the next run.
#[derive(Debug, Clone)]
pub struct DdlProvider {
    source: Source,
}

impl DdlProvider {
    /// Read the schema from a `.sql` file.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }

    /// Use an in-memory SQL script.
    pub fn from_sql(sql: impl Into<String>) -> Self {
        Self {
            source: Source::Sql(sql.into()),
        }
    }
}

#[async_trait]
impl ConnectionProvider for DdlProvider {
    async fn connect(&self) -> Result<Box<dyn SchemaConnection>> {
        let sql = match &self.source {
            Source::File(path) => {
                debug!("Reading schema file {}", path.display());
                std::fs::read_to_string(path)?
            }
            Source::Sql(sql) => sql.clone(),
        };

        let mut tables = parse_schema(&sql)?;
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Parsed {} tables", tables.len());

        Ok(Box::new(DdlConnection {
            tables: Some(tables),
        }))
    }
}

/// Parsed tables held for the duration of one run.
pub struct DdlConnection {
    tables: Option<Vec<TableInfo>>,
}

impl DdlConnection {
    fn tables(&self) -> Result<&[TableInfo]> {
        self.tables
            .as_deref()
            .ok_or_else(|| Error::Connection("connection already closed".into()))
    }
}

#[async_trait]
impl SchemaConnection for DdlConnection {
    async fn list_tables(&mut self) -> Result<Vec<TableInfo>> {
        Ok(self.tables()?.iter().map(without_columns).collect())
    }

    async fn find_table(&mut self, table_name: &str) -> Result<Option<TableInfo>> {
        Ok(self
            .tables()?
            .iter()
            .find(|t| t.name == table_name)
            .map(without_columns))
    }

    async fn list_columns(&mut self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        self.tables()?
            .iter()
            .find(|t| t.name == table_name)
            .map(|t| t.columns.clone())
            .ok_or_else(|| Error::Query(format!("unknown table `{}`", table_name)))
    }

    async fn close(&mut self) -> Result<()> {
        self.tables = None;
        Ok(())
    }
}

fn without_columns(table: &TableInfo) -> TableInfo {
    TableInfo::new(table.name.clone()).with_comment(table.comment.clone())
}
