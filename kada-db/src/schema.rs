//! Metadata descriptors produced by a schema scan

use serde::{Deserialize, Serialize};

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,

    /// Table comment (if any)
    pub comment: Option<String>,

    /// Columns in declaration order
    pub columns: Vec<ColumnInfo>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,

    /// Column type as reported by the source (e.g., "varchar(255)", "int unsigned")
    pub db_type: String,

    /// Whether the column is nullable
    pub nullable: bool,

    /// Whether the column is part of the primary key
    pub primary_key: bool,

    /// Column comment (if any)
    pub comment: Option<String>,
}

impl TableInfo {
    /// Create a table descriptor without columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            columns: Vec::new(),
        }
    }

    /// Attach a comment, treating blank text as no comment
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = non_blank(comment);
        self
    }

    /// Populate the columns of this table
    pub fn with_columns(mut self, columns: Vec<ColumnInfo>) -> Self {
        self.columns = columns;
        self
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns in declaration order
    pub fn primary_key_columns(&self) -> Vec<&ColumnInfo> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Check if the primary key spans more than one column
    pub fn has_composite_key(&self) -> bool {
        self.columns.iter().filter(|c| c.primary_key).count() > 1
    }
}

impl ColumnInfo {
    /// Create a nullable, non-key column
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
            nullable: true,
            primary_key: false,
            comment: None,
        }
    }

    /// Mark this column as (part of) the primary key; key columns are never nullable
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Mark this column as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Attach a comment, treating blank text as no comment
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = non_blank(comment);
        self
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
