//! CREATE TABLE parsing using sqlparser-rs

use sqlparser::ast::{
    ColumnOption, CommentDef, CreateTableOptions, Expr, Ident, IndexColumn, ObjectName,
    PrimaryKeyConstraint, SqlOption, Statement, TableConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::error::Result;
use crate::schema::{ColumnInfo, TableInfo};

/// Parse a SQL schema script into fully populated table descriptors.
///
/// Statements other than `CREATE TABLE` are ignored.
pub fn parse_schema(sql: &str) -> Result<Vec<TableInfo>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            tables.push(extract_table(&create_table));
        }
    }

    Ok(tables)
}

/// Extract a table descriptor from a CREATE TABLE statement
fn extract_table(create: &sqlparser::ast::CreateTable) -> TableInfo {
    let mut columns: Vec<ColumnInfo> = create.columns.iter().map(extract_column).collect();

    // Table-level PRIMARY KEY (a, b)
    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            for pk_col in pk_cols {
                let col_name = extract_ident_from_index_column(pk_col);
                if let Some(col) = columns.iter_mut().find(|c| c.name == col_name) {
                    col.primary_key = true;
                    col.nullable = false;
                }
            }
        }
    }

    TableInfo::new(extract_table_name(&create.name))
        .with_comment(extract_table_comment(&create.table_options))
        .with_columns(columns)
}

/// `COMMENT = '...'` (or `COMMENT '...'`) among the table options
fn extract_table_comment(options: &CreateTableOptions) -> Option<String> {
    let options = match options {
        CreateTableOptions::Plain(options)
        | CreateTableOptions::Options(options)
        | CreateTableOptions::With(options) => options,
        _ => return None,
    };

    options.iter().find_map(|option| match option {
        SqlOption::Comment(CommentDef::WithEq(comment))
        | SqlOption::Comment(CommentDef::WithoutEq(comment)) => Some(comment.clone()),
        _ => None,
    })
}

/// Extract a column descriptor from a column definition
fn extract_column(col_def: &sqlparser::ast::ColumnDef) -> ColumnInfo {
    let mut column = ColumnInfo::new(
        extract_ident(&col_def.name),
        format!("{}", col_def.data_type).to_lowercase(),
    );

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                column.nullable = false;
            }
            ColumnOption::Null => {
                column.nullable = true;
            }
            ColumnOption::PrimaryKey(_) => {
                column.primary_key = true;
                column.nullable = false;
            }
            ColumnOption::Comment(c) => {
                column = column.with_comment(Some(c.clone()));
            }
            _ => {}
        }
    }

    column
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a string from an Ident, removing backticks if present
fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
