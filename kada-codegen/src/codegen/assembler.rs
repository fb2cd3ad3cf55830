//! Mapping assembler - joins a table's columns with the fields of its class

use std::collections::HashSet;

use kada_db::TableInfo;
use tracing::warn;

use crate::charset::Charset;
use crate::error::{CodegenError, Result};
use crate::mapping::{ClassInfo, FieldInfo, Mapping, MappingItem};

use super::naming::NameConvertor;
use super::type_map::TypeMap;

/// Assemble the mapping for one table.
///
/// `shell` carries the class name, package and comment; its fields are
/// filled in here, one per column and in column order. Pure: no I/O.
pub fn assemble(
    table: TableInfo,
    shell: ClassInfo,
    naming: &dyn NameConvertor,
    charset: Charset,
) -> Result<Mapping> {
    let table = dedup_columns(table);
    let mut class_info = shell;
    class_info.fields.clear();

    let mut items = Vec::with_capacity(table.columns.len());
    let mut used_names: HashSet<String> = HashSet::new();

    for column in &table.columns {
        let java_type = TypeMap::resolve(&column.db_type).map_err(|_| {
            CodegenError::TypeResolutionError(format!(
                "`{}` for column {}.{}",
                column.db_type, table.name, column.name
            ))
        })?;

        let name = naming.to_field_name(&column.name);

        // Two columns converging on one identifier get numbered
        let final_name = if used_names.contains(&name) {
            let mut counter = 2;
            let renamed = loop {
                let candidate = format!("{}{}", name, counter);
                if !used_names.contains(&candidate) {
                    break candidate;
                }
                counter += 1;
            };
            warn!(
                "Field name {} for column {}.{} already taken, using {}",
                name, table.name, column.name, renamed
            );
            renamed
        } else {
            name
        };
        used_names.insert(final_name.clone());

        let field = FieldInfo {
            name: final_name,
            java_type,
            comment: column.comment.clone(),
        };
        class_info.fields.push(field.clone());
        items.push(MappingItem {
            field,
            column: column.clone(),
        });
    }

    Ok(Mapping {
        class_info,
        table_info: table,
        items,
        charset,
    })
}

/// Keep the first occurrence of each column name
fn dedup_columns(table: TableInfo) -> TableInfo {
    let TableInfo {
        name,
        comment,
        columns,
    } = table;

    let mut seen: HashSet<String> = HashSet::new();
    let columns = columns
        .into_iter()
        .filter(|column| {
            let first = seen.insert(column.name.clone());
            if !first {
                warn!("Duplicate column {}.{} ignored", name, column.name);
            }
            first
        })
        .collect();

    TableInfo {
        name,
        comment,
        columns,
    }
}
