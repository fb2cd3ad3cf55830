//! Plain Java class builder - one POJO per table

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::error::Result;
use crate::mapping::Mapping;

use super::file_builder::MappingFileBuilder;
use super::naming::upper_first;
use super::type_map::JavaType;

/// Renders `Foo.java`: package, imports, private fields and accessors
#[derive(Debug, Clone, Default)]
pub struct JavaFileBuilder;

impl JavaFileBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl MappingFileBuilder for JavaFileBuilder {
    fn render(&self, mapping: &Mapping) -> Result<String> {
        let class = &mapping.class_info;
        let mut code = String::new();

        if !class.package_name.is_empty() {
            code.push_str(&format!("package {};\n\n", class.package_name));
        }

        // A field type named like the class itself is written fully qualified
        let type_of = |java_type: JavaType| {
            if java_type.simple_name() == class.class_name {
                java_type.qualified_name()
            } else {
                java_type.simple_name()
            }
        };

        let imports: BTreeSet<&str> = class
            .fields
            .iter()
            .filter(|f| f.java_type.simple_name() != class.class_name)
            .filter_map(|f| f.java_type.import())
            .collect();
        if !imports.is_empty() {
            for import in &imports {
                code.push_str(&format!("import {};\n", import));
            }
            code.push('\n');
        }

        let class_doc = class
            .comment
            .clone()
            .unwrap_or_else(|| format!("Table: {}", mapping.table_info.name));
        push_javadoc(&mut code, "", &class_doc);
        code.push_str(&format!("public class {} {{\n", class.class_name));

        for field in &class.fields {
            code.push('\n');
            if let Some(comment) = &field.comment {
                push_javadoc(&mut code, "    ", comment);
            }
            code.push_str(&format!(
                "    private {} {};\n",
                type_of(field.java_type),
                field.name
            ));
        }

        for field in &class.fields {
            let type_name = type_of(field.java_type);
            let accessor = upper_first(&field.name);

            code.push('\n');
            code.push_str(&format!("    public {} get{}() {{\n", type_name, accessor));
            code.push_str(&format!("        return {};\n", field.name));
            code.push_str("    }\n\n");
            code.push_str(&format!(
                "    public void set{}({} {}) {{\n",
                accessor, type_name, field.name
            ));
            code.push_str(&format!("        this.{} = {};\n", field.name, field.name));
            code.push_str("    }\n");
        }

        code.push_str("}\n");

        Ok(mapping
            .charset
            .escape_unmappable(&code, |c, out| {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            })
            .into_owned())
    }

    fn file_name(&self, class_name: &str) -> String {
        format!("{}.java", class_name)
    }
}

/// Write a Javadoc block, one ` * ` line per comment line
fn push_javadoc(code: &mut String, indent: &str, comment: &str) {
    code.push_str(&format!("{}/**\n", indent));
    for line in comment.lines() {
        let line = line.trim_end().replace("*/", "*&#47;");
        if line.is_empty() {
            code.push_str(&format!("{} *\n", indent));
        } else {
            code.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    code.push_str(&format!("{} */\n", indent));
}
