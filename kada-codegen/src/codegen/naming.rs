//! Naming utilities for code generation

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use crate::config::defaults;

/// Strategy turning database identifiers into Java identifiers.
///
/// Swap in a custom implementation through
/// [`GeneratorBuilder::name_convertor`](crate::GeneratorBuilder::name_convertor)
/// to change naming rules without touching the rest of the pipeline.
pub trait NameConvertor: Send + Sync {
    /// Convert a table name to a class name (PascalCase)
    fn to_class_name(&self, table_name: &str) -> String;

    /// Convert a column name to a field name (camelCase)
    fn to_field_name(&self, column_name: &str) -> String;
}

/// Default naming: strip a known table prefix, then split on underscores
/// and case boundaries.
///
/// `t_user_account` -> `UserAccount`, `email_addr` -> `emailAddr`
#[derive(Debug, Clone)]
pub struct DefaultNameConvertor {
    table_prefixes: Vec<String>,
}

impl DefaultNameConvertor {
    pub fn new() -> Self {
        Self::with_prefixes(defaults::TABLE_PREFIXES.iter().copied())
    }

    /// Use a custom prefix list (an empty list disables stripping)
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    fn strip_prefix<'a>(&self, table_name: &'a str) -> &'a str {
        let lower = table_name.to_lowercase();
        for prefix in &self.table_prefixes {
            if !lower.starts_with(&prefix.to_lowercase()) {
                continue;
            }
            match table_name.get(prefix.len()..) {
                Some(rest) if !rest.is_empty() => return rest,
                _ => {}
            }
        }
        table_name
    }
}

impl Default for DefaultNameConvertor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameConvertor for DefaultNameConvertor {
    fn to_class_name(&self, table_name: &str) -> String {
        sanitize_identifier(&self.strip_prefix(table_name).to_upper_camel_case())
    }

    fn to_field_name(&self, column_name: &str) -> String {
        escape_field_name(&column_name.to_lower_camel_case())
    }
}

/// Uppercase the first character: `emailAddr` -> `EmailAddr`
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character: `AsHoneypot` -> `asHoneypot`
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop characters Java does not allow and avoid a leading digit.
///
/// A name with nothing usable left becomes `_unnamed`.
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();

    match cleaned.chars().next() {
        None => "_unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", cleaned),
        Some(_) => cleaned,
    }
}

/// Check if a name is a Java reserved word or literal
pub fn is_java_keyword(name: &str) -> bool {
    matches!(
        name,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
            | "var"
            | "record"
            | "yield"
            | "_"
    )
}

/// Sanitize a field name and suffix it with `_` if it's a Java keyword
pub fn escape_field_name(name: &str) -> String {
    let name = sanitize_identifier(name);
    if is_java_keyword(&name) {
        format!("{}_", name)
    } else {
        name
    }
}
