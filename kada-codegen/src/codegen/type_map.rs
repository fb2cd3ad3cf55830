//! Database column type to Java type mapping

use crate::error::{CodegenError, Result};

/// Represents a Java type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    String,
    Bytes,
    Date,
}

impl JavaType {
    /// Name as written in source after imports
    pub fn simple_name(&self) -> &'static str {
        match self {
            JavaType::Boolean => "Boolean",
            JavaType::Byte => "Byte",
            JavaType::Short => "Short",
            JavaType::Integer => "Integer",
            JavaType::Long => "Long",
            JavaType::BigInteger => "BigInteger",
            JavaType::Float => "Float",
            JavaType::Double => "Double",
            JavaType::BigDecimal => "BigDecimal",
            JavaType::String => "String",
            JavaType::Bytes => "byte[]",
            JavaType::Date => "Date",
        }
    }

    /// Fully qualified name (used in Hibernate `type` attributes)
    pub fn qualified_name(&self) -> &'static str {
        match self {
            JavaType::Boolean => "java.lang.Boolean",
            JavaType::Byte => "java.lang.Byte",
            JavaType::Short => "java.lang.Short",
            JavaType::Integer => "java.lang.Integer",
            JavaType::Long => "java.lang.Long",
            JavaType::BigInteger => "java.math.BigInteger",
            JavaType::Float => "java.lang.Float",
            JavaType::Double => "java.lang.Double",
            JavaType::BigDecimal => "java.math.BigDecimal",
            JavaType::String => "java.lang.String",
            JavaType::Bytes => "byte[]",
            JavaType::Date => "java.util.Date",
        }
    }

    /// Import line target, if the type lives outside `java.lang`
    pub fn import(&self) -> Option<&'static str> {
        match self {
            JavaType::BigInteger | JavaType::BigDecimal | JavaType::Date => {
                Some(self.qualified_name())
            }
            _ => None,
        }
    }
}

/// Static lookup from database column types to Java types
pub struct TypeMap;

impl TypeMap {
    /// Resolve a column type such as `varchar(255)`, `INT UNSIGNED` or `tinyint(1)`.
    ///
    /// Types without a mapping are an error, never a silent default.
    pub fn resolve(db_type: &str) -> Result<JavaType> {
        let lower = db_type.trim().to_lowercase();
        let base = lower
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        let unsigned = lower.contains("unsigned");
        let width = Self::display_width(&lower);

        let java_type = match base {
            "bool" | "boolean" => JavaType::Boolean,
            "bit" if width.unwrap_or(1) == 1 => JavaType::Boolean,
            "bit" => JavaType::Bytes,
            // TINYINT(1) is typically used as boolean in MySQL
            "tinyint" if width == Some(1) => JavaType::Boolean,
            "tinyint" if unsigned => JavaType::Short,
            "tinyint" => JavaType::Byte,
            "smallint" if unsigned => JavaType::Integer,
            "smallint" | "year" => JavaType::Short,
            "mediumint" | "int" | "integer" if unsigned => JavaType::Long,
            "mediumint" | "int" | "integer" => JavaType::Integer,
            "bigint" if unsigned => JavaType::BigInteger,
            "bigint" => JavaType::Long,
            "float" | "real" => JavaType::Float,
            "double" => JavaType::Double,
            "decimal" | "numeric" | "dec" => JavaType::BigDecimal,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum"
            | "set" | "json" => JavaType::String,
            "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
                JavaType::Bytes
            }
            "date" | "datetime" | "timestamp" | "time" => JavaType::Date,
            _ => return Err(CodegenError::TypeResolutionError(db_type.to_string())),
        };

        Ok(java_type)
    }

    /// First number inside parentheses, e.g. `1` for `tinyint(1)`
    fn display_width(lower: &str) -> Option<u32> {
        let start = lower.find('(')? + 1;
        let rest = &lower[start..];
        let end = rest.find([',', ')'])?;
        rest[..end].trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(TypeMap::resolve("bigint").unwrap(), JavaType::Long);
        assert_eq!(TypeMap::resolve("BIGINT UNSIGNED").unwrap(), JavaType::BigInteger);
        assert_eq!(TypeMap::resolve("int(11)").unwrap(), JavaType::Integer);
        assert_eq!(TypeMap::resolve("int(10) unsigned").unwrap(), JavaType::Long);
        assert_eq!(TypeMap::resolve("smallint").unwrap(), JavaType::Short);
        assert_eq!(TypeMap::resolve("tinyint(4)").unwrap(), JavaType::Byte);
    }

    #[test]
    fn test_boolean_type() {
        assert_eq!(TypeMap::resolve("tinyint(1)").unwrap(), JavaType::Boolean);
        assert_eq!(TypeMap::resolve("BOOL").unwrap(), JavaType::Boolean);
        assert_eq!(TypeMap::resolve("bit(1)").unwrap(), JavaType::Boolean);
        assert_eq!(TypeMap::resolve("bit(8)").unwrap(), JavaType::Bytes);
    }

    #[test]
    fn test_string_types() {
        assert_eq!(TypeMap::resolve("VARCHAR(255)").unwrap(), JavaType::String);
        assert_eq!(TypeMap::resolve("longtext").unwrap(), JavaType::String);
        assert_eq!(
            TypeMap::resolve("enum('ACTIVE','INACTIVE')").unwrap(),
            JavaType::String
        );
    }

    #[test]
    fn test_decimal_and_float_types() {
        assert_eq!(TypeMap::resolve("decimal(10,2)").unwrap(), JavaType::BigDecimal);
        assert_eq!(TypeMap::resolve("double").unwrap(), JavaType::Double);
        assert_eq!(TypeMap::resolve("float").unwrap(), JavaType::Float);
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(TypeMap::resolve("TIMESTAMP").unwrap(), JavaType::Date);
        assert_eq!(TypeMap::resolve("datetime(3)").unwrap(), JavaType::Date);
        assert_eq!(TypeMap::resolve("date").unwrap(), JavaType::Date);
    }

    #[test]
    fn test_unmapped_type_fails() {
        let err = TypeMap::resolve("geometry").unwrap_err();
        assert!(matches!(err, CodegenError::TypeResolutionError(ref t) if t == "geometry"));
        assert!(TypeMap::resolve("").is_err());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(JavaType::Long.simple_name(), "Long");
        assert_eq!(JavaType::Long.qualified_name(), "java.lang.Long");
        assert_eq!(JavaType::Long.import(), None);
        assert_eq!(JavaType::Date.import(), Some("java.util.Date"));
        assert_eq!(JavaType::Bytes.simple_name(), "byte[]");
        assert_eq!(JavaType::Bytes.import(), None);
    }
}
