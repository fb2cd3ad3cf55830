//! Default configuration values - single source of truth

/// Default output format
pub const FORMAT: &str = "java";

/// Default Java package for generated files
pub const PACKAGE_NAME: &str = "com.qchery";

/// Default root directory for generated files (package directories go below it)
pub const OUTPUT_DIR: &str = ".";

/// Default output character encoding
pub const CHARSET: &str = "UTF-8";

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Table name prefixes stripped before deriving class names
pub const TABLE_PREFIXES: &[&str] = &["t_", "tb_"];

/// Whether MyBatis mappers get an insert statement by default
pub const MYBATIS_INSERT: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
