//! kada-codegen: Generate Java classes and ORM mappings from a database schema
//!
//! Each table of a scanned schema becomes one file in the selected format:
//!
//! - a Java POJO (`Foo.java`) with private fields and accessors
//! - a MyBatis mapper (`FooDao.xml`) with the full result map
//! - a Hibernate mapping (`Foo.hbm.xml`), including composite keys
//!
//! # Library usage
//!
//! ```rust,ignore
//! use kada_codegen::{Generator, MybatisFileBuilder, PatternFilter};
//! use kada_db::MySqlProvider;
//!
//! async fn run() -> kada_codegen::Result<()> {
//!     let report = Generator::builder()
//!         .connection_provider(MySqlProvider::new("mysql://root@localhost/shop")?)
//!         .file_builder(MybatisFileBuilder::new())
//!         .table_filter(PatternFilter::new("*", "audit_log"))
//!         .package_name("org.shop.model")
//!         .root_path("src/main/resources")
//!         .build()?
//!         .generate_all()
//!         .await?;
//!
//!     for failure in &report.failures {
//!         eprintln!("{}: {}", failure.table, failure.error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration-driven usage
//!
//! ```rust,ignore
//! let config = kada_codegen::KadaConfig::default_with_schema("schema.sql");
//! config.validate()?;
//! let report = kada_codegen::generate(&config).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! kada --database-url mysql://root@localhost/shop --format hibernate --output out generate
//! ```

pub mod charset;
pub mod codegen;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod mapping;
pub mod writer;

use kada_db::{ConnectionProvider, DdlProvider, MySqlProvider};
use tracing::info;

pub use charset::Charset;
pub use codegen::{
    assemble, DefaultNameConvertor, HibernateFileBuilder, JavaFileBuilder, JavaType, MappingFile,
    MappingFileBuilder, MybatisFileBuilder, NameConvertor, TypeMap,
};
pub use config::{KadaConfig, OutputFormat};
pub use error::{CodegenError, Result};
pub use filter::{PatternFilter, TableNameFilter};
pub use generator::{GenerationReport, Generator, GeneratorBuilder, TableFailure};
pub use mapping::{ClassInfo, FieldInfo, Mapping, MappingItem};

/// Main entry point: generate every table described by `config`
pub async fn generate(config: &KadaConfig) -> Result<GenerationReport> {
    info!(
        "Generating {} files for package {}",
        config.format, config.package_name
    );
    generator_from_config(config)?.generate_all().await
}

/// Generate a single table described by `config`
pub async fn generate_table(config: &KadaConfig, table_name: &str) -> Result<GenerationReport> {
    generator_from_config(config)?
        .generate_table(table_name)
        .await
}

/// Build a [`Generator`] wired to the source, format and options of `config`
pub fn generator_from_config(config: &KadaConfig) -> Result<Generator> {
    let builder = Generator::builder()
        .name_convertor(DefaultNameConvertor::with_prefixes(
            config.table_prefixes.iter().cloned(),
        ))
        .table_filter(PatternFilter::new(
            &config.include_tables,
            &config.exclude_tables,
        ))
        .charset(config.charset()?)
        .package_name(config.package_name.as_str())
        .root_path(config.output_dir.as_path())
        .dry_run(config.dry_run);

    let builder = builder.connection_provider(connection_provider(config)?);

    let builder = match config.format {
        OutputFormat::Java => builder.file_builder(JavaFileBuilder::new()),
        OutputFormat::Mybatis => {
            builder.file_builder(MybatisFileBuilder::new().with_insert(config.mybatis_insert))
        }
        OutputFormat::Hibernate => builder.file_builder(HibernateFileBuilder::new()),
    };

    builder.build()
}

/// Schema source selected by `config`: a live database or a DDL file
pub fn connection_provider(config: &KadaConfig) -> Result<Box<dyn ConnectionProvider>> {
    match (&config.database_url, &config.schema_file) {
        (Some(url), None) => Ok(Box::new(MySqlProvider::new(url)?)),
        (None, Some(schema_file)) => Ok(Box::new(DdlProvider::from_file(schema_file))),
        _ => Err(CodegenError::ConfigError(
            "exactly one of database_url and schema_file must be set".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"
        CREATE TABLE t_user_account (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            user_name VARCHAR(64) NOT NULL COMMENT 'login name',
            created_at DATETIME
        );
        CREATE TABLE audit_log (
            id BIGINT PRIMARY KEY,
            message TEXT
        );
    "#;

    fn schema_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_generate_from_config() {
        let schema = schema_file();
        let out = tempfile::tempdir().unwrap();
        let mut config = KadaConfig::default_with_schema(schema.path());
        config.output_dir = out.path().to_path_buf();
        config.exclude_tables = "audit_log".into();
        config.format = OutputFormat::Mybatis;

        let report = generate(&config).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.filtered, 1);
        assert_eq!(
            report.written,
            vec![out.path().join("com/qchery/UserAccountDao.xml")]
        );
    }

    #[tokio::test]
    async fn test_generate_table_from_config() {
        let schema = schema_file();
        let out = tempfile::tempdir().unwrap();
        let mut config = KadaConfig::default_with_schema(schema.path());
        config.output_dir = out.path().to_path_buf();
        config.format = OutputFormat::Hibernate;

        let report = generate_table(&config, "audit_log").await.unwrap();
        assert_eq!(
            report.written,
            vec![out.path().join("com/qchery/AuditLog.hbm.xml")]
        );
    }

    #[test]
    fn test_generator_from_config_needs_one_source() {
        let config = KadaConfig::default();
        assert!(matches!(
            generator_from_config(&config),
            Err(CodegenError::ConfigError(_))
        ));
    }

    #[test]
    fn test_bad_database_url_is_scan_error() {
        let config = KadaConfig::default_with_database("mysql://localhost");
        assert!(matches!(
            generator_from_config(&config),
            Err(CodegenError::ScanError(_))
        ));
    }
}
