//! Generation orchestrator: scan, assemble, render and write per table

use std::path::PathBuf;

use kada_db::{ConnectionProvider, SchemaConnection, TableInfo};
use tracing::{debug, error, info, warn};

use crate::charset::Charset;
use crate::codegen::{
    assemble, DefaultNameConvertor, MappingFile, MappingFileBuilder, NameConvertor,
};
use crate::config::defaults;
use crate::error::{CodegenError, Result};
use crate::filter::TableNameFilter;
use crate::mapping::ClassInfo;
use crate::writer;

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written (or, in dry-run mode, the files that would be written)
    pub written: Vec<PathBuf>,
    /// Tables that failed, in processing order
    pub failures: Vec<TableFailure>,
    /// Tables rejected by the table filter
    pub filtered: usize,
}

/// A table that could not be generated
#[derive(Debug)]
pub struct TableFailure {
    pub table: String,
    pub error: CodegenError,
}

impl GenerationReport {
    /// No table failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Nothing was generated
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Drives one database through one file builder.
///
/// Tables are processed one at a time over a single connection. Failures
/// while assembling, rendering or writing a table are recorded and the run
/// moves on; connection and scan failures end the run.
pub struct Generator {
    provider: Box<dyn ConnectionProvider>,
    file_builder: Box<dyn MappingFileBuilder>,
    naming: Box<dyn NameConvertor>,
    filter: Option<Box<dyn TableNameFilter>>,
    charset: Charset,
    package_name: String,
    root_path: PathBuf,
    dry_run: bool,
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    pub fn root_path(&self) -> &std::path::Path {
        &self.root_path
    }

    /// Generate every table accepted by the filter
    pub async fn generate_all(&self) -> Result<GenerationReport> {
        info!(
            "Generating {} mappings into {}",
            self.package_name,
            self.root_path.display()
        );
        let outcome = match self.provider.connect().await {
            Ok(mut conn) => {
                let outcome = self.run_all(conn.as_mut()).await;
                close_connection(conn.as_mut()).await;
                outcome
            }
            Err(err) => Err(err.into()),
        };

        let report = outcome.map_err(|err| {
            error!("Generation aborted: {}", err);
            err
        })?;
        log_summary(&report);
        Ok(report)
    }

    /// Generate one named table; the table filter does not apply
    pub async fn generate_table(&self, table_name: &str) -> Result<GenerationReport> {
        info!("Generating table {}", table_name);
        let outcome = match self.provider.connect().await {
            Ok(mut conn) => {
                let outcome = self.run_one(conn.as_mut(), table_name).await;
                close_connection(conn.as_mut()).await;
                outcome
            }
            Err(err) => Err(err.into()),
        };

        let report = outcome.map_err(|err| {
            error!(table = %table_name, "Generation of {} aborted: {}", table_name, err);
            err
        })?;
        log_summary(&report);
        Ok(report)
    }

    async fn run_all(&self, conn: &mut dyn SchemaConnection) -> Result<GenerationReport> {
        let tables = conn.list_tables().await?;
        info!("Found {} tables", tables.len());

        let mut report = GenerationReport::default();
        let mut accepted = Vec::with_capacity(tables.len());
        for table in tables {
            if self.accepts(&table.name) {
                accepted.push(table);
            } else {
                debug!("Skipping filtered table {}", table.name);
                report.filtered += 1;
            }
        }

        if accepted.is_empty() {
            warn!("No tables left to generate");
        }

        for table in accepted {
            self.process_table(conn, table, &mut report).await?;
        }
        Ok(report)
    }

    async fn run_one(
        &self,
        conn: &mut dyn SchemaConnection,
        table_name: &str,
    ) -> Result<GenerationReport> {
        let table = conn.find_table(table_name).await?.ok_or_else(|| {
            CodegenError::ScanError(kada_db::Error::Query(format!(
                "Table not found: {}",
                table_name
            )))
        })?;

        let mut report = GenerationReport::default();
        self.process_table(conn, table, &mut report).await?;
        Ok(report)
    }

    fn accepts(&self, table_name: &str) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.accept(table_name))
    }

    /// Scan errors propagate; everything after the scan is recorded in `report`
    async fn process_table(
        &self,
        conn: &mut dyn SchemaConnection,
        table: TableInfo,
        report: &mut GenerationReport,
    ) -> Result<()> {
        debug!("Scanning columns of {}", table.name);
        let columns = conn.list_columns(&table.name).await.map_err(|err| {
            error!(table = %table.name, "Failed to scan columns of {}: {}", table.name, err);
            err
        })?;
        let table_name = table.name.clone();

        match self
            .render_table(table.with_columns(columns))
            .and_then(|file| self.emit(&file))
        {
            Ok(path) => report.written.push(path),
            Err(err) => {
                error!(table = %table_name, "Failed to generate {}: {}", table_name, err);
                report.failures.push(TableFailure {
                    table: table_name,
                    error: err,
                });
            }
        }
        Ok(())
    }

    fn render_table(&self, table: TableInfo) -> Result<MappingFile> {
        let class_name = self.naming.to_class_name(&table.name);
        let shell = ClassInfo::new(self.package_name.as_str(), class_name)
            .with_comment(table.comment.clone());
        let mapping = assemble(table, shell, self.naming.as_ref(), self.charset)?;
        self.file_builder.build(&mapping)
    }

    fn emit(&self, file: &MappingFile) -> Result<PathBuf> {
        if self.dry_run {
            file.encode()?;
            let path = writer::target_path(&self.root_path, file);
            info!("Would write {}", path.display());
            Ok(path)
        } else {
            writer::write_mapping_file(&self.root_path, file)
        }
    }
}

async fn close_connection(conn: &mut dyn SchemaConnection) {
    if let Err(err) = conn.close().await {
        warn!("Failed to close connection: {}", err);
    }
}

fn log_summary(report: &GenerationReport) {
    info!(
        "Generated {} files ({} failed, {} filtered)",
        report.written.len(),
        report.failures.len(),
        report.filtered
    );
    if report.is_empty() {
        warn!("Nothing was generated");
    }
}

/// Builder for [`Generator`]
#[derive(Default)]
pub struct GeneratorBuilder {
    provider: Option<Box<dyn ConnectionProvider>>,
    file_builder: Option<Box<dyn MappingFileBuilder>>,
    naming: Option<Box<dyn NameConvertor>>,
    filter: Option<Box<dyn TableNameFilter>>,
    charset: Charset,
    package_name: Option<String>,
    root_path: Option<PathBuf>,
    dry_run: bool,
}

impl GeneratorBuilder {
    /// Schema source (required)
    pub fn connection_provider(mut self, provider: impl ConnectionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Output format (required)
    pub fn file_builder(mut self, builder: impl MappingFileBuilder + 'static) -> Self {
        self.file_builder = Some(Box::new(builder));
        self
    }

    /// Naming strategy, [`DefaultNameConvertor`] if unset
    pub fn name_convertor(mut self, naming: impl NameConvertor + 'static) -> Self {
        self.naming = Some(Box::new(naming));
        self
    }

    /// Only tables this filter accepts are scanned and generated
    pub fn table_filter(mut self, filter: impl TableNameFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Output root, the current directory if unset
    pub fn root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    /// Render everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Result<Generator> {
        let provider = self.provider.ok_or_else(|| {
            CodegenError::ConfigError("a connection provider is required".into())
        })?;
        let file_builder = self
            .file_builder
            .ok_or_else(|| CodegenError::ConfigError("a file builder is required".into()))?;
        let root_path = match self.root_path {
            Some(path) => path,
            None => std::env::current_dir()?,
        };

        Ok(Generator {
            provider,
            file_builder,
            naming: self
                .naming
                .unwrap_or_else(|| Box::new(DefaultNameConvertor::new())),
            filter: self.filter,
            charset: self.charset,
            package_name: self
                .package_name
                .unwrap_or_else(|| defaults::PACKAGE_NAME.to_string()),
            root_path,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::JavaFileBuilder;
    use crate::mapping::Mapping;
    use async_trait::async_trait;
    use kada_db::ColumnInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory schema that records which tables had their columns scanned
    #[derive(Clone, Default)]
    struct RecordingProvider {
        tables: Vec<TableInfo>,
        scanned: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicUsize>,
        refuse_connect: bool,
        fail_scan_of: Option<&'static str>,
    }

    struct RecordingConnection {
        provider: RecordingProvider,
    }

    impl RecordingProvider {
        fn new(tables: Vec<TableInfo>) -> Self {
            Self {
                tables,
                ..Default::default()
            }
        }

        fn scanned(&self) -> Vec<String> {
            self.scanned.lock().unwrap().clone()
        }

        fn close_count(&self) -> usize {
            self.closed.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConnectionProvider for RecordingProvider {
        async fn connect(&self) -> kada_db::Result<Box<dyn SchemaConnection>> {
            if self.refuse_connect {
                return Err(kada_db::Error::Connection("connection refused".into()));
            }
            Ok(Box::new(RecordingConnection {
                provider: self.clone(),
            }))
        }
    }

    #[async_trait]
    impl SchemaConnection for RecordingConnection {
        async fn list_tables(&mut self) -> kada_db::Result<Vec<TableInfo>> {
            Ok(self
                .provider
                .tables
                .iter()
                .map(|t| TableInfo::new(t.name.as_str()).with_comment(t.comment.clone()))
                .collect())
        }

        async fn find_table(&mut self, table_name: &str) -> kada_db::Result<Option<TableInfo>> {
            Ok(self
                .list_tables()
                .await?
                .into_iter()
                .find(|t| t.name == table_name))
        }

        async fn list_columns(&mut self, table_name: &str) -> kada_db::Result<Vec<ColumnInfo>> {
            self.provider
                .scanned
                .lock()
                .unwrap()
                .push(table_name.to_string());
            if self.provider.fail_scan_of == Some(table_name) {
                return Err(kada_db::Error::Query("lost connection".into()));
            }
            Ok(self
                .provider
                .tables
                .iter()
                .find(|t| t.name == table_name)
                .map(|t| t.columns.clone())
                .unwrap_or_default())
        }

        async fn close(&mut self) -> kada_db::Result<()> {
            self.provider.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Java output that fails for one table
    struct FailingBuilder {
        fail_on: &'static str,
    }

    impl MappingFileBuilder for FailingBuilder {
        fn render(&self, mapping: &Mapping) -> Result<String> {
            if mapping.table_info.name == self.fail_on {
                return Err(CodegenError::RenderError("template exploded".into()));
            }
            JavaFileBuilder::new().render(mapping)
        }

        fn file_name(&self, class_name: &str) -> String {
            JavaFileBuilder::new().file_name(class_name)
        }
    }

    fn simple_table(name: &str) -> TableInfo {
        TableInfo::new(name).with_columns(vec![
            ColumnInfo::new("id", "bigint").primary_key(),
            ColumnInfo::new("user_name", "varchar(64)"),
        ])
    }

    fn builder_for(provider: RecordingProvider, root: &std::path::Path) -> GeneratorBuilder {
        Generator::builder()
            .connection_provider(provider)
            .file_builder(JavaFileBuilder::new())
            .root_path(root)
    }

    #[tokio::test]
    async fn test_generate_all_writes_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let provider = RecordingProvider::new(vec![simple_table("users"), simple_table("orders")]);
        let report = builder_for(provider.clone(), dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.written.len(), 2);
        assert!(dir.path().join("com/qchery/Users.java").exists());
        assert!(dir.path().join("com/qchery/Orders.java").exists());
        assert_eq!(provider.close_count(), 1);
    }

    #[tokio::test]
    async fn test_filtered_table_is_never_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let provider =
            RecordingProvider::new(vec![simple_table("audit_log"), simple_table("users")]);
        let report = builder_for(provider.clone(), dir.path())
            .table_filter(|name: &str| name != "audit_log")
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert_eq!(provider.scanned(), vec!["users".to_string()]);
        assert_eq!(report.filtered, 1);
        assert_eq!(report.written.len(), 1);
        assert!(!dir.path().join("com/qchery/AuditLog.java").exists());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_render_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let provider = RecordingProvider::new(vec![
            simple_table("a"),
            simple_table("b"),
            simple_table("c"),
        ]);
        let report = Generator::builder()
            .connection_provider(provider.clone())
            .file_builder(FailingBuilder { fail_on: "b" })
            .root_path(dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert!(dir.path().join("com/qchery/A.java").exists());
        assert!(!dir.path().join("com/qchery/B.java").exists());
        assert!(dir.path().join("com/qchery/C.java").exists());

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, "b");
        assert!(matches!(
            report.failures[0].error,
            CodegenError::RenderError(_)
        ));
        assert!(logs_contain("Failed to generate b"));
        assert!(!logs_contain("Failed to generate a"));
        assert!(!logs_contain("Failed to generate c"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_write_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where B.java should go makes the write fail
        std::fs::create_dir_all(dir.path().join("com/qchery/B.java")).unwrap();
        let provider = RecordingProvider::new(vec![
            simple_table("a"),
            simple_table("b"),
            simple_table("c"),
        ]);
        let report = builder_for(provider.clone(), dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                dir.path().join("com/qchery/A.java"),
                dir.path().join("com/qchery/C.java"),
            ]
        );
        assert!(dir.path().join("com/qchery/A.java").is_file());
        assert!(dir.path().join("com/qchery/C.java").is_file());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, "b");
        match &report.failures[0].error {
            CodegenError::WriteError { path, .. } => {
                assert_eq!(path, &dir.path().join("com/qchery/B.java"))
            }
            other => panic!("expected a write error, got {:?}", other),
        }
        assert!(logs_contain("Failed to generate b"));
        assert!(!logs_contain("Failed to generate a"));
        assert!(!logs_contain("Failed to generate c"));
        assert_eq!(provider.close_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_skips_table() {
        let dir = tempfile::tempdir().unwrap();
        let shapes = TableInfo::new("shapes").with_columns(vec![
            ColumnInfo::new("id", "int").primary_key(),
            ColumnInfo::new("outline", "geometry"),
        ]);
        let provider = RecordingProvider::new(vec![shapes, simple_table("users")]);
        let report = builder_for(provider, dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            CodegenError::TypeResolutionError(_)
        ));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_scan_failure_ends_run_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = RecordingProvider::new(vec![simple_table("a"), simple_table("b")]);
        provider.fail_scan_of = Some("a");
        let result = builder_for(provider.clone(), dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await;

        assert!(matches!(result, Err(CodegenError::ScanError(_))));
        assert_eq!(provider.scanned(), vec!["a".to_string()]);
        assert_eq!(provider.close_count(), 1);
        assert!(logs_contain("Failed to scan columns of a"));
        assert!(logs_contain("Generation aborted"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_connection_failure_generates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = RecordingProvider::new(vec![simple_table("a")]);
        provider.refuse_connect = true;
        let result = builder_for(provider.clone(), dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await;

        assert!(matches!(result, Err(CodegenError::ScanError(_))));
        assert!(provider.scanned().is_empty());
        assert!(!dir.path().join("com").exists());
        assert!(logs_contain("Generation aborted"));
        assert!(logs_contain("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_schema_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        let report = builder_for(RecordingProvider::new(vec![]), dir.path())
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();
        assert!(report.is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_generate_table() {
        let dir = tempfile::tempdir().unwrap();
        let provider = RecordingProvider::new(vec![simple_table("users"), simple_table("orders")]);
        let generator = builder_for(provider.clone(), dir.path()).build().unwrap();

        let report = generator.generate_table("orders").await.unwrap();
        assert_eq!(report.written, vec![dir.path().join("com/qchery/Orders.java")]);
        assert_eq!(provider.scanned(), vec!["orders".to_string()]);

        let missing = generator.generate_table("missing").await;
        assert!(matches!(missing, Err(CodegenError::ScanError(_))));
        assert!(logs_contain("Generation of missing aborted"));
        assert_eq!(provider.close_count(), 2);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = builder_for(RecordingProvider::new(vec![simple_table("users")]), dir.path())
            .dry_run(true)
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        assert_eq!(report.written, vec![dir.path().join("com/qchery/Users.java")]);
        assert!(!dir.path().join("com").exists());
    }

    #[tokio::test]
    async fn test_package_and_charset_flow_through() {
        let dir = tempfile::tempdir().unwrap();
        let table = TableInfo::new("users")
            .with_comment(Some("Utilisateurs inscrits \u{2013} actifs".into()))
            .with_columns(vec![ColumnInfo::new("id", "int").primary_key()]);
        let report = builder_for(RecordingProvider::new(vec![table]), dir.path())
            .package_name("org.example.model")
            .charset(Charset::Latin1)
            .build()
            .unwrap()
            .generate_all()
            .await
            .unwrap();

        let path = dir.path().join("org/example/model/Users.java");
        assert_eq!(report.written, vec![path.clone()]);
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("package org.example.model;"));
        assert!(content.contains("\\u2013"));
    }

    #[test]
    fn test_builder_requires_provider_and_file_builder() {
        let missing_provider = Generator::builder().file_builder(JavaFileBuilder::new()).build();
        assert!(matches!(missing_provider, Err(CodegenError::ConfigError(_))));

        let missing_builder = Generator::builder()
            .connection_provider(RecordingProvider::default())
            .build();
        assert!(matches!(missing_builder, Err(CodegenError::ConfigError(_))));
    }
}
