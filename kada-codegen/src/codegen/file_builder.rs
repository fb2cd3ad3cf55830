//! File builder trait and the rendered file it produces

use std::path::PathBuf;

use crate::charset::Charset;
use crate::error::Result;
use crate::mapping::Mapping;

/// Renders one output format from a [`Mapping`].
pub trait MappingFileBuilder: Send + Sync {
    /// Render the complete file content
    fn render(&self, mapping: &Mapping) -> Result<String>;

    /// File name for a class, e.g. `Foo.java` or `FooDao.xml`
    fn file_name(&self, class_name: &str) -> String;

    /// Render and package the result. Content is either complete or an error.
    fn build(&self, mapping: &Mapping) -> Result<MappingFile> {
        let content = self.render(mapping)?;
        Ok(MappingFile {
            package_name: mapping.class_info.package_name.clone(),
            file_name: self.file_name(&mapping.class_info.class_name),
            content,
            charset: mapping.charset,
        })
    }
}

/// A rendered file, not yet written
#[derive(Debug, Clone, PartialEq)]
pub struct MappingFile {
    pub package_name: String,
    pub file_name: String,
    pub content: String,
    pub charset: Charset,
}

impl MappingFile {
    /// Path below the output root: package directories plus file name
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package_name
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(&self.file_name);
        path
    }

    /// Content as bytes in the declared charset
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.charset.encode(&self.content)
    }
}
