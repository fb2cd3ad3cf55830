//! Code-side descriptors and the assembled table-to-class mapping

use kada_db::{ColumnInfo, TableInfo};

use crate::charset::Charset;
use crate::codegen::JavaType;

/// Target class derived from one table
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub package_name: String,
    pub class_name: String,
    pub comment: Option<String>,
    pub fields: Vec<FieldInfo>,
}

/// Target field derived from one column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub java_type: JavaType,
    pub comment: Option<String>,
}

/// One field-to-column pairing
#[derive(Debug, Clone, PartialEq)]
pub struct MappingItem {
    pub field: FieldInfo,
    pub column: ColumnInfo,
}

/// Everything a file builder needs to render one table
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub class_info: ClassInfo,
    pub table_info: TableInfo,
    pub items: Vec<MappingItem>,
    pub charset: Charset,
}

impl ClassInfo {
    /// Create an empty class shell
    pub fn new(package_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            class_name: class_name.into(),
            comment: None,
            fields: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// `package.ClassName`, or just the class name in the default package
    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.package_name, self.class_name)
        }
    }
}

impl MappingItem {
    pub fn is_primary_key(&self) -> bool {
        self.column.primary_key
    }
}

impl Mapping {
    /// Items whose column belongs to the primary key, in column order
    pub fn primary_key_items(&self) -> impl Iterator<Item = &MappingItem> {
        self.items.iter().filter(|item| item.is_primary_key())
    }

    /// Items outside the primary key, in column order
    pub fn regular_items(&self) -> impl Iterator<Item = &MappingItem> {
        self.items.iter().filter(|item| !item.is_primary_key())
    }

    pub fn has_composite_key(&self) -> bool {
        self.primary_key_items().count() > 1
    }
}
