//! Hibernate mapping builder

use indexmap::IndexSet;
use tracing::warn;

use crate::error::Result;
use crate::mapping::{Mapping, MappingItem};

use super::file_builder::MappingFileBuilder;
use super::type_map::JavaType;
use super::xml::{XmlDocument, XmlElement};

const DOCTYPE: &str = r#"hibernate-mapping PUBLIC "-//Hibernate/Hibernate Mapping DTD 3.0//EN" "http://www.hibernate.org/dtd/hibernate-mapping-3.0.dtd""#;

/// One `name`/`column`/`type` triple of the mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Property<'a> {
    name: &'a str,
    column: &'a str,
    java_type: &'static str,
}

impl<'a> Property<'a> {
    fn from_item(item: &'a MappingItem) -> Self {
        Self {
            name: &item.field.name,
            column: &item.column.name,
            java_type: hibernate_type(item.field.java_type),
        }
    }

    fn element(&self, tag: &str) -> XmlElement {
        XmlElement::new(tag)
            .attr("name", self.name)
            .attr("column", self.column)
            .attr("type", self.java_type)
    }
}

/// Arrays have no class name Hibernate can load
fn hibernate_type(java_type: JavaType) -> &'static str {
    match java_type {
        JavaType::Bytes => "binary",
        other => other.qualified_name(),
    }
}

/// Renders `Foo.hbm.xml`.
///
/// A single key column maps to `<id>`, several to a `<composite-id>` whose
/// key properties form an insertion-ordered set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HibernateFileBuilder;

impl HibernateFileBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn document(&self, mapping: &Mapping) -> XmlDocument {
        let class = &mapping.class_info;
        let mut class_element = XmlElement::new("class")
            .attr("name", class.class_name.as_str())
            .attr("table", mapping.table_info.name.as_str());

        let keys: IndexSet<Property<'_>> = mapping
            .primary_key_items()
            .map(Property::from_item)
            .collect();

        match keys.len() {
            0 => warn!(
                "Table {} has no primary key, mapping has no identifier",
                mapping.table_info.name
            ),
            1 => {
                if let Some(key) = keys.first() {
                    class_element.push(key.element("id"));
                }
            }
            _ => {
                let mut composite = XmlElement::new("composite-id");
                for key in &keys {
                    composite.push(key.element("key-property"));
                }
                class_element.push(composite);
            }
        }

        let properties: IndexSet<Property<'_>> =
            mapping.regular_items().map(Property::from_item).collect();
        for property in &properties {
            class_element.push(property.element("property"));
        }

        let mut root = XmlElement::new("hibernate-mapping");
        if !class.package_name.is_empty() {
            root = root.attr("package", class.package_name.as_str());
        }

        XmlDocument::new(root.child(class_element)).with_doctype(DOCTYPE)
    }
}

impl MappingFileBuilder for HibernateFileBuilder {
    fn render(&self, mapping: &Mapping) -> Result<String> {
        self.document(mapping).render(mapping.charset)
    }

    fn file_name(&self, class_name: &str) -> String {
        format!("{}.hbm.xml", class_name)
    }
}
