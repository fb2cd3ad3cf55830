//! MyBatis mapper builder

use crate::error::Result;
use crate::mapping::Mapping;

use super::file_builder::MappingFileBuilder;
use super::naming::lower_first;
use super::xml::{XmlDocument, XmlElement};

const DOCTYPE: &str =
    r#"mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd""#;

/// Id of the generated result map
pub const RESULT_MAP_ID: &str = "FullResultMap";

/// Renders `FooDao.xml`.
///
/// ```xml
/// <mapper namespace="com.qchery.AsHoneypotDao">
///   <resultMap type="asHoneypot" id="FullResultMap">
///     <id property="honeypotId" column="honeypot_id"/>
///     <result property="emailAddr" column="email_addr"/>
///   </resultMap>
/// </mapper>
/// ```
#[derive(Debug, Clone, Default)]
pub struct MybatisFileBuilder {
    with_insert: bool,
}

impl MybatisFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also emit an `<insert id="insert">` statement covering every column
    pub fn with_insert(mut self, enabled: bool) -> Self {
        self.with_insert = enabled;
        self
    }

    /// Build the element tree for a mapping
    pub fn document(&self, mapping: &Mapping) -> XmlDocument {
        let class = &mapping.class_info;
        let type_alias = lower_first(&class.class_name);

        let mut result_map = XmlElement::new("resultMap")
            .attr("type", type_alias.as_str())
            .attr("id", RESULT_MAP_ID);
        for item in mapping.primary_key_items() {
            result_map.push(
                XmlElement::new("id")
                    .attr("property", item.field.name.as_str())
                    .attr("column", item.column.name.as_str()),
            );
        }
        for item in mapping.regular_items() {
            result_map.push(
                XmlElement::new("result")
                    .attr("property", item.field.name.as_str())
                    .attr("column", item.column.name.as_str()),
            );
        }

        let mut mapper = XmlElement::new("mapper")
            .attr("namespace", format!("{}Dao", class.qualified_name()))
            .child(result_map);

        if self.with_insert && !mapping.items.is_empty() {
            let columns: Vec<&str> = mapping.items.iter().map(|i| i.column.name.as_str()).collect();
            let values: Vec<String> = mapping
                .items
                .iter()
                .map(|i| format!("#{{{}}}", i.field.name))
                .collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                mapping.table_info.name,
                columns.join(", "),
                values.join(", ")
            );
            mapper.push(
                XmlElement::new("insert")
                    .attr("id", "insert")
                    .attr("parameterType", type_alias.as_str())
                    .text(sql),
            );
        }

        XmlDocument::new(mapper).with_doctype(DOCTYPE)
    }
}

impl MappingFileBuilder for MybatisFileBuilder {
    fn render(&self, mapping: &Mapping) -> Result<String> {
        self.document(mapping).render(mapping.charset)
    }

    fn file_name(&self, class_name: &str) -> String {
        format!("{}Dao.xml", class_name)
    }
}
