//! Code generation: type mapping, naming, assembly and the file builders

mod assembler;
mod file_builder;
mod hibernate_builder;
mod java_builder;
mod mybatis_builder;
mod naming;
mod type_map;
pub mod xml;

pub use assembler::assemble;
pub use file_builder::{MappingFile, MappingFileBuilder};
pub use hibernate_builder::HibernateFileBuilder;
pub use java_builder::JavaFileBuilder;
pub use mybatis_builder::{MybatisFileBuilder, RESULT_MAP_ID};
pub use naming::*;
pub use type_map::{JavaType, TypeMap};
pub use xml::{XmlDocument, XmlElement, XmlNode};
