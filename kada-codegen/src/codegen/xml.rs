//! Generic element tree for mapping documents, serialized with quick-xml

use std::fmt::Write as _;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::charset::Charset;
use crate::error::{CodegenError, Result};

/// A node inside an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute (document order is insertion order)
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, element: XmlElement) -> Self {
        self.push(element);
        self
    }

    pub fn push(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Child elements with the given name
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A complete document: prolog plus one root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub doctype: Option<String>,
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self {
            doctype: None,
            root,
        }
    }

    /// Set the DOCTYPE body, e.g. `mapper PUBLIC "..." "..."`
    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = Some(doctype.into());
        self
    }

    /// Serialize with a declaration naming `charset`.
    ///
    /// Characters the charset cannot hold become numeric character references.
    pub fn render(&self, charset: Charset) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, &self.root)?;
        let body = String::from_utf8(writer.into_inner())
            .map_err(|e| CodegenError::RenderError(e.to_string()))?;

        let mut out = format!(
            "<?xml version=\"1.0\" encoding=\"{}\" ?>\n",
            charset.name()
        );
        if let Some(doctype) = &self.doctype {
            out.push_str(&format!("<!DOCTYPE {}>\n", doctype));
        }
        out.push_str(&charset.escape_unmappable(&body, |c, out| {
            let _ = write!(out, "&#{};", c as u32);
        }));
        out.push('\n');
        Ok(out)
    }
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let start = BytesStart::new(element.name.as_str()).with_attributes(
        element
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(render_error);
    }

    writer.write_event(Event::Start(start)).map_err(render_error)?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(render_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(render_error)
}

fn render_error(err: impl std::fmt::Display) -> CodegenError {
    CodegenError::RenderError(err.to_string())
}
