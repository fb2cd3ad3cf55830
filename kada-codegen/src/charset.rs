//! Output character encodings

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{CodegenError, Result};

/// Character encoding of generated files.
///
/// Rendered text is always built as a Rust string; builders escape every
/// character the charset cannot represent, and [`Charset::encode`] turns the
/// result into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Canonical name, as written into XML declarations
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Check if a character has a representation in this charset
    pub fn can_encode(&self, c: char) -> bool {
        match self {
            Charset::Utf8 => true,
            Charset::Latin1 => (c as u32) <= 0xFF,
            Charset::Ascii => c.is_ascii(),
        }
    }

    /// Replace every unencodable character using `escape`.
    ///
    /// Borrows when nothing needs escaping.
    pub fn escape_unmappable<'a, F>(&self, text: &'a str, escape: F) -> Cow<'a, str>
    where
        F: Fn(char, &mut String),
    {
        if text.chars().all(|c| self.can_encode(c)) {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len() + 16);
        for c in text.chars() {
            if self.can_encode(c) {
                out.push(c);
            } else {
                escape(c, &mut out);
            }
        }
        Cow::Owned(out)
    }

    /// Encode text into bytes, failing on the first unencodable character
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Latin1 | Charset::Ascii => text
                .chars()
                .map(|c| {
                    if self.can_encode(c) {
                        Ok(c as u32 as u8)
                    } else {
                        Err(CodegenError::RenderError(format!(
                            "character {:?} cannot be encoded as {}",
                            c,
                            self.name()
                        )))
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "utf8" => Ok(Charset::Utf8),
            "iso88591" | "latin1" => Ok(Charset::Latin1),
            "usascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(CodegenError::ConfigError(format!(
                "unsupported charset: {}",
                s
            ))),
        }
    }
}
