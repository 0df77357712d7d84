//! GML reading operations.
//!
//! Parsing happens in two stages: the text is parsed into a generic key/value
//! tree, and the tree is then interpreted as a [`Document`].

use std::io::Read;
use std::str::FromStr;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::parser::parse_document;
use crate::value::Attributes;

/// Reader for GML documents.
///
/// `GmlReader` consumes the whole underlying reader; GML has no framing that
/// would allow a document to be read incrementally.
///
/// # Examples
///
/// ```
/// use graphlens_gml::GmlReader;
///
/// let text = "graph [ node [ id 0 label \"a\" ] ]";
/// let doc = GmlReader::new(text.as_bytes()).read_document().unwrap();
/// assert_eq!(doc.nodes.len(), 1);
/// ```
pub struct GmlReader<R> {
    reader: R,
}

impl<R: Read> GmlReader<R> {
    /// Creates a new `GmlReader` wrapping the given reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads and validates a complete document.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the underlying reader fails
    /// - [`Error::InvalidFormat`] if the input is not UTF-8 or does not describe a graph
    /// - [`Error::Syntax`] if the input is not well-formed GML
    pub fn read_document(mut self) -> Result<Document> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::invalid(format!("input is not valid UTF-8: {e}")))?;
        parse_str(&text)
    }

    /// Consumes the reader, returning the wrapped value.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Parses GML text into a validated [`Document`].
///
/// # Errors
///
/// Same as [`GmlReader::read_document`], minus I/O failures.
pub fn parse_str(text: &str) -> Result<Document> {
    let top = parse_tree(text)?;
    Document::from_top_level(top)
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}

/// Parses GML text into an untyped key/value tree.
///
/// Useful for inspecting files that are well-formed GML but not graphs.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is not well-formed.
pub fn parse_tree(text: &str) -> Result<Attributes> {
    parse_document(text)
}
