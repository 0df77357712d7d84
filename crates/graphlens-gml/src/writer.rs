//! GML writing operations.
//!
//! Output follows the layout networkx produces: one `key value` pair per
//! line, two-space indentation per block level.

use std::io::{self, BufWriter, Write};

use crate::document::Document;
use crate::escape::escape;
use crate::value::{Attributes, Value};

const INDENT: &str = "  ";

/// Buffered writer for GML documents.
///
/// # Examples
///
/// ```
/// use graphlens_gml::{Document, GmlWriter, NodeRecord};
///
/// let mut doc = Document::new(false);
/// doc.nodes.push(NodeRecord::new(0, Some("a".into())));
///
/// let mut writer = GmlWriter::new(Vec::new());
/// writer.write_document(&doc).unwrap();
/// let bytes = writer.into_inner().unwrap();
/// assert!(String::from_utf8(bytes).unwrap().contains("label \"a\""));
/// ```
pub struct GmlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> GmlWriter<W> {
    /// Creates a new `GmlWriter` wrapping the given writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes a complete document.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        writeln!(self.writer, "graph [")?;
        if doc.directed {
            writeln!(self.writer, "{INDENT}directed 1")?;
        }
        self.write_attributes(&doc.attributes, 1)?;

        for node in &doc.nodes {
            writeln!(self.writer, "{INDENT}node [")?;
            writeln!(self.writer, "{INDENT}{INDENT}id {}", node.id)?;
            if let Some(label) = &node.label {
                writeln!(self.writer, "{INDENT}{INDENT}label \"{}\"", escape(label))?;
            }
            self.write_attributes(&node.attributes, 2)?;
            writeln!(self.writer, "{INDENT}]")?;
        }

        for edge in &doc.edges {
            writeln!(self.writer, "{INDENT}edge [")?;
            writeln!(self.writer, "{INDENT}{INDENT}source {}", edge.source)?;
            writeln!(self.writer, "{INDENT}{INDENT}target {}", edge.target)?;
            self.write_attributes(&edge.attributes, 2)?;
            writeln!(self.writer, "{INDENT}]")?;
        }

        writeln!(self.writer, "]")
    }

    fn write_attributes(&mut self, attrs: &Attributes, depth: usize) -> io::Result<()> {
        let pad = INDENT.repeat(depth);
        for (key, value) in attrs.iter() {
            match value {
                Value::List(inner) => {
                    writeln!(self.writer, "{pad}{key} [")?;
                    self.write_attributes(inner, depth + 1)?;
                    writeln!(self.writer, "{pad}]")?;
                }
                Value::Int(i) => writeln!(self.writer, "{pad}{key} {i}")?,
                Value::Float(f) => writeln!(self.writer, "{pad}{key} {}", format_float(*f))?,
                Value::Str(s) => writeln!(self.writer, "{pad}{key} \"{}\"", escape(s))?,
            }
        }
        Ok(())
    }

    /// Flushes buffered output to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

/// Renders a document to a string.
#[must_use]
pub fn to_string(doc: &Document) -> String {
    let mut writer = GmlWriter::new(Vec::new());
    // Writing to a Vec cannot fail.
    let bytes = writer
        .write_document(doc)
        .and_then(|()| writer.into_inner())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Formats a float so that it reads back as a float, not an integer.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "+" } else { "-" };
        format!("{sign}INF")
    } else {
        // Debug formatting is shortest round-trip and always keeps a '.' or exponent.
        format!("{f:?}")
    }
}
