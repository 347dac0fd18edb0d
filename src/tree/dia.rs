//! Dia document reader.
//!
//! Dia stores diagrams as (optionally gzip-compressed) XML:
//!
//! ```xml
//! <dia:diagram xmlns:dia="http://www.lysator.liu.se/~alla/dia/">
//!   <dia:layer name="Background" visible="true">
//!     <dia:object type="UML - Class" version="0" id="O0">
//!       <dia:attribute name="name"><dia:string>#Vehicle#</dia:string></dia:attribute>
//!     </dia:object>
//!   </dia:layer>
//! </dia:diagram>
//! ```
//!
//! The reader turns the document into an owned [`Node`] tree. Decompression
//! is left to the caller.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;

use super::{AttributedTree, Node, TreeError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A parsed Dia document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiaDocument {
    root: Node,
}

impl AttributedTree for DiaDocument {
    fn query(&self, container: &str, type_name: &str) -> Vec<&Node> {
        // The root element itself is never an object.
        self.root.query(container, type_name)
    }
}

impl DiaDocument {
    /// Wrap an already-built tree.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Parse a document from XML text.
    pub fn parse(input: &str) -> Result<Self, TreeError> {
        Self::from_bytes(input.as_bytes())
    }

    /// Parse a document from raw bytes.
    pub fn from_bytes(input: &[u8]) -> Result<Self, TreeError> {
        if input.starts_with(&GZIP_MAGIC) {
            return Err(TreeError::xml(
                "input is gzip-compressed; decompress the diagram before reading it",
            ));
        }
        DocumentReader::default().read(input).map(Self::from_root)
    }

    /// Read and parse a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes)
    }
}

// ============================================================================
// READER
// ============================================================================

#[derive(Default)]
struct DocumentReader {
    /// Open elements, innermost last.
    stack: Vec<Node>,
    /// The finished document element.
    root: Option<Node>,
}

impl DocumentReader {
    fn read(mut self, input: &[u8]) -> Result<Node, TreeError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let node = element_node(e)?;
                    self.stack.push(node);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = element_node(e)?;
                    self.close(node);
                }
                Ok(Event::End(_)) => {
                    if let Some(node) = self.stack.pop() {
                        self.close(node);
                    }
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| TreeError::xml(format!("Text error: {e}")))?;
                    if let Some(open) = self.stack.last_mut() {
                        open.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(open) = self.stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(TreeError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if !self.stack.is_empty() {
            return Err(TreeError::xml("unexpected end of document"));
        }
        self.root
            .ok_or_else(|| TreeError::xml("document has no root element"))
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }
}

/// Build a childless node from a start tag, dropping the `dia:` prefix.
fn element_node(e: &BytesStart<'_>) -> Result<Node, TreeError> {
    let local = e.local_name();
    let kind = std::str::from_utf8(local.as_ref())
        .map_err(|e| TreeError::xml(format!("Invalid tag name: {e}")))?;
    let mut node = Node::new(kind);

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| TreeError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| TreeError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| TreeError::xml(format!("Attribute value error: {e}")))?;
        node.attributes
            .insert(SmolStr::new(key), SmolStr::new(value.as_ref()));
    }
    Ok(node)
}
