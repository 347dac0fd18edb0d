//! Attributed element tree.
//!
//! The translator never looks at raw XML. It consumes a read-only tree of
//! elements, each with a kind label, XML attributes and children, through
//! the [`AttributedTree`] query and the typed payload accessors on [`Node`].
//!
//! ## Payload layout
//!
//! A named child is an `attribute` element whose `name` XML attribute equals
//! the requested name. Its single element child is the payload:
//!
//! ```xml
//! <dia:attribute name="name"><dia:string>#Vehicle#</dia:string></dia:attribute>
//! <dia:attribute name="elem_width"><dia:real val="4.5"/></dia:attribute>
//! <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
//! <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
//! <dia:attribute name="elem_corner"><dia:point val="1,2.5"/></dia:attribute>
//! ```

#[cfg(feature = "dia")]
mod dia;
mod error;

#[cfg(feature = "dia")]
pub use dia::DiaDocument;
pub use error::TreeError;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::Point;
use crate::base::constants::{COMPOSITE_KIND, STRING_SENTINEL};

const ATTRIBUTE_KIND: &str = "attribute";
const CONNECTIONS_KIND: &str = "connections";
const CONNECTION_KIND: &str = "connection";

/// Read-only query interface over a diagram tree.
pub trait AttributedTree {
    /// Return all descendant elements of kind `container` whose `type`
    /// attribute equals `type_name`, in document order.
    fn query(&self, container: &str, type_name: &str) -> Vec<&Node>;
}

/// One end of a connection sub-element: which handle it is attached by and
/// the id of the object it connects to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub handle: usize,
    pub to: SmolStr,
}

// ============================================================================
// NODE
// ============================================================================

/// An element of the attributed tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Kind label (the XML local name, e.g. `object`, `attribute`, `string`).
    pub kind: SmolStr,
    /// XML attributes in document order.
    pub attributes: IndexMap<SmolStr, SmolStr>,
    /// Text content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Node>,
}

impl AttributedTree for Node {
    fn query(&self, container: &str, type_name: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        collect_descendants(self, container, type_name, &mut found);
        found
    }
}

fn collect_descendants<'a>(
    node: &'a Node,
    container: &str,
    type_name: &str,
    found: &mut Vec<&'a Node>,
) {
    for child in &node.children {
        if child.kind == container && child.attr("type") == Some(type_name) {
            found.push(child);
        }
        collect_descendants(child, container, type_name, found);
    }
}

impl Node {
    /// Create an empty element of the given kind.
    pub fn new(kind: impl Into<SmolStr>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an XML attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(SmolStr::as_str)
    }

    /// The `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// The `type` attribute, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Short description used in error messages, e.g. `UML - Class 'O3'`.
    pub fn describe(&self) -> String {
        match (self.type_name(), self.id()) {
            (Some(ty), Some(id)) => format!("{ty} '{id}'"),
            (Some(ty), None) => ty.to_string(),
            (None, Some(id)) => format!("{} '{id}'", self.kind),
            (None, None) => self.kind.to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Named children
    // ------------------------------------------------------------------------

    /// Find the named child (`<attribute name="...">`).
    pub fn named_child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.kind == ATTRIBUTE_KIND && c.attr("name") == Some(name))
    }

    /// The single payload element of a named child.
    fn payload(&self, name: &str, expected: &'static str) -> Result<&Node, TreeError> {
        let payload = self
            .named_child(name)
            .and_then(|c| c.children.first())
            .ok_or_else(|| TreeError::missing_child(self.describe(), name))?;
        if payload.kind != expected {
            return Err(TreeError::WrongPayload {
                name: name.to_string(),
                element: self.describe(),
                expected,
                found: payload.kind.to_string(),
            });
        }
        Ok(payload)
    }

    fn payload_val(&self, name: &str, expected: &'static str) -> Result<&str, TreeError> {
        let payload = self.payload(name, expected)?;
        payload
            .attr("val")
            .ok_or_else(|| TreeError::missing_attribute(self.describe(), format!("{name}.val")))
    }

    /// A string payload with its `#` delimiters stripped.
    pub fn string(&self, name: &str) -> Result<String, TreeError> {
        let raw = &self.payload(name, "string")?.text;
        strip_sentinel(raw)
            .map(str::to_string)
            .ok_or_else(|| TreeError::invalid("string", self.describe(), name, raw.as_str()))
    }

    /// Like [`Node::string`], but an absent named child yields `None`.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>, TreeError> {
        if self.named_child(name).is_none() {
            return Ok(None);
        }
        self.string(name).map(Some)
    }

    /// A real-number payload.
    pub fn real(&self, name: &str) -> Result<f64, TreeError> {
        let val = self.payload_val(name, "real")?;
        val.trim()
            .parse()
            .map_err(|_| TreeError::invalid("real", self.describe(), name, val))
    }

    /// A boolean payload; `true`/`false` in any case.
    pub fn boolean(&self, name: &str) -> Result<bool, TreeError> {
        let val = self.payload_val(name, "boolean")?;
        match val.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(TreeError::invalid("boolean", self.describe(), name, val)),
        }
    }

    /// An integer-coded enumeration payload.
    pub fn enumeration(&self, name: &str) -> Result<i64, TreeError> {
        let val = self.payload_val(name, "enum")?;
        val.trim()
            .parse()
            .map_err(|_| TreeError::invalid("enum", self.describe(), name, val))
    }

    /// A 2-D point payload written as `x,y`.
    pub fn point(&self, name: &str) -> Result<Point, TreeError> {
        let val = self.payload_val(name, "point")?;
        let invalid = || TreeError::invalid("point", self.describe(), name, val);
        let (x, y) = val.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Point::new(x, y))
    }

    /// Composite records held directly by a named child, in document order.
    ///
    /// An absent named child yields no records.
    pub fn records(&self, name: &str) -> Vec<&Node> {
        self.named_child(name)
            .map(|c| {
                c.children
                    .iter()
                    .filter(|r| r.kind == COMPOSITE_KIND)
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------------

    /// The connection sub-elements of an edge object.
    pub fn connections(&self) -> Result<Vec<Connection>, TreeError> {
        let Some(container) = self.children.iter().find(|c| c.kind == CONNECTIONS_KIND) else {
            return Ok(Vec::new());
        };
        container
            .children
            .iter()
            .filter(|c| c.kind == CONNECTION_KIND)
            .map(|c| -> Result<Connection, TreeError> {
                let handle = c
                    .attr("handle")
                    .ok_or_else(|| TreeError::missing_attribute(self.describe(), "handle"))?;
                let handle = handle.trim().parse().map_err(|_| {
                    TreeError::invalid("handle", self.describe(), "handle", handle)
                })?;
                let to = c
                    .attr("to")
                    .ok_or_else(|| TreeError::missing_attribute(self.describe(), "to"))?;
                Ok(Connection {
                    handle,
                    to: SmolStr::new(to),
                })
            })
            .collect()
    }

    /// The target id attached at `handle`.
    pub fn connection_target(&self, handle: usize) -> Result<SmolStr, TreeError> {
        self.connections()?
            .into_iter()
            .find(|c| c.handle == handle)
            .map(|c| c.to)
            .ok_or_else(|| {
                TreeError::missing_child(self.describe(), format!("connection handle {handle}"))
            })
    }
}

fn strip_sentinel(raw: &str) -> Option<&str> {
    raw.strip_prefix(STRING_SENTINEL)?
        .strip_suffix(STRING_SENTINEL)
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Constructors for Dia-shaped payloads, used when building trees in code.
pub mod build {
    use super::Node;
    use crate::base::constants::{COMPOSITE_KIND, OBJECT_KIND};

    /// `<attribute name="..">payload</attribute>`
    pub fn named(name: &str, payload: Node) -> Node {
        Node::new("attribute")
            .with_attr("name", name)
            .with_child(payload)
    }

    /// A composite-valued named child holding `records`.
    pub fn named_records(name: &str, records: Vec<Node>) -> Node {
        let mut node = Node::new("attribute").with_attr("name", name);
        node.children = records;
        node
    }

    pub fn string(value: &str) -> Node {
        Node::new("string").with_text(format!("#{value}#"))
    }

    pub fn real(value: f64) -> Node {
        Node::new("real").with_attr("val", value.to_string())
    }

    pub fn boolean(value: bool) -> Node {
        Node::new("boolean").with_attr("val", value.to_string())
    }

    pub fn enumeration(value: i64) -> Node {
        Node::new("enum").with_attr("val", value.to_string())
    }

    pub fn point(x: f64, y: f64) -> Node {
        Node::new("point").with_attr("val", format!("{x},{y}"))
    }

    pub fn object(type_name: &str, id: &str) -> Node {
        Node::new(OBJECT_KIND)
            .with_attr("type", type_name)
            .with_attr("id", id)
    }

    pub fn composite(type_name: &str) -> Node {
        Node::new(COMPOSITE_KIND).with_attr("type", type_name)
    }

    /// `<connections>` with one `<connection>` per `(handle, to)` pair.
    pub fn connections(ends: &[(usize, &str)]) -> Node {
        let mut node = Node::new("connections");
        for (handle, to) in ends {
            node.children.push(
                Node::new("connection")
                    .with_attr("handle", handle.to_string())
                    .with_attr("to", *to),
            );
        }
        node
    }
}
