//! Catalog tree model
//!
//! A catalog is an ordered forest of Shelf → Book → Page nodes with Divider
//! markers interleaved at any level. Child order is significant.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

use super::year::extract_year;

/// Discriminant of a catalog node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Shelf,
    Book,
    Page,
    Divider,
}

impl NodeKind {
    /// Discriminant key used in the YAML document
    pub fn discriminant(&self) -> &'static str {
        match self {
            NodeKind::Shelf => "SHELF",
            NodeKind::Book => "BOOK",
            NodeKind::Page => "PAGE",
            NodeKind::Divider => "DIVIDER",
        }
    }

    /// Look up a kind by its document discriminant key
    pub fn from_discriminant(key: &str) -> Option<Self> {
        match key {
            "SHELF" => Some(NodeKind::Shelf),
            "BOOK" => Some(NodeKind::Book),
            "PAGE" => Some(NodeKind::Page),
            "DIVIDER" => Some(NodeKind::Divider),
            _ => None,
        }
    }

    /// Shelves and books own an ordered `content` sequence
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Shelf | NodeKind::Book)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.discriminant())
    }
}

/// Position of one key inside a node's source mapping
///
/// The discriminant and `name` slots keep the source scalar so a number,
/// boolean or null is written back with its original type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldSlot {
    Discriminant(Value),
    Name(Value),
    Content,
    Attribute(Value),
}

/// A single node of the catalog tree
#[derive(Debug, Clone)]
pub struct CatalogNode {
    /// Node variant
    pub kind: NodeKind,

    /// Identifier from the discriminant key (`SHELF: main` → `main`)
    pub id: Option<String>,

    /// Human-readable `name`; pages embed their publication year here
    pub display_name: Option<String>,

    /// Every other key of the source mapping, in source order
    pub attributes: Mapping,

    /// Ordered children; always empty for pages and dividers
    pub children: Vec<CatalogNode>,

    /// Source key order, absent for nodes built in code
    pub(crate) layout: Option<Vec<FieldSlot>>,
}

// Key order is presentation only and does not take part in equality.
impl PartialEq for CatalogNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.id == other.id
            && self.display_name == other.display_name
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl CatalogNode {
    /// Create a childless node of the given kind
    pub fn new(kind: NodeKind, id: Option<String>, display_name: Option<String>) -> Self {
        Self {
            kind,
            id,
            display_name,
            attributes: Mapping::new(),
            children: Vec::new(),
            layout: None,
        }
    }

    pub fn shelf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Shelf, Some(id.into()), Some(name.into()))
    }

    pub fn book(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Book, Some(id.into()), Some(name.into()))
    }

    pub fn page(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Page, Some(id.into()), Some(name.into()))
    }

    pub fn divider(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Divider, Some(label.into()), None)
    }

    /// Replace the children of this node
    pub fn with_children(mut self, children: Vec<CatalogNode>) -> Self {
        self.children = children;
        self
    }

    /// Add an opaque attribute, kept verbatim through load and dump
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(Value::String(key.into()), value.into());
        self
    }

    pub fn is_page(&self) -> bool {
        self.kind == NodeKind::Page
    }

    pub fn is_book(&self) -> bool {
        self.kind == NodeKind::Book
    }

    pub fn is_shelf(&self) -> bool {
        self.kind == NodeKind::Shelf
    }

    /// Publication year used to order pages
    pub fn year(&self) -> u32 {
        extract_year(self.display_name.as_deref().unwrap_or(""))
    }

    /// Label for log lines and error messages
    pub fn label(&self) -> String {
        match (&self.id, &self.display_name) {
            (Some(id), _) => format!("{}:{}", self.kind, id),
            (None, Some(name)) => format!("{}:{}", self.kind, name),
            (None, None) => self.kind.to_string(),
        }
    }

    /// Fetch an opaque attribute by string key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Node counts across a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub shelves: usize,
    pub books: usize,
    pub pages: usize,
    pub dividers: usize,
}

impl CatalogStats {
    fn count(&mut self, node: &CatalogNode) {
        match node.kind {
            NodeKind::Shelf => self.shelves += 1,
            NodeKind::Book => self.books += 1,
            NodeKind::Page => self.pages += 1,
            NodeKind::Divider => self.dividers += 1,
        }
        for child in &node.children {
            self.count(child);
        }
    }
}

/// The top-level ordered sequence of shelves
///
/// Top-level entries that are not shelves are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub shelves: Vec<CatalogNode>,
}

impl Catalog {
    pub fn new(shelves: Vec<CatalogNode>) -> Self {
        Self { shelves }
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    /// Count every node by kind
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for shelf in &self.shelves {
            stats.count(shelf);
        }
        stats
    }

    /// Find a shelf by id
    pub fn shelf(&self, id: &str) -> Option<&CatalogNode> {
        self.shelves
            .iter()
            .find(|s| s.is_shelf() && s.id.as_deref() == Some(id))
    }

    /// Iterate `(shelf, book)` pairs in document order
    pub fn books(&self) -> impl Iterator<Item = (&CatalogNode, &CatalogNode)> {
        self.shelves
            .iter()
            .filter(|s| s.is_shelf())
            .flat_map(|shelf| {
                shelf
                    .children
                    .iter()
                    .filter(|c| c.is_book())
                    .map(move |book| (shelf, book))
            })
    }
}
