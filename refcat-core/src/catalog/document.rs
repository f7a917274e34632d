//! Loader and dumper between YAML catalog documents and the tree model
//!
//! The document is a sequence of mappings. Each mapping is classified by its
//! discriminant key (`SHELF`, `BOOK`, `PAGE`, `DIVIDER`); `name` becomes the
//! display name and `content` (shelves and books only) the child sequence.
//! Every other key is kept as an opaque attribute. Key order is recorded so
//! the dumper reproduces the source layout.

use serde_yaml_ng::{Mapping, Value};
use std::path::Path;
use tracing::{debug, trace};

use super::node::{Catalog, CatalogNode, FieldSlot, NodeKind};
use crate::error::{CatalogError, Result};

const NAME_KEY: &str = "name";
const CONTENT_KEY: &str = "content";

/// Discriminants checked in priority order when a mapping carries several
const DISCRIMINANTS: [NodeKind; 4] = [
    NodeKind::Shelf,
    NodeKind::Book,
    NodeKind::Page,
    NodeKind::Divider,
];

impl Catalog {
    /// Parse a catalog from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    /// Load a catalog document from disk
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded {} bytes from {}", content.len(), path.display());
        Self::parse(&content, &path.display().to_string())
    }

    /// Build a catalog from an already parsed YAML value
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_origin(value, "<value>")
    }

    /// Serialize to a YAML string in block style, preserving key order
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(&self.to_value())
            .map_err(|source| CatalogError::Serialize { source })
    }

    /// Convert the catalog back into a generic YAML value
    pub fn to_value(&self) -> Value {
        Value::Sequence(self.shelves.iter().map(CatalogNode::to_value).collect())
    }

    /// Write the catalog to `path`, creating parent directories as needed
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Serialize before touching the filesystem so a failed emit leaves
        // the destination alone
        let content = self.to_yaml()?;

        let write_failure = |source| CatalogError::DestinationWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_failure)?;
            }
        }
        std::fs::write(path, content).map_err(write_failure)?;

        debug!("Wrote catalog to {}", path.display());
        Ok(())
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let value: Value = serde_yaml_ng::from_str(content)
            .map_err(|e| CatalogError::malformed(origin, e.to_string()))?;
        Self::from_value_with_origin(value, origin)
    }

    fn from_value_with_origin(value: Value, origin: &str) -> Result<Self> {
        match value {
            // An empty document is an empty catalog
            Value::Null => Ok(Catalog::default()),
            Value::Sequence(entries) => {
                let shelves = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| CatalogNode::from_value(entry, origin, &format!("[{i}]")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Catalog { shelves })
            }
            other => Err(CatalogError::malformed(
                origin,
                format!(
                    "top level must be a sequence of shelves, found {}",
                    value_type(&other)
                ),
            )),
        }
    }
}

impl CatalogNode {
    /// Classify one document element and convert it, recursing into `content`
    fn from_value(value: Value, origin: &str, location: &str) -> Result<Self> {
        let map = match value {
            Value::Mapping(map) => map,
            other => {
                return Err(CatalogError::malformed(
                    origin,
                    format!(
                        "catalog entry at {location} must be a mapping, found {}",
                        value_type(&other)
                    ),
                ))
            }
        };

        let kind = DISCRIMINANTS
            .iter()
            .copied()
            .find(|kind| map.contains_key(kind.discriminant()));
        let has_discriminant = kind.is_some();
        let kind = kind.unwrap_or(NodeKind::Divider);
        trace!("Entry at {} classified as {}", location, kind);

        let mut node = CatalogNode::new(kind, None, None);
        let mut layout = Vec::with_capacity(map.len());

        for (key, field) in map {
            let key_str = key.as_str();

            if has_discriminant && key_str == Some(kind.discriminant()) {
                node.id = scalar_to_string(&field).ok_or_else(|| {
                    CatalogError::malformed(
                        origin,
                        format!(
                            "{} identifier at {location} must be a scalar, found {}",
                            kind,
                            value_type(&field)
                        ),
                    )
                })?;
                layout.push(FieldSlot::Discriminant(field));
            } else if key_str == Some(NAME_KEY) && is_scalar(&field) {
                node.display_name = scalar_to_string(&field).flatten();
                layout.push(FieldSlot::Name(field));
            } else if key_str == Some(CONTENT_KEY) && kind.is_container() {
                node.children = children_from_value(field, origin, location)?;
                layout.push(FieldSlot::Content);
            } else {
                layout.push(FieldSlot::Attribute(key.clone()));
                node.attributes.insert(key, field);
            }
        }

        node.layout = Some(layout);
        Ok(node)
    }

    /// Convert back into a YAML mapping following the recorded key order
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::new();

        if let Some(layout) = &self.layout {
            for slot in layout {
                self.emit_recorded(slot, &mut map);
            }
        }
        self.emit_missing(&mut map);

        Value::Mapping(map)
    }

    /// Write one key that was present in the source mapping
    fn emit_recorded(&self, slot: &FieldSlot, map: &mut Mapping) {
        let (key, value) = match slot {
            FieldSlot::Discriminant(source) => (
                self.kind.discriminant(),
                restore_scalar(source, self.id.as_deref()),
            ),
            FieldSlot::Name(source) => (
                NAME_KEY,
                restore_scalar(source, self.display_name.as_deref()),
            ),
            FieldSlot::Content => (CONTENT_KEY, self.content_value()),
            FieldSlot::Attribute(key) => {
                // Attributes removed after loading are not written back
                if let Some(value) = self.attributes.get(key) {
                    map.insert(key.clone(), value.clone());
                }
                return;
            }
        };
        map.insert(Value::from(key), value);
    }

    /// Write fields added after loading, or the whole node when built in
    /// code, in the order discriminant, `name`, attributes, `content`
    fn emit_missing(&self, map: &mut Mapping) {
        let discriminant = Value::from(self.kind.discriminant());
        if !map.contains_key(&discriminant) {
            match (&self.id, self.kind) {
                // A divider without an id has no DIVIDER key
                (None, NodeKind::Divider) => {}
                (id, _) => {
                    map.insert(discriminant, optional_string(id.as_deref()));
                }
            }
        }

        if let Some(name) = &self.display_name {
            let key = Value::from(NAME_KEY);
            if !map.contains_key(&key) {
                map.insert(key, Value::from(name.as_str()));
            }
        }

        for (key, value) in &self.attributes {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }

        // A loaded container without `content` only gains one if it has children
        let key = Value::from(CONTENT_KEY);
        let loaded = self.layout.is_some();
        if self.kind.is_container()
            && !map.contains_key(&key)
            && !(loaded && self.children.is_empty())
        {
            map.insert(key, self.content_value());
        }
    }

    fn content_value(&self) -> Value {
        Value::Sequence(self.children.iter().map(CatalogNode::to_value).collect())
    }
}

/// The source scalar when it still reads as `current`, otherwise `current`
fn restore_scalar(source: &Value, current: Option<&str>) -> Value {
    match scalar_to_string(source) {
        Some(text) if text.as_deref() == current => source.clone(),
        _ => optional_string(current),
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn children_from_value(value: Value, origin: &str, location: &str) -> Result<Vec<CatalogNode>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                CatalogNode::from_value(entry, origin, &format!("{location}.content[{i}]"))
            })
            .collect(),
        other => Err(CatalogError::malformed(
            origin,
            format!(
                "content at {location} must be a sequence, found {}",
                value_type(&other)
            ),
        )),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// Render a scalar as a string; `Some(None)` for null, `None` for non-scalars
fn scalar_to_string(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::String(s) => Some(Some(s.clone())),
        _ => None,
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
