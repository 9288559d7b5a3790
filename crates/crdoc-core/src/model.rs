//! Documentation model handed to the renderer
//!
//! The model is assembled once per invocation by [`crate::ModelBuilder`] and
//! never mutated afterwards. Everything serializes so that templates can
//! address it directly.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A doc comment split into prose and code generator annotations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationBlock {
    /// Documentation as written in the source
    pub raw: String,
    /// Documentation without TODO and annotation lines
    pub sanitized: String,
    /// Annotations (`+key=value`), keys without a value map to ""
    pub annotations: BTreeMap<String, String>,
}

impl DocumentationBlock {
    /// Look up an annotation value
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Whether the sanitized documentation is empty
    pub fn is_empty(&self) -> bool {
        self.sanitized.is_empty()
    }
}

/// Normalized field type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A type of the same package or a builtin scalar
    Named(String),
    /// A type from another package
    Qualified { package: String, name: String },
    /// `[]T`
    Sequence(Box<FieldType>),
    /// `map[K]V`
    Map {
        key: Box<FieldType>,
        value: Box<FieldType>,
    },
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    pub fn sequence_of(inner: FieldType) -> Self {
        FieldType::Sequence(Box::new(inner))
    }

    /// The type with sequence and map wrapping stripped
    ///
    /// For maps this is the value type.
    pub fn base(&self) -> &FieldType {
        match self {
            FieldType::Sequence(inner) => inner.base(),
            FieldType::Map { value, .. } => value.base(),
            other => other,
        }
    }

    /// Name of the package-local type this field refers to, if any
    pub fn referenced_name(&self) -> Option<&str> {
        match self.base() {
            FieldType::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Name of the package-local element type, looking through sequences only
    pub fn element_name(&self) -> Option<&str> {
        match self {
            FieldType::Sequence(inner) => inner.element_name(),
            FieldType::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Name of the type when the field is exactly a package-local type
    pub fn exact_name(&self) -> Option<&str> {
        match self {
            FieldType::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldType::Sequence(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Named(name) => f.write_str(name),
            FieldType::Qualified { package, name } => write!(f, "{}.{}", package, name),
            FieldType::Sequence(inner) => write!(f, "[]{}", inner),
            FieldType::Map { key, value } => write!(f, "map[{}]{}", key, value),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A field or object property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// JSON name of the field
    pub name: String,
    pub doc: DocumentationBlock,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be set
    pub is_required: bool,
}

/// Any non-resource type of the API group
///
/// Usually making up the structure of one or more resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubObject {
    pub name: String,
    pub doc: DocumentationBlock,
    /// Fields, including those flattened in from embedded types
    pub fields: Vec<Field>,
    /// Types inlined into this one
    pub embedded_sub_objects: Vec<String>,
    /// Inlined somewhere and never referenced by a field
    pub is_embedded: bool,
    /// Types referencing this one in one of their fields
    pub parents: Vec<String>,
}

/// API scope of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Scope {
    Cluster,
    #[default]
    Namespaced,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Cluster => "Cluster",
            Scope::Namespaced => "Namespaced",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API group and version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    pub fn with_kind(&self, kind: impl Into<String>) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group.clone(),
            version: self.version.clone(),
            kind: kind.into(),
        }
    }
}

/// `group/version`, or the bare version for the core group
impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

/// API group, version and kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(self.group.clone(), self.version.clone())
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.group_version(), self.kind)
    }
}

/// A top-level API resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomResource {
    #[serde(flatten)]
    pub gvk: GroupVersionKind,
    pub doc: DocumentationBlock,
    pub scope: Scope,
    /// Top-level fields
    pub fields: Vec<Field>,
    /// Example object rendered as YAML
    pub example_yaml: String,
}

impl CustomResource {
    pub fn kind(&self) -> &str {
        &self.gvk.kind
    }
}

/// A versioned API group, the root of the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiGroup {
    #[serde(flatten)]
    pub group_version: GroupVersion,
    /// `group/version` as used in `apiVersion`
    pub api_version: String,
    /// Package documentation
    pub doc: DocumentationBlock,
    pub crs: Vec<CustomResource>,
    pub sub_objects: Vec<SubObject>,
}
