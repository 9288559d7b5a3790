//! Declared types as handed over by a source parser
//!
//! These structures are the input boundary of the model builder. They carry
//! raw text only: comments are not yet split into prose and annotations, and
//! type expressions are not yet normalized.

/// A parsed API package
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageDecl {
    /// Package short name (`v1alpha1`), used as the API version
    pub name: String,
    /// Raw package documentation comment
    pub doc: String,
    /// Declared types, in the order the parser reports them
    pub types: Vec<TypeDecl>,
}

/// A declared (struct) type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub doc: String,
    /// Ordered field list; empty for non-struct types
    pub fields: Vec<FieldDecl>,
}

/// A single struct field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field identifier, `None` for embedded fields
    pub ident: Option<String>,
    pub expr: TypeExpr,
    /// Raw struct tag without the surrounding quotes
    pub tag: Option<String>,
    pub doc: String,
}

/// A raw type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name`
    Ident(String),
    /// `pkg.Name`
    Selector { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T` or `[N]T`
    Array(Box<TypeExpr>),
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// Any other shape (struct literal, interface, func, chan), kept as source text
    Unsupported(String),
}

impl TypeExpr {
    /// Bare type name, looking through pointers and package qualifiers
    pub fn bare_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Selector { name, .. } => Some(name),
            TypeExpr::Pointer(inner) => inner.bare_name(),
            _ => None,
        }
    }
}

impl FieldDecl {
    /// Create a named field
    pub fn named(ident: impl Into<String>, expr: TypeExpr, tag: impl Into<String>) -> Self {
        Self {
            ident: Some(ident.into()),
            expr,
            tag: Some(tag.into()),
            doc: String::new(),
        }
    }

    /// Create an embedded field
    pub fn embedded(expr: TypeExpr, tag: impl Into<String>) -> Self {
        Self {
            ident: None,
            expr,
            tag: Some(tag.into()),
            doc: String::new(),
        }
    }

    /// Attach a raw doc comment
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            fields,
        }
    }

    /// Attach a raw doc comment
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

/// Shorthand for an identifier expression
pub fn ident(name: &str) -> TypeExpr {
    TypeExpr::Ident(name.to_string())
}
