//! Field extraction
//!
//! Turns the raw field list of a declared type into documented fields plus
//! the names of the types inlined into it.

use crate::decl::{FieldDecl, TypeDecl, TypeExpr};
use crate::error::{CoreError, Result};
use crate::model::{DocumentationBlock, Field, FieldType};
use crate::tag::JsonTag;

/// Fields of a single declared type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub fields: Vec<Field>,
    /// Normalized names of `json:",inline"` types, in declaration order
    pub embedded: Vec<String>,
}

/// Extract the documented fields of a declared type
pub fn extract_fields(decl: &TypeDecl) -> Result<ExtractedFields> {
    let mut extracted = ExtractedFields::default();

    for field in &decl.fields {
        let field_type = normalize(&field.expr).map_err(|expr| CoreError::UnsupportedType {
            type_name: decl.name.clone(),
            field: display_name(field),
            expr,
        })?;

        let tag = field
            .tag
            .as_deref()
            .and_then(JsonTag::from_struct_tag)
            .ok_or_else(|| CoreError::MissingTag {
                type_name: decl.name.clone(),
                field: display_name(field),
            })?;

        if tag.is_inline() {
            extracted.embedded.push(field_type.to_string());
            continue;
        }

        if tag.is_excluded() {
            tracing::debug!(type_name = %decl.name, field = %display_name(field), "skipping excluded field");
            continue;
        }

        let name = if tag.name.is_empty() {
            display_name(field)
        } else {
            tag.name.clone()
        };

        extracted.fields.push(Field {
            name,
            doc: DocumentationBlock::parse(&field.doc),
            field_type,
            is_required: !tag.is_omit_empty(),
        });
    }

    Ok(extracted)
}

/// Normalize a raw type expression
///
/// Unsupported shapes are returned as the error value.
pub fn normalize(expr: &TypeExpr) -> std::result::Result<FieldType, String> {
    Ok(match expr {
        TypeExpr::Ident(name) => FieldType::Named(name.clone()),
        TypeExpr::Selector { package, name } => FieldType::Qualified {
            package: package.clone(),
            name: name.clone(),
        },
        TypeExpr::Pointer(inner) => normalize(inner)?,
        TypeExpr::Array(inner) => FieldType::Sequence(Box::new(normalize(inner)?)),
        TypeExpr::Map { key, value } => FieldType::Map {
            key: Box::new(normalize(key)?),
            value: Box::new(normalize(value)?),
        },
        TypeExpr::Unsupported(source) => return Err(source.clone()),
    })
}

/// Identifier of a field, or its type name when embedded
fn display_name(field: &FieldDecl) -> String {
    field
        .ident
        .clone()
        .or_else(|| field.expr.bare_name().map(str::to_string))
        .unwrap_or_default()
}
