//! Resource classification
//!
//! Declared types marked with `+kubebuilder:object:root=true` become
//! resources; every other type with fields becomes a sub-object.

use crate::decl::TypeDecl;
use crate::error::Result;
use crate::fields::extract_fields;
use crate::model::{CustomResource, DocumentationBlock, GroupVersion, Scope, SubObject};

/// Name suffix of the list wrapper paired with each resource
const LIST_SUFFIX: &str = "List";

/// Declared types split into resources and sub-objects
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub crs: Vec<CustomResource>,
    pub sub_objects: Vec<SubObject>,
}

/// Classify declared types, in declaration order
pub fn classify(gv: &GroupVersion, types: &[TypeDecl]) -> Result<Classified> {
    let mut classified = Classified::default();

    for decl in types {
        let doc = DocumentationBlock::parse(&decl.doc);
        let extracted = extract_fields(decl)?;

        if extracted.fields.is_empty() {
            tracing::debug!(type_name = %decl.name, "skipping type without fields");
            continue;
        }

        if doc.is_object_root() {
            if decl.name.ends_with(LIST_SUFFIX) {
                tracing::debug!(type_name = %decl.name, "skipping list type");
                continue;
            }

            let scope = if doc.is_cluster_scoped() {
                Scope::Cluster
            } else {
                Scope::Namespaced
            };

            classified.crs.push(CustomResource {
                gvk: gv.with_kind(decl.name.clone()),
                doc,
                scope,
                fields: extracted.fields,
                example_yaml: String::new(),
            });
            continue;
        }

        classified.sub_objects.push(SubObject {
            name: decl.name.clone(),
            doc,
            fields: extracted.fields,
            embedded_sub_objects: extracted.embedded,
            is_embedded: false,
            parents: Vec::new(),
        });
    }

    Ok(classified)
}
