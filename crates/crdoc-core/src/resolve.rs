//! Type graph resolution
//!
//! Four ordered passes over the classified types:
//! 1. flatten inlined fields and mark composition-only types
//! 2. compute the parents of every sub-object
//! 3. drop composition-only types
//! 4. backfill empty field docs from the referenced type
//!
//! Each pass builds its own lookup tables from its inputs.

use std::collections::{HashMap, HashSet};

use crate::model::{CustomResource, Field, SubObject};

/// Resolved resources and sub-objects
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub crs: Vec<CustomResource>,
    pub sub_objects: Vec<SubObject>,
}

/// Run all passes in order
pub fn resolve(mut crs: Vec<CustomResource>, mut sub_objects: Vec<SubObject>) -> Resolved {
    resolve_embedding(&mut sub_objects, &crs);
    compute_parents(&mut sub_objects, &crs);

    let mut sub_objects = filter_embedded(sub_objects);
    backfill_docs(&mut crs, &mut sub_objects);

    Resolved { crs, sub_objects }
}

/// Flatten inlined types and mark the ones that are never referenced
///
/// Only the declared fields of an inlined type are appended; its own
/// inlined types are not followed.
pub fn resolve_embedding(sub_objects: &mut [SubObject], crs: &[CustomResource]) {
    let declared_fields: HashMap<String, Vec<Field>> = sub_objects
        .iter()
        .map(|obj| (obj.name.clone(), obj.fields.clone()))
        .collect();

    let embedded: HashSet<String> = sub_objects
        .iter()
        .flat_map(|obj| obj.embedded_sub_objects.iter().cloned())
        .collect();

    let referenced: HashSet<String> = sub_objects
        .iter()
        .flat_map(|obj| obj.fields.iter())
        .chain(crs.iter().flat_map(|cr| cr.fields.iter()))
        .filter_map(|field| field.field_type.referenced_name().map(str::to_string))
        .collect();

    for obj in sub_objects.iter_mut() {
        if embedded.contains(&obj.name) && !referenced.contains(&obj.name) {
            tracing::debug!(sub_object = %obj.name, "marking inline-only type");
            obj.is_embedded = true;
        }

        for name in &obj.embedded_sub_objects {
            match declared_fields.get(name) {
                Some(fields) => obj.fields.extend(fields.iter().cloned()),
                None => tracing::debug!(sub_object = %obj.name, embedded = %name, "inlined type not in package"),
            }
        }
    }
}

/// Assign every sub-object the names of the types referencing it
///
/// Sequences are looked through, maps are not. Inline-only sub-objects do
/// not count as referencing types.
pub fn compute_parents(sub_objects: &mut [SubObject], crs: &[CustomResource]) {
    let mut users: HashMap<String, Vec<String>> = HashMap::new();

    let declaring = sub_objects
        .iter()
        .filter(|obj| !obj.is_embedded)
        .map(|obj| (obj.name.as_str(), &obj.fields))
        .chain(crs.iter().map(|cr| (cr.kind(), &cr.fields)));

    for (name, fields) in declaring {
        for field in fields {
            if let Some(referenced) = field.field_type.element_name() {
                users
                    .entry(referenced.to_string())
                    .or_default()
                    .push(name.to_string());
            }
        }
    }

    for obj in sub_objects.iter_mut() {
        obj.parents = users.remove(&obj.name).unwrap_or_default();
    }
}

/// Drop inline-only sub-objects
pub fn filter_embedded(sub_objects: Vec<SubObject>) -> Vec<SubObject> {
    sub_objects
        .into_iter()
        .filter(|obj| !obj.is_embedded)
        .collect()
}

/// Copy the referenced type's docs onto undocumented fields
///
/// Only fields whose type is exactly a sub-object name are filled.
pub fn backfill_docs(crs: &mut [CustomResource], sub_objects: &mut [SubObject]) {
    let type_docs: HashMap<String, String> = sub_objects
        .iter()
        .map(|obj| (obj.name.clone(), obj.doc.sanitized.clone()))
        .collect();

    let fields = crs
        .iter_mut()
        .flat_map(|cr| cr.fields.iter_mut())
        .chain(sub_objects.iter_mut().flat_map(|obj| obj.fields.iter_mut()));

    for field in fields {
        if !field.doc.sanitized.is_empty() {
            continue;
        }

        if let Some(doc) = field
            .field_type
            .exact_name()
            .and_then(|name| type_docs.get(name))
        {
            field.doc.sanitized = doc.clone();
        }
    }
}
