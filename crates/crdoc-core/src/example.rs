//! Example object synthesis
//!
//! Builds a placeholder YAML document for a resource. Values come from
//! `+example` and `+kubebuilder:default` annotations when present and from
//! deterministic placeholders otherwise.

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

use crate::annotations::{DEFAULT_VALUE, EXAMPLE};
use crate::error::{CoreError, Result};
use crate::model::{CustomResource, DocumentationBlock, Field, FieldType, Scope, SubObject};

/// Placeholder words handed out to string fields
pub const PLACEHOLDER_WORDS: [&str; 13] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consetetur",
    "sadipscing",
    "elitr",
    "sed",
    "diam",
    "nonumy",
    "eirmod",
    "tempor",
];

/// Placeholder for integer fields
pub const PLACEHOLDER_INT: i64 = 42;

const EXAMPLE_NAME: &str = "example";
const EXAMPLE_NAMESPACE: &str = "default";

const INTEGER_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64", "byte",
];

/// Position in the placeholder word list
///
/// Wraps around to the first word once the list is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCursor {
    position: usize,
}

impl WordCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the given offset into the word list
    pub fn starting_at(position: usize) -> Self {
        Self {
            position: position % PLACEHOLDER_WORDS.len(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next_word(&mut self) -> &'static str {
        let word = PLACEHOLDER_WORDS[self.position];
        self.position = (self.position + 1) % PLACEHOLDER_WORDS.len();
        word
    }
}

/// Example builder for the resources of one API group
pub struct ExampleSynthesizer<'a> {
    sub_objects: HashMap<&'a str, &'a SubObject>,
    words: WordCursor,
    /// Sub-objects currently being expanded
    stack: Vec<&'a str>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(sub_objects: &'a [SubObject]) -> Self {
        Self::with_cursor(sub_objects, WordCursor::new())
    }

    pub fn with_cursor(sub_objects: &'a [SubObject], words: WordCursor) -> Self {
        Self {
            sub_objects: sub_objects
                .iter()
                .map(|obj| (obj.name.as_str(), obj))
                .collect(),
            words,
            stack: Vec::new(),
        }
    }

    /// Current word cursor
    pub fn cursor(&self) -> WordCursor {
        self.words
    }

    /// Render the example document of a resource
    pub fn example_yaml(&mut self, cr: &CustomResource) -> Result<String> {
        let document = self.example_document(cr);
        serde_yaml::to_string(&document).map_err(|source| CoreError::Example {
            kind: cr.gvk.to_string(),
            source,
        })
    }

    /// Build the example document of a resource
    pub fn example_document(&mut self, cr: &CustomResource) -> Value {
        let mut object = self.object(&cr.fields);

        let mut metadata = Mapping::new();
        metadata.insert("name".into(), EXAMPLE_NAME.into());
        if cr.scope != Scope::Cluster {
            metadata.insert("namespace".into(), EXAMPLE_NAMESPACE.into());
        }

        object.insert("kind".into(), cr.kind().into());
        object.insert("apiVersion".into(), cr.gvk.group_version().to_string().into());
        object.insert("metadata".into(), Value::Mapping(metadata));

        sorted(Value::Mapping(object))
    }

    fn object(&mut self, fields: &[Field]) -> Mapping {
        let mut object = Mapping::new();
        for field in fields {
            let value = self.field_value(&field.field_type, &field.doc);
            object.insert(field.name.clone().into(), value);
        }
        object
    }

    fn field_value(&mut self, field_type: &FieldType, doc: &DocumentationBlock) -> Value {
        if let Some(example) = doc.annotation(EXAMPLE) {
            return parse_or_raw(example);
        }
        if let Some(default) = doc.annotation(DEFAULT_VALUE) {
            return parse_or_raw(default);
        }

        match field_type {
            FieldType::Sequence(inner) => Value::Sequence(vec![self.field_value(inner, doc)]),
            FieldType::Named(name) if INTEGER_TYPES.contains(&name.as_str()) => {
                Value::from(PLACEHOLDER_INT)
            }
            FieldType::Named(name) if name == "string" => Value::from(self.words.next_word()),
            FieldType::Named(name) if name == "bool" => Value::Bool(true),
            FieldType::Named(name) => self.sub_object_value(name),
            FieldType::Qualified { .. } | FieldType::Map { .. } => empty_mapping(),
        }
    }

    fn sub_object_value(&mut self, name: &str) -> Value {
        let Some(&sub_object) = self.sub_objects.get(name) else {
            tracing::debug!(type_name = %name, "no example for unknown type");
            return empty_mapping();
        };

        if self.stack.contains(&sub_object.name.as_str()) {
            tracing::debug!(type_name = %name, "not expanding recursive type");
            return empty_mapping();
        }

        self.stack.push(&sub_object.name);
        let object = self.object(&sub_object.fields);
        self.stack.pop();

        Value::Mapping(object)
    }
}

/// Parse an annotation value as YAML, keeping the raw string if it is not
fn parse_or_raw(raw: &str) -> Value {
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn empty_mapping() -> Value {
    Value::Mapping(Mapping::new())
}

/// Sort mapping keys recursively
fn sorted(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| sort_key(a).cmp(&sort_key(b)));
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sorted(value)))
                    .collect(),
            )
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

fn sort_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}
