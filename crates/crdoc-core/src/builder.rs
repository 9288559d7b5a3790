//! Model assembly
//!
//! Runs the whole pipeline for one package: package docs, classification,
//! graph resolution and example synthesis.

use crate::annotations::GROUP_NAME;
use crate::classify::classify;
use crate::decl::PackageDecl;
use crate::error::Result;
use crate::example::{ExampleSynthesizer, WordCursor};
use crate::model::{ApiGroup, DocumentationBlock, GroupVersion};
use crate::resolve::resolve;

/// Model builder
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    word_offset: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start example placeholder words at the given offset
    pub fn word_offset(mut self, offset: usize) -> Self {
        self.word_offset = offset;
        self
    }

    /// Build the API group model of a package
    pub fn build(&self, package: &PackageDecl) -> Result<ApiGroup> {
        let doc = DocumentationBlock::parse(&package.doc);
        let group_version = GroupVersion::new(
            doc.annotation(GROUP_NAME).unwrap_or_default(),
            package.name.clone(),
        );

        let _span = tracing::debug_span!("build", group_version = %group_version).entered();

        let classified = classify(&group_version, &package.types)?;
        tracing::debug!(
            crs = classified.crs.len(),
            sub_objects = classified.sub_objects.len(),
            "classified types"
        );

        let resolved = resolve(classified.crs, classified.sub_objects);
        let mut crs = resolved.crs;
        let sub_objects = resolved.sub_objects;

        let mut synthesizer =
            ExampleSynthesizer::with_cursor(&sub_objects, WordCursor::starting_at(self.word_offset));
        for cr in crs.iter_mut() {
            cr.example_yaml = synthesizer.example_yaml(cr)?;
        }

        tracing::info!(
            api_version = %group_version,
            crs = crs.len(),
            sub_objects = sub_objects.len(),
            "built API group model"
        );

        Ok(ApiGroup {
            api_version: group_version.to_string(),
            group_version,
            doc,
            crs,
            sub_objects,
        })
    }
}

/// Build the API group model of a package with default settings
pub fn build_api_group(package: &PackageDecl) -> Result<ApiGroup> {
    ModelBuilder::new().build(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{FieldDecl, TypeDecl, TypeExpr, ident};
    use crate::model::Scope;

    fn selector(package: &str, name: &str) -> TypeExpr {
        TypeExpr::Selector {
            package: package.to_string(),
            name: name.to_string(),
        }
    }

    /// The exported, documented part of `fixtures/testapi`
    fn test_package() -> PackageDecl {
        PackageDecl {
            name: "v1".to_string(),
            doc: "Package v1 contains test types.\n+groupName=test.example.io\n".to_string(),
            types: vec![
                TypeDecl::new("EmptyObject", vec![]),
                TypeDecl::new(
                    "Object",
                    vec![
                        FieldDecl::named("Field1", ident("string"), r#"json:"field1""#),
                        FieldDecl::named("Field2", ident("bool"), r#"json:"field2,omitempty""#),
                        FieldDecl::named("Field3", TypeExpr::Array(Box::new(ident("string"))), r#"json:"field3""#),
                        FieldDecl::named("Field4", ident("int"), r#"json:"field4""#),
                        FieldDecl::named("EmptyObject", ident("EmptyObject"), r#"json:"empty""#),
                        FieldDecl::named("Example", ident("string"), r#"json:"example""#)
                            .with_doc("+example=\"Test 123\"\n"),
                    ],
                )
                .with_doc("Object is a test object.\n"),
                TypeDecl::new(
                    "TestObject",
                    vec![
                        FieldDecl::embedded(selector("metav1", "TypeMeta"), r#"json:",inline""#),
                        FieldDecl::named("ObjectMeta", selector("metav1", "ObjectMeta"), r#"json:"metadata,omitempty""#),
                        FieldDecl::named("Spec", ident("TestObjectSpec"), r#"json:"spec""#),
                    ],
                )
                .with_doc("TestObject is the resource.\n+kubebuilder:object:root=true\n"),
                TypeDecl::new(
                    "TestObjectList",
                    vec![FieldDecl::named("Items", TypeExpr::Array(Box::new(ident("TestObject"))), r#"json:"items""#)],
                )
                .with_doc("+kubebuilder:object:root=true\n"),
                TypeDecl::new(
                    "TestObjectSpec",
                    vec![
                        FieldDecl::named("Object", ident("Object"), r#"json:"object""#),
                        FieldDecl::named("Objects", TypeExpr::Array(Box::new(ident("Object"))), r#"json:"objects""#),
                        FieldDecl::embedded(ident("Mixin"), r#"json:",inline""#),
                        FieldDecl::named("ExampleObj", ident("Object"), r#"json:"exampleObj""#)
                            .with_doc("+example={field1: apps/v1, field2: false}\n"),
                        FieldDecl::named("UID", selector("types", "UID"), r#"json:"uid""#),
                    ],
                )
                .with_doc("TestObjectSpec defines the desired state.\n"),
                TypeDecl::new(
                    "Mixin",
                    vec![FieldDecl::named("Shared", ident("string"), r#"json:"shared""#)
                        .with_doc("Shared is inlined.\n")],
                ),
                TypeDecl::new(
                    "Node",
                    vec![FieldDecl::named("Address", ident("string"), r#"json:"address""#)],
                )
                .with_doc("+kubebuilder:object:root=true\n+kubebuilder:resource:scope=Cluster\n"),
            ],
        }
    }

    #[test]
    fn test_build_group_version() {
        let group = build_api_group(&test_package()).unwrap();
        assert_eq!(group.group_version, GroupVersion::new("test.example.io", "v1"));
        assert_eq!(group.api_version, "test.example.io/v1");
        assert_eq!(group.doc.sanitized, "Package v1 contains test types.");
    }

    #[test]
    fn test_build_classifies_and_filters() {
        let group = build_api_group(&test_package()).unwrap();

        let kinds: Vec<&str> = group.crs.iter().map(|cr| cr.kind()).collect();
        assert_eq!(kinds, vec!["TestObject", "Node"]);
        assert_eq!(group.crs[1].scope, Scope::Cluster);

        let names: Vec<&str> = group.sub_objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Object", "TestObjectSpec"]);

        let spec = &group.sub_objects[1];
        let fields: Vec<&str> = spec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["object", "objects", "exampleObj", "uid", "shared"]);
        assert_eq!(spec.parents, vec!["TestObject"]);

        let object = &group.sub_objects[0];
        assert_eq!(object.parents, vec!["TestObjectSpec"; 3]);
    }

    #[test]
    fn test_build_backfills_field_docs() {
        let group = build_api_group(&test_package()).unwrap();

        let spec_field = &group.crs[0].fields[1];
        assert_eq!(spec_field.name, "spec");
        assert_eq!(spec_field.doc.sanitized, "TestObjectSpec defines the desired state.");

        let object_field = &group.sub_objects[1].fields[0];
        assert_eq!(object_field.doc.sanitized, "Object is a test object.");
    }

    #[test]
    fn test_build_examples() {
        let group = build_api_group(&test_package()).unwrap();

        insta::assert_snapshot!(group.crs[0].example_yaml, @r"
        apiVersion: test.example.io/v1
        kind: TestObject
        metadata:
          name: example
          namespace: default
        spec:
          exampleObj:
            field1: apps/v1
            field2: false
          object:
            empty: {}
            example: Test 123
            field1: lorem
            field2: true
            field3:
            - ipsum
            field4: 42
          objects:
          - empty: {}
            example: Test 123
            field1: dolor
            field2: true
            field3:
            - sit
            field4: 42
          shared: amet
          uid: {}
        ");

        // The word cursor continues across resources
        insta::assert_snapshot!(group.crs[1].example_yaml, @r"
        address: consetetur
        apiVersion: test.example.io/v1
        kind: Node
        metadata:
          name: example
        ");
    }

    #[test]
    fn test_word_offset() {
        let group = ModelBuilder::new()
            .word_offset(1)
            .build(&test_package())
            .unwrap();
        assert!(group.crs[1].example_yaml.contains("address: sadipscing"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_api_group(&test_package()).unwrap();
        let second = build_api_group(&test_package()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_without_group_name() {
        let mut package = test_package();
        package.doc = String::new();

        let group = build_api_group(&package).unwrap();
        assert_eq!(group.api_version, "v1");
        assert!(group.crs[0].example_yaml.contains("apiVersion: v1\n"));
    }
}
