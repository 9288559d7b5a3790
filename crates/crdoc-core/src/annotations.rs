//! Doc comment parsing
//!
//! Splits a raw comment into prose and code generator annotations
//! (`+kubebuilder:object:root=true`, `+optional`, ...).

use std::collections::BTreeMap;

use crate::model::DocumentationBlock;

/// Package annotation naming the API group (controller-gen)
pub const GROUP_NAME: &str = "groupName";

/// Marks the root type of a resource
pub const OBJECT_ROOT: &str = "kubebuilder:object:root";

/// Resource scope, `Cluster` or `Namespaced`
pub const RESOURCE_SCOPE: &str = "kubebuilder:resource:scope";

/// Field default applied during admission, YAML encoded
pub const DEFAULT_VALUE: &str = "kubebuilder:default";

/// Example value used in the generated example object, YAML encoded
pub const EXAMPLE: &str = "example";

/// Prefix of the compound `+kubebuilder:resource:k=v,k2=v2` annotation
const RESOURCE_PREFIX: &str = "kubebuilder:resource:";

const SCOPE_CLUSTER: &str = "Cluster";

impl DocumentationBlock {
    /// Parse a raw doc comment
    pub fn parse(raw: &str) -> Self {
        let mut sanitized = String::new();
        let mut annotations = BTreeMap::new();

        for line in raw.lines() {
            let line = line.trim();

            if is_todo(line) {
                continue;
            }

            if let Some(annotation) = line.strip_prefix('+') {
                insert_annotation(&mut annotations, annotation);
                continue;
            }

            sanitized.push_str(line);
            sanitized.push('\n');
        }

        Self {
            raw: raw.to_string(),
            sanitized: sanitized.trim().to_string(),
            annotations,
        }
    }

    /// Whether the type is marked as the root of a resource
    pub fn is_object_root(&self) -> bool {
        self.annotation(OBJECT_ROOT) == Some("true")
    }

    /// Whether the resource is cluster scoped
    pub fn is_cluster_scoped(&self) -> bool {
        self.annotation(RESOURCE_SCOPE) == Some(SCOPE_CLUSTER)
    }
}

fn is_todo(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("todo:"))
}

fn insert_annotation(annotations: &mut BTreeMap<String, String>, annotation: &str) {
    // +kubebuilder:resource:scope=Cluster,shortName=wd
    if let Some(args) = annotation.strip_prefix(RESOURCE_PREFIX)
        && args.contains('=')
    {
        for arg in args.split(',') {
            let (key, value) = split_pair(arg);
            annotations.insert(format!("{}{}", RESOURCE_PREFIX, key), value.to_string());
        }
        return;
    }

    let (key, value) = split_pair(annotation);
    annotations.insert(key.to_string(), value.to_string());
}

fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let doc = DocumentationBlock::parse("Widget is a thing.\nIt has parts.\n");
        assert_eq!(doc.sanitized, "Widget is a thing.\nIt has parts.");
        assert!(doc.annotations.is_empty());
        assert_eq!(doc.raw, "Widget is a thing.\nIt has parts.\n");
    }

    #[test]
    fn test_parse_drops_todos_in_any_case() {
        let doc = DocumentationBlock::parse(
            "Keep me.\nTODO: remove\ntodo: lower\nToDo: mixed\n  TODO: indented\n",
        );
        assert_eq!(doc.sanitized, "Keep me.");
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_todo_annotation_is_not_an_annotation() {
        let doc = DocumentationBlock::parse("TODO: +example=1\n");
        assert!(doc.sanitized.is_empty());
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_parse_annotations() {
        let doc = DocumentationBlock::parse(
            "Spec of the widget.\n+optional\n+kubebuilder:default=3\n+example={a: 1, b: x=y}\n",
        );
        assert_eq!(doc.sanitized, "Spec of the widget.");
        assert_eq!(doc.annotation("optional"), Some(""));
        assert_eq!(doc.annotation(DEFAULT_VALUE), Some("3"));
        // Only the first `=` splits
        assert_eq!(doc.annotation(EXAMPLE), Some("{a: 1, b: x=y}"));
    }

    #[test]
    fn test_parse_object_root() {
        let doc = DocumentationBlock::parse("+kubebuilder:object:root=true\n");
        assert!(doc.is_object_root());

        let doc = DocumentationBlock::parse("+kubebuilder:object:root=false\n");
        assert!(!doc.is_object_root());
    }

    #[test]
    fn test_parse_compound_resource_annotation() {
        let doc = DocumentationBlock::parse("+kubebuilder:resource:scope=Cluster,shortName=wd\n");
        assert_eq!(doc.annotation(RESOURCE_SCOPE), Some("Cluster"));
        assert_eq!(doc.annotation("kubebuilder:resource:shortName"), Some("wd"));
        assert!(doc.is_cluster_scoped());
    }

    #[test]
    fn test_parse_resource_flag_without_value() {
        let doc = DocumentationBlock::parse("+kubebuilder:resource:subresource\n");
        assert_eq!(doc.annotation("kubebuilder:resource:subresource"), Some(""));
        assert!(!doc.is_cluster_scoped());
    }

    #[test]
    fn test_last_annotation_wins() {
        let doc = DocumentationBlock::parse("+example=1\n+example=2\n");
        assert_eq!(doc.annotation(EXAMPLE), Some("2"));
    }

    #[test]
    fn test_annotation_lines_never_sanitized() {
        let raw = "Intro.\n\n+groupName=example.io\nMiddle.\n+kubebuilder:object:generate=true\nOutro.\n";
        let doc = DocumentationBlock::parse(raw);
        assert_eq!(doc.sanitized, "Intro.\n\nMiddle.\nOutro.");
        assert!(!doc.sanitized.contains('+'));
        assert_eq!(doc.annotation(GROUP_NAME), Some("example.io"));
        assert_eq!(doc.annotation("kubebuilder:object:generate"), Some("true"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "Text.\n+a=b\nTODO: x\n";
        assert_eq!(DocumentationBlock::parse(raw), DocumentationBlock::parse(raw));
    }
}
