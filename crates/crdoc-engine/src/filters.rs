//! Template filters
//!
//! These filters extend MiniJinja with the helpers documentation templates
//! reach for: serialization, quoting, indentation and name mangling.

use minijinja::{Error, ErrorKind, Value};

/// Convert a value to YAML format
///
/// Usage: {{ cr.fields | toyaml }}
pub fn toyaml(value: Value) -> Result<String, Error> {
    // Convert minijinja Value to serde_json::Value
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    let yaml = serde_yaml::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    // Remove trailing newline and leading "---\n" if present
    let yaml = yaml.trim_start_matches("---\n").trim_end();

    Ok(yaml.to_string())
}

/// Convert a value to JSON format
///
/// Usage: {{ cr.doc.annotations | tojson }}
pub fn tojson(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    serde_json::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Convert a value to pretty-printed JSON
///
/// Usage: {{ group | tojson_pretty }}
pub fn tojson_pretty(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    serde_json::to_string_pretty(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn as_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Quote a string with double quotes
///
/// Usage: {{ field.name | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let s = as_text(&value);
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote a string with single quotes
///
/// Usage: {{ field.name | squote }}
#[must_use]
pub fn squote(value: Value) -> String {
    format!("'{}'", as_text(&value).replace('\'', "''"))
}

/// Indent text with a newline prefix
///
/// Usage: {{ cr.example_yaml | nindent(4) }}
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    format!("\n{}", indent(value, spaces))
}

/// Indent every non-empty line
///
/// Usage: {{ cr.example_yaml | indent(4) }}
#[must_use]
pub fn indent(value: String, spaces: usize) -> String {
    let line_count = value.lines().count();
    let mut result = String::with_capacity(value.len() + spaces * line_count + line_count);

    let indent_str = " ".repeat(spaces);
    for (i, line) in value.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if !line.is_empty() {
            result.push_str(&indent_str);
        }
        result.push_str(line);
    }

    result
}

/// Check if a dict has a key
///
/// Usage: {% if cr.doc.annotations | haskey("kubebuilder:resource:shortName") %}
pub fn haskey(value: Value, key: String) -> bool {
    value
        .get_item(&Value::from(key))
        .map(|v| !v.is_undefined())
        .unwrap_or(false)
}

/// Get all keys from a dict
///
/// Usage: {{ cr.doc.annotations | keys | join(", ") }}
pub fn keys(value: Value) -> Result<Vec<String>, Error> {
    match value.try_iter() {
        Ok(iter) => Ok(iter
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect()),
        Err(_) => Err(Error::new(
            ErrorKind::InvalidOperation,
            "cannot get keys from non-mapping value",
        )),
    }
}

/// Truncate a string to at most `length` characters
///
/// Usage: {{ field.doc.sanitized | trunc(80) }}
pub fn trunc(value: String, length: usize) -> String {
    if value.chars().count() <= length {
        value
    } else {
        value.chars().take(length).collect()
    }
}

/// Trim prefix from a string
///
/// Usage: {{ field.type | trimprefix("[]") }}
pub fn trimprefix(value: String, prefix: String) -> String {
    value.strip_prefix(&prefix).unwrap_or(&value).to_string()
}

/// Trim suffix from a string
///
/// Usage: {{ name | trimsuffix("Spec") }}
pub fn trimsuffix(value: String, suffix: String) -> String {
    value.strip_suffix(&suffix).unwrap_or(&value).to_string()
}

/// Convert to snake_case
///
/// Usage: {{ cr.kind | snakecase }}
pub fn snakecase(value: String) -> String {
    let mut result = String::with_capacity(value.len() + value.len() / 4);
    let mut prev_upper = false;

    for (i, c) in value.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !prev_upper {
                result.push('_');
            }
            result.extend(c.to_lowercase());
            prev_upper = true;
        } else if c == '-' || c == ' ' {
            result.push('_');
            prev_upper = false;
        } else {
            result.push(c);
            prev_upper = false;
        }
    }

    result
}

/// Convert to kebab-case
///
/// Usage: {{ cr.kind | kebabcase }}
pub fn kebabcase(value: String) -> String {
    snakecase(value).replace('_', "-")
}

/// Markdown heading anchor, as rendered by GitHub
///
/// Lowercases, keeps alphanumerics, `-` and `_`, turns spaces into `-` and
/// drops everything else.
///
/// Usage: [{{ sub.name }}](#{{ sub.name | anchor }})
pub fn anchor(value: String) -> String {
    value
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toyaml() {
        let value = Value::from_serialize(serde_json::json!({
            "kind": "Widget",
            "replicas": 42
        }));
        let yaml = toyaml(value).unwrap();
        assert!(yaml.contains("kind: Widget"));
        assert!(yaml.contains("replicas: 42"));
        assert!(!yaml.ends_with('\n'));
    }

    #[test]
    fn test_tojson() {
        let value = Value::from_serialize(serde_json::json!({ "a": [1, 2] }));
        assert_eq!(tojson(value).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(Value::from("test")), "\"test\"");
        assert_eq!(quote(Value::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(squote(Value::from("it's")), "'it''s'");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\n\nb".to_string(), 2), "  a\n\n  b");
        assert_eq!(nindent("line1\nline2".to_string(), 4), "\n    line1\n    line2");
    }

    #[test]
    fn test_haskey() {
        let value = Value::from_serialize(serde_json::json!({ "kubebuilder:object:root": "true" }));
        assert!(haskey(value.clone(), "kubebuilder:object:root".to_string()));
        assert!(!haskey(value, "example".to_string()));
    }

    #[test]
    fn test_keys() {
        let value = Value::from_serialize(serde_json::json!({ "b": 1, "a": 2 }));
        let mut keys = keys(value).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(super::keys(Value::from(3)).is_err());
    }

    #[test]
    fn test_trunc() {
        assert_eq!(trunc("hello".to_string(), 3), "hel");
        assert_eq!(trunc("hi".to_string(), 10), "hi");
        assert_eq!(trunc("héllo".to_string(), 2), "hé");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trimprefix("[]Object".to_string(), "[]".to_string()), "Object");
        assert_eq!(trimsuffix("WidgetSpec".to_string(), "Spec".to_string()), "Widget");
        assert_eq!(trimsuffix("Widget".to_string(), "Spec".to_string()), "Widget");
    }

    #[test]
    fn test_snakecase() {
        assert_eq!(snakecase("camelCase".to_string()), "camel_case");
        assert_eq!(snakecase("PascalCase".to_string()), "pascal_case");
        assert_eq!(kebabcase("TestObjectSpec".to_string()), "test-object-spec");
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("TestObjectSpec".to_string()), "testobjectspec");
        assert_eq!(anchor("Widget (v1)".to_string()), "widget-v1");
        assert_eq!(anchor("spec.template_ref".to_string()), "spectemplate_ref");
    }
}
