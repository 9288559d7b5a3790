//! Fuzzy matching and context-aware suggestions for template errors
//!
//! Uses Levenshtein distance to point template authors at the filter,
//! function or model key they most likely meant.

use serde_json::Value as JsonValue;

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// All registered filters in the engine
pub const AVAILABLE_FILTERS: &[&str] = &[
    // Custom crdoc filters
    "toyaml",
    "tojson",
    "tojson_pretty",
    "quote",
    "squote",
    "nindent",
    "indent",
    "haskey",
    "keys",
    "trunc",
    "trimprefix",
    "trimsuffix",
    "snakecase",
    "kebabcase",
    "anchor",
    // Built-in MiniJinja filters
    "default",
    "upper",
    "lower",
    "title",
    "capitalize",
    "replace",
    "trim",
    "join",
    "first",
    "last",
    "length",
    "reverse",
    "sort",
    "unique",
    "map",
    "select",
    "reject",
    "selectattr",
    "rejectattr",
    "batch",
    "slice",
    "dictsort",
    "items",
    "attr",
    "int",
    "float",
    "abs",
    "round",
    "string",
    "list",
    "bool",
    "safe",
    "escape",
    "e",
    "urlencode",
];

/// All registered functions in the engine
pub const AVAILABLE_FUNCTIONS: &[&str] = &[
    // Custom crdoc functions
    "fail",
    "dict",
    "list",
    "coalesce",
    "ternary",
    // Built-in MiniJinja globals
    "range",
    "lipsum",
    "cycler",
    "joiner",
    "namespace",
];

/// Top-level context variables always available in templates
pub const CONTEXT_VARIABLES: &[&str] =
    &["group", "version", "api_version", "doc", "crs", "sub_objects"];

/// Suggestion result with confidence scoring
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggested correction
    pub text: String,
    /// Levenshtein distance (lower = better match)
    pub distance: usize,
    pub category: SuggestionCategory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuggestionCategory {
    Variable,
    Filter,
    Function,
    Property,
}

/// Find closest matches from a list of candidates
pub fn find_closest_matches(
    input: &str,
    candidates: &[&str],
    max_results: usize,
    category: SuggestionCategory,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = strsim::levenshtein(input, candidate);
            (distance > 0 && distance <= MAX_SUGGESTION_DISTANCE).then(|| Suggestion {
                text: candidate.to_string(),
                distance,
                category,
            })
        })
        .collect();

    // Best matches first
    suggestions.sort_by_key(|s| s.distance);
    suggestions.truncate(max_results);
    suggestions
}

fn did_you_mean(matches: &[Suggestion], prefix: Option<&str>) -> Option<String> {
    if matches.is_empty() {
        return None;
    }
    let quoted: Vec<String> = matches
        .iter()
        .map(|m| match prefix {
            Some(prefix) => format!("`{}.{}`", prefix, m.text),
            None => format!("`{}`", m.text),
        })
        .collect();
    Some(format!("Did you mean {}?", quoted.join(" or ")))
}

/// Suggest corrections for an undefined variable or model path
///
/// `context` is the serialized template context; dotted paths are followed
/// through it to find the first missing key.
pub fn suggest_undefined_variable(expression: &str, context: Option<&JsonValue>) -> Option<String> {
    let mut parts = expression.split('.').map(str::trim);
    let root = parts.next().filter(|s| !s.is_empty())?;

    let Some(mut current) = context.and_then(|ctx| ctx.get(root)) else {
        let matches =
            find_closest_matches(root, CONTEXT_VARIABLES, 1, SuggestionCategory::Variable);
        return did_you_mean(&matches, None).or_else(|| {
            Some(format!(
                "Variable `{}` is not defined. Available: {}",
                root,
                CONTEXT_VARIABLES.join(", ")
            ))
        });
    };

    let mut valid = vec![root];
    for part in parts {
        match current.get(part) {
            Some(next) => {
                valid.push(part);
                current = next;
            }
            None => return suggest_available_properties(&valid.join("."), part, current),
        }
    }

    None
}

/// Suggest available properties when accessing an undefined key
pub fn suggest_available_properties(
    parent_path: &str,
    attempted_key: &str,
    parent: &JsonValue,
) -> Option<String> {
    let available: Vec<&str> = parent.as_object()?.keys().map(String::as_str).collect();

    let matches =
        find_closest_matches(attempted_key, &available, 3, SuggestionCategory::Property);

    match did_you_mean(&matches, Some(parent_path)) {
        Some(hint) => Some(format!("{} Available: {}", hint, available.join(", "))),
        None => Some(format!(
            "Key `{}` not found in `{}`. Available keys: {}",
            attempted_key,
            parent_path,
            available.join(", ")
        )),
    }
}

/// Suggest corrections for an unknown filter
pub fn suggest_unknown_filter(filter_name: &str) -> Option<String> {
    let matches = find_closest_matches(filter_name, AVAILABLE_FILTERS, 3, SuggestionCategory::Filter);

    did_you_mean(&matches, None).or_else(|| {
        Some(format!(
            "Unknown filter `{}`. Common filters: toyaml, indent, anchor, default, join",
            filter_name
        ))
    })
}

/// Suggest corrections for an unknown function
pub fn suggest_unknown_function(func_name: &str) -> Option<String> {
    let matches =
        find_closest_matches(func_name, AVAILABLE_FUNCTIONS, 3, SuggestionCategory::Function);

    did_you_mean(&matches, None).or_else(|| {
        Some(format!(
            "Unknown function `{}`. Available functions: {}",
            func_name,
            AVAILABLE_FUNCTIONS.join(", ")
        ))
    })
}

/// Generate a type-specific hint for iteration errors
pub fn suggest_iteration_fix(type_name: &str) -> String {
    match type_name {
        "object" | "map" => {
            "Objects require `| dictsort` to iterate: `{% for key, value in obj | dictsort %}`"
                .to_string()
        }
        "null" | "none" => {
            "Value is null/undefined. Check that it exists or use `| default([])` for empty list"
                .to_string()
        }
        _ => format!(
            "Value of type `{}` is not iterable. Use a list or add `| dictsort` for objects",
            type_name
        ),
    }
}

/// Extract a quoted name from an error message
pub fn extract_quoted_name(msg: &str) -> Option<String> {
    // Pattern: "unknown filter `foo`" or "variable 'foo' is undefined"
    let patterns = [("`", "`"), ("'", "'"), ("\"", "\"")];

    for (start, end) in patterns {
        if let Some(start_idx) = msg.find(start) {
            let rest = &msg[start_idx + start.len()..];
            if let Some(end_idx) = rest.find(end) {
                return Some(rest[..end_idx].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> JsonValue {
        serde_json::json!({
            "group": {
                "group": "test.example.io",
                "version": "v1",
                "crs": [],
                "sub_objects": []
            },
            "version": "v1",
            "crs": []
        })
    }

    #[test]
    fn test_find_closest_matches() {
        let matches =
            find_closest_matches("toyml", AVAILABLE_FILTERS, 3, SuggestionCategory::Filter);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].text, "toyaml");
        assert_eq!(matches[0].distance, 1);
    }

    #[test]
    fn test_suggest_undefined_root() {
        let suggestion = suggest_undefined_variable("grop", Some(&context())).unwrap();
        assert_eq!(suggestion, "Did you mean `group`?");

        let suggestion = suggest_undefined_variable("values", Some(&context())).unwrap();
        assert!(suggestion.contains("Available: group"));
    }

    #[test]
    fn test_suggest_undefined_property() {
        let suggestion = suggest_undefined_variable("group.crds", Some(&context())).unwrap();
        assert!(suggestion.starts_with("Did you mean `group.crs`?"));
        assert!(suggestion.contains("sub_objects"));
    }

    #[test]
    fn test_suggest_unknown_filter() {
        let suggestion = suggest_unknown_filter("anchr").unwrap();
        assert!(suggestion.contains("`anchor`"));
    }

    #[test]
    fn test_suggest_unknown_function() {
        let suggestion = suggest_unknown_function("ternery").unwrap();
        assert!(suggestion.contains("`ternary`"));
    }

    #[test]
    fn test_extract_quoted_name() {
        assert_eq!(
            extract_quoted_name("unknown filter `toyml`"),
            Some("toyml".to_string())
        );
        assert_eq!(
            extract_quoted_name("variable 'bar' is undefined"),
            Some("bar".to_string())
        );
    }
}
