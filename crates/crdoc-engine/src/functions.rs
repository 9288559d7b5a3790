//! Template functions (global functions available in templates)

use minijinja::{Error, ErrorKind, Value};

/// Fail with a custom error message
///
/// Usage: {{ fail("no resources in " ~ group.version) }}
pub fn fail(message: String) -> Result<Value, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}

/// Create a dict from key-value pairs
///
/// Usage: {{ dict("kind", cr.kind, "scope", cr.scope) }}
pub fn dict(args: Vec<Value>) -> Result<Value, Error> {
    if !args.len().is_multiple_of(2) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "dict requires an even number of arguments (key-value pairs)",
        ));
    }

    let mut map = serde_json::Map::new();

    for chunk in args.chunks(2) {
        let key = chunk[0]
            .as_str()
            .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "dict keys must be strings"))?;
        let value: serde_json::Value = serde_json::to_value(&chunk[1])
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
        map.insert(key.to_string(), value);
    }

    Ok(Value::from_serialize(serde_json::Value::Object(map)))
}

/// Create a list from values
///
/// Usage: {{ list("a", "b", "c") }}
pub fn list(args: Vec<Value>) -> Value {
    Value::from(args)
}

/// Return first non-empty value
///
/// Usage: {{ coalesce(field.doc.sanitized, "No description") }}
pub fn coalesce(args: Vec<Value>) -> Value {
    for arg in args {
        if arg.is_undefined() || arg.is_none() {
            continue;
        }
        match arg.as_str() {
            Some("") => continue,
            _ => return arg,
        }
    }
    Value::UNDEFINED
}

/// Ternary operator
///
/// Usage: {{ ternary("yes", "no", field.is_required) }}
pub fn ternary(true_val: Value, false_val: Value, condition: Value) -> Value {
    if condition.is_true() {
        true_val
    } else {
        false_val
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Environment;

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        env.add_function("fail", fail);
        env.add_function("dict", dict);
        env.add_function("list", list);
        env.add_function("coalesce", coalesce);
        env.add_function("ternary", ternary);
        env
    }

    #[test]
    fn test_dict() {
        let result = env()
            .render_str(r#"{{ dict("kind", "Widget", "replicas", 3).kind }}"#, ())
            .unwrap();
        assert_eq!(result, "Widget");
    }

    #[test]
    fn test_dict_odd_arguments() {
        assert!(dict(vec![Value::from("key")]).is_err());
        assert!(dict(vec![Value::from(1), Value::from(2)]).is_err());
    }

    #[test]
    fn test_list() {
        let result = env()
            .render_str(r#"{{ list("a", "b") | join(",") }}"#, ())
            .unwrap();
        assert_eq!(result, "a,b");
    }

    #[test]
    fn test_coalesce() {
        let value = coalesce(vec![Value::UNDEFINED, Value::from(""), Value::from("found")]);
        assert_eq!(value.as_str(), Some("found"));
        assert!(coalesce(vec![Value::from(())]).is_undefined());
    }

    #[test]
    fn test_ternary() {
        let result = env()
            .render_str(r#"{{ ternary("yes", "no", flag) }}"#, minijinja::context! { flag => true })
            .unwrap();
        assert_eq!(result, "yes");

        let result = env()
            .render_str(r#"{{ ternary("yes", "no", flag) }}"#, minijinja::context! { flag => false })
            .unwrap();
        assert_eq!(result, "no");
    }

    #[test]
    fn test_fail() {
        let err = env().render_str(r#"{{ fail("stop here") }}"#, ()).unwrap_err();
        assert!(err.to_string().contains("stop here"));
    }
}
