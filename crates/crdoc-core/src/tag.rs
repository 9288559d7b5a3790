//! Struct tag handling
//!
//! Struct tags follow the Go convention: space separated `key:"value"`
//! pairs where the value is a quoted string.

/// Look up the value stored under `key` in a raw struct tag
pub fn lookup<'a>(tag: &'a str, key: &str) -> Option<String> {
    let mut rest: &'a str = tag;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        let name_end = rest
            .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
            .unwrap_or(rest.len());
        if name_end == 0 || !rest[name_end..].starts_with(":\"") {
            return None;
        }
        let name = &rest[..name_end];
        rest = &rest[name_end + 1..];

        let quoted_end = closing_quote(rest)?;
        let quoted = &rest[..=quoted_end];
        rest = &rest[quoted_end + 1..];

        if name == key {
            return Some(unquote(quoted));
        }
    }
}

/// Byte index of the quote closing the string starting at `s[0]`
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() && bytes[i] != b'"' {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    (i < bytes.len()).then_some(i)
}

fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// The `json` struct tag: name plus options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTag {
    pub name: String,
    pub options: Vec<String>,
}

impl JsonTag {
    /// Extract the `json` tag from a raw struct tag
    ///
    /// Returns `None` when there is no `json` key or its value is empty.
    pub fn from_struct_tag(tag: &str) -> Option<Self> {
        let value = lookup(tag, "json")?;
        if value.is_empty() {
            return None;
        }

        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        let options = parts.map(str::to_string).collect();
        Some(Self { name, options })
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_inline(&self) -> bool {
        self.has_option("inline")
    }

    pub fn is_omit_empty(&self) -> bool {
        self.has_option("omitempty")
    }

    /// `json:"-"` excludes the field from the serialized form
    pub fn is_excluded(&self) -> bool {
        self.name == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let tag = r#"json:"spec,omitempty" protobuf:"bytes,2,opt,name=spec""#;
        assert_eq!(lookup(tag, "json").as_deref(), Some("spec,omitempty"));
        assert_eq!(lookup(tag, "protobuf").as_deref(), Some("bytes,2,opt,name=spec"));
        assert_eq!(lookup(tag, "yaml"), None);
    }

    #[test]
    fn test_lookup_escaped_quote() {
        let tag = r#"doc:"say \"hi\"" json:"x""#;
        assert_eq!(lookup(tag, "doc").as_deref(), Some("say \"hi\""));
        assert_eq!(lookup(tag, "json").as_deref(), Some("x"));
    }

    #[test]
    fn test_lookup_malformed() {
        assert_eq!(lookup("json", "json"), None);
        assert_eq!(lookup(r#"json:"unterminated"#, "json"), None);
        assert_eq!(lookup("", "json"), None);
    }

    #[test]
    fn test_json_tag() {
        let tag = JsonTag::from_struct_tag(r#"json:"replicas,omitempty""#).unwrap();
        assert_eq!(tag.name, "replicas");
        assert!(tag.is_omit_empty());
        assert!(!tag.is_inline());

        let tag = JsonTag::from_struct_tag(r#"json:",inline""#).unwrap();
        assert_eq!(tag.name, "");
        assert!(tag.is_inline());

        let tag = JsonTag::from_struct_tag(r#"json:"-""#).unwrap();
        assert!(tag.is_excluded());
    }

    #[test]
    fn test_json_tag_missing_or_empty() {
        assert_eq!(JsonTag::from_struct_tag(r#"yaml:"x""#), None);
        assert_eq!(JsonTag::from_struct_tag(r#"json:"""#), None);
    }

    #[test]
    fn test_option_match_is_exact() {
        let tag = JsonTag::from_struct_tag(r#"json:"inlined""#).unwrap();
        assert!(!tag.is_inline());
    }
}
