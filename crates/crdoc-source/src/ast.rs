//! Parsed Go source files
//!
//! A source file is reduced to its package clause, package documentation
//! and type declarations. Types reuse the declaration structures of
//! `crdoc-core`.

use crdoc_core::TypeDecl;

/// A parsed Go source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    /// Name from the package clause
    pub package: String,
    /// Doc comment directly above the package clause
    pub doc: String,
    /// Type declarations in source order, exported or not
    pub types: Vec<TypeDecl>,
}

/// A single comment with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment source including the markers
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Nothing but whitespace precedes the comment on its first line
    pub own_line: bool,
}

/// Select the doc comment of a declaration starting on `decl_line`
///
/// The doc comment is the block of own-line comments that ends on the line
/// directly above the declaration without a blank line in between.
pub fn doc_comment(comments: &[Comment], decl_line: usize) -> String {
    let mut start = comments.len();
    let mut next_line = decl_line;

    while start > 0 {
        let comment = &comments[start - 1];
        if !comment.own_line || comment.end_line + 1 != next_line {
            break;
        }
        next_line = comment.start_line;
        start -= 1;
    }

    comment_text(&comments[start..])
}

/// Text of a comment group, without comment markers
///
/// Mirrors Go's `CommentGroup.Text`: `//` and one following space are
/// stripped, compiler directives are dropped, leading and trailing blank
/// lines are removed and runs of blank lines collapse into one.
pub fn comment_text(comments: &[Comment]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for comment in comments {
        if let Some(line) = comment.text.strip_prefix("//") {
            if is_directive(line) {
                continue;
            }
            lines.push(line.strip_prefix(' ').unwrap_or(line).to_string());
        } else if let Some(body) = comment
            .text
            .strip_prefix("/*")
            .and_then(|s| s.strip_suffix("*/"))
        {
            lines.extend(body.lines().map(str::to_string));
        }
    }

    let mut out = String::new();
    let mut pending_blank = false;
    for line in lines.iter().map(|line| line.trim_end()) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// `//go:generate`, `//line ...`, `//export ...` and friends
fn is_directive(line: &str) -> bool {
    if line.starts_with("line ") || line.starts_with("extern ") || line.starts_with("export ") {
        return true;
    }

    let Some((name, rest)) = line.split_once(':') else {
        return false;
    };
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
