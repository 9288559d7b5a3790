//! Go source parser
//!
//! Parses Go source files into package and type declarations using pest.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crdoc_core::{FieldDecl, TypeDecl, TypeExpr};

use crate::ast::{Comment, SourceFile, doc_comment};

#[derive(Parser)]
#[grammar = "go_types.pest"]
struct GoTypesParser;

/// Parser error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Pest(Box<pest::error::Error<Rule>>),

    #[error("Type {name} at line {line} declares type parameters, which are not supported")]
    TypeParameters { name: String, line: usize },

    #[error("Expected {expected} in {rule:?}")]
    Missing { expected: &'static str, rule: Rule },
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        ParseError::Pest(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse a Go source file
pub fn parse(input: &str) -> Result<SourceFile> {
    let file = GoTypesParser::parse(Rule::file, input)?
        .next()
        .ok_or(ParseError::Missing {
            expected: "source file",
            rule: Rule::file,
        })?;

    let mut source = SourceFile::default();
    let mut pending_doc: Vec<Comment> = Vec::new();

    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::doc => pending_doc = comments(pair, input),
            Rule::package_clause => {
                source.doc = doc_comment(&pending_doc, start_line(&pair));
                source.package = first_inner(pair, Rule::ident, "package name")?
                    .as_str()
                    .to_string();
            }
            Rule::type_decl => {
                let decl_doc = doc_comment(&pending_doc, start_line(&pair));
                source.types.extend(parse_type_decl(pair, input, decl_doc)?);
            }
            _ => {}
        }
    }

    Ok(source)
}

fn parse_type_decl(pair: Pair<Rule>, input: &str, decl_doc: String) -> Result<Vec<TypeDecl>> {
    let mut specs = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::type_spec => specs.push(parse_type_spec(inner, input, String::new())?),
            Rule::type_group_spec => {
                let mut spec_comments = Vec::new();
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::doc => spec_comments = comments(part, input),
                        Rule::type_spec => {
                            let doc = doc_comment(&spec_comments, start_line(&part));
                            specs.push(parse_type_spec(part, input, doc)?);
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    // The declaration's own doc applies to a lone type
    if specs.len() == 1 && specs[0].doc.is_empty() {
        specs[0].doc = decl_doc;
    }

    Ok(specs)
}

fn parse_type_spec(pair: Pair<Rule>, input: &str, doc: String) -> Result<TypeDecl> {
    let mut name = None;
    let mut fields = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = Some(inner.as_str().to_string()),
            Rule::type_params => {
                return Err(ParseError::TypeParameters {
                    name: name.unwrap_or_default(),
                    line: start_line(&inner),
                });
            }
            Rule::type_expr => {
                if let Some(body) = inner.into_inner().next()
                    && body.as_rule() == Rule::struct_type
                {
                    fields = parse_struct_fields(body, input)?;
                }
            }
            _ => {}
        }
    }

    Ok(TypeDecl {
        name: name.ok_or(ParseError::Missing {
            expected: "type name",
            rule: Rule::type_spec,
        })?,
        doc,
        fields,
    })
}

fn parse_struct_fields(pair: Pair<Rule>, input: &str) -> Result<Vec<FieldDecl>> {
    let mut fields = Vec::new();

    for field in pair.into_inner().filter(|p| p.as_rule() == Rule::field_decl) {
        let mut field_comments = Vec::new();
        let mut doc = String::new();
        let mut idents = Vec::new();
        let mut expr = None;
        let mut tag = None;

        for part in field.into_inner() {
            match part.as_rule() {
                Rule::doc => field_comments = comments(part, input),
                Rule::named_field => {
                    doc = doc_comment(&field_comments, start_line(&part));
                    for inner in part.into_inner() {
                        match inner.as_rule() {
                            Rule::ident => idents.push(inner.as_str().to_string()),
                            Rule::type_expr => expr = Some(parse_type_expr(inner)?),
                            _ => {}
                        }
                    }
                }
                Rule::embedded_field => {
                    doc = doc_comment(&field_comments, start_line(&part));
                    expr = Some(parse_embedded(part)?);
                }
                Rule::tag => tag = Some(parse_tag(part)),
                _ => {}
            }
        }

        let expr = expr.ok_or(ParseError::Missing {
            expected: "field type",
            rule: Rule::field_decl,
        })?;

        if idents.is_empty() {
            fields.push(FieldDecl {
                ident: None,
                expr,
                tag,
                doc,
            });
        } else {
            for ident in idents {
                fields.push(FieldDecl {
                    ident: Some(ident),
                    expr: expr.clone(),
                    tag: tag.clone(),
                    doc: doc.clone(),
                });
            }
        }
    }

    Ok(fields)
}

fn parse_embedded(pair: Pair<Rule>) -> Result<TypeExpr> {
    let mut pointer = false;
    let mut expr = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::embedded_pointer => pointer = true,
            Rule::qualified_ident => expr = Some(parse_qualified(inner)?),
            Rule::ident => expr = Some(TypeExpr::Ident(inner.as_str().to_string())),
            _ => {}
        }
    }

    let expr = expr.ok_or(ParseError::Missing {
        expected: "embedded type",
        rule: Rule::embedded_field,
    })?;

    Ok(if pointer {
        TypeExpr::Pointer(Box::new(expr))
    } else {
        expr
    })
}

/// Convert a `type_expr` pair
fn parse_type_expr(pair: Pair<Rule>) -> Result<TypeExpr> {
    let rule = pair.as_rule();
    let inner = pair.into_inner().next().ok_or(ParseError::Missing {
        expected: "type expression",
        rule,
    })?;

    match inner.as_rule() {
        Rule::ident => Ok(TypeExpr::Ident(inner.as_str().to_string())),
        Rule::qualified_ident => parse_qualified(inner),
        Rule::pointer_type => Ok(TypeExpr::Pointer(Box::new(nested_type_expr(inner)?))),
        Rule::array_type => Ok(TypeExpr::Array(Box::new(nested_type_expr(inner)?))),
        Rule::paren_type => nested_type_expr(inner),
        Rule::map_type => {
            let inner_rule = inner.as_rule();
            let mut exprs = inner.into_inner().filter(|p| p.as_rule() == Rule::type_expr);
            let (Some(key), Some(value)) = (exprs.next(), exprs.next()) else {
                return Err(ParseError::Missing {
                    expected: "map key and value types",
                    rule: inner_rule,
                });
            };
            Ok(TypeExpr::Map {
                key: Box::new(parse_type_expr(key)?),
                value: Box::new(parse_type_expr(value)?),
            })
        }
        _ => Ok(TypeExpr::Unsupported(collapse_whitespace(inner.as_str()))),
    }
}

/// The single `type_expr` child of a wrapping type
fn nested_type_expr(pair: Pair<Rule>) -> Result<TypeExpr> {
    parse_type_expr(first_inner(pair, Rule::type_expr, "element type")?)
}

fn parse_qualified(pair: Pair<Rule>) -> Result<TypeExpr> {
    let mut idents = pair.into_inner().map(|p| p.as_str().to_string());
    match (idents.next(), idents.next()) {
        (Some(package), Some(name)) => Ok(TypeExpr::Selector { package, name }),
        _ => Err(ParseError::Missing {
            expected: "package qualified name",
            rule: Rule::qualified_ident,
        }),
    }
}

/// Struct tag without its quotes
fn parse_tag(pair: Pair<Rule>) -> String {
    let text = pair.as_str();
    if let Some(raw) = text.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return raw.to_string();
    }

    let quoted = text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text);
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn comments(doc: Pair<Rule>, input: &str) -> Vec<Comment> {
    doc.into_inner()
        .filter(|p| p.as_rule() == Rule::comment)
        .map(|comment| {
            let span = comment.as_span();
            let start = span.start();
            let line_start = input[..start].rfind('\n').map_or(0, |i| i + 1);
            Comment {
                text: comment.as_str().to_string(),
                start_line: span.start_pos().line_col().0,
                end_line: span.end_pos().line_col().0,
                own_line: input[line_start..start].trim().is_empty(),
            }
        })
        .collect()
}

fn start_line(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}

fn first_inner<'i>(pair: Pair<'i, Rule>, rule: Rule, expected: &'static str) -> Result<Pair<'i, Rule>> {
    let parent = pair.as_rule();
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .ok_or(ParseError::Missing {
            expected,
            rule: parent,
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
