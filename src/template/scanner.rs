// ABOUTME: Scanner for the binding mini-language embedded in template string leaves
// ABOUTME: Finds non-nesting {...} spans and classifies a leaf into one binding form

use super::error::{Result, TemplateError};

const VALUE_PREFIX: &str = "{=";
const ARRAY_PREFIX: &str = "{array(";
const ARRAY_SUFFIX: &str = ")}";
const FORMAT_PREFIX: &str = "format(";

/// A `{...}` span inside a leaf, braces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Span<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// The expression between the braces.
    pub fn inner(&self) -> &'a str {
        &self.text[1..self.text.len() - 1]
    }
}

/// One piece of a compound string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(String),
    Path(&'a str),
    Format { path: &'a str, spec: &'a str },
}

/// A classified string leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'a> {
    /// No bindings at all.
    Literal(String),
    /// `{=path}`: the whole leaf selects a natively typed value.
    Value { path: &'a str },
    /// `{array(path, template)}`: one output element per source element.
    ArrayExpand { path: &'a str, template: &'a str },
    /// Text interleaved with path and format bindings; always yields a string.
    Compound(Vec<Segment<'a>>),
}

/// Replace escaped braces with bare ones, wherever they occur.
pub fn unescape(text: &str) -> String {
    text.replace("\\{", "{").replace("\\}", "}")
}

/// Find the non-overlapping spans of `text`.
///
/// A span opens at a `{` that is not preceded by `\` and closes at the first
/// `}` after it. Spans never nest.
pub fn scan(text: &str) -> Vec<Span<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'{' || (pos > 0 && bytes[pos - 1] == b'\\') {
            pos += 1;
            continue;
        }
        match text[pos..].find('}') {
            Some(offset) => {
                let end = pos + offset + 1;
                spans.push(Span {
                    start: pos,
                    text: &text[pos..end],
                });
                pos = end;
            }
            None => break,
        }
    }

    spans
}

/// Classify a raw leaf into the binding form it uses.
pub fn parse(raw: &str) -> Result<Expression<'_>> {
    if raw.len() <= 2 {
        return Ok(Expression::Literal(unescape(raw)));
    }

    if raw.starts_with(VALUE_PREFIX) && raw.find('}') == Some(raw.len() - 1) {
        return Ok(Expression::Value {
            path: &raw[VALUE_PREFIX.len()..raw.len() - 1],
        });
    }

    let is_array = raw
        .get(..ARRAY_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ARRAY_PREFIX));
    if is_array && raw.ends_with(ARRAY_SUFFIX) {
        return parse_array(raw);
    }

    let spans = scan(raw);
    if spans.is_empty() {
        return Ok(Expression::Literal(unescape(raw)));
    }

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut start = 0;
    for span in spans {
        if span.start > start {
            segments.push(Segment::Text(unescape(&raw[start..span.start])));
        }
        segments.push(parse_span(span)?);
        start = span.end();
    }
    if start < raw.len() {
        segments.push(Segment::Text(unescape(&raw[start..])));
    }

    Ok(Expression::Compound(segments))
}

fn parse_array(raw: &str) -> Result<Expression<'_>> {
    let args = &raw[ARRAY_PREFIX.len()..raw.len() - ARRAY_SUFFIX.len()];
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    match parts.as_slice() {
        &[path, template] if !template.is_empty() => Ok(Expression::ArrayExpand {
            path,
            template,
        }),
        [_, _] => Err(TemplateError::InvalidBinding {
            binding: raw.to_string(),
            reason: "array() template name is empty".to_string(),
        }),
        _ => Err(TemplateError::InvalidBinding {
            binding: raw.to_string(),
            reason: format!(
                "array() takes exactly 2 arguments (path, templateName), got {}",
                parts.len()
            ),
        }),
    }
}

fn parse_span(span: Span<'_>) -> Result<Segment<'_>> {
    let inner = span.inner();

    if inner.starts_with(FORMAT_PREFIX) && inner.ends_with(')') {
        let args = &inner[FORMAT_PREFIX.len()..inner.len() - 1];
        // The format string is everything after the last comma.
        return match args.rfind(',') {
            Some(idx) if idx > 0 => Ok(Segment::Format {
                path: &args[..idx],
                spec: args[idx + 1..].trim_matches(' '),
            }),
            _ => Err(TemplateError::MissingFormatArgument {
                binding: span.text.to_string(),
            }),
        };
    }

    Ok(Segment::Path(inner))
}
