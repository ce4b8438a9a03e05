// ABOUTME: Binding evaluator for template string leaves
// ABOUTME: Interprets value, format, array-expansion and compound bindings against a source tree

use serde_json::Value;
use tracing::{debug, trace};

use super::engine::TemplateEngine;
use super::error::{Result, TemplateError};
use super::format;
use super::query;
use super::scanner::{self, Expression, Segment};

/// Placed between joined tokens of a multi-valued path.
const SEPARATOR: &str = ", ";
/// Placed before the final joined token. Currently the same as `SEPARATOR`.
const LAST_SEPARATOR: &str = ", ";

/// Evaluate one string leaf into its output value.
pub fn evaluate(raw: &str, source: &Value, engine: &TemplateEngine<'_>) -> Result<Value> {
    trace!("Evaluating leaf '{}'", raw);

    match scanner::parse(raw)? {
        Expression::Literal(text) => Ok(Value::String(text)),
        Expression::Value { path } => select_value(source, path),
        Expression::ArrayExpand { path, template } => {
            expand_array(source, path, template, engine)
        }
        Expression::Compound(segments) => interpolate(source, &segments).map(Value::String),
    }
}

/// `{=path}`: one match keeps its native type, anything else becomes an array.
fn select_value(source: &Value, path: &str) -> Result<Value> {
    let mut matches = query::select_all(source, path)?;
    if matches.len() == 1 {
        Ok(matches.remove(0).clone())
    } else {
        Ok(Value::Array(matches.into_iter().cloned().collect()))
    }
}

/// `{array(path, template)}`: bind `template` once per element of the source array.
fn expand_array(
    source: &Value,
    path: &str,
    template_name: &str,
    engine: &TemplateEngine<'_>,
) -> Result<Value> {
    let template = engine.document().lookup(template_name)?;
    let matches = query::select_all(source, path)?;

    let items = match matches.as_slice() {
        [Value::Array(items)] => items,
        [] => return Err(not_an_array(path, "nothing".to_string())),
        [other] => return Err(not_an_array(path, query::kind_of(other).to_string())),
        many => return Err(not_an_array(path, format!("{} nodes", many.len()))),
    };

    debug!(
        "Expanding {} elements of '{}' with template '{}'",
        items.len(),
        path,
        template_name
    );

    items
        .iter()
        .map(|item| engine.transform(template, item))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn not_an_array(path: &str, found: String) -> TemplateError {
    TemplateError::StructuralMismatch {
        path: path.to_string(),
        expected: "an array",
        found,
    }
}

fn interpolate(source: &Value, segments: &[Segment<'_>]) -> Result<String> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Format { path, spec } => {
                let value = query::select_one(source, path)?;
                out.push_str(&format::format_value(value, spec)?);
            }
            Segment::Path(path) => out.push_str(&resolve_text(source, path)?),
        }
    }
    Ok(out)
}

/// Resolve a bare path to text, flattening array matches into their elements.
fn resolve_text(source: &Value, path: &str) -> Result<String> {
    let mut tokens: Vec<&Value> = Vec::new();
    for node in query::select_all(source, path)? {
        match node {
            Value::Array(items) => tokens.extend(items),
            other => tokens.push(other),
        }
    }

    match tokens.as_slice() {
        [] => Err(TemplateError::BindingResolution {
            binding: format!("{{{}}}", path),
            reason: "path matched no values".to_string(),
        }),
        [single] => Ok(format::to_text(single)),
        many => Ok(join(many)),
    }
}

fn join(tokens: &[&Value]) -> String {
    let mut out = String::new();
    let last = tokens.len().saturating_sub(1);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && i < last {
            out.push_str(SEPARATOR);
        } else if i > 0 {
            out.push_str(LAST_SEPARATOR);
        }
        out.push_str(&format::to_text(token));
    }
    out
}
