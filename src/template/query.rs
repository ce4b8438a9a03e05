// ABOUTME: Path query adapter over jsonpath_lib for resolving binding paths
// ABOUTME: Accepts dotted template paths as well as rooted JSONPath expressions

use serde_json::Value;
use std::borrow::Cow;

use super::error::{Result, TemplateError};

/// Root a template path so it can be handed to the JSONPath engine.
///
/// `user.age` becomes `$.user.age`, `[0].name` becomes `$[0].name`, and an
/// empty path selects the root itself.
pub fn normalize(path: &str) -> Cow<'_, str> {
    let path = path.trim();
    if path.is_empty() {
        Cow::Borrowed("$")
    } else if path.starts_with('$') {
        Cow::Borrowed(path)
    } else if path.starts_with('[') {
        Cow::Owned(format!("${}", path))
    } else {
        Cow::Owned(format!("$.{}", path))
    }
}

/// Select every node matching `path`, in document order.
pub fn select_all<'a>(source: &'a Value, path: &str) -> Result<Vec<&'a Value>> {
    let query = normalize(path);
    jsonpath_lib::select(source, &query).map_err(|e| TemplateError::InvalidPath {
        path: path.trim().to_string(),
        reason: e.to_string(),
    })
}

/// Select at most one node matching `path`.
pub fn select_one<'a>(source: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    let mut matches = select_all(source, path)?;
    match matches.len() {
        0 | 1 => Ok(matches.pop()),
        n => Err(TemplateError::BindingResolution {
            binding: path.trim().to_string(),
            reason: format!("path returned {} nodes where one was expected", n),
        }),
    }
}

/// Short name of a node's type, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
