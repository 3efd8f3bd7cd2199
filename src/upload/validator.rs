//! Field extraction primitives for loosely-typed upload documents.
//!
//! Every failure carries the dotted/bracketed path of the offending field
//! (e.g. `products[2].contain_articles[0]`), and list processing never stops
//! at the first bad element: a caller fixing an upload file gets every
//! defect reported in one pass.

use serde_json::Value;
use thiserror::Error;

/// One or more field-level upload failures, collected across a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.join("\n"))]
pub struct UploadError {
    pub errors: Vec<String>,
}

impl UploadError {
    pub fn attribute(context: &str, field: &str, problem: &str) -> Self {
        Self {
            errors: vec![attribute_message(context, field, problem)],
        }
    }
}

pub fn attribute_message(context: &str, field: &str, problem: &str) -> String {
    format!("attribute {context}.{field}: {problem}")
}

pub fn field<'a>(doc: &'a Value, name: &str, context: &str) -> Result<&'a Value, UploadError> {
    doc.get(name)
        .ok_or_else(|| UploadError::attribute(context, name, "not found"))
}

/// Integral JSON numbers and integer strings pass; decimal strings,
/// fractional numbers, booleans and null all fail.
pub fn numeric_field(doc: &Value, name: &str, context: &str) -> Result<i64, UploadError> {
    let value = field(doc, name, context)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| UploadError::attribute(context, name, "expected number"))
}

/// String values are trimmed of surrounding whitespace.
pub fn string_field(doc: &Value, name: &str, context: &str) -> Result<String, UploadError> {
    let value = field(doc, name, context)?;
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(UploadError::attribute(context, name, "expected string")),
    }
}

pub fn list_field<'a>(doc: &'a Value, name: &str, context: &str) -> Result<&'a [Value], UploadError> {
    let value = field(doc, name, context)?;
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| UploadError::attribute(context, name, "expected list"))
}

/// Apply `parse_item` to every element at `context[index]`. Failures from
/// all elements are merged into one aggregated error; parsing only succeeds
/// when every element does.
pub fn map_items<T>(
    items: &[Value],
    context: &str,
    mut parse_item: impl FnMut(&Value, &str) -> Result<T, UploadError>,
) -> Result<Vec<T>, UploadError> {
    let mut parsed = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match parse_item(item, &format!("{context}[{index}]")) {
            Ok(value) => parsed.push(value),
            Err(failure) => errors.extend(failure.errors),
        }
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(UploadError { errors })
    }
}

/// Keep the value and move any failure messages into `errors`, so sibling
/// fields of one item are all attempted before the item is rejected.
pub fn accumulate<T>(result: Result<T, UploadError>, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(failure) => {
            errors.extend(failure.errors);
            None
        }
    }
}
