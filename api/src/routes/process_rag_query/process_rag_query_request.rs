use contextor::DEFAULT_TOP_K;
use serde_json::{Map, Value};

use crate::error_handler::{AppError, AppResult};

/// Parsed payload for `/process_rag_query`.
///
/// The body is read as raw JSON rather than through `Json<T>` so that
/// malformed input takes the same path as any other processing failure
/// instead of axum's rejection responses.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRagQueryRequest {
    /// Natural language question; may be empty here, validated by the handler.
    pub question: String,
    /// Number of passages to retrieve.
    pub top_k: usize,
}

impl ProcessRagQueryRequest {
    /// Decodes the body and extracts `question` and `top_k`.
    ///
    /// - `question`: absent or falsy (`null`, `false`, `0`, `[]`, `{}`) → `""`;
    ///   any other non-string → error.
    /// - `top_k`: absent → 3; otherwise coerced with [`coerce_top_k`].
    ///
    /// # Errors
    /// [`AppError::InvalidBody`] for non-JSON, non-object bodies and
    /// uncoercible fields.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::InvalidBody(format!("invalid JSON body: {e}")))?;

        let Value::Object(fields) = value else {
            return Err(AppError::InvalidBody(
                "request body must be a JSON object".into(),
            ));
        };

        Ok(Self {
            question: question_field(&fields)?,
            top_k: match fields.get("top_k") {
                None => DEFAULT_TOP_K,
                Some(v) => coerce_top_k(v)?,
            },
        })
    }
}

fn question_field(fields: &Map<String, Value>) -> AppResult<String> {
    match fields.get("question") {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v) if is_falsy(v) => Ok(String::new()),
        Some(other) => Err(AppError::InvalidBody(format!(
            "'question' must be a string, got {}",
            type_name(other)
        ))),
    }
}

/// `null`, `false`, zero and empty containers count as an absent value.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Integer coercion for `top_k`.
///
/// Accepts integers, floats (truncated toward zero), booleans (`true` = 1)
/// and strings holding an integer. The result must be non-negative.
pub fn coerce_top_k(value: &Value) -> AppResult<usize> {
    let n: i128 = match value {
        Value::Bool(b) => i128::from(*b),
        Value::Number(num) => {
            if let Some(u) = num.as_u64() {
                i128::from(u)
            } else if let Some(i) = num.as_i64() {
                i128::from(i)
            } else {
                // Finite by construction: JSON has no NaN/Infinity.
                num.as_f64().map(|f| f.trunc() as i128).unwrap_or(-1)
            }
        }
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| {
            AppError::InvalidBody(format!("invalid literal for 'top_k': {s:?}"))
        })?,
        other => {
            return Err(AppError::InvalidBody(format!(
                "'top_k' must be an integer, got {}",
                type_name(other)
            )));
        }
    };

    if n < 0 {
        return Err(AppError::InvalidBody(format!(
            "'top_k' must be non-negative, got {n}"
        )));
    }
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
