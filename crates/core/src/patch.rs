//! Patch documents: ordered field-level edits applied to a DTO.
//!
//! A [`PatchDocument`] is the JSON-Patch (RFC 6902) array sent with a
//! `PATCH` request. Operations address top-level fields only, by JSON
//! pointer (`/occupancy`), and field names match case-insensitively so
//! `/Occupancy` and `/occupancy` hit the same field.
//!
//! Application works on a serialized copy of the target. The edited copy is
//! deserialized back into the target type at the end, so type mismatches
//! (a string written into a number field) surface as errors rather than
//! being silently coerced.
//!
//! Fields cannot disappear from a DTO. `remove`, and the source of a
//! `move`, reset the field to the zero value of its current JSON kind:
//! `""`, `0`, `false`, `[]` or `{}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::ModelErrors;

/// Key under which document-level failures are reported.
pub const DOCUMENT_KEY: &str = "patch";

/// A single patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    /// The pointer this operation writes to (or checks, for `test`).
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Move { path, .. }
            | PatchOperation::Copy { path, .. }
            | PatchOperation::Test { path, .. } => path,
        }
    }
}

/// An ordered list of patch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("'{0}' is not a valid JSON pointer")]
    InvalidPointer(String),

    #[error("Only top-level fields can be patched, got '{0}'")]
    UnsupportedPath(String),

    #[error("The target location '{0}' was not found")]
    UnknownField(String),

    #[error("The current value at '{0}' is not equal to the test value")]
    TestFailed(String),

    #[error("The patch target is not a JSON object")]
    NotAnObject,
}

impl PatchDocument {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Apply every operation in order to a JSON object, stopping at the
    /// first failure.
    ///
    /// On failure the object may hold the effects of the operations that
    /// ran before the failing one; callers work on a copy.
    pub fn apply(&self, target: &mut Map<String, Value>) -> Result<(), PatchError> {
        for op in &self.0 {
            apply_operation(target, op)?;
        }
        Ok(())
    }

    /// Apply the document to a copy of `target` and return the edited value.
    ///
    /// Failures are reported as [`ModelErrors`]: pointer problems under the
    /// field they name, everything else under [`DOCUMENT_KEY`].
    pub fn apply_to<T>(&self, target: &T) -> Result<T, ModelErrors>
    where
        T: Serialize + DeserializeOwned,
    {
        let value = serde_json::to_value(target)
            .map_err(|e| ModelErrors::single(DOCUMENT_KEY, e.to_string()))?;
        let Value::Object(mut object) = value else {
            return Err(ModelErrors::single(
                DOCUMENT_KEY,
                PatchError::NotAnObject.to_string(),
            ));
        };

        self.apply(&mut object)
            .map_err(|e| ModelErrors::single(error_field(&e), e.to_string()))?;

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ModelErrors::single(DOCUMENT_KEY, e.to_string()))
    }
}

fn apply_operation(
    target: &mut Map<String, Value>,
    op: &PatchOperation,
) -> Result<(), PatchError> {
    match op {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let key = resolve_field(target, path)?;
            target.insert(key, value.clone());
        }
        PatchOperation::Remove { path } => {
            let key = resolve_field(target, path)?;
            reset_field(target, key);
        }
        PatchOperation::Move { from, path } => {
            let from_key = resolve_field(target, from)?;
            let to_key = resolve_field(target, path)?;
            if from_key != to_key {
                let value = reset_field(target, from_key);
                target.insert(to_key, value);
            }
        }
        PatchOperation::Copy { from, path } => {
            let from_key = resolve_field(target, from)?;
            let to_key = resolve_field(target, path)?;
            let value = target.get(&from_key).cloned().unwrap_or(Value::Null);
            target.insert(to_key, value);
        }
        PatchOperation::Test { path, value } => {
            let key = resolve_field(target, path)?;
            let current = target.get(&key).unwrap_or(&Value::Null);
            if !values_equal(current, value) {
                return Err(PatchError::TestFailed(path.clone()));
            }
        }
    }
    Ok(())
}

/// Replace `key` with the zero value of its kind, returning the old value.
fn reset_field(target: &mut Map<String, Value>, key: String) -> Value {
    let old = target.get(&key).cloned().unwrap_or(Value::Null);
    target.insert(key, zero_value(&old));
    old
}

fn zero_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(_) => Value::Bool(false),
        Value::Number(n) if n.is_f64() => Value::from(0.0),
        Value::Number(_) => Value::from(0),
        Value::String(_) => Value::String(String::new()),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(_) => Value::Object(Map::new()),
    }
}

/// Resolve a single-segment JSON pointer to an existing key of `target`.
fn resolve_field(target: &Map<String, Value>, pointer: &str) -> Result<String, PatchError> {
    let Some(raw) = pointer.strip_prefix('/') else {
        return Err(PatchError::InvalidPointer(pointer.to_string()));
    };
    if raw.is_empty() || raw.contains('/') {
        return Err(PatchError::UnsupportedPath(pointer.to_string()));
    }
    let segment =
        unescape_segment(raw).ok_or_else(|| PatchError::InvalidPointer(pointer.to_string()))?;

    target
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&segment))
        .cloned()
        .ok_or_else(|| PatchError::UnknownField(pointer.to_string()))
}

/// Decode `~1` and `~0` escapes. Any other `~` sequence is invalid.
fn unescape_segment(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// JSON equality where `2` and `2.0` compare equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn error_field(err: &PatchError) -> String {
    match err {
        PatchError::InvalidPointer(p)
        | PatchError::UnsupportedPath(p)
        | PatchError::UnknownField(p)
        | PatchError::TestFailed(p) => p.trim_start_matches('/').to_lowercase(),
        PatchError::NotAnObject => DOCUMENT_KEY.to_string(),
    }
}
