//! Priority-ordered value normalizers.
//!
//! A [`NormalizerChain`] holds an ordered list of [`Normalize`] handlers. When a
//! value needs to become a given [`ValueKind`], handlers are tried from the
//! highest priority down; the first one that returns `Some` wins. If none
//! applies, the value passes through unchanged and conversion decides.

use crate::value::Value;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The shape of a [`Value`], or of the value a field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Accept whatever the column holds.
    Any,
    Null,
    Bool,
    Int,
    Float,
    Text,
    Bytes,
    Json,
    Uuid,
    Timestamp,
}

/// A single normalization strategy.
pub trait Normalize: Send + Sync {
    /// Higher priorities are tried first.
    fn priority(&self) -> i32 {
        0
    }

    /// Convert `value` into `target`, or return `None` if this handler does
    /// not apply.
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value>;
}

/// Ordered collection of normalizers.
#[derive(Default)]
pub struct NormalizerChain {
    normalizers: Vec<Box<dyn Normalize>>,
}

impl NormalizerChain {
    /// Create an empty chain (every value passes through unchanged).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain with all built-in normalizers installed.
    pub fn standard() -> Self {
        Self::new()
            .with(IntToFloat)
            .with(IntToBool)
            .with(BytesToText)
            .with(TextToUuid)
            .with(TextToTimestamp)
    }

    /// Add a normalizer, keeping the list sorted by descending priority.
    ///
    /// Handlers with equal priority keep their registration order.
    pub fn with(mut self, normalizer: impl Normalize + 'static) -> Self {
        self.push(Box::new(normalizer));
        self
    }

    /// Add a boxed normalizer in place.
    pub fn push(&mut self, normalizer: Box<dyn Normalize>) -> &mut Self {
        let priority = normalizer.priority();
        let at = self
            .normalizers
            .iter()
            .position(|n| n.priority() < priority)
            .unwrap_or(self.normalizers.len());
        self.normalizers.insert(at, normalizer);
        self
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Normalize `value` towards `target`.
    pub fn normalize(&self, value: Value, target: ValueKind) -> Value {
        if target == ValueKind::Any || value.is_null() || value.kind() == target {
            return value;
        }
        self.normalizers
            .iter()
            .find_map(|n| n.normalize(&value, target))
            .unwrap_or(value)
    }
}

impl std::fmt::Debug for NormalizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerChain")
            .field("len", &self.normalizers.len())
            .finish()
    }
}

/// Widen integers to floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntToFloat;

impl Normalize for IntToFloat {
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::Int(v), ValueKind::Float) => Some(Value::Float(*v as f64)),
            _ => None,
        }
    }
}

/// Read `0`/`1` integers as booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntToBool;

impl Normalize for IntToBool {
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::Int(0), ValueKind::Bool) => Some(Value::Bool(false)),
            (Value::Int(1), ValueKind::Bool) => Some(Value::Bool(true)),
            _ => None,
        }
    }
}

/// Read UTF-8 byte payloads (large text objects) as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesToText;

impl Normalize for BytesToText {
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::Bytes(bytes), ValueKind::Text) => {
                String::from_utf8(bytes.clone()).ok().map(Value::Text)
            }
            _ => None,
        }
    }
}

/// Parse textual UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextToUuid;

impl Normalize for TextToUuid {
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::Text(s), ValueKind::Uuid) => Uuid::parse_str(s.trim()).ok().map(Value::Uuid),
            _ => None,
        }
    }
}

/// Parse RFC 3339 timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextToTimestamp;

impl Normalize for TextToTimestamp {
    fn normalize(&self, value: &Value, target: ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::Text(s), ValueKind::Timestamp) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| Value::Timestamp(t.with_timezone(&Utc))),
            _ => None,
        }
    }
}
