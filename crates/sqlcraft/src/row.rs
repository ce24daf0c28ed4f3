//! Row mapping traits and utilities
//!
//! Rows are mapped through an explicit column table declared once per target
//! type, rather than by inspecting the type at runtime:
//!
//! ```ignore
//! use std::sync::LazyLock;
//! use sqlcraft::{NormalizerChain, Row, RowMapping};
//!
//! #[derive(Default)]
//! struct User { id: i64, name: String }
//!
//! static USER: LazyLock<RowMapping<User>> = LazyLock::new(|| {
//!     RowMapping::new()
//!         .field("id", |u: &mut User, v| u.id = v)
//!         .field("name", |u: &mut User, v| u.name = v)
//!         .with_normalizers(NormalizerChain::standard())
//! });
//!
//! let user = USER.map(&row)?;
//! ```

use crate::error::{SqlError, SqlResult};
use crate::normalize::{NormalizerChain, ValueKind};
use crate::value::{FromValue, Value};

/// One result row: ordered `(column, value)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Value of `column`, or a decode error if it is missing.
    pub fn try_get(&self, column: &str) -> SqlResult<&Value> {
        self.get(column)
            .ok_or_else(|| SqlError::decode(column, "column not found in row"))
    }

    /// Convert the value of `column` into `T`.
    pub fn get_as<T: FromValue>(&self, column: &str) -> SqlResult<T> {
        T::from_value(self.try_get(column)?.clone())
            .map_err(|e| SqlError::decode(column, e.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

/// Trait for types that can be constructed from a [`Row`].
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> SqlResult<Self>;
}

type Assign<T> = Box<dyn Fn(&mut T, Value) -> SqlResult<()> + Send + Sync>;

struct ColumnBinding<T> {
    column: String,
    kind: ValueKind,
    assign: Assign<T>,
}

/// Explicit column → field mapping table for `T`.
pub struct RowMapping<T> {
    bindings: Vec<ColumnBinding<T>>,
    normalizers: NormalizerChain,
}

impl<T> Default for RowMapping<T> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            normalizers: NormalizerChain::new(),
        }
    }
}

impl<T> RowMapping<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `column` into a field through `assign`.
    ///
    /// The column value is normalized to `V::KIND` and converted with
    /// [`FromValue`] before `assign` runs.
    pub fn field<V, F>(mut self, column: &str, assign: F) -> Self
    where
        V: FromValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let name = column.to_string();
        self.bindings.push(ColumnBinding {
            column: column.to_string(),
            kind: V::KIND,
            assign: Box::new(move |target, value| {
                let v = V::from_value(value).map_err(|e| SqlError::decode(&name, e.to_string()))?;
                assign(target, v);
                Ok(())
            }),
        });
        self
    }

    /// Install the normalizers applied to column values before conversion.
    pub fn with_normalizers(mut self, normalizers: NormalizerChain) -> Self {
        self.normalizers = normalizers;
        self
    }

    /// Mapped column names, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.column.as_str())
    }

    /// Apply the mapping to an existing value.
    pub fn apply(&self, target: &mut T, row: &Row) -> SqlResult<()> {
        for binding in &self.bindings {
            let value = row.try_get(&binding.column)?.clone();
            let value = self.normalizers.normalize(value, binding.kind);
            (binding.assign)(target, value)?;
        }
        Ok(())
    }
}

impl<T: Default> RowMapping<T> {
    /// Build a `T` from `row`.
    pub fn map(&self, row: &Row) -> SqlResult<T> {
        let mut target = T::default();
        self.apply(&mut target, row)?;
        Ok(target)
    }

    /// Build a `T` from each row.
    pub fn map_all(&self, rows: &[Row]) -> SqlResult<Vec<T>> {
        rows.iter().map(|row| self.map(row)).collect()
    }
}

impl<T> std::fmt::Debug for RowMapping<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowMapping")
            .field("columns", &self.columns().collect::<Vec<_>>())
            .field("normalizers", &self.normalizers)
            .finish()
    }
}
