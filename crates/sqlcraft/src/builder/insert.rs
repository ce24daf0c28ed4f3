use super::concat::{Concat, ParamConcat, join_clauses};
use super::traits::SqlBuilder;
use super::where_builder::NO_PARAMS;
use crate::error::SqlResult;
use crate::value::Value;

/// INSERT builder.
///
/// `set` pairs a column with a `?` placeholder and records the value, so the
/// column list and the VALUES list always line up.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Target table (write-once)
    into: Concat,
    /// Column names
    columns: Concat,
    /// VALUES expressions
    values: ParamConcat,
    /// DEFAULT VALUES marker (write-once)
    default_values: Concat,
    /// Source query for INSERT ... SELECT (write-once)
    query: ParamConcat,
    /// RETURNING columns
    returning: Concat,
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl Insert {
    pub fn new() -> Self {
        Self {
            into: Concat::clause("INSERT INTO ", None),
            columns: Concat::wrapped("(", Some(", "), ")"),
            values: ParamConcat::new(Concat::wrapped("VALUES (", Some(", "), ")")),
            default_values: Concat::clause("", None),
            query: ParamConcat::new(Concat::clause("", None)),
            returning: Concat::clause("RETURNING ", Some(", ")),
        }
    }

    /// Set the target table. May be set once.
    pub fn into(mut self, table: &str) -> Self {
        self.into.append(table);
        self
    }

    /// Set a column value.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        self.set_expr_with(column, "?", [value.into()])
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set a column to a raw SQL expression (no params), e.g. `now()`.
    pub fn set_expr(self, column: &str, expr: &str) -> Self {
        self.set_expr_with(column, expr, NO_PARAMS)
    }

    /// Set a column to an expression with its own placeholders.
    pub fn set_expr_with<I, V>(mut self, column: &str, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.columns.append(column);
        self.values.append(expr).bind_all(params);
        self
    }

    /// Declare target columns without values (for INSERT ... SELECT).
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns.add(columns);
        self
    }

    /// Emit `DEFAULT VALUES`. May be set once.
    pub fn default_values(mut self) -> Self {
        self.default_values.append("DEFAULT VALUES");
        self
    }

    /// Insert the rows produced by `query`. May be set once.
    pub fn select<Q: SqlBuilder + ?Sized>(mut self, query: &Q) -> Self {
        match query.build_sql() {
            Ok(sql) => {
                self.query.append(&sql).bind_all(query.params());
            }
            Err(err) => self.query.concat_mut().fail(err),
        }
        self
    }

    /// Append RETURNING columns.
    pub fn returning(mut self, cols: &str) -> Self {
        self.returning.append(cols);
        self
    }
}

impl SqlBuilder for Insert {
    fn build_sql(&self) -> SqlResult<String> {
        Ok(join_clauses([
            self.into.to_sql()?,
            self.columns.to_sql()?,
            self.values.to_sql()?,
            self.default_values.to_sql()?,
            self.query.to_sql()?,
            self.returning.to_sql()?,
        ]))
    }

    fn params(&self) -> Vec<Value> {
        let mut params = self.values.params().to_vec();
        params.extend_from_slice(self.query.params());
        params
    }
}
