use super::concat::{Concat, ParamConcat, join_clauses};
use super::traits::SqlBuilder;
use super::where_builder::{NO_PARAMS, Where};
use crate::error::SqlResult;
use crate::value::Value;

const AND: &str = " AND ";
const OR: &str = " OR ";

/// UPDATE builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Target table (write-once)
    table: Concat,
    /// SET assignments
    set: ParamConcat,
    /// WHERE conditions
    where_clause: Where,
    /// RETURNING columns
    returning: Concat,
}

impl Default for Update {
    fn default() -> Self {
        Self::new()
    }
}

impl Update {
    pub fn new() -> Self {
        Self {
            table: Concat::clause("UPDATE ", None),
            set: ParamConcat::new(Concat::clause("SET ", Some(", "))),
            where_clause: Where::clause("WHERE "),
            returning: Concat::clause("RETURNING ", Some(", ")),
        }
    }

    /// Set the target table. May be set once.
    pub fn table(mut self, table: &str) -> Self {
        self.table.append(table);
        self
    }

    /// Add `column = ?` and bind `value`.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set.append(&format!("{column} = ?")).bind(value);
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Add a raw assignment, e.g. `"version = version + 1"`.
    pub fn set_expr(self, expr: &str) -> Self {
        self.set_expr_with(expr, NO_PARAMS)
    }

    /// Add an assignment with its own placeholders.
    pub fn set_expr_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set.append(expr).bind_all(params);
        self
    }

    // ==================== WHERE ====================

    pub fn where_(self, expr: &str) -> Self {
        self.and_where(expr)
    }

    pub fn where_with<I, V>(self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and_where_with(expr, params)
    }

    pub fn and_where(mut self, expr: &str) -> Self {
        self.where_clause.push(AND, expr, NO_PARAMS);
        self
    }

    pub fn and_where_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_clause.push(AND, expr, params);
        self
    }

    pub fn or_where(mut self, expr: &str) -> Self {
        self.where_clause.push(OR, expr, NO_PARAMS);
        self
    }

    pub fn or_where_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_clause.push(OR, expr, params);
        self
    }

    pub fn where_group(mut self, nested: &Where) -> Self {
        self.where_clause.push_group(AND, nested);
        self
    }

    pub fn where_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        self.where_clause.push_sub(AND, template, query);
        self
    }

    /// Append RETURNING columns.
    pub fn returning(mut self, cols: &str) -> Self {
        self.returning.append(cols);
        self
    }
}

impl SqlBuilder for Update {
    fn build_sql(&self) -> SqlResult<String> {
        let table = self.table.to_sql()?;
        let set = self.set.to_sql()?;
        let where_clause = if table.is_empty() && set.is_empty() {
            self.where_clause.to_headless_sql()?
        } else {
            self.where_clause.build_sql()?
        };
        Ok(join_clauses([table, set, where_clause, self.returning.to_sql()?]))
    }

    fn params(&self) -> Vec<Value> {
        let mut params = self.set.params().to_vec();
        params.extend_from_slice(self.where_clause.param_values());
        params
    }
}
