use super::concat::{Concat, join_clauses};
use super::traits::SqlBuilder;
use super::where_builder::{NO_PARAMS, Where};
use crate::error::SqlResult;
use crate::value::Value;

const AND: &str = " AND ";
const OR: &str = " OR ";

/// DELETE builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Target table (write-once)
    from: Concat,
    /// WHERE conditions
    where_clause: Where,
    /// RETURNING columns
    returning: Concat,
}

impl Default for Delete {
    fn default() -> Self {
        Self::new()
    }
}

impl Delete {
    pub fn new() -> Self {
        Self {
            from: Concat::clause("DELETE FROM ", None),
            where_clause: Where::clause("WHERE "),
            returning: Concat::clause("RETURNING ", Some(", ")),
        }
    }

    /// Set the target table. May be set once.
    pub fn from(mut self, table: &str) -> Self {
        self.from.append(table);
        self
    }

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

impl SqlBuilder for Delete {
    fn build_sql(&self) -> SqlResult<String> {
        let from = self.from.to_sql()?;
        let where_clause = if from.is_empty() {
            self.where_clause.to_headless_sql()?
        } else {
            self.where_clause.build_sql()?
        };
        Ok(join_clauses([from, where_clause, self.returning.to_sql()?]))
    }

    fn params(&self) -> Vec<Value> {
        self.where_clause.param_values().to_vec()
    }
}
