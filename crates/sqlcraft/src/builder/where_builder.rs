//! Boolean-expression builder shared by SELECT, UPDATE and DELETE.

use super::concat::{Concat, ParamConcat};
use super::traits::{SqlBuilder, substitute};
use crate::error::SqlResult;
use crate::value::Value;

const AND: &str = " AND ";
const OR: &str = " OR ";
pub(crate) const NO_PARAMS: [Value; 0] = [];

/// Reusable WHERE/HAVING builder.
///
/// Each combinator sets the separator used for the *next* fragment and then
/// appends its expression, so mixed `and`/`or` chains render left to right in
/// call order: `Where::new().and("a").or("b").and("c")` is `(a OR b AND c)`.
/// Nothing is regrouped by precedence; use [`Where::and_group`] to nest.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    clause: ParamConcat,
}

impl Default for Where {
    fn default() -> Self {
        Self::new()
    }
}

impl Where {
    /// Create a standalone expression rendered in parentheses.
    pub fn new() -> Self {
        Self {
            clause: ParamConcat::new(Concat::wrapped("(", None, ")")),
        }
    }

    /// Create a statement-level clause rendered as `keyword` + expressions.
    pub(crate) fn clause(keyword: &str) -> Self {
        Self {
            clause: ParamConcat::new(Concat::clause(keyword, None)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Parameters in the order they were recorded.
    pub fn param_values(&self) -> &[Value] {
        self.clause.params()
    }

    // ==================== Consuming combinators ====================

    /// Add `AND expr`.
    pub fn and(mut self, expr: &str) -> Self {
        self.push(AND, expr, NO_PARAMS);
        self
    }

    /// Add `AND expr`, binding `params` for its placeholders.
    pub fn and_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(AND, expr, params);
        self
    }

    /// Add `OR expr`.
    pub fn or(mut self, expr: &str) -> Self {
        self.push(OR, expr, NO_PARAMS);
        self
    }

    /// Add `OR expr`, binding `params` for its placeholders.
    pub fn or_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(OR, expr, params);
        self
    }

    /// Add `AND (nested)`, splicing in the nested parameters.
    pub fn and_group(mut self, nested: &Where) -> Self {
        self.push_group(AND, nested);
        self
    }

    /// Add `OR (nested)`, splicing in the nested parameters.
    pub fn or_group(mut self, nested: &Where) -> Self {
        self.push_group(OR, nested);
        self
    }

    /// Add `AND template` with the single `?` of `template` replaced by the
    /// parenthesized nested query.
    pub fn and_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        self.push_sub(AND, template, query);
        self
    }

    /// Add `OR template` with the single `?` of `template` replaced by the
    /// parenthesized nested query.
    pub fn or_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        self.push_sub(OR, template, query);
        self
    }

    // ==================== In-place helpers used by statement builders ====================

    pub(crate) fn push<I, V>(&mut self, separator: &str, expr: &str, params: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.clause.concat_mut().set_separator(Some(separator));
        self.clause.append(expr).bind_all(params);
    }

    pub(crate) fn push_group(&mut self, separator: &str, nested: &Where) {
        match nested.build_sql() {
            Ok(sql) => {
                self.clause.concat_mut().set_separator(Some(separator));
                self.clause.append(&sql).bind_list(nested.param_values());
            }
            Err(err) => self.clause.concat_mut().fail(err),
        }
    }

    pub(crate) fn push_sub<Q: SqlBuilder + ?Sized>(
        &mut self,
        separator: &str,
        template: &str,
        query: &Q,
    ) {
        match substitute(template, query) {
            Ok((sql, params)) => {
                self.clause.concat_mut().set_separator(Some(separator));
                self.clause.append(&sql).bind_all(params);
            }
            Err(err) => self.clause.concat_mut().fail(err),
        }
    }

    pub(crate) fn to_headless_sql(&self) -> SqlResult<String> {
        self.clause.concat().to_headless_sql()
    }

    pub(crate) fn hydrate(&mut self, keyword: &str, body: &str) {
        self.clause.reset();
        self.clause.concat_mut().hydrate(keyword, body);
    }
}

impl SqlBuilder for Where {
    fn build_sql(&self) -> SqlResult<String> {
        self.clause.to_sql()
    }

    fn params(&self) -> Vec<Value> {
        self.clause.params().to_vec()
    }

    /// A standalone `Where` already renders in parentheses.
    fn to_nested_sql(&self) -> SqlResult<String> {
        self.build_sql()
    }
}
