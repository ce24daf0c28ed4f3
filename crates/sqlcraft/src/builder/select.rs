use super::concat::{Concat, ParamConcat, join_clauses};
use super::traits::{SqlBuilder, substitute};
use super::where_builder::{NO_PARAMS, Where};
use crate::error::{SqlError, SqlResult};
use crate::parser::{Clause, SqlParser};
use crate::value::Value;
use std::str::FromStr;

const AND: &str = " AND ";
const OR: &str = " OR ";

/// Structured SELECT builder.
///
/// Clauses render in the order SELECT, FROM, JOIN, WHERE, GROUP BY, HAVING,
/// ORDER BY, OFFSET, LIMIT; empty clauses vanish. When SELECT, FROM and JOIN
/// are all empty the `WHERE` keyword is dropped too, so the builder renders as
/// a bare condition that can be reused as a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// DISTINCT / ALL (write-once)
    quantifier: Concat,
    /// SELECT columns
    select: Concat,
    /// FROM sources
    from: ParamConcat,
    /// JOIN clauses, each carrying its own keyword
    join: ParamConcat,
    /// WHERE conditions
    where_clause: Where,
    /// GROUP BY expressions
    group_by: Concat,
    /// HAVING conditions
    having: Where,
    /// ORDER BY expressions
    order_by: Concat,
    /// OFFSET (write-once)
    offset: Concat,
    /// LIMIT (write-once)
    limit: Concat,
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Select {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self {
            quantifier: Concat::clause("", None),
            select: Concat::clause("SELECT ", Some(", ")),
            from: ParamConcat::new(Concat::clause("FROM ", Some(", "))),
            join: ParamConcat::new(Concat::clause("", Some(" "))),
            where_clause: Where::clause("WHERE "),
            group_by: Concat::clause("GROUP BY ", Some(", ")),
            having: Where::clause("HAVING "),
            order_by: Concat::clause("ORDER BY ", Some(", ")),
            offset: Concat::clause("OFFSET ", None),
            limit: Concat::clause("LIMIT ", None),
        }
    }

    /// Parse SQL text into a builder; see [`SqlParser`].
    pub fn parse(sql: &str) -> SqlResult<Self> {
        SqlParser::new(sql).to_select()
    }

    // ==================== SELECT columns ====================

    /// Append one SELECT expression.
    pub fn select(mut self, col: &str) -> Self {
        self.select.append(col);
        self
    }

    /// Append several SELECT expressions.
    pub fn select_cols(mut self, cols: &[&str]) -> Self {
        self.select.add(cols);
        self
    }

    /// `SELECT DISTINCT`. May be set once.
    pub fn distinct(mut self) -> Self {
        self.quantifier.append("DISTINCT");
        self
    }

    /// `SELECT ALL`. May be set once.
    pub fn all(mut self) -> Self {
        self.quantifier.append("ALL");
        self
    }

    // ==================== FROM ====================

    /// Append a FROM source.
    pub fn from(mut self, table: &str) -> Self {
        self.from.append(table);
        self
    }

    /// Append a nested query as a FROM source: `template` has one `?` slot,
    /// e.g. `"? AS t"`.
    pub fn from_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        match substitute(template, query) {
            Ok((sql, params)) => {
                self.from.append(&sql).bind_all(params);
            }
            Err(err) => self.from.concat_mut().fail(err),
        }
        self
    }

    // ==================== JOIN ====================

    /// Add `JOIN expr`.
    pub fn join(self, expr: &str) -> Self {
        self.join_kind("JOIN", expr, NO_PARAMS)
    }

    /// Add `JOIN expr`, binding `params` for its placeholders.
    pub fn join_with<I, V>(self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.join_kind("JOIN", expr, params)
    }

    /// Add `INNER JOIN expr`.
    pub fn inner_join(self, expr: &str) -> Self {
        self.join_kind("INNER JOIN", expr, NO_PARAMS)
    }

    /// Add `LEFT JOIN expr`.
    pub fn left_join(self, expr: &str) -> Self {
        self.join_kind("LEFT JOIN", expr, NO_PARAMS)
    }

    /// Add `RIGHT JOIN expr`.
    pub fn right_join(self, expr: &str) -> Self {
        self.join_kind("RIGHT JOIN", expr, NO_PARAMS)
    }

    /// Add `JOIN template` with its single `?` slot replaced by a nested
    /// query, e.g. `join_sub("? AS o ON o.user_id = u.id", &orders)`.
    pub fn join_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        match substitute(template, query) {
            Ok((sql, params)) => {
                self.join.append(&format!("JOIN {sql}")).bind_all(params);
            }
            Err(err) => self.join.concat_mut().fail(err),
        }
        self
    }

    fn join_kind<I, V>(mut self, kind: &str, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if !expr.is_empty() {
            self.join.append(&format!("{kind} {expr}"));
        }
        self.join.bind_all(params);
        self
    }

    // ==================== WHERE ====================

    /// Add a WHERE condition joined with `AND`.
    pub fn where_(self, expr: &str) -> Self {
        self.and_where(expr)
    }

    /// Add a WHERE condition joined with `AND`, binding `params`.
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

    /// Add `AND (nested)` to WHERE.
    pub fn where_group(mut self, nested: &Where) -> Self {
        self.where_clause.push_group(AND, nested);
        self
    }

    /// Add `OR (nested)` to WHERE.
    pub fn or_where_group(mut self, nested: &Where) -> Self {
        self.where_clause.push_group(OR, nested);
        self
    }

    /// Add a WHERE condition whose single `?` slot is a nested query,
    /// e.g. `where_sub("id IN ?", &ids)`.
    pub fn where_sub<Q: SqlBuilder + ?Sized>(mut self, template: &str, query: &Q) -> Self {
        self.where_clause.push_sub(AND, template, query);
        self
    }

    // ==================== GROUP BY / HAVING ====================

    pub fn group_by(mut self, expr: &str) -> Self {
        self.group_by.append(expr);
        self
    }

    /// Add a HAVING condition joined with `AND`.
    pub fn having(mut self, expr: &str) -> Self {
        self.having.push(AND, expr, NO_PARAMS);
        self
    }

    pub fn having_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.having.push(AND, expr, params);
        self
    }

    pub fn or_having(mut self, expr: &str) -> Self {
        self.having.push(OR, expr, NO_PARAMS);
        self
    }

    pub fn or_having_with<I, V>(mut self, expr: &str, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.having.push(OR, expr, params);
        self
    }

    // ==================== Ordering & pagination ====================

    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by.append(expr);
        self
    }

    /// Set OFFSET. May be set once; see [`Select::without_offset`].
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset.append(&offset.to_string());
        self
    }

    /// Set LIMIT. May be set once; see [`Select::without_limit`].
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit.append(&limit.to_string());
        self
    }

    /// Clear OFFSET so it can be set again.
    pub fn without_offset(mut self) -> Self {
        self.offset.reset();
        self
    }

    /// Clear LIMIT so it can be set again.
    pub fn without_limit(mut self) -> Self {
        self.limit.reset();
        self
    }

    // ==================== Parser support ====================

    /// Install parsed clause text as the clause's existing body.
    pub(crate) fn hydrate(&mut self, clause: Clause, keyword: &str, body: &str) {
        let prefix = format!("{keyword} ");
        match clause {
            Clause::Select => self.select.hydrate(&prefix, body),
            Clause::From => {
                self.from.reset();
                self.from.concat_mut().hydrate(&prefix, body);
            }
            Clause::Join => {
                self.join.reset();
                self.join.concat_mut().hydrate("", &format!("{keyword} {body}"));
            }
            Clause::Where => self.where_clause.hydrate(&prefix, body),
            Clause::GroupBy => self.group_by.hydrate(&prefix, body),
            Clause::Having => self.having.hydrate(&prefix, body),
            Clause::OrderBy => self.order_by.hydrate(&prefix, body),
            Clause::Offset => self.offset.hydrate(&prefix, body),
            Clause::Limit => self.limit.hydrate(&prefix, body),
        }
    }

    // ==================== SQL build ====================

    fn build_select_clause(&self) -> SqlResult<String> {
        if self.quantifier.is_empty() {
            return self.select.to_sql();
        }
        let quantifier = self.quantifier.to_sql()?;
        let prefix = self.select.prefix().ok_or_else(|| {
            SqlError::builder("cannot render SELECT clause without a prefix")
        })?;
        self.select.render(Some(&format!("{prefix}{quantifier} ")))
    }
}

impl SqlBuilder for Select {
    fn build_sql(&self) -> SqlResult<String> {
        let select = self.build_select_clause()?;
        let from = self.from.to_sql()?;
        let join = self.join.to_sql()?;
        let where_clause = if select.is_empty() && from.is_empty() && join.is_empty() {
            self.where_clause.to_headless_sql()?
        } else {
            self.where_clause.build_sql()?
        };

        Ok(join_clauses([
            select,
            from,
            join,
            where_clause,
            self.group_by.to_sql()?,
            self.having.build_sql()?,
            self.order_by.to_sql()?,
            self.offset.to_sql()?,
            self.limit.to_sql()?,
        ]))
    }

    fn params(&self) -> Vec<Value> {
        let mut params = Vec::new();
        params.extend_from_slice(self.from.params());
        params.extend_from_slice(self.join.params());
        params.extend_from_slice(self.where_clause.param_values());
        params.extend_from_slice(self.having.param_values());
        params
    }
}

impl FromStr for Select {
    type Err = SqlError;

    fn from_str(sql: &str) -> SqlResult<Self> {
        Self::parse(sql)
    }
}
