use super::concat::{Concat, ParamConcat, join_clauses};
use super::traits::SqlBuilder;
use crate::error::SqlResult;
use crate::value::Value;

/// UNION builder over nested queries.
///
/// Each branch renders parenthesized. Like [`Where`](super::Where)'s AND/OR,
/// [`Union::union`] and [`Union::union_all`] choose the operator placed
/// before the branch they add.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    branches: ParamConcat,
    order_by: Concat,
    offset: Concat,
    limit: Concat,
}

impl Default for Union {
    fn default() -> Self {
        Self::new()
    }
}

impl Union {
    pub fn new() -> Self {
        Self {
            branches: ParamConcat::new(Concat::clause("", None)),
            order_by: Concat::clause("ORDER BY ", Some(", ")),
            offset: Concat::clause("OFFSET ", None),
            limit: Concat::clause("LIMIT ", None),
        }
    }

    /// Add a branch joined with `UNION`.
    pub fn union<Q: SqlBuilder + ?Sized>(mut self, query: &Q) -> Self {
        self.push_branch(" UNION ", query);
        self
    }

    /// Add a branch joined with `UNION ALL`.
    pub fn union_all<Q: SqlBuilder + ?Sized>(mut self, query: &Q) -> Self {
        self.push_branch(" UNION ALL ", query);
        self
    }

    /// Empty branches are skipped.
    fn push_branch<Q: SqlBuilder + ?Sized>(&mut self, separator: &str, query: &Q) {
        let nested = query.build_sql().and_then(|sql| {
            if sql.is_empty() {
                Ok(None)
            } else {
                query.to_nested_sql().map(Some)
            }
        });
        match nested {
            Ok(Some(sql)) => {
                self.branches.concat_mut().set_separator(Some(separator));
                self.branches.append(&sql).bind_all(query.params());
            }
            Ok(None) => {}
            Err(err) => self.branches.concat_mut().fail(err),
        }
    }

    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by.append(expr);
        self
    }

    /// Set OFFSET. May be set once.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset.append(&offset.to_string());
        self
    }

    /// Set LIMIT. May be set once.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit.append(&limit.to_string());
        self
    }
}

impl SqlBuilder for Union {
    fn build_sql(&self) -> SqlResult<String> {
        Ok(join_clauses([
            self.branches.to_sql()?,
            self.order_by.to_sql()?,
            self.offset.to_sql()?,
            self.limit.to_sql()?,
        ]))
    }

    fn params(&self) -> Vec<Value> {
        self.branches.params().to_vec()
    }
}
