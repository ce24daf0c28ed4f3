//! Built statements: SQL text plus ordered parameters.
//!
//! A [`Statement`] is what the builders hand to the connectivity layer. Its
//! text uses `?` placeholders; [`Statement::to_sql_with`] renumbers them as
//! `$1, $2, ...` for drivers such as `tokio-postgres`, and
//! [`Statement::params_ref`] lends the values for binding by position.

use crate::error::{SqlError, SqlResult};
use crate::parser::{is_quote, skip_quoted};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tokio_postgres::types::ToSql;

/// How placeholders are written in rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaceholderStyle {
    /// `?` (as built)
    #[default]
    Question,
    /// `$1, $2, ...`
    Dollar,
}

/// SQL text and its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// SQL text with `?` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order (bound at 1-based positions).
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }

    /// Number of `?` placeholders outside quoted literals.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        scan_placeholders(&self.sql, |_| count += 1);
        count
    }

    /// Check that every placeholder has exactly one parameter.
    pub fn validate(&self) -> SqlResult<()> {
        SqlError::check_parameter_count(&self.sql, self.placeholder_count(), self.params.len())
    }

    /// Render the text in the given placeholder style.
    pub fn to_sql_with(&self, style: PlaceholderStyle) -> String {
        match style {
            PlaceholderStyle::Question => self.sql.clone(),
            PlaceholderStyle::Dollar => {
                let mut out = String::with_capacity(self.sql.len() + self.params.len() * 2);
                let mut last = 0usize;
                let mut idx = 0usize;
                scan_placeholders(&self.sql, |pos| {
                    idx += 1;
                    out.push_str(&self.sql[last..pos]);
                    out.push('$');
                    out.push_str(&idx.to_string());
                    last = pos + 1;
                });
                out.push_str(&self.sql[last..]);
                out
            }
        }
    }
}

/// Call `f` with the byte offset of each `?` outside quoted literals.
fn scan_placeholders(sql: &str, mut f: impl FnMut(usize)) {
    let bytes = sql.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'?' => {
                f(i);
                i += 1;
            }
            b if is_quote(b) => match skip_quoted(bytes, i) {
                Some(end) => i = end,
                None => break,
            },
            _ => i += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn numbers_placeholders_in_order() {
        let stmt = Statement::new("SELECT * FROM t WHERE a = ? AND b = ?", params![1, "x"]);
        assert_eq!(
            stmt.to_sql_with(PlaceholderStyle::Dollar),
            "SELECT * FROM t WHERE a = $1 AND b = $2"
        );
        assert_eq!(stmt.to_sql_with(PlaceholderStyle::Question), stmt.sql());
        assert_eq!(stmt.params_ref().len(), 2);
    }

    #[test]
    fn ignores_question_marks_in_literals() {
        let stmt = Statement::new("SELECT '?' AS q, \"a?\" FROM t WHERE x = ?", params![1]);
        assert_eq!(stmt.placeholder_count(), 1);
        assert_eq!(
            stmt.to_sql_with(PlaceholderStyle::Dollar),
            "SELECT '?' AS q, \"a?\" FROM t WHERE x = $1"
        );
        assert!(stmt.validate().is_ok());
    }

    #[test]
    fn validate_reports_direction_of_mismatch() {
        let too_many = Statement::new("x = ?", params![1, 2]);
        assert!(matches!(
            too_many.validate(),
            Err(SqlError::TooManyParameters { slots: 1, given: 2, .. })
        ));

        let too_few = Statement::new("x = ? AND y = ?", params![1]);
        assert!(matches!(
            too_few.validate(),
            Err(SqlError::TooFewParameters { slots: 2, given: 1, .. })
        ));
    }
}
