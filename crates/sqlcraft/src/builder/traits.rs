//! Trait definitions for statement builders.

use crate::config::RenderConfig;
use crate::error::{SqlError, SqlResult};
use crate::statement::Statement;
use crate::value::Value;

/// Base trait for SQL builders.
///
/// Rendering is read-only: a builder can be rendered any number of times and
/// always yields the same text and parameters.
pub trait SqlBuilder {
    /// Build the SQL string.
    fn build_sql(&self) -> SqlResult<String>;

    /// Parameters in the order their placeholders appear.
    fn params(&self) -> Vec<Value>;

    /// Debug helper.
    fn to_sql(&self) -> SqlResult<String> {
        self.build_sql()
    }

    /// Rendering used when this builder is embedded in another statement.
    fn to_nested_sql(&self) -> SqlResult<String> {
        Ok(format!("({})", self.build_sql()?))
    }

    /// Build the `(sql, params)` pair with the default [`RenderConfig`].
    fn build(&self) -> SqlResult<Statement> {
        self.build_with(&RenderConfig::default())
    }

    /// Build the `(sql, params)` pair and log it as configured.
    fn build_with(&self, config: &RenderConfig) -> SqlResult<Statement> {
        let statement = Statement::new(self.build_sql()?, self.params());
        config.log_statement(&statement);
        Ok(statement)
    }
}

/// Substitute `nested` for the single `?` slot of `template`.
///
/// Returns the substituted text and the nested parameters, which belong at
/// the slot's position. An empty nested builder is a builder-misuse error.
pub(crate) fn substitute<Q>(template: &str, nested: &Q) -> SqlResult<(String, Vec<Value>)>
where
    Q: SqlBuilder + ?Sized,
{
    let slots = template.matches('?').count();
    SqlError::check_parameter_count(template, slots, 1)?;
    if nested.build_sql()?.is_empty() {
        return Err(SqlError::builder(format!(
            "cannot substitute an empty query into '{template}'"
        )));
    }
    let sql = nested.to_nested_sql()?;
    Ok((template.replacen('?', &sql, 1), nested.params()))
}
