//! Clause-level SQL parser.
//!
//! [`SqlParser`] does not understand SQL grammar. It splits a statement into
//! clause chunks at the keywords SELECT, FROM, JOIN, WHERE, GROUP BY, HAVING,
//! ORDER BY, OFFSET and LIMIT (outside quotes and parentheses) and installs
//! each chunk's text as the body of the matching [`Select`] clause, so the
//! result can be extended with the usual builder calls:
//!
//! ```ignore
//! use sqlcraft::prelude::*;
//!
//! let q = SqlParser::new("select x from a where c").to_select()?.select("z");
//! assert_eq!(q.to_sql()?, "select x, z from a where c");
//! ```

mod lexer;

#[cfg(test)]
mod tests;

pub use lexer::{Chunk, Clause, tokenize};
pub(crate) use lexer::{is_quote, skip_quoted};

use crate::builder::Select;
use crate::error::{SqlError, SqlResult};

/// Parses SQL text into a [`Select`] builder.
#[derive(Debug, Clone, Copy)]
pub struct SqlParser<'a> {
    sql: &'a str,
}

impl<'a> SqlParser<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self { sql }
    }

    /// The clause chunks of the input, in source order.
    pub fn chunks(&self) -> SqlResult<Vec<Chunk<'a>>> {
        tokenize(self.sql)
    }

    /// Hydrate a parameterless [`Select`] from the input.
    ///
    /// Chunks must appear in clause order, each clause at most once. Any chunk
    /// left over after all clauses have been tried fails the parse.
    pub fn to_select(&self) -> SqlResult<Select> {
        let chunks = self.chunks()?;
        let mut select = Select::new();
        let mut next = 0usize;

        for clause in Clause::ALL {
            if let Some(chunk) = chunks.get(next).filter(|c| c.clause == Some(clause)) {
                select.hydrate(clause, chunk.keyword(), chunk.body());
                next += 1;
            }
        }

        if next < chunks.len() {
            let unreduced: Vec<String> = chunks[next..].iter().map(Chunk::tag).collect();
            tracing::debug!(
                target: "sqlcraft.parser",
                sql = self.sql,
                unreduced = ?unreduced,
                "failed to reduce SQL chunks"
            );
            return Err(SqlError::parse(
                "chunks out of clause order or repeated",
                unreduced,
                self.sql,
            ));
        }
        Ok(select)
    }
}
