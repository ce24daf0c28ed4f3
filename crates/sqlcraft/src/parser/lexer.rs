//! Clause-level lexer.
//!
//! Splits SQL text into [`Chunk`]s, each starting at a clause keyword. Quoted
//! literals and parenthesized groups are consumed whole, so keywords inside
//! them are never seen.

use crate::error::{SqlError, SqlResult};

/// A clause keyword recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Offset,
    Limit,
}

impl Clause {
    /// All clauses in statement order.
    pub const ALL: [Clause; 9] = [
        Clause::Select,
        Clause::From,
        Clause::Join,
        Clause::Where,
        Clause::GroupBy,
        Clause::Having,
        Clause::OrderBy,
        Clause::Offset,
        Clause::Limit,
    ];

    /// The keyword literal in canonical casing.
    pub fn keyword(self) -> &'static str {
        match self {
            Clause::Select => "SELECT",
            Clause::From => "FROM",
            Clause::Join => "JOIN",
            Clause::Where => "WHERE",
            Clause::GroupBy => "GROUP BY",
            Clause::Having => "HAVING",
            Clause::OrderBy => "ORDER BY",
            Clause::Offset => "OFFSET",
            Clause::Limit => "LIMIT",
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A substring of the input tagged with the clause it belongs to.
///
/// `clause` is `None` for text appearing before the first keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub clause: Option<Clause>,
    pub text: &'a str,
}

impl<'a> Chunk<'a> {
    /// The keyword as written in the input (e.g. `select`).
    pub fn keyword(&self) -> &'a str {
        match self.clause {
            Some(clause) => &self.text[..clause.keyword().len()],
            None => "",
        }
    }

    /// The clause text after the keyword and one separator character, trimmed.
    pub fn body(&self) -> &'a str {
        match self.clause {
            Some(clause) => self
                .text
                .get(clause.keyword().len() + 1..)
                .unwrap_or("")
                .trim(),
            None => self.text.trim(),
        }
    }

    /// Tag name used in diagnostics.
    pub fn tag(&self) -> String {
        match self.clause {
            Some(clause) => clause.keyword().to_string(),
            None => "<untagged>".to_string(),
        }
    }
}

pub(crate) fn is_quote(b: u8) -> bool {
    matches!(b, b'\'' | b'"' | b'`')
}

/// Given `bytes[start]` is a quote, return the index just past its closing
/// quote. A backslash escapes the next byte.
pub(crate) fn skip_quoted(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Given `bytes[start]` is `(`, return the index just past the matching `)`.
/// Quoted literals inside the group are skipped.
pub(crate) fn skip_group(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b if is_quote(b) => i = skip_quoted(bytes, i)?,
            _ => i += 1,
        }
    }
    None
}

/// Match a clause keyword at `pos`: case-insensitive, followed by end of
/// input or whitespace.
fn match_keyword(sql: &str, pos: usize) -> Option<Clause> {
    let rest = &sql.as_bytes()[pos..];
    Clause::ALL.into_iter().find(|clause| {
        let kw = clause.keyword().as_bytes();
        rest.len() >= kw.len()
            && rest[..kw.len()].eq_ignore_ascii_case(kw)
            && rest.get(kw.len()).is_none_or(|b| b.is_ascii_whitespace())
    })
}

/// Close the current chunk. Untagged leading text is dropped when blank.
fn close<'a>(chunks: &mut Vec<Chunk<'a>>, clause: Option<Clause>, text: &'a str) {
    let chunk = Chunk { clause, text };
    if clause.is_some() || !chunk.body().is_empty() {
        chunks.push(chunk);
    }
}

fn lex_error(message: String, chunks: &[Chunk<'_>], current: Option<Clause>, sql: &str) -> SqlError {
    let mut tags: Vec<String> = chunks.iter().map(Chunk::tag).collect();
    if let Some(clause) = current {
        tags.push(clause.keyword().to_string());
    }
    SqlError::parse(message, tags, sql)
}

/// Split `sql` into clause chunks.
pub fn tokenize(sql: &str) -> SqlResult<Vec<Chunk<'_>>> {
    let bytes = sql.as_bytes();
    let mut chunks = Vec::new();
    let mut current: Option<Clause> = None;
    let mut start = 0usize;
    let mut at_boundary = true;
    let mut i = 0usize;

    while i < bytes.len() {
        if at_boundary {
            if let Some(clause) = match_keyword(sql, i) {
                close(&mut chunks, current, &sql[start..i]);
                current = Some(clause);
                start = i;
                i += clause.keyword().len();
                continue;
            }
        }

        let b = bytes[i];
        if is_quote(b) {
            i = skip_quoted(bytes, i).ok_or_else(|| {
                lex_error(format!("unterminated quote at byte {i}"), &chunks, current, sql)
            })?;
            at_boundary = false;
        } else if b == b'(' {
            i = skip_group(bytes, i).ok_or_else(|| {
                lex_error(format!("unbalanced parenthesis at byte {i}"), &chunks, current, sql)
            })?;
            at_boundary = false;
        } else {
            at_boundary = b.is_ascii_whitespace();
            i += 1;
        }
    }
    close(&mut chunks, current, &sql[start..]);

    tracing::trace!(
        target: "sqlcraft.parser",
        chunks = ?chunks.iter().map(Chunk::tag).collect::<Vec<_>>(),
        "tokenized SQL"
    );
    Ok(chunks)
}
