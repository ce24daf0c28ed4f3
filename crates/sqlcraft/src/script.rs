//! SQL script loading.
//!
//! Splits multi-statement scripts on `;`, ignoring semicolons inside quoted
//! literals and comments. Comments are recognized at any parenthesis depth.

use crate::error::{SqlError, SqlResult};
use crate::parser::{is_quote, skip_quoted};
use std::path::Path;

/// Split a script into its statements, trimmed, with empty ones dropped.
pub fn split_statements(script: &str) -> SqlResult<Vec<String>> {
    let bytes = script.as_bytes();
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;
    let mut i = 0usize;

    let unterminated = |what: &str, at: usize| {
        SqlError::parse(format!("unterminated {what} at byte {at}"), Vec::new(), script)
    };

    while i < bytes.len() {
        match bytes[i] {
            b';' => {
                current.push_str(&script[start..i]);
                push_statement(&mut statements, &mut current);
                i += 1;
                start = i;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                current.push_str(&script[start..i]);
                i = match script[i..].find('\n') {
                    Some(pos) => i + pos,
                    None => bytes.len(),
                };
                start = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                current.push_str(&script[start..i]);
                let end = script[i + 2..]
                    .find("*/")
                    .ok_or_else(|| unterminated("block comment", i))?;
                current.push(' ');
                i += 2 + end + 2;
                start = i;
            }
            b if is_quote(b) => {
                i = skip_quoted(bytes, i).ok_or_else(|| unterminated("quote", i))?;
            }
            _ => i += 1,
        }
    }
    current.push_str(&script[start..]);
    push_statement(&mut statements, &mut current);
    Ok(statements)
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
    current.clear();
}

/// Read a script file and split it into statements.
pub fn load_script(path: impl AsRef<Path>) -> SqlResult<Vec<String>> {
    let path = path.as_ref();
    let script = std::fs::read_to_string(path)?;
    let statements = split_statements(&script)?;
    tracing::debug!(
        target: "sqlcraft.script",
        path = %path.display(),
        statements = statements.len(),
        "loaded SQL script"
    );
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_outside_literals_and_comments() {
        let script = "
            -- seed data; not a statement
            CREATE TABLE t (a text DEFAULT ';');
            INSERT INTO t VALUES ('x;y') /* trailing; comment */;
            ;
            SELECT ';' AS sep
        ";
        let statements = split_statements(script).unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE t (a text DEFAULT ';')",
                "INSERT INTO t VALUES ('x;y')",
                "SELECT ';' AS sep",
            ]
        );
    }

    #[test]
    fn comments_inside_parentheses() {
        let script = "CREATE TABLE t (\n  id int -- user's id\n);\n\
                      CREATE TABLE u (\n  name text /* it's \"quoted\"; */\n);\nSELECT 1;";
        let statements = split_statements(script).unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE t (\n  id int \n)",
                "CREATE TABLE u (\n  name text  \n)",
                "SELECT 1",
            ]
        );
    }

    #[test]
    fn unterminated_quote_is_parse_error() {
        let err = split_statements("SELECT 'oops").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_script("/definitely/not/here.sql").unwrap_err();
        assert!(matches!(err, SqlError::Io(_)));
    }
}
