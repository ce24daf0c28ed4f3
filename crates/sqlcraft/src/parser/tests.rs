use super::*;
use crate::builder::SqlBuilder;
use crate::params;

fn tags(sql: &str) -> Vec<String> {
    SqlParser::new(sql)
        .chunks()
        .unwrap()
        .iter()
        .map(Chunk::tag)
        .collect()
}

#[test]
fn test_parse_then_extend_select() {
    let q = SqlParser::new("select x from a where c")
        .to_select()
        .unwrap()
        .select("z");
    assert_eq!(q.to_sql().unwrap(), "select x, z from a where c");
    assert!(q.params().is_empty());
}

#[test]
fn test_round_trip_all_clauses() {
    let sql = "SELECT a, b FROM t JOIN u ON u.id = t.id WHERE a = 1 GROUP BY a \
               HAVING count(*) > 1 ORDER BY b OFFSET 5 LIMIT 10";
    let q = Select::parse(sql).unwrap();
    assert_eq!(q.to_sql().unwrap(), sql);
}

#[test]
fn test_round_trip_normalizes_whitespace() {
    let q = Select::parse("  select  a\nfrom   t\n  where x = 1  ").unwrap();
    assert_eq!(q.to_sql().unwrap(), "select a from t where x = 1");
}

#[test]
fn test_keyword_casing_preserved() {
    let q = Select::parse("Select x From t Order By x").unwrap();
    assert_eq!(q.to_sql().unwrap(), "Select x From t Order By x");
}

#[test]
fn test_chunks() {
    let chunks = SqlParser::new("select x from a where c").chunks().unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].clause, Some(Clause::Select));
    assert_eq!(chunks[0].keyword(), "select");
    assert_eq!(chunks[0].body(), "x");
    assert_eq!(chunks[2].text, "where c");
    assert_eq!(chunks[2].body(), "c");
}

#[test]
fn test_multiword_keywords() {
    assert_eq!(
        tags("select a, count(*) from t group by a having count(*) > 1 order by a desc"),
        vec!["SELECT", "FROM", "GROUP BY", "HAVING", "ORDER BY"]
    );

    let q = Select::parse("select a, count(*) from t group by a order by a desc")
        .unwrap()
        .group_by("b")
        .order_by("b");
    assert_eq!(
        q.to_sql().unwrap(),
        "select a, count(*) from t group by a, b order by a desc, b"
    );
}

#[test]
fn test_quotes_hide_keywords() {
    let sql = r#"SELECT 'from' AS f, "where" FROM t WHERE name = 'a where \' b' AND c = `limit`"#;
    assert_eq!(tags(sql), vec!["SELECT", "FROM", "WHERE"]);
    assert_eq!(Select::parse(sql).unwrap().to_sql().unwrap(), sql);
}

#[test]
fn test_parens_hide_keywords() {
    let sql = "SELECT x FROM (SELECT y FROM z WHERE q = ')') AS s WHERE x > 1";
    assert_eq!(tags(sql), vec!["SELECT", "FROM", "WHERE"]);
    assert_eq!(Select::parse(sql).unwrap().to_sql().unwrap(), sql);
}

#[test]
fn test_keywords_inside_identifiers() {
    assert_eq!(
        tags("SELECT selected, from_date, t.limit FROM t"),
        vec!["SELECT", "FROM"]
    );
    assert_eq!(tags("SELECT x FROM t WHERE(a)"), vec!["SELECT", "FROM"]);
}

#[test]
fn test_hydrated_where_keeps_chaining() {
    let q = Select::parse("SELECT * FROM t WHERE a = 1")
        .unwrap()
        .and_where_with("b = ?", [2])
        .or_where("c");
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM t WHERE a = 1 AND b = ? OR c");
    assert_eq!(q.params(), params![2]);
}

#[test]
fn test_hydrated_limit_is_write_once() {
    let parsed = Select::parse("SELECT * FROM t LIMIT 5").unwrap();
    assert!(parsed.clone().limit(10).to_sql().unwrap_err().is_builder());
    assert_eq!(
        parsed.without_limit().limit(10).to_sql().unwrap(),
        "SELECT * FROM t LIMIT 10"
    );
}

#[test]
fn test_prefixed_join_round_trip() {
    let sql = "SELECT * FROM a LEFT JOIN b ON b.id = a.id WHERE a.x = 1";
    assert_eq!(tags(sql), vec!["SELECT", "FROM", "JOIN", "WHERE"]);
    assert_eq!(Select::parse(sql).unwrap().to_sql().unwrap(), sql);
}

#[test]
fn test_from_str() {
    let q: Select = "SELECT 1".parse().unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT 1");
}

#[test]
fn test_empty_input() {
    assert!(tags("   ").is_empty());
    assert_eq!(Select::parse("").unwrap().to_sql().unwrap(), "");
}

#[test]
fn test_headless_where_fragment() {
    let q = Select::parse("WHERE a = 1").unwrap().and_where("b");
    assert_eq!(q.to_sql().unwrap(), "a = 1 AND b");
}

#[test]
fn test_unterminated_quote() {
    let err = Select::parse("SELECT 'oops FROM t").unwrap_err();
    match err {
        SqlError::Parse { chunks, sql, .. } => {
            assert_eq!(chunks, vec!["SELECT"]);
            assert_eq!(sql, "SELECT 'oops FROM t");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unbalanced_parenthesis() {
    assert!(Select::parse("SELECT (a FROM t").unwrap_err().is_parse());
    assert!(Select::parse("SELECT (a, ')' FROM t").unwrap_err().is_parse());
}

#[test]
fn test_out_of_order_chunks() {
    let err = Select::parse("SELECT x WHERE a FROM t").unwrap_err();
    assert!(matches!(err, SqlError::Parse { ref chunks, .. } if chunks == &["FROM"]));
}

#[test]
fn test_repeated_clause() {
    let err = Select::parse("SELECT x FROM a JOIN b ON 1 = 1 JOIN c ON 1 = 1").unwrap_err();
    assert!(matches!(err, SqlError::Parse { ref chunks, .. } if chunks == &["JOIN"]));
}

#[test]
fn test_untagged_leading_text() {
    assert_eq!(tags("EXPLAIN SELECT x"), vec!["<untagged>", "SELECT"]);
    let err = Select::parse("EXPLAIN SELECT x").unwrap_err();
    assert!(matches!(
        err,
        SqlError::Parse { ref chunks, .. } if chunks == &["<untagged>", "SELECT"]
    ));
}
