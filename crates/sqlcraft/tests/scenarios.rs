use sqlcraft::prelude::*;

#[test]
fn select_with_conditions() {
    let q = select()
        .select_cols(&["x", "y"])
        .from("a")
        .where_("c1")
        .and_where("c2");
    assert_eq!(q.to_sql().unwrap(), "SELECT x, y FROM a WHERE c1 AND c2");
    assert!(q.params().is_empty());
}

#[test]
fn insert_pairs_columns_and_values() {
    let q = insert_into("t").set("a", 1).set("b", 2);
    assert_eq!(q.to_sql().unwrap(), "INSERT INTO t (a, b) VALUES (?, ?)");
    assert_eq!(q.params(), params![1, 2]);
}

#[test]
fn where_or_after_and() {
    let w = Where::new().and_with("x", [1]).or_with("y", [2]);
    assert_eq!(w.to_sql().unwrap(), "(x OR y)");
    assert_eq!(w.params(), params![1, 2]);
}

#[test]
fn union_of_selects() {
    let q = union()
        .union(&select().select("x"))
        .union(&select().select("y"));
    assert_eq!(q.to_sql().unwrap(), "(SELECT x) UNION (SELECT y)");
}

#[test]
fn parsed_select_is_extendable() {
    let q = SqlParser::new("select x from a where c")
        .to_select()
        .unwrap()
        .select("z");
    assert_eq!(q.to_sql().unwrap(), "select x, z from a where c");
}

#[test]
fn offset_twice_is_builder_misuse() {
    let err = select().offset(1).offset(2).to_sql().unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn composed_report_query() {
    let recent = select()
        .select("user_id")
        .from("orders")
        .where_with("created_at > ?", ["2024-01-01"]);
    let filters = Where::new()
        .or_with("u.role = ?", ["admin"])
        .or_with("u.role = ?", ["owner"]);

    let stmt = select()
        .select_cols(&["u.id", "u.name", "count(o.id) AS orders"])
        .from("users u")
        .left_join("orders o ON o.user_id = u.id")
        .where_sub("u.id IN ?", &recent)
        .where_group(&filters)
        .group_by("u.id")
        .group_by("u.name")
        .having_with("count(o.id) >= ?", [3])
        .order_by("orders DESC")
        .limit(20)
        .build()
        .unwrap();

    assert_eq!(
        stmt.sql(),
        "SELECT u.id, u.name, count(o.id) AS orders FROM users u \
         LEFT JOIN orders o ON o.user_id = u.id \
         WHERE u.id IN (SELECT user_id FROM orders WHERE created_at > ?) \
         AND (u.role = ? OR u.role = ?) \
         GROUP BY u.id, u.name HAVING count(o.id) >= ? ORDER BY orders DESC LIMIT 20"
    );
    assert_eq!(stmt.params(), params!["2024-01-01", "admin", "owner", 3].as_slice());
    assert!(stmt.validate().is_ok());
}

#[test]
fn headless_select_reused_as_condition() {
    let fragment = select().where_with("a = ?", [1]).or_where("b IS NULL");
    assert_eq!(fragment.to_sql().unwrap(), "a = ? OR b IS NULL");

    let q = delete_from("t").where_with(&fragment.to_sql().unwrap(), fragment.params());
    assert_eq!(q.to_sql().unwrap(), "DELETE FROM t WHERE a = ? OR b IS NULL");
    assert_eq!(q.params(), params![1]);
}

#[test]
fn update_with_returning() {
    let stmt = update("accounts")
        .set("balance", 10.5)
        .set_expr("updated_at = now()")
        .where_with("id = ?", [42])
        .returning("balance")
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql(),
        "UPDATE accounts SET balance = ?, updated_at = now() WHERE id = ? RETURNING balance"
    );
    assert_eq!(stmt.params(), params![10.5, 42].as_slice());
}
