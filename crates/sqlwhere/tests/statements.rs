use chrono::NaiveDate;
use sqlwhere::prelude::*;
use sqlwhere::{JoinKind, Previewer, SelectQb};

fn active_users_page(page: u64, per_page: u64) -> SelectQb {
    select(["u.id", "u.name", "t.name AS team"])
        .from("users u")
        .left_join("teams t", "t.id = u.team_id AND t.archived = ?", false)
        .where_(field("u.status").equals("active"), ())
        .and_where(field("u.last_login").is_not_null(), ())
        .order_by(["u.name"])
        .limit(per_page)
        .offset(page * per_page)
}

#[test]
fn paged_select_renders_and_binds() {
    let query = active_users_page(2, 25);
    assert_eq!(
        query.to_sql(),
        "SELECT u.id, u.name, t.name AS team FROM users u \
         LEFT JOIN teams t ON t.id = u.team_id AND t.archived = ? \
         WHERE u.status = ? AND u.last_login IS NOT NULL \
         ORDER BY u.name LIMIT 25 OFFSET 50;"
    );
    assert_eq!(
        query.values().unwrap().to_vec(),
        vec![Value::Bool(false), Value::from("active")]
    );
}

#[test]
fn statements_share_the_preview_path() {
    let query = update("users")
        .set("name = ?", "Zoé")
        .and_set("updated_at = ?", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(8, 30, 0).unwrap())
        .where_("id = ?", 12)
        .end(None);

    assert_eq!(
        query.preview().unwrap(),
        "UPDATE users SET name = 'Zoé', updated_at = '2024-03-09 08:30:00' WHERE id = 12"
    );
    assert_eq!(
        query.preview_with(&Previewer::new().datetime_format("%d/%m/%Y")).unwrap(),
        "UPDATE users SET name = 'Zoé', updated_at = '09/03/2024' WHERE id = 12"
    );
}

#[test]
fn multi_table_delete() {
    let query = delete(["o"])
        .from("orders o")
        .add_join(
            JoinKind::Inner,
            "customers c",
            Some(where_("c.id = o.customer_id", ()).unwrap()),
        )
        .where_("c.closed = ?", true);
    assert_eq!(
        query.to_sql(),
        "DELETE o FROM orders o INNER JOIN customers c ON c.id = o.customer_id WHERE c.closed = ?;"
    );
    assert_eq!(query.preview().unwrap(), query.to_sql().replace('?', "TRUE"));
}

#[test]
fn bulk_insert_in_batches() {
    let rows: Vec<Vec<(&str, Value)>> = (1..=5)
        .map(|i| vec![("id", Value::from(i)), ("label", Value::from(format!("item-{i}")))])
        .collect();

    let batches = insert(rows).into("items").with_flags(["IGNORE"]).split(2);
    assert_eq!(batches.len(), 3);

    let sizes: Vec<usize> = batches.iter().map(|b| b.row_count()).collect();
    assert_eq!(sizes, [2, 2, 1]);

    let last = batches.last().unwrap();
    assert_eq!(last.to_sql(), "INSERT IGNORE INTO items (id, label) VALUES (?, ?);");
    assert_eq!(last.preview().unwrap(), "INSERT IGNORE INTO items (id, label) VALUES (5, 'item-5');");
}

#[test]
fn first_build_error_wins() {
    let query = select(NONE)
        .from("t")
        .where_("a IN (?, ?)", (Values::positional([1, 2]), 3))
        .and_where("b = :b", Values::named([("b", 1), ("b", 2)]));

    assert_eq!(query.values().unwrap_err(), WhereError::AmbiguousValues);
    assert_eq!(query.to_sql(), "SELECT * FROM t;");
}

const NONE: [&str; 0] = [];
