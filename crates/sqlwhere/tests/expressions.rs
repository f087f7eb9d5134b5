use sqlwhere::{
    Expression, Placeholder, Previewer, Value, Values, WhereError, case, field, group, not,
    preview, values_of, where_,
};

fn search_filter(name: Option<&str>, min_age: Option<i32>, countries: &[&str]) -> Option<Expression> {
    let mut parts = Vec::new();
    if let Some(name) = name {
        parts.push(field("name").starts_with(name));
    }
    if let Some(age) = min_age {
        parts.push(field("age").gte(age));
    }
    if !countries.is_empty() {
        parts.push(field("country").in_list(countries.iter().copied()));
    }

    let mut parts = parts.into_iter();
    let first = parts.next()?;
    parts.try_fold(first, |acc, part| acc.and(part, ())).ok()
}

#[test]
fn dynamic_filters_compose() {
    let expr = search_filter(Some("Jo"), Some(21), &["FR", "BE"]).unwrap();
    assert_eq!(expr.to_string(), "name LIKE ? AND age >= ? AND country IN (?, ?)");
    assert_eq!(
        expr.preview().unwrap(),
        "name LIKE 'Jo%' AND age >= 21 AND country IN ('FR', 'BE')"
    );

    let expr = search_filter(None, Some(21), &[]).unwrap();
    assert_eq!(expr.to_string(), "age >= ?");

    assert!(search_filter(None, None, &[]).is_none());
}

#[test]
fn groups_and_negation_nest() {
    let inner = where_("role = ?", "admin").unwrap().or("role = ?", "owner").unwrap();
    let expr = where_("active = ?", true)
        .unwrap()
        .and(group(inner, ()).unwrap(), ())
        .unwrap()
        .and(not("banned", ()).unwrap(), ())
        .unwrap();

    assert_eq!(
        expr.to_string(),
        "active = ? AND (role = ? OR role = ?) AND NOT banned"
    );
    assert_eq!(
        expr.preview().unwrap(),
        "active = TRUE AND (role = 'admin' OR role = 'owner') AND NOT banned"
    );
}

#[test]
fn named_values_travel_with_their_condition() {
    let since = Values::named([("since", "2024-01-01")]);
    let expr = where_("created_at > :since", since)
        .unwrap()
        .and("status = :status", Values::named([(":status", "open")]))
        .unwrap();

    let values = expr.values();
    assert_eq!(values.named_len(), 2);
    assert_eq!(values["since"], Value::from("2024-01-01"));
    assert_eq!(values["status"], Value::from("open"));
    assert_eq!(
        serde_json::to_string(&values).unwrap(),
        r#"{"since":"2024-01-01","status":"open"}"#
    );
    assert_eq!(
        expr.preview().unwrap(),
        "created_at > '2024-01-01' AND status = 'open'"
    );
}

#[test]
fn conflicting_named_values_are_rejected() {
    let a = where_("a = :v", Values::named([("v", 1)])).unwrap();
    let b = where_("b = :v", Values::named([("v", 2)])).unwrap();

    assert_eq!(
        a.and(b.clone(), ()).unwrap_err(),
        WhereError::DuplicateNamedValue("v".to_string())
    );
    assert!(values_of([&a, &b]).unwrap_err().is_duplicate_named_value());

    let same = where_("c = :v", Values::named([("v", 1)])).unwrap();
    assert_eq!(values_of([&a, &same]).unwrap().len(), 1);
}

#[test]
fn values_of_reslots_positional_values() {
    let a = where_("a = ? AND b = ?", (1, 2)).unwrap();
    let b = where_("c = ?", 3).unwrap();
    let values = values_of([&a, &b]).unwrap();

    assert_eq!(values.positional_len(), 3);
    assert_eq!(values[2], Value::Int(3));
    assert_eq!(serde_json::to_string(&values).unwrap(), "[1,2,3]");
}

#[test]
fn case_expression_as_column() {
    let expr = case()
        .when("score >= ?", 90)
        .unwrap()
        .then("'A'", ())
        .unwrap()
        .when("score >= ?", 75)
        .unwrap()
        .then("'B'", ())
        .unwrap()
        .else_("'C'", ())
        .unwrap()
        .end()
        .as_("grade", ())
        .unwrap();

    assert_eq!(
        expr.to_string(),
        "CASE WHEN score >= ? THEN 'A' WHEN score >= ? THEN 'B' ELSE 'C' END AS grade"
    );
    assert_eq!(expr.values().to_vec(), vec![Value::Int(90), Value::Int(75)]);
}

#[test]
fn field_placeholder_modes_preview_the_same() {
    let positional = field("qty").between(1, 10);
    let random = field("qty").between_with(1, 10, Placeholder::Random).unwrap();
    let inline = field("qty").between_with(1, 10, Placeholder::Inline).unwrap();

    let expected = "qty BETWEEN 1 AND 10";
    assert_eq!(positional.preview().unwrap(), expected);
    assert_eq!(random.preview().unwrap(), expected);
    assert_eq!(inline.to_string(), expected);
}

#[test]
fn previewer_options_apply_to_free_function_output() {
    let expr = where_("note = ?", "x".repeat(40)).unwrap();
    let values = expr.values();
    let sql = expr.to_string();

    let full = preview(&sql, &values).unwrap();
    assert_eq!(full.len(), "note = ''".len() + 40);

    let short = Previewer::new().max_length(12).preview(&sql, &values).unwrap();
    assert_eq!(short, "note = 'xxxx...");

    let err = preview("a = ? AND b = ?", &values).unwrap_err();
    assert!(err.is_count_mismatch());
}
