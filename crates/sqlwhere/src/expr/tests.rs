use super::*;

fn texts(values: &BoundValues) -> Vec<String> {
    values.to_vec().iter().map(ToString::to_string).collect()
}

// ==================== Factory ====================

#[test]
fn template_without_args_binds_nothing() {
    let expr = where_("deleted_at IS NULL", ()).unwrap();
    assert_eq!(expr.to_string(), "deleted_at IS NULL");
    assert!(expr.values().is_empty());
}

#[test]
fn each_arg_is_one_positional_value() {
    let expr = where_("a = ? AND b = ?", (1, "x")).unwrap();
    let values = expr.values();
    assert!(values.is_positional());
    assert_eq!(values[0], Value::Int(1));
    assert_eq!(values[1], Value::Text("x".into()));
}

#[test]
fn single_collection_arg_is_the_collection() {
    let expr = where_("a IN (?, ?)", vec![Value::Int(1), Value::Int(2)]).unwrap();
    assert_eq!(expr.values().len(), 2);

    let expr = where_("a = :a", Values::named([(":a", 5)])).unwrap();
    assert_eq!(expr.values()["a"], Value::Int(5));
}

#[test]
fn collection_mixed_with_other_args_is_ambiguous() {
    let err = where_("a = ?", (Values::positional([1]), 2)).unwrap_err();
    assert_eq!(err, WhereError::AmbiguousValues);
}

#[test]
fn existing_expression_passes_through() {
    let expr = where_("foo = ?", "bar").unwrap();
    assert_eq!(where_(&expr, ()).unwrap(), expr);
    assert_eq!(where_(where_(expr.clone(), ()).unwrap(), ()).unwrap(), expr);
}

#[test]
fn values_cannot_be_attached_to_an_expression() {
    let expr = where_("foo = ?", "bar").unwrap();
    assert_eq!(
        where_(expr, "baz").unwrap_err(),
        WhereError::IllegalValueAttachment
    );
}

#[test]
fn scalar_clause_values_become_text() {
    let expr = where_(Value::Int(1), ()).unwrap();
    assert_eq!(expr.to_string(), "1");

    let err = where_(Value::Null, ()).unwrap_err();
    assert_eq!(err.to_string(), "Expected string or Expression, null given");
}

#[test]
fn duplicate_names_in_one_condition_are_rejected() {
    let err = where_("a = :k", Values::named([("k", 1), (":k", 2)])).unwrap_err();
    assert!(err.is_duplicate_named_value());
}

// ==================== Composition ====================

#[test]
fn and_joins_text_and_values() {
    let expr = where_("foo = ?", "bar").unwrap().and("baz = ?", "qux").unwrap();
    assert_eq!(expr.to_string(), "foo = ? AND baz = ?");
    assert_eq!(texts(&expr.values()), ["bar", "qux"]);
}

#[test]
fn group_then_or() {
    let expr = group("a = ?", 1).unwrap().or("b = ?", 2).unwrap();
    assert_eq!(expr.to_string(), "(a = ?) OR b = ?");
    assert_eq!(texts(&expr.values()), ["1", "2"]);
}

#[test]
fn composition_leaves_receiver_untouched() {
    let base = where_("a = ?", 1).unwrap();
    let left = base.and("b = ?", 2).unwrap();
    let right = base.or("c = ?", 3).unwrap();
    assert_eq!(base.to_string(), "a = ?");
    assert_eq!(left.to_string(), "a = ? AND b = ?");
    assert_eq!(right.to_string(), "a = ? OR c = ?");
    assert_eq!(base.values().len(), 1);
}

#[test]
fn same_operator_chains_are_flat() {
    let expr = where_("a", ())
        .unwrap()
        .and("b", ())
        .unwrap()
        .and("c", ())
        .unwrap();
    match &expr {
        Expression::Composite(c) => {
            assert_eq!(c.operator(), Operator::And);
            assert_eq!(c.children().len(), 3);
        }
        other => panic!("expected composite, got {other:?}"),
    }
    assert_eq!(expr.to_string(), "a AND b AND c");
}

#[test]
fn mixed_operators_nest_without_parentheses() {
    let expr = where_("a", ()).unwrap().and("b", ()).unwrap().or("c", ()).unwrap();
    assert_eq!(expr.to_string(), "a AND b OR c");

    let grouped = where_("a", ())
        .unwrap()
        .and(where_("b", ()).unwrap().or("c", ()).unwrap().as_group(), ())
        .unwrap();
    assert_eq!(grouped.to_string(), "a AND (b OR c)");
}

#[test]
fn plus_and_as_use_their_glue() {
    let set = where_("a = ?", 1).unwrap().plus("b = ?", 2).unwrap();
    assert_eq!(set.to_string(), "a = ?, b = ?");

    let alias = where_("COUNT(*)", ()).unwrap().as_("total", ()).unwrap();
    assert_eq!(alias.to_string(), "COUNT(*) AS total");
}

#[test]
fn negate_and_group_are_idempotent_in_shape() {
    let x = where_("a = ?", 1).unwrap();
    assert_eq!(x.negate().to_string(), "NOT a = ?");
    assert_eq!(x.negate().negate(), x);
    assert_eq!(x.as_group().as_group(), x.as_group());
    assert_eq!(group(group("a", ()).unwrap(), ()).unwrap().to_string(), "(a)");
    assert_eq!(not("a = ?", 1).unwrap().values().len(), 1);
}

#[test]
fn conflicting_named_values_fail_on_composition() {
    let a = where_("a = :k", Values::named([("k", 1)])).unwrap();
    let err = a.and("b = :k", Values::named([("k", 2)])).unwrap_err();
    assert_eq!(err, WhereError::DuplicateNamedValue("k".into()));
}

#[test]
fn identical_named_values_are_kept_once() {
    let a = where_("a = :k", Values::named([("k", 1)])).unwrap();
    let expr = a.or("b = :k", Values::named([("k", 1)])).unwrap();
    let values = expr.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values["k"], Value::Int(1));
}

// ==================== values_of ====================

#[test]
fn values_of_reslots_positional_values() {
    let a = where_("a IN (?, ?)", (10, 11)).unwrap();
    let b = where_("b = ?", 12).unwrap();
    let values = values_of([&a, &b]).unwrap();
    let keys: Vec<String> = values.iter().map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, ["0", "1", "2"]);
    assert_eq!(values[2], Value::Int(12));
}

#[test]
fn values_of_keeps_named_keys() {
    let a = where_("a = :k", Values::named([("k", 1)])).unwrap();
    let b = where_("b = :m", Values::named([("m", 2)])).unwrap();
    let values = values_of([&a, &b]).unwrap();
    assert_eq!(values.named_len(), 2);
    assert_eq!(values.get_named("k"), Some(&Value::Int(1)));
    assert_eq!(values.get_named("m"), Some(&Value::Int(2)));
    assert_eq!(
        serde_json::to_string(&values).unwrap(),
        r#"{"k":1,"m":2}"#
    );
}

#[test]
fn values_of_rejects_conflicting_names() {
    let a = where_("a = :k", Values::named([("k", 1)])).unwrap();
    let b = where_("b = :k", Values::named([("k", 2)])).unwrap();
    assert!(values_of([&a, &b]).unwrap_err().is_duplicate_named_value());
}

#[test]
fn merge_rejects_conflicts_and_keeps_equal_rebinding_once() {
    let mut merged = where_("a = :k AND b = ?", Values::named([("k", 1)])).unwrap().values();
    merged.merge(&where_("c = ?", 5).unwrap().values()).unwrap();
    merged.merge(&where_("d = :k", Values::named([("k", 1)])).unwrap().values()).unwrap();
    assert_eq!(merged.named_len(), 1);
    assert_eq!(merged[0], Value::Int(5));

    let err = merged
        .merge(&where_("e = :k", Values::named([("k", 2)])).unwrap().values())
        .unwrap_err();
    assert_eq!(err, WhereError::DuplicateNamedValue("k".to_string()));
    assert_eq!(merged["k"], Value::Int(1));
}

#[test]
fn positional_values_serialize_as_a_list() {
    let expr = where_("a = ? AND b = ?", ("x", 2)).unwrap();
    assert_eq!(serde_json::to_string(&expr.values()).unwrap(), r#"["x",2]"#);
}

// ==================== CASE ====================

#[test]
fn case_with_subject_only() {
    let expr = case_of("field", ()).unwrap();
    assert_eq!(expr.to_string(), "CASE field END");

    let expr = case_of(where_("field = ?", "foo").unwrap(), ()).unwrap();
    assert_eq!(expr.to_string(), "CASE field = ? END");
    assert_eq!(texts(&expr.values()), ["foo"]);
}

#[test]
fn case_without_subject() {
    let expr = when("field = ?", "foo").unwrap().then("foo = ?", "bar").unwrap();
    assert_eq!(expr.to_string(), "CASE WHEN field = ? THEN foo = ? END");
    assert_eq!(texts(&expr.values()), ["foo", "bar"]);
}

#[test]
fn case_with_several_arms_and_else() {
    let expr = case_of("foo = ?", "bar")
        .unwrap()
        .when("fruit = ?", "apple")
        .unwrap()
        .then("color = ?", "green")
        .unwrap()
        .when("fruit = ?", "banana")
        .unwrap()
        .then("color = ?", "yellow")
        .unwrap()
        .else_("color = ?", "black")
        .unwrap();
    assert_eq!(
        expr.to_string(),
        "CASE foo = ? WHEN fruit = ? THEN color = ? WHEN fruit = ? THEN color = ? ELSE color = ? END"
    );
    assert_eq!(
        texts(&expr.values()),
        ["bar", "apple", "green", "banana", "yellow", "black"]
    );

    let aliased = expr.end().as_("foo", ()).unwrap();
    assert!(aliased.to_string().ends_with("ELSE color = ? END AS foo"));
    assert_eq!(aliased.values().len(), 6);
}

#[test]
fn case_sequencing_errors() {
    let err = when("foo", ()).unwrap().then("bar", ()).unwrap().then("baz", ());
    assert!(matches!(err, Err(WhereError::InvalidCase(_))));

    let err = when("foo", ()).unwrap().when("bar", ());
    assert!(matches!(err, Err(WhereError::InvalidCase(_))));

    let locked = when("fruit = ?", "apple")
        .unwrap()
        .then("color = ?", "green")
        .unwrap()
        .end();
    assert!(locked.is_locked());
    assert!(matches!(
        locked.clone().when("fruit = ?", "banana"),
        Err(WhereError::InvalidCase(_))
    ));
    assert!(matches!(locked.else_("x", ()), Err(WhereError::InvalidCase(_))));
}

#[test]
fn case_composes_as_an_expression() {
    let expr = where_("a = ?", 1)
        .unwrap()
        .and(case().when("b", ()).unwrap().then("c = ?", 2).unwrap(), ())
        .unwrap();
    assert_eq!(expr.to_string(), "a = ? AND CASE WHEN b THEN c = ? END");
    assert_eq!(texts(&expr.values()), ["1", "2"]);
}

// ==================== Field helper ====================

#[test]
fn field_null_and_boolean_checks() {
    let f = field("deleted_at");
    assert_eq!(f.is_null().to_string(), "deleted_at IS NULL");
    assert_eq!(f.is_not_null().to_string(), "deleted_at IS NOT NULL");
    assert_eq!(field("active").is_true().to_string(), "active = TRUE");
    assert_eq!(field("active").is_false().to_string(), "active = FALSE");
}

#[test]
fn field_comparisons_are_positional_by_default() {
    let f = field("age");
    let cases = [
        (f.equals(18), "age = ?"),
        (f.not_equals(18), "age <> ?"),
        (f.lt(18), "age < ?"),
        (f.lte(18), "age <= ?"),
        (f.gt(18), "age > ?"),
        (f.gte(18), "age >= ?"),
    ];
    for (expr, text) in cases {
        assert_eq!(expr.to_string(), text);
        assert_eq!(expr.values().to_vec(), vec![Value::Int(18)]);
    }
}

#[test]
fn field_named_placeholders() {
    let expr = field("age").gte_with(18, Placeholder::named(":min_age")).unwrap();
    assert_eq!(expr.to_string(), "age >= :min_age");
    assert_eq!(expr.values()["min_age"], Value::Int(18));

    let err = field("age").gte_with(18, Placeholder::named("bad name")).unwrap_err();
    assert!(matches!(err, WhereError::InvalidPlaceholder(_)));
}

#[test]
fn field_random_placeholders_are_unique() {
    let a = field("a").equals_with(1, Placeholder::Random).unwrap();
    let b = field("a").equals_with(1, Placeholder::Random).unwrap();
    assert_ne!(a.to_string(), b.to_string());

    let values = a.values();
    let (name, value) = values.named_values().next().unwrap();
    assert_eq!(name.len(), 13);
    assert!(name.starts_with('p'));
    assert_eq!(*value, Value::Int(1));
    assert_eq!(a.to_string(), format!("a = :{name}"));
    assert_eq!(a.preview().unwrap(), "a = 1");
}

#[test]
fn field_inline_writes_the_value() {
    let expr = field("a").equals_with(3, Placeholder::Inline).unwrap();
    assert_eq!(expr.to_string(), "a = 3");
    assert!(expr.values().is_empty());
}

#[test]
fn field_lists() {
    let expr = field("id").in_list([1, 2, 3]);
    assert_eq!(expr.to_string(), "id IN (?, ?, ?)");
    assert_eq!(expr.values().len(), 3);

    assert_eq!(field("id").not_in([1]).to_string(), "id NOT IN (?)");
    assert_eq!(field("id").in_list(Vec::<i32>::new()).to_string(), "1 = 0");
    assert_eq!(field("id").not_in(Vec::<i32>::new()).to_string(), "1 = 1");

    let inline = field("id").in_list_with([1, 2], Placeholder::Inline).unwrap();
    assert_eq!(inline.to_string(), "id IN (1, 2)");

    let random = field("id").not_in_with([1, 2], Placeholder::Random).unwrap();
    assert_eq!(random.values().named_len(), 2);
    assert!(random.to_string().starts_with("id NOT IN (:p"));

    let err = field("id").in_list_with([1], Placeholder::named("ids")).unwrap_err();
    assert!(matches!(err, WhereError::InvalidPlaceholder(_)));
}

#[test]
fn field_ranges() {
    let expr = field("age").between(18, 65);
    assert_eq!(expr.to_string(), "age BETWEEN ? AND ?");
    assert_eq!(texts(&expr.values()), ["18", "65"]);

    let expr = field("age").not_between_with(1, 2, Placeholder::Inline).unwrap();
    assert_eq!(expr.to_string(), "age NOT BETWEEN 1 AND 2");

    assert!(field("age").between_with(1, 2, Placeholder::named("x")).is_err());
}

#[test]
fn field_like_family() {
    let cases = [
        (field("name").like("bob"), "name LIKE ?", "%bob%"),
        (field("name").not_like("bob"), "name NOT LIKE ?", "%bob%"),
        (field("name").starts_with("bob"), "name LIKE ?", "bob%"),
        (field("name").not_starts_with("bob"), "name NOT LIKE ?", "bob%"),
        (field("name").ends_with("bob"), "name LIKE ?", "%bob"),
        (field("name").not_ends_with("bob"), "name NOT LIKE ?", "%bob"),
    ];
    for (expr, text, pattern) in cases {
        assert_eq!(expr.to_string(), text);
        assert_eq!(expr.values()[0], Value::Text(pattern.into()));
    }

    let expr = field("code")
        .starts_with_with("A", Placeholder::named("code"), "_")
        .unwrap();
    assert_eq!(expr.to_string(), "code LIKE :code");
    assert_eq!(expr.values()["code"], Value::Text("A_".into()));
}
