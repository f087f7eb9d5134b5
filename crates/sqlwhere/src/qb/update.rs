//! UPDATE statement builder.

use crate::error::WhereError;
use crate::expr::{Clause, Expression, IntoArgs, Operator};
use crate::qb::join::JoinList;
use crate::qb::traits::Statement;
use crate::qb::{capture, chain, finish};
use std::fmt;

/// UPDATE statement builder.
///
/// SET assignments are comma-joined expressions, so they carry their own
/// values: `.set("name = ?", "bob").and_set("age = ?", 42)`.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateQb {
    main_keyword: String,
    flags: Vec<String>,
    table: String,
    joins: JoinList,
    set: Option<Expression>,
    where_expr: Option<Expression>,
    order_by: Vec<String>,
    limit: Option<u64>,
    end: Option<String>,
    build_error: Option<WhereError>,
}

impl UpdateQb {
    /// Create an UPDATE builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            main_keyword: "UPDATE".to_string(),
            flags: Vec::new(),
            table: table.to_string(),
            joins: JoinList::default(),
            set: None,
            where_expr: None,
            order_by: Vec::new(),
            limit: None,
            end: Some(";".to_string()),
            build_error: None,
        }
    }

    /// Change the target table.
    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    impl_main_keyword!();

    impl_statement_options!();

    impl_join_methods!();

    /// Replace the SET assignments.
    pub fn set(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> Self {
        let expr = capture(&mut self.build_error, Expression::new(clause, args));
        if expr.is_some() {
            self.set = expr;
        }
        self
    }

    /// Remove every SET assignment.
    pub fn clear_set(mut self) -> Self {
        self.set = None;
        self
    }

    /// Append a SET assignment.
    pub fn and_set(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> Self {
        let expr = chain(self.set.as_ref(), Operator::Comma, clause, args);
        if let Some(expr) = capture(&mut self.build_error, expr) {
            self.set = Some(expr);
        }
        self
    }

    impl_where_methods!();

    impl_order_limit_methods!();
}

impl Statement for UpdateQb {
    fn kind(&self) -> &str {
        &self.main_keyword
    }

    fn build_sql(&self) -> String {
        let mut parts = vec![self.main_keyword.clone()];
        parts.extend(self.flags.iter().cloned());
        parts.push(self.table.clone());
        self.joins.render_into(&mut parts);
        if let Some(set) = &self.set {
            parts.push(format!("SET {set}"));
        }
        if let Some(expr) = &self.where_expr {
            parts.push(format!("WHERE {expr}"));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by.join(", ")));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {limit}"));
        }
        finish(parts, self.end.as_deref())
    }

    fn expressions(&self) -> Vec<&Expression> {
        self.joins
            .expressions()
            .chain(self.set.as_ref())
            .chain(self.where_expr.as_ref())
            .collect()
    }

    fn build_error(&self) -> Option<&WhereError> {
        self.build_error.as_ref()
    }
}

impl fmt::Display for UpdateQb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_sql())
    }
}
