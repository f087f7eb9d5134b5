//! SELECT statement builder.

use crate::error::WhereError;
use crate::expr::{Clause, Expression, IntoArgs, Operator};
use crate::qb::join::JoinList;
use crate::qb::traits::Statement;
use crate::qb::{capture, chain, finish};
use std::fmt;

/// SELECT statement builder.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectQb {
    /// Flags after `SELECT` (e.g. `SQL_NO_CACHE`)
    flags: Vec<String>,
    distinct: bool,
    /// Columns; `*` when empty
    columns: Vec<Expression>,
    from: Option<String>,
    joins: JoinList,
    where_expr: Option<Expression>,
    group_by: Vec<String>,
    having: Option<Expression>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    end: Option<String>,
    build_error: Option<WhereError>,
}

impl Default for SelectQb {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQb {
    /// `SELECT *;`
    pub fn new() -> Self {
        Self {
            flags: Vec::new(),
            distinct: false,
            columns: Vec::new(),
            from: None,
            joins: JoinList::default(),
            where_expr: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            end: Some(";".to_string()),
            build_error: None,
        }
    }

    // ==================== Columns ====================

    /// Replace the columns. Columns may be expressions carrying values.
    pub fn with_columns<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns.clear();
        self.with_added_columns(columns)
    }

    /// Append columns.
    pub fn with_added_columns<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        for column in columns {
            if let Some(expr) = capture(&mut self.build_error, Expression::new(column, ())) {
                self.columns.push(expr);
            }
        }
        self
    }

    impl_statement_options!();

    /// Toggle `DISTINCT`.
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        self.from = Some(table.to_string());
        self
    }

    /// Remove the FROM clause.
    pub fn without_from(mut self) -> Self {
        self.from = None;
        self
    }

    // ==================== JOIN / WHERE ====================

    impl_join_methods!();

    impl_where_methods!();

    // ==================== GROUP BY / HAVING ====================

    /// Replace the GROUP BY terms.
    pub fn group_by<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        self.group_by = crate::qb::strings(terms);
        self
    }

    /// Append GROUP BY terms.
    pub fn and_group_by<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        self.group_by.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Replace the HAVING clause.
    pub fn having(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> Self {
        let expr = capture(&mut self.build_error, Expression::new(clause, args));
        if expr.is_some() {
            self.having = expr;
        }
        self
    }

    /// Remove the HAVING clause.
    pub fn clear_having(mut self) -> Self {
        self.having = None;
        self
    }

    /// `HAVING current AND clause`
    pub fn and_having(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> Self {
        let expr = chain(self.having.as_ref(), Operator::And, clause, args);
        if let Some(expr) = capture(&mut self.build_error, expr) {
            self.having = Some(expr);
        }
        self
    }

    /// `HAVING current OR clause`
    pub fn or_having(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> Self {
        let expr = chain(self.having.as_ref(), Operator::Or, clause, args);
        if let Some(expr) = capture(&mut self.build_error, expr) {
            self.having = Some(expr);
        }
        self
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    impl_order_limit_methods!();

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Remove OFFSET.
    pub fn without_offset(mut self) -> Self {
        self.offset = None;
        self
    }
}

impl Statement for SelectQb {
    fn kind(&self) -> &str {
        "SELECT"
    }

    fn build_sql(&self) -> String {
        let mut parts = vec!["SELECT".to_string()];
        parts.extend(self.flags.iter().cloned());
        if self.distinct {
            parts.push("DISTINCT".to_string());
        }

        if self.columns.is_empty() {
            parts.push("*".to_string());
        } else {
            let columns: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
            parts.push(columns.join(", "));
        }

        if let Some(from) = &self.from {
            parts.push(format!("FROM {from}"));
        }
        self.joins.render_into(&mut parts);
        if let Some(expr) = &self.where_expr {
            parts.push(format!("WHERE {expr}"));
        }
        if !self.group_by.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by.join(", ")));
        }
        if let Some(expr) = &self.having {
            parts.push(format!("HAVING {expr}"));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by.join(", ")));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("OFFSET {offset}"));
        }

        finish(parts, self.end.as_deref())
    }

    fn expressions(&self) -> Vec<&Expression> {
        self.columns
            .iter()
            .chain(self.joins.expressions())
            .chain(self.where_expr.as_ref())
            .chain(self.having.as_ref())
            .collect()
    }

    fn build_error(&self) -> Option<&WhereError> {
        self.build_error.as_ref()
    }
}

impl fmt::Display for SelectQb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_sql())
    }
}
