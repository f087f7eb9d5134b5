//! DELETE statement builder.

use crate::error::WhereError;
use crate::expr::Expression;
use crate::qb::join::JoinList;
use crate::qb::traits::Statement;
use crate::qb::{finish, strings};
use std::fmt;

/// DELETE statement builder.
///
/// Target tables are only rendered for multi-table deletes
/// (`DELETE t1, t2 FROM t1 JOIN t2 ...`).
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteQb {
    main_keyword: String,
    flags: Vec<String>,
    tables: Vec<String>,
    from: Option<String>,
    partitions: Vec<String>,
    joins: JoinList,
    where_expr: Option<Expression>,
    order_by: Vec<String>,
    limit: Option<u64>,
    end: Option<String>,
    build_error: Option<WhereError>,
}

impl Default for DeleteQb {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteQb {
    /// `DELETE;`
    pub fn new() -> Self {
        Self {
            main_keyword: "DELETE".to_string(),
            flags: Vec::new(),
            tables: Vec::new(),
            from: None,
            partitions: Vec::new(),
            joins: JoinList::default(),
            where_expr: None,
            order_by: Vec::new(),
            limit: None,
            end: Some(";".to_string()),
            build_error: None,
        }
    }

    impl_main_keyword!();

    /// Replace the tables rows are deleted from.
    pub fn delete_only_from_tables<T: Into<String>>(mut self, tables: impl IntoIterator<Item = T>) -> Self {
        self.tables = strings(tables);
        self
    }

    impl_statement_options!();

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

    /// Replace the partitions.
    pub fn with_partitions<P: Into<String>>(mut self, partitions: impl IntoIterator<Item = P>) -> Self {
        self.partitions = strings(partitions);
        self
    }

    /// Append partitions not already listed.
    pub fn with_added_partitions<P: Into<String>>(mut self, partitions: impl IntoIterator<Item = P>) -> Self {
        for partition in partitions {
            let partition = partition.into();
            if !self.partitions.contains(&partition) {
                self.partitions.push(partition);
            }
        }
        self
    }

    impl_join_methods!();

    impl_where_methods!();

    impl_order_limit_methods!();
}

impl Statement for DeleteQb {
    fn kind(&self) -> &str {
        &self.main_keyword
    }

    fn build_sql(&self) -> String {
        let mut parts = vec![self.main_keyword.clone()];
        parts.extend(self.flags.iter().cloned());
        if !self.tables.is_empty() {
            parts.push(self.tables.join(", "));
        }
        if let Some(from) = &self.from {
            parts.push(format!("FROM {from}"));
        }
        if !self.partitions.is_empty() {
            parts.push(format!("PARTITION ({})", self.partitions.join(", ")));
        }
        self.joins.render_into(&mut parts);
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
        self.joins.expressions().chain(self.where_expr.as_ref()).collect()
    }

    fn build_error(&self) -> Option<&WhereError> {
        self.build_error.as_ref()
    }
}

impl fmt::Display for DeleteQb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_sql())
    }
}
