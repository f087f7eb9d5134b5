//! JOIN clauses keyed by table.

use crate::expr::Expression;

/// Join flavour, rendered verbatim before the table name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Join,
    Inner,
    Outer,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Full,
    FullOuter,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Outer => "OUTER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Join {
    kind: JoinKind,
    table: String,
    on: Option<Expression>,
}

/// Ordered joins, at most one per table.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct JoinList {
    joins: Vec<Join>,
}

impl JoinList {
    /// Add a join, or replace the join on the same table in place.
    pub(crate) fn set(&mut self, kind: JoinKind, table: &str, on: Option<Expression>) {
        match self.joins.iter_mut().find(|j| j.table == table) {
            Some(existing) => {
                existing.kind = kind;
                existing.on = on;
            }
            None => self.joins.push(Join {
                kind,
                table: table.to_string(),
                on,
            }),
        }
    }

    pub(crate) fn remove(&mut self, table: &str) {
        self.joins.retain(|j| j.table != table);
    }

    pub(crate) fn clear(&mut self) {
        self.joins.clear();
    }

    /// `ON` conditions, in join order.
    pub(crate) fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.joins.iter().filter_map(|j| j.on.as_ref())
    }

    /// Push one `KIND table [ON cond]` part per join.
    pub(crate) fn render_into(&self, parts: &mut Vec<String>) {
        for join in &self.joins {
            match &join.on {
                Some(on) => parts.push(format!("{} {} ON {}", join.kind.keyword(), join.table, on)),
                None => parts.push(format!("{} {}", join.kind.keyword(), join.table)),
            }
        }
    }
}
