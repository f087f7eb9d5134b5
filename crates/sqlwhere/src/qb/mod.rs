//! Statement builders for SELECT/INSERT/UPDATE/DELETE.
//!
//! Builders are consuming and never fail mid-chain: the first error raised
//! while resolving a clause is kept and reported by [`Statement::validate`],
//! [`Statement::values`] and [`Statement::preview`].
//!
//! # Usage
//!
//! ```ignore
//! use sqlwhere::qb::{self, Statement};
//! use sqlwhere::field;
//!
//! // SELECT
//! let query = qb::select(["id", "name"])
//!     .from("users")
//!     .left_join("teams", "teams.id = users.team_id AND teams.active = ?", true)
//!     .where_(field("status").equals("active"), ())
//!     .order_by(["created_at DESC"])
//!     .limit(20);
//! let (sql, values) = (query.to_sql(), query.values()?);
//!
//! // INSERT
//! let query = qb::insert([[("id", 1), ("rank", 2)]]).into("scores");
//!
//! // UPDATE
//! let query = qb::update("users")
//!     .set("status = ?", "inactive")
//!     .where_("id = ?", 42);
//!
//! // DELETE
//! let query = qb::delete([] as [&str; 0]).from("users").where_("id = ?", 42);
//! ```

#[macro_use]
mod clause_macros;

mod delete;
mod insert;
mod join;
mod select;
mod traits;
mod update;


pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use join::JoinKind;
pub use select::SelectQb;
pub use traits::Statement;
pub use update::UpdateQb;

use crate::error::{WhereError, WhereResult};
use crate::expr::{Clause, Expression, IntoArgs, Operator};
use crate::value::Value;

/// Create a SELECT builder. An empty column list selects `*`.
///
/// # Example
/// ```ignore
/// let query = sqlwhere::select(["id"]).from("users").where_("id = ?", 1);
/// assert_eq!(query.to_sql(), "SELECT id FROM users WHERE id = ?;");
/// ```
pub fn select<C: Into<Clause>>(columns: impl IntoIterator<Item = C>) -> SelectQb {
    SelectQb::new().with_columns(columns)
}

/// Create an INSERT builder from rows of `(column, value)` pairs.
///
/// Every row must have the same columns as the first one, in any order.
pub fn insert<R, K, V>(rows: impl IntoIterator<Item = R>) -> InsertQb
where
    R: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    InsertQb::new().with_rows(rows)
}

/// Create an UPDATE builder for a table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder. Tables are only needed for multi-table deletes;
/// the usual form is `delete([] as [&str; 0]).from("t")`.
pub fn delete<T: Into<String>>(tables: impl IntoIterator<Item = T>) -> DeleteQb {
    DeleteQb::new().delete_only_from_tables(tables)
}

/// Keep the first error seen by a builder.
pub(crate) fn capture<T>(slot: &mut Option<WhereError>, result: WhereResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            if slot.is_none() {
                *slot = Some(err);
            }
            None
        }
    }
}

/// Resolve a clause and compose it onto `current` (or start a new chain).
pub(crate) fn chain(
    current: Option<&Expression>,
    operator: Operator,
    clause: impl Into<Clause>,
    args: impl IntoArgs,
) -> WhereResult<Expression> {
    let rhs = Expression::new(clause, args)?;
    match current {
        Some(current) => current.compose(operator, rhs),
        None => Ok(rhs),
    }
}

/// Append flags not already present (compared case-insensitively).
pub(crate) fn add_flags<F: Into<String>>(flags: &mut Vec<String>, added: impl IntoIterator<Item = F>) {
    for flag in added {
        let flag = flag.into();
        if !flags.iter().any(|f| f.eq_ignore_ascii_case(&flag)) {
            flags.push(flag);
        }
    }
}

/// Join rendered parts with spaces and append the terminator.
pub(crate) fn finish(parts: Vec<String>, end: Option<&str>) -> String {
    let mut sql = parts.join(" ");
    if let Some(end) = end {
        sql.push_str(end);
    }
    sql
}

pub(crate) fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}
