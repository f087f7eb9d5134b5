//! # sqlwhere
//!
//! Composable SQL clause expressions that carry their bound values.
//!
//! ## Features
//!
//! - **Expressions with values**: a clause template travels with the values
//!   for its `?` or `:name` placeholders, through `AND`/`OR` chains, groups
//!   and negations
//! - **Helpers**: `field("age").gte(18)`, `in_list`, `between`, `LIKE`
//!   wrappers and `CASE ... END` builders
//! - **Statement builders**: SELECT, INSERT, UPDATE and DELETE that render
//!   SQL and collect values in placeholder order
//! - **Preview**: inline values as SQL literals for logs and debugging
//!
//! ## Expressions
//!
//! ```ignore
//! use sqlwhere::{field, group, where_, Values};
//!
//! let expr = where_("status = ?", "active")?
//!     .and(group("age > ? OR vip = ?", (18, true))?, ())?
//!     .and(field("country").in_list(["FR", "BE"]), ())?;
//!
//! assert_eq!(
//!     expr.to_string(),
//!     "status = ? AND (age > ? OR vip = ?) AND country IN (?, ?)",
//! );
//! assert_eq!(expr.values().len(), 5);
//!
//! let named = where_("created_at > :since", Values::named([("since", "2024-01-01")]))?;
//! ```
//!
//! ## Statements
//!
//! ```ignore
//! use sqlwhere::{select, Statement};
//!
//! let query = select(["id", "name"])
//!     .from("users")
//!     .where_("status = ?", "active")
//!     .limit(10);
//!
//! let sql = query.to_sql();          // SELECT id, name FROM users WHERE status = ? LIMIT 10;
//! let values = query.values()?;      // ["active"]
//! let debug = query.preview()?;      // SELECT id, name FROM users WHERE status = 'active' LIMIT 10;
//! ```

pub mod error;
pub mod expr;
pub mod prelude;
pub mod preview;
pub mod qb;
pub mod value;

pub use error::{WhereError, WhereResult};
pub use expr::{
    Arg, BoundValues, CaseExpression, Clause, CompositeExpression, Condition, Expression, Field,
    IntoArgs, Operator, ParamKey, Placeholder, Values, case, case_of, field, group, not, values_of,
    when, where_,
};
pub use preview::{Previewer, preview};
pub use value::{DATETIME_FORMAT, RenderableAsText, Value};

// Re-export qb module for easy access
pub use qb::{
    DeleteQb, InsertQb, JoinKind, SelectQb, Statement, UpdateQb, delete, insert, select, update,
};
