//! Expression layer for WHERE/HAVING/SET/JOIN clauses.
//!
//! This module provides the [`Expression`] enum which supports:
//! - literal conditions carrying their own `?` or `:name` values
//! - AND/OR/comma/AS composition
//! - grouping (`(...)`) and negation (`NOT ...`)
//! - CASE expressions
//!
//! Expressions are immutable: every composition method returns a new tree and
//! leaves the receiver untouched, so a base condition can be reused freely.
//!
//! ```ignore
//! use sqlwhere::{group, where_};
//!
//! let expr = group("a = ?", 1)?.or("b = ?", 2)?;
//! assert_eq!(expr.to_string(), "(a = ?) OR b = ?");
//! ```

mod args;
mod case;
mod field;
mod param;

#[cfg(test)]
mod tests;

pub use args::{Arg, IntoArgs};
pub use case::{CaseExpression, case, case_of, when};
pub use field::{Field, Placeholder, field};
pub use param::{BoundValues, ParamKey, Values};

use crate::error::{WhereError, WhereResult};
use crate::value::Value;
use std::fmt;

/// Leaf expression: literal clause text and the values of its placeholders.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    text: String,
    values: Values,
}

impl Condition {
    /// The clause text, placeholders untouched.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw values bound by this condition.
    pub fn values(&self) -> &Values {
        &self.values
    }
}

/// Glue used to join the children of a composite expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    /// `, ` (SET assignments, column lists)
    Comma,
    As,
}

impl Operator {
    /// The text placed between two children.
    pub fn glue(self) -> &'static str {
        match self {
            Operator::And => " AND ",
            Operator::Or => " OR ",
            Operator::Comma => ", ",
            Operator::As => " AS ",
        }
    }
}

/// Two or more expressions joined by an [`Operator`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeExpression {
    operator: Operator,
    children: Vec<Expression>,
}

impl CompositeExpression {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }
}

/// A renderable SQL fragment paired with its bound values.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Literal clause text with its own values.
    Condition(Condition),
    /// Children joined by an operator.
    Composite(CompositeExpression),
    /// `(inner)`
    Group(Box<Expression>),
    /// `NOT inner`
    Negated(Box<Expression>),
    /// `CASE ... END`
    Case(Box<CaseExpression>),
}

/// First argument of the expression factory.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Clause text such as `"status = ?"`.
    Template(String),
    /// An already-built expression, passed through as is.
    Expr(Expression),
    /// A bare value. Scalars are used as clause text; anything else is rejected.
    Value(Value),
}

impl From<&str> for Clause {
    fn from(text: &str) -> Self {
        Clause::Template(text.to_string())
    }
}

impl From<String> for Clause {
    fn from(text: String) -> Self {
        Clause::Template(text)
    }
}

impl From<&String> for Clause {
    fn from(text: &String) -> Self {
        Clause::Template(text.clone())
    }
}

impl From<Expression> for Clause {
    fn from(expr: Expression) -> Self {
        Clause::Expr(expr)
    }
}

impl From<&Expression> for Clause {
    fn from(expr: &Expression) -> Self {
        Clause::Expr(expr.clone())
    }
}

impl From<CaseExpression> for Clause {
    fn from(case: CaseExpression) -> Self {
        Clause::Expr(case.into())
    }
}

impl From<Value> for Clause {
    fn from(value: Value) -> Self {
        Clause::Value(value)
    }
}

impl Expression {
    /// Build an expression from a clause and its auxiliary values.
    ///
    /// - Clause text with no args binds nothing.
    /// - Clause text with exactly one [`Values`] arg uses it as the collection
    ///   (the way to bind `:name` placeholders).
    /// - Otherwise each arg is one positional value; mixing a collection
    ///   with other args is ambiguous and fails.
    /// - An existing expression is returned unchanged and accepts no args.
    pub fn new(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        let args = args.into_args();
        match clause.into() {
            Clause::Template(text) => Self::from_template(text, args),
            Clause::Expr(expr) => {
                if !args.is_empty() {
                    return Err(WhereError::IllegalValueAttachment);
                }
                Ok(expr)
            }
            Clause::Value(value) if value.is_scalar() => {
                Self::from_template(value.to_string(), args)
            }
            Clause::Value(value) => Err(WhereError::InvalidClause(value.type_name().to_string())),
        }
    }

    /// A condition without values.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::condition(text, Values::default())
    }

    pub(crate) fn condition(text: impl Into<String>, values: Values) -> Self {
        Expression::Condition(Condition {
            text: text.into(),
            values,
        })
    }

    fn from_template(text: String, args: Vec<Arg>) -> WhereResult<Self> {
        let values = values_from_args(args)?;
        values.check_unique_names()?;
        Ok(Self::condition(text, values))
    }

    /// `self AND rhs`
    pub fn and(&self, rhs: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.compose(Operator::And, Expression::new(rhs, args)?)
    }

    /// `self OR rhs`
    pub fn or(&self, rhs: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.compose(Operator::Or, Expression::new(rhs, args)?)
    }

    /// `self, rhs` (SET assignments)
    pub fn plus(&self, rhs: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.compose(Operator::Comma, Expression::new(rhs, args)?)
    }

    /// `self AS rhs`
    pub fn as_(&self, rhs: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.compose(Operator::As, Expression::new(rhs, args)?)
    }

    /// Join `self` and `rhs` with `operator`.
    ///
    /// Chains of the same operator are kept as one flat composite; the
    /// rendered text and value order are the same as nesting would give.
    /// Fails when both sides bind the same `:name` to different values.
    pub fn compose(&self, operator: Operator, rhs: Expression) -> WhereResult<Self> {
        let mut merged = self.values();
        merged.merge(&rhs.values())?;

        let children = match self {
            Expression::Composite(c) if c.operator == operator => {
                let mut children = c.children.clone();
                children.push(rhs);
                children
            }
            _ => vec![self.clone(), rhs],
        };
        Ok(Expression::Composite(CompositeExpression { operator, children }))
    }

    /// `NOT self`, or the inner expression when `self` is already negated.
    pub fn negate(&self) -> Self {
        match self {
            Expression::Negated(inner) => (**inner).clone(),
            other => Expression::Negated(Box::new(other.clone())),
        }
    }

    /// `(self)`, or `self` when it is already a group.
    pub fn as_group(&self) -> Self {
        match self {
            Expression::Group(_) => self.clone(),
            other => Expression::Group(Box::new(other.clone())),
        }
    }

    /// Values of every condition in the tree, depth-first, left to right.
    pub fn values(&self) -> BoundValues {
        let mut out = BoundValues::new();
        self.collect_values(&mut out);
        out
    }

    pub(crate) fn collect_values(&self, out: &mut BoundValues) {
        match self {
            Expression::Condition(c) => out.absorb(&c.values),
            Expression::Composite(c) => {
                for child in &c.children {
                    child.collect_values(out);
                }
            }
            Expression::Group(inner) | Expression::Negated(inner) => inner.collect_values(out),
            Expression::Case(case) => case.collect_values(out),
        }
    }

    /// Render with values substituted as SQL literals. Debug only.
    pub fn preview(&self) -> WhereResult<String> {
        crate::preview::preview(&self.to_string(), &self.values())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Condition(c) => f.write_str(&c.text),
            Expression::Composite(c) => {
                for (i, child) in c.children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(c.operator.glue())?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            Expression::Group(inner) => write!(f, "({inner})"),
            Expression::Negated(inner) => write!(f, "NOT {inner}"),
            Expression::Case(case) => write!(f, "{case}"),
        }
    }
}

impl From<CaseExpression> for Expression {
    fn from(case: CaseExpression) -> Self {
        Expression::Case(Box::new(case))
    }
}

fn values_from_args(mut args: Vec<Arg>) -> WhereResult<Values> {
    if args.is_empty() {
        return Ok(Values::default());
    }
    if args.len() == 1 {
        return Ok(match args.remove(0) {
            Arg::Values(values) => values,
            Arg::Value(value) => Values::Positional(vec![value]),
        });
    }
    args.into_iter()
        .map(|arg| match arg {
            Arg::Value(value) => Ok(value),
            Arg::Values(_) => Err(WhereError::AmbiguousValues),
        })
        .collect::<WhereResult<Vec<_>>>()
        .map(Values::Positional)
}

/// Build an expression from a clause and its values.
///
/// # Example
/// ```ignore
/// let expr = sqlwhere::where_("foo = ?", "bar")?.and("baz = ?", "qux")?;
/// assert_eq!(expr.to_string(), "foo = ? AND baz = ?");
/// ```
pub fn where_(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Expression> {
    Expression::new(clause, args)
}

/// Build an expression and wrap it in parentheses. Groups are not wrapped twice.
pub fn group(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Expression> {
    Ok(Expression::new(clause, args)?.as_group())
}

/// Build an expression and prefix it with `NOT`.
pub fn not(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Expression> {
    Ok(Expression::Negated(Box::new(Expression::new(clause, args)?)))
}

/// Merge the values of several independent expressions, in order.
///
/// Positional values are re-slotted `0..N-1`; named values keep their key.
/// Fails when two expressions bind the same `:name` to different values.
pub fn values_of<'a>(expressions: impl IntoIterator<Item = &'a Expression>) -> WhereResult<BoundValues> {
    let mut out = BoundValues::new();
    for expr in expressions {
        out.merge(&expr.values())?;
    }
    Ok(out)
}
