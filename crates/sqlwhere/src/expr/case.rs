//! `CASE [subject] WHEN .. THEN .. [ELSE ..] END` expressions.

use super::{BoundValues, Clause, Expression, IntoArgs};
use crate::error::{WhereError, WhereResult};
use std::fmt;

/// A CASE expression under construction.
///
/// Arms are added with [`when`](Self::when) / [`then`](Self::then) in strict
/// alternation. [`end`](Self::end) locks the expression; any later call fails.
///
/// # Example
/// ```ignore
/// use sqlwhere::case_of;
///
/// let color = case_of("fruit", ())?
///     .when("'apple'", ())?
///     .then("'green'", ())?
///     .else_("'black'", ())?
///     .end();
/// assert_eq!(color.to_string(), "CASE fruit WHEN 'apple' THEN 'green' ELSE 'black' END");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaseExpression {
    subject: Option<Expression>,
    arms: Vec<(Expression, Option<Expression>)>,
    otherwise: Option<Expression>,
    locked: bool,
}

impl CaseExpression {
    /// `CASE` without a subject.
    pub fn new() -> Self {
        Self::default()
    }

    /// `CASE subject`
    pub fn with_subject(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        Ok(Self {
            subject: Some(Expression::new(clause, args)?),
            ..Self::default()
        })
    }

    /// Open a new `WHEN` arm. The previous arm must have its `THEN`.
    pub fn when(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.ensure_unlocked()?;
        if matches!(self.arms.last(), Some((_, None))) {
            return Err(WhereError::invalid_case("missing a THEN for the previous WHEN"));
        }
        let expr = self.checked(clause, args)?;
        self.arms.push((expr, None));
        Ok(self)
    }

    /// Close the pending `WHEN` arm.
    pub fn then(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.ensure_unlocked()?;
        if !matches!(self.arms.last(), Some((_, None))) {
            return Err(WhereError::invalid_case("THEN without a matching WHEN"));
        }
        let expr = self.checked(clause, args)?;
        if let Some(arm) = self.arms.last_mut() {
            arm.1 = Some(expr);
        }
        Ok(self)
    }

    /// Set (or replace) the `ELSE` branch.
    pub fn else_(mut self, clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Self> {
        self.ensure_unlocked()?;
        let expr = self.checked(clause, args)?;
        self.otherwise = Some(expr);
        Ok(self)
    }

    /// Lock the expression.
    pub fn end(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Check if [`end`](Self::end) was called.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Convert into an [`Expression`] for composition.
    pub fn into_expression(self) -> Expression {
        Expression::Case(Box::new(self))
    }

    /// `CASE ... END AS rhs`
    pub fn as_(self, rhs: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Expression> {
        self.into_expression().as_(rhs, args)
    }

    /// Values of subject, arms and else branch, in that order.
    pub fn values(&self) -> BoundValues {
        let mut out = BoundValues::new();
        self.collect_values(&mut out);
        out
    }

    pub(crate) fn collect_values(&self, out: &mut BoundValues) {
        if let Some(subject) = &self.subject {
            subject.collect_values(out);
        }
        for (when, then) in &self.arms {
            when.collect_values(out);
            if let Some(then) = then {
                then.collect_values(out);
            }
        }
        if let Some(otherwise) = &self.otherwise {
            otherwise.collect_values(out);
        }
    }

    fn ensure_unlocked(&self) -> WhereResult<()> {
        if self.locked {
            return Err(WhereError::invalid_case("expression is locked by end()"));
        }
        Ok(())
    }

    /// Resolve a new part, rejecting names that conflict with existing parts.
    fn checked(&self, clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<Expression> {
        let expr = Expression::new(clause, args)?;
        let mut merged = self.values();
        merged.merge(&expr.values())?;
        Ok(expr)
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(subject) = &self.subject {
            write!(f, " {subject}")?;
        }
        for (when, then) in &self.arms {
            write!(f, " WHEN {when}")?;
            if let Some(then) = then {
                write!(f, " THEN {then}")?;
            }
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " ELSE {otherwise}")?;
        }
        f.write_str(" END")
    }
}

/// Start a `CASE` expression without a subject.
pub fn case() -> CaseExpression {
    CaseExpression::new()
}

/// Start a `CASE subject` expression.
pub fn case_of(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<CaseExpression> {
    CaseExpression::with_subject(clause, args)
}

/// Shorthand for `case().when(clause, args)`.
pub fn when(clause: impl Into<Clause>, args: impl IntoArgs) -> WhereResult<CaseExpression> {
    case().when(clause, args)
}
