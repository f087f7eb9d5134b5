//! Column comparison helper: `field("age").gte(18)`.

use super::{Expression, Values};
use crate::error::{WhereError, WhereResult};
use crate::value::Value;

/// How a field comparison binds its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// `?` markers with positional values.
    #[default]
    Positional,
    /// Generated `:pXXXXXXXXXXXX` names, unique per call.
    Random,
    /// A caller-chosen `:name`. Single-value comparisons only.
    Named(String),
    /// The value's plain text written into the clause, nothing bound.
    ///
    /// No quoting or escaping is applied; only use with trusted values.
    Inline,
}

impl Placeholder {
    /// `Placeholder::Named` from `name` or `:name`.
    pub fn named(name: impl Into<String>) -> Self {
        Placeholder::Named(name.into())
    }
}

/// Start a comparison on a column.
pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

/// A column name with comparison builders.
///
/// Every comparison has an infallible positional form and a `*_with` form
/// taking a [`Placeholder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    name: String,
}

macro_rules! comparisons {
    ($($(#[$doc:meta])* $name:ident / $name_with:ident => $op:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, value: impl Into<Value>) -> Expression {
                self.bind_positional(format!("{} {} ?", self.name, $op), vec![value.into()])
            }

            $(#[$doc])*
            pub fn $name_with(
                &self,
                value: impl Into<Value>,
                placeholder: Placeholder,
            ) -> WhereResult<Expression> {
                self.compare_with($op, value.into(), placeholder)
            }
        )*
    };
}

macro_rules! patterns {
    ($($(#[$doc:meta])* $name:ident / $name_with:ident => $op:literal, $prefix:literal, $suffix:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, value: &str) -> Expression {
                let pattern = surround(value, "%", $prefix, $suffix);
                self.bind_positional(format!("{} {} ?", self.name, $op), vec![Value::Text(pattern)])
            }

            $(#[$doc])*
            ///
            /// `wildcard` replaces the default `%`.
            pub fn $name_with(
                &self,
                value: &str,
                placeholder: Placeholder,
                wildcard: &str,
            ) -> WhereResult<Expression> {
                let pattern = surround(value, wildcard, $prefix, $suffix);
                self.compare_with($op, Value::Text(pattern), placeholder)
            }
        )*
    };
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name IS NULL`
    pub fn is_null(&self) -> Expression {
        Expression::raw(format!("{} IS NULL", self.name))
    }

    /// `name IS NOT NULL`
    pub fn is_not_null(&self) -> Expression {
        Expression::raw(format!("{} IS NOT NULL", self.name))
    }

    /// `name = TRUE`
    pub fn is_true(&self) -> Expression {
        Expression::raw(format!("{} = TRUE", self.name))
    }

    /// `name = FALSE`
    pub fn is_false(&self) -> Expression {
        Expression::raw(format!("{} = FALSE", self.name))
    }

    comparisons! {
        /// `name = value`
        equals / equals_with => "=";
        /// `name <> value`
        not_equals / not_equals_with => "<>";
        /// `name < value`
        lt / lt_with => "<";
        /// `name <= value`
        lte / lte_with => "<=";
        /// `name > value`
        gt / gt_with => ">";
        /// `name >= value`
        gte / gte_with => ">=";
    }

    patterns! {
        /// `name LIKE '%value%'`
        like / like_with => "LIKE", true, true;
        /// `name NOT LIKE '%value%'`
        not_like / not_like_with => "NOT LIKE", true, true;
        /// `name LIKE 'value%'`
        starts_with / starts_with_with => "LIKE", false, true;
        /// `name NOT LIKE 'value%'`
        not_starts_with / not_starts_with_with => "NOT LIKE", false, true;
        /// `name LIKE '%value'`
        ends_with / ends_with_with => "LIKE", true, false;
        /// `name NOT LIKE '%value'`
        not_ends_with / not_ends_with_with => "NOT LIKE", true, false;
    }

    /// `name IN (?, ?, ...)`
    ///
    /// An empty list renders the always-false `1 = 0`.
    pub fn in_list<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Expression {
        self.list("IN", collect(values), false)
    }

    /// `name IN (...)` with a placeholder mode. `Named` is rejected.
    pub fn in_list_with<V: Into<Value>>(
        &self,
        values: impl IntoIterator<Item = V>,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        self.list_with("IN", collect(values), false, placeholder)
    }

    /// `name NOT IN (?, ?, ...)`
    ///
    /// An empty list renders the always-true `1 = 1`.
    pub fn not_in<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Expression {
        self.list("NOT IN", collect(values), true)
    }

    /// `name NOT IN (...)` with a placeholder mode. `Named` is rejected.
    pub fn not_in_with<V: Into<Value>>(
        &self,
        values: impl IntoIterator<Item = V>,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        self.list_with("NOT IN", collect(values), true, placeholder)
    }

    /// `name BETWEEN ? AND ?`
    pub fn between(&self, start: impl Into<Value>, end: impl Into<Value>) -> Expression {
        self.bind_positional(
            format!("{} BETWEEN ? AND ?", self.name),
            vec![start.into(), end.into()],
        )
    }

    /// `name BETWEEN .. AND ..` with a placeholder mode. `Named` is rejected.
    pub fn between_with(
        &self,
        start: impl Into<Value>,
        end: impl Into<Value>,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        self.range_with("BETWEEN", start.into(), end.into(), placeholder)
    }

    /// `name NOT BETWEEN ? AND ?`
    pub fn not_between(&self, start: impl Into<Value>, end: impl Into<Value>) -> Expression {
        self.bind_positional(
            format!("{} NOT BETWEEN ? AND ?", self.name),
            vec![start.into(), end.into()],
        )
    }

    /// `name NOT BETWEEN .. AND ..` with a placeholder mode. `Named` is rejected.
    pub fn not_between_with(
        &self,
        start: impl Into<Value>,
        end: impl Into<Value>,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        self.range_with("NOT BETWEEN", start.into(), end.into(), placeholder)
    }

    fn bind_positional(&self, text: String, values: Vec<Value>) -> Expression {
        Expression::condition(text, Values::Positional(values))
    }

    fn compare_with(&self, op: &str, value: Value, placeholder: Placeholder) -> WhereResult<Expression> {
        let name = &self.name;
        Ok(match placeholder {
            Placeholder::Positional => self.bind_positional(format!("{name} {op} ?"), vec![value]),
            Placeholder::Random => {
                let key = random_name();
                Expression::condition(format!("{name} {op} :{key}"), Values::Named(vec![(key, value)]))
            }
            Placeholder::Named(raw) => {
                let key = placeholder_name(&raw)?;
                Expression::condition(format!("{name} {op} :{key}"), Values::Named(vec![(key, value)]))
            }
            Placeholder::Inline => Expression::raw(format!("{name} {op} {value}")),
        })
    }

    fn list(&self, op: &str, values: Vec<Value>, negated: bool) -> Expression {
        if values.is_empty() {
            return empty_list(negated);
        }
        let markers = vec!["?"; values.len()].join(", ");
        self.bind_positional(format!("{} {op} ({markers})", self.name), values)
    }

    fn list_with(
        &self,
        op: &str,
        values: Vec<Value>,
        negated: bool,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        if values.is_empty() {
            return match placeholder {
                Placeholder::Named(_) => Err(named_not_allowed(op)),
                _ => Ok(empty_list(negated)),
            };
        }
        match placeholder {
            Placeholder::Positional => Ok(self.list(op, values, negated)),
            Placeholder::Random => {
                let pairs: Vec<(String, Value)> =
                    values.into_iter().map(|v| (random_name(), v)).collect();
                let markers = pairs
                    .iter()
                    .map(|(k, _)| format!(":{k}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(Expression::condition(
                    format!("{} {op} ({markers})", self.name),
                    Values::Named(pairs),
                ))
            }
            Placeholder::Named(_) => Err(named_not_allowed(op)),
            Placeholder::Inline => {
                let inline = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(Expression::raw(format!("{} {op} ({inline})", self.name)))
            }
        }
    }

    fn range_with(
        &self,
        op: &str,
        start: Value,
        end: Value,
        placeholder: Placeholder,
    ) -> WhereResult<Expression> {
        let name = &self.name;
        match placeholder {
            Placeholder::Positional => Ok(self.bind_positional(
                format!("{name} {op} ? AND ?"),
                vec![start, end],
            )),
            Placeholder::Random => {
                let (a, b) = (random_name(), random_name());
                Ok(Expression::condition(
                    format!("{name} {op} :{a} AND :{b}"),
                    Values::Named(vec![(a, start), (b, end)]),
                ))
            }
            Placeholder::Named(_) => Err(named_not_allowed(op)),
            Placeholder::Inline => Ok(Expression::raw(format!("{name} {op} {start} AND {end}"))),
        }
    }
}

fn collect<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Vec<Value> {
    values.into_iter().map(Into::into).collect()
}

fn empty_list(negated: bool) -> Expression {
    Expression::raw(if negated { "1 = 1" } else { "1 = 0" })
}

fn surround(value: &str, wildcard: &str, prefix: bool, suffix: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2 * wildcard.len());
    if prefix {
        out.push_str(wildcard);
    }
    out.push_str(value);
    if suffix {
        out.push_str(wildcard);
    }
    out
}

fn named_not_allowed(op: &str) -> WhereError {
    WhereError::invalid_placeholder(format!(
        "{op} binds several values; expected Positional, Random or Inline"
    ))
}

/// Strip a leading `:` and check the rest is a valid placeholder name.
fn placeholder_name(raw: &str) -> WhereResult<String> {
    let name = raw.strip_prefix(':').unwrap_or(raw);
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(WhereError::invalid_placeholder(format!(
            "'{raw}' is not a valid placeholder name"
        )));
    }
    Ok(name.to_string())
}

/// `p` followed by 12 hex digits of a v4 uuid.
pub(crate) fn random_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("p{}", &id[..12])
}
