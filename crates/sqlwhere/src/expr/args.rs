//! Auxiliary arguments accepted by the expression factory.
//!
//! The factory takes a clause plus "whatever values come with it": nothing,
//! a single value, a tuple of values, or one ready-made [`Values`] collection
//! (the way named parameters are passed). [`IntoArgs`] normalizes all of
//! these into a list of [`Arg`]s.

use crate::expr::param::Values;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// One auxiliary argument: a single value or a whole collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Value(Value),
    Values(Values),
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<Values> for Arg {
    fn from(v: Values) -> Self {
        Arg::Values(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(v.into())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Arg {
    fn from(v: DateTime<Tz>) -> Self {
        Arg::Value(v.into())
    }
}

/// Conversion into the factory's argument list.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl IntoArgs for Arg {
    fn into_args(self) -> Vec<Arg> {
        vec![self]
    }
}

impl IntoArgs for Value {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::Value(self)]
    }
}

impl IntoArgs for Values {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::Values(self)]
    }
}

/// A list of values is one positional collection.
impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::Values(Values::Positional(self))]
    }
}

impl<T: Into<Value>> IntoArgs for Option<T> {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::from(self)]
    }
}

impl<Tz: TimeZone> IntoArgs for DateTime<Tz> {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::from(self)]
    }
}

macro_rules! impl_scalar_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }

            impl IntoArgs for $ty {
                fn into_args(self) -> Vec<Arg> {
                    vec![Arg::from(self)]
                }
            }
        )*
    };
}

impl_scalar_arg!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    char,
    &str,
    String,
    &String,
    Vec<u8>,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    uuid::Uuid,
    serde_json::Value,
);

macro_rules! impl_tuple_args {
    ($($name:ident),+) => {
        impl<$($name: Into<Arg>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_tuple_args!(A);
impl_tuple_args!(A, B);
impl_tuple_args!(A, B, C);
impl_tuple_args!(A, B, C, D);
impl_tuple_args!(A, B, C, D, E);
impl_tuple_args!(A, B, C, D, E, F);
impl_tuple_args!(A, B, C, D, E, F, G);
impl_tuple_args!(A, B, C, D, E, F, G, H);
