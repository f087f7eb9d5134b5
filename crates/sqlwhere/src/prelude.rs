//! Convenient imports for typical `sqlwhere` usage.
//!
//! ```ignore
//! use sqlwhere::prelude::*;
//! ```

pub use crate::{
    BoundValues, Expression, Statement, Value, Values, WhereError, WhereResult, field, group, not,
    where_,
};

pub use crate::{case, case_of, when};

pub use crate::{delete, insert, select, update};
