//! Trait shared by all statement builders.

use crate::error::{WhereError, WhereResult};
use crate::expr::{BoundValues, Expression, values_of};
use crate::preview::Previewer;

/// Base trait for all statement builders.
///
/// Provides the rendered SQL, the values to bind alongside it, and a preview.
pub trait Statement {
    /// Leading keyword (`SELECT`, `INSERT`, ...), used in log events.
    fn kind(&self) -> &str;

    /// Build the SQL string.
    fn build_sql(&self) -> String;

    /// Expressions contributing values, in clause order.
    fn expressions(&self) -> Vec<&Expression>;

    /// First error recorded while building.
    fn build_error(&self) -> Option<&WhereError>;

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        self.build_sql()
    }

    /// Validate builder state.
    fn validate(&self) -> WhereResult<()> {
        match self.build_error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Values to bind, in placeholder order.
    fn values(&self) -> WhereResult<BoundValues> {
        self.validate()?;
        values_of(self.expressions())
    }

    /// SQL with values inlined, using default preview options.
    fn preview(&self) -> WhereResult<String> {
        self.preview_with(&Previewer::default())
    }

    /// SQL with values inlined.
    fn preview_with(&self, previewer: &Previewer) -> WhereResult<String> {
        let values = self.values()?;
        let sql = self.build_sql();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlwhere.statement",
            kind = self.kind(),
            value_count = values.len(),
            "preview statement",
        );

        previewer.preview(&sql, &values)
    }
}
