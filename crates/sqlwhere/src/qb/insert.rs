//! INSERT statement builder.

use crate::error::{WhereError, WhereResult};
use crate::expr::{BoundValues, Expression};
use crate::qb::traits::Statement;
use crate::qb::{capture, finish, strings};
use crate::value::Value;
use std::fmt;

type Row = Vec<(String, Value)>;

/// INSERT statement builder.
///
/// Rows are `(column, value)` lists. The first row fixes the column set;
/// later rows may list the same columns in any order and are reordered to
/// match.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertQb {
    main_keyword: String,
    flags: Vec<String>,
    table: Option<String>,
    /// Explicit column subset; the first row's columns when empty
    columns: Vec<String>,
    rows: Vec<Row>,
    on_duplicate: Vec<(String, String)>,
    escaper: Option<String>,
    end: Option<String>,
    build_error: Option<WhereError>,
}

impl Default for InsertQb {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertQb {
    /// Create an INSERT builder without rows.
    pub fn new() -> Self {
        Self {
            main_keyword: "INSERT".to_string(),
            flags: Vec::new(),
            table: None,
            columns: Vec::new(),
            rows: Vec::new(),
            on_duplicate: Vec::new(),
            escaper: None,
            end: Some(";".to_string()),
            build_error: None,
        }
    }

    impl_main_keyword!();

    impl_statement_options!();

    /// Set the target table.
    pub fn into(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Insert only these columns (taken from each row). Empty means all.
    pub fn with_columns<C: Into<String>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns = strings(columns);
        self
    }

    /// Replace the rows.
    pub fn with_rows<R, K, V>(mut self, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.rows.clear();
        for row in rows {
            self = self.and_row(row);
        }
        self
    }

    /// Append one row.
    pub fn and_row<K, V>(mut self, row: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let row: Row = row.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let conformed = self.conform(row);
        if let Some(row) = capture(&mut self.build_error, conformed) {
            self.rows.push(row);
        }
        self
    }

    /// Quote identifiers with `quote` on both sides (e.g. `` ` ``).
    pub fn with_escaper(mut self, quote: &str) -> Self {
        self.escaper = Some(quote.to_string());
        self
    }

    /// Write identifiers as given.
    pub fn without_escaper(mut self) -> Self {
        self.escaper = None;
        self
    }

    /// `ON DUPLICATE KEY UPDATE column = expr, ...`. Expressions are raw SQL.
    pub fn on_duplicate_key_update<K: Into<String>, V: ToString>(
        mut self,
        assignments: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.on_duplicate = assignments
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();
        self
    }

    /// Split into statements of at most `max` rows each.
    pub fn split(mut self, max: usize) -> Vec<InsertQb> {
        let rows = std::mem::take(&mut self.rows);
        rows.chunks(max.max(1))
            .map(|chunk| {
                let mut part = self.clone();
                part.rows = chunk.to_vec();
                part
            })
            .collect()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Columns written in the statement.
    pub fn columns(&self) -> Vec<&str> {
        if !self.columns.is_empty() {
            return self.columns.iter().map(String::as_str).collect();
        }
        self.rows
            .first()
            .map(|row| row.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Quote an identifier with the configured escaper.
    pub fn escape(&self, ident: &str) -> String {
        match &self.escaper {
            Some(quote) => format!("{quote}{ident}{quote}"),
            None => ident.to_string(),
        }
    }

    /// Check a new row against the first one and reorder it to match.
    fn conform(&self, mut row: Row) -> WhereResult<Row> {
        for (i, (column, _)) in row.iter().enumerate() {
            if row[..i].iter().any(|(k, _)| k == column) {
                return Err(WhereError::invalid_row(format!("column '{column}' appears twice")));
            }
        }

        let Some(first) = self.rows.first() else {
            return Ok(row);
        };
        if first.len() != row.len() {
            return Err(WhereError::invalid_row(format!(
                "expected {} columns, got {}",
                first.len(),
                row.len()
            )));
        }
        if first.iter().zip(&row).all(|((a, _), (b, _))| a == b) {
            return Ok(row);
        }

        let mut ordered = Vec::with_capacity(row.len());
        for (column, _) in first {
            let pos = row
                .iter()
                .position(|(k, _)| k == column)
                .ok_or_else(|| WhereError::invalid_row(format!("missing column '{column}'")))?;
            ordered.push(row.swap_remove(pos));
        }
        Ok(ordered)
    }
}

impl Statement for InsertQb {
    fn kind(&self) -> &str {
        &self.main_keyword
    }

    fn build_sql(&self) -> String {
        let columns = self.columns();
        let mut parts = vec![self.main_keyword.clone()];
        parts.extend(self.flags.iter().cloned());
        if let Some(table) = &self.table {
            parts.push(format!("INTO {}", self.escape(table)));
        }

        let names: Vec<String> = columns.iter().map(|c| self.escape(c)).collect();
        parts.push(format!("({})", names.join(", ")));

        parts.push("VALUES".to_string());
        let tuple = format!("({})", vec!["?"; columns.len()].join(", "));
        parts.push(vec![tuple.as_str(); self.rows.len()].join(", "));

        if !self.on_duplicate.is_empty() {
            parts.push("ON DUPLICATE KEY UPDATE".to_string());
            let assignments: Vec<String> = self
                .on_duplicate
                .iter()
                .map(|(column, expr)| format!("{} = {}", self.escape(column), expr))
                .collect();
            parts.push(assignments.join(", "));
        }

        finish(parts, self.end.as_deref())
    }

    /// Row values are plain data, not expressions.
    fn expressions(&self) -> Vec<&Expression> {
        Vec::new()
    }

    fn build_error(&self) -> Option<&WhereError> {
        self.build_error.as_ref()
    }

    fn validate(&self) -> WhereResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if self.rows.is_empty() {
            return Err(WhereError::invalid_row("at least one row is required"));
        }
        Ok(())
    }

    /// Row values in column order, row after row.
    fn values(&self) -> WhereResult<BoundValues> {
        self.validate()?;
        let columns = self.columns();
        let mut out = BoundValues::new();
        for (index, row) in self.rows.iter().enumerate() {
            for column in &columns {
                let value = row
                    .iter()
                    .find(|(k, _)| k == *column)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| {
                        WhereError::invalid_row(format!("row {index} has no column '{column}'"))
                    })?;
                out.push_positional(value);
            }
        }
        Ok(out)
    }
}

impl fmt::Display for InsertQb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_sql())
    }
}
