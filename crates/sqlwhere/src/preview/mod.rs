//! Statement previewer: placeholders replaced by SQL literals.
//!
//! The preview is meant for logs and debugging. It is **not** a safe way to
//! build executable SQL; always send the clause text and its values separately.
//!
//! ```ignore
//! use sqlwhere::{preview, where_};
//!
//! let expr = where_("x = ? and y = ?", ("a", None::<i32>))?;
//! assert_eq!(preview(&expr.to_string(), &expr.values())?, "x = 'a' and y = NULL");
//! ```


use crate::error::{WhereError, WhereResult};
use crate::expr::BoundValues;
use crate::value::{DATETIME_FORMAT, Value};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Matches `?`, `::` casts (skipped) and `:name` tokens.
fn placeholder_regex() -> &'static regex::Regex {
    static PLACEHOLDER_RE: OnceLock<regex::Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        regex::Regex::new(r"\?|::|:([A-Za-z0-9_]+)").expect("invalid built-in placeholder regex")
    })
}

/// Preview with default options.
pub fn preview(sql: &str, values: &BoundValues) -> WhereResult<String> {
    Previewer::default().preview(sql, values)
}

/// Renders statements with their values inlined.
#[derive(Debug, Clone)]
pub struct Previewer {
    /// `chrono` format string for date/time values.
    pub datetime_format: String,
    /// Truncate the preview (in bytes, on a char boundary). `None` means no truncation.
    pub max_length: Option<usize>,
}

impl Default for Previewer {
    fn default() -> Self {
        Self {
            datetime_format: DATETIME_FORMAT.to_string(),
            max_length: None,
        }
    }
}

impl Previewer {
    /// Create a previewer with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the date/time format.
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Set maximum preview length.
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Disable truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_length = None;
        self
    }

    /// Replace placeholders in `sql` with literals of `values`.
    ///
    /// A collection without named values replaces `?` markers left to right;
    /// the number of markers must equal the number of values. Otherwise the
    /// distinct `:name` tokens must match the named values one to one, and
    /// any positional values still fill the `?` markers. Names match
    /// case-insensitively.
    pub fn preview(&self, sql: &str, values: &BoundValues) -> WhereResult<String> {
        if values.is_empty() {
            return Ok(self.truncate(sql));
        }

        let scan = Scan::of(sql);
        if values.named_len() == 0 || values.positional_len() > 0 {
            self.check_count(scan.markers, values.positional_len())?;
        }
        if values.named_len() > 0 {
            self.check_count(scan.names.len(), values.named_len())?;
        }

        let out = self.substitute(sql, values)?;
        let out = self.truncate(&out);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlwhere.preview",
            value_count = values.len(),
            sql = %out,
            "preview",
        );

        Ok(out)
    }

    /// SQL literal of a single value.
    pub fn literal(&self, value: &Value) -> WhereResult<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(true) => Ok("TRUE".to_string()),
            Value::Bool(false) => Ok("FALSE".to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) if v.is_finite() => Ok(v.to_string()),
            Value::Float(v) => Err(WhereError::unsupported(format!("float {v}"))),
            Value::Text(v) => Ok(quote(v)),
            Value::DateTime(v) => {
                let mut text = String::new();
                write!(text, "{}", v.format(&self.datetime_format))
                    .map_err(|_| WhereError::unsupported("datetime with an invalid format"))?;
                Ok(quote(&text))
            }
            Value::Renderable(v) => Ok(quote(&v.render_text())),
            Value::Bytes(_) => Err(WhereError::unsupported(value.type_name())),
        }
    }

    fn check_count(&self, placeholders: usize, values: usize) -> WhereResult<()> {
        if placeholders == values {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "sqlwhere.preview",
            placeholders,
            values,
            "placeholder count mismatch",
        );
        Err(WhereError::count_mismatch(placeholders, values))
    }

    /// Single pass: inserted literals are never scanned again.
    fn substitute(&self, sql: &str, values: &BoundValues) -> WhereResult<String> {
        let mut named: HashMap<String, &Value> = HashMap::new();
        for (name, value) in values.named_values() {
            named.entry(name.to_ascii_lowercase()).or_insert(value);
        }
        let mut positional = values.positional_values();
        let mut out = String::with_capacity(sql.len() + values.len() * 8);
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(sql) {
            let Some(token) = caps.get(0) else { continue };
            let replacement = match (token.as_str(), caps.get(1)) {
                ("?", _) => positional.next(),
                (_, Some(name)) => named.get(&name.as_str().to_ascii_lowercase()).copied(),
                _ => None,
            };
            if let Some(value) = replacement {
                out.push_str(&sql[last..token.start()]);
                out.push_str(&self.literal(value)?);
                last = token.end();
            }
        }
        out.push_str(&sql[last..]);
        Ok(out)
    }

    fn truncate(&self, sql: &str) -> String {
        match self.max_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Placeholder tokens found in a statement.
struct Scan<'a> {
    markers: usize,
    names: Vec<&'a str>,
}

impl<'a> Scan<'a> {
    fn of(sql: &'a str) -> Self {
        let mut scan = Scan {
            markers: 0,
            names: Vec::new(),
        };
        for caps in placeholder_regex().captures_iter(sql) {
            match caps.get(1) {
                Some(name) if !scan.names.iter().any(|n| n.eq_ignore_ascii_case(name.as_str())) => {
                    scan.names.push(name.as_str())
                }
                Some(_) => {}
                None if caps.get(0).is_some_and(|m| m.as_str() == "?") => scan.markers += 1,
                None => {}
            }
        }
        scan
    }
}

/// Single-quote `text`, backslash-escaping `\`, `'`, `"` and NUL.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' | '\'' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Longest prefix of `sql` that fits `max_bytes` and ends on a char boundary.
pub(crate) fn truncate_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
