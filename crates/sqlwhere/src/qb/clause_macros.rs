//! Builder methods shared by several statements.
//!
//! Each macro expands inside an `impl` block of a builder with the matching
//! fields (`flags`, `end`, `joins`, `where_expr`, `order_by`, `limit`,
//! `main_keyword`, `build_error`).

/// `with_flags`, `with_added_flags` and `end`.
macro_rules! impl_statement_options {
    () => {
        /// Replace the flags written after the main keyword (e.g. `IGNORE`).
        pub fn with_flags<F: Into<String>>(mut self, flags: impl IntoIterator<Item = F>) -> Self {
            self.flags = $crate::qb::strings(flags);
            self
        }

        /// Add flags, skipping those already present (case-insensitive).
        pub fn with_added_flags<F: Into<String>>(mut self, flags: impl IntoIterator<Item = F>) -> Self {
            $crate::qb::add_flags(&mut self.flags, flags);
            self
        }

        /// Set the statement terminator (default `;`). `None` removes it.
        pub fn end(mut self, terminator: Option<&str>) -> Self {
            self.end = terminator.map(str::to_string);
            self
        }
    };
}

/// `with_main_keyword`
macro_rules! impl_main_keyword {
    () => {
        /// Replace the leading keyword (e.g. `REPLACE` instead of `INSERT`).
        pub fn with_main_keyword(mut self, keyword: &str) -> Self {
            self.main_keyword = keyword.to_string();
            self
        }
    };
}

/// The nine `*_join` methods plus `add_join`, `reset_joins`, `without_join`.
///
/// Joins are keyed by table: joining a table again replaces the earlier join
/// in place.
macro_rules! impl_join_methods {
    () => {
        impl_join_methods!(@kinds
            join => Join,
            inner_join => Inner,
            outer_join => Outer,
            left_join => Left,
            left_outer_join => LeftOuter,
            right_join => Right,
            right_outer_join => RightOuter,
            full_join => Full,
            full_outer_join => FullOuter,
        );

        /// Add a join with an already-built `ON` condition, or none.
        pub fn add_join(
            mut self,
            kind: $crate::qb::JoinKind,
            table: &str,
            on: Option<$crate::expr::Expression>,
        ) -> Self {
            self.joins.set(kind, table, on);
            self
        }

        /// Remove every join.
        pub fn reset_joins(mut self) -> Self {
            self.joins.clear();
            self
        }

        /// Remove the join on `table`, if any.
        pub fn without_join(mut self, table: &str) -> Self {
            self.joins.remove(table);
            self
        }
    };
    (@kinds $($name:ident => $kind:ident),* $(,)?) => {
        $(
            #[doc = concat!("Add a `", stringify!($kind), "` join on `table` with an `ON` clause.")]
            pub fn $name(
                mut self,
                table: &str,
                on: impl Into<$crate::expr::Clause>,
                args: impl $crate::expr::IntoArgs,
            ) -> Self {
                let on = $crate::qb::capture(&mut self.build_error, $crate::expr::Expression::new(on, args));
                if let Some(on) = on {
                    self.joins.set($crate::qb::JoinKind::$kind, table, Some(on));
                }
                self
            }
        )*
    };
}

/// `where_`, `clear_where`, `and_where`, `or_where`.
macro_rules! impl_where_methods {
    () => {
        /// Replace the WHERE clause.
        pub fn where_(
            mut self,
            clause: impl Into<$crate::expr::Clause>,
            args: impl $crate::expr::IntoArgs,
        ) -> Self {
            let expr = $crate::qb::capture(&mut self.build_error, $crate::expr::Expression::new(clause, args));
            if expr.is_some() {
                self.where_expr = expr;
            }
            self
        }

        /// Remove the WHERE clause.
        pub fn clear_where(mut self) -> Self {
            self.where_expr = None;
            self
        }

        /// `WHERE current AND clause` (or just `clause` when there is none).
        pub fn and_where(
            mut self,
            clause: impl Into<$crate::expr::Clause>,
            args: impl $crate::expr::IntoArgs,
        ) -> Self {
            let expr = $crate::qb::chain(
                self.where_expr.as_ref(),
                $crate::expr::Operator::And,
                clause,
                args,
            );
            if let Some(expr) = $crate::qb::capture(&mut self.build_error, expr) {
                self.where_expr = Some(expr);
            }
            self
        }

        /// `WHERE current OR clause` (or just `clause` when there is none).
        pub fn or_where(
            mut self,
            clause: impl Into<$crate::expr::Clause>,
            args: impl $crate::expr::IntoArgs,
        ) -> Self {
            let expr = $crate::qb::chain(
                self.where_expr.as_ref(),
                $crate::expr::Operator::Or,
                clause,
                args,
            );
            if let Some(expr) = $crate::qb::capture(&mut self.build_error, expr) {
                self.where_expr = Some(expr);
            }
            self
        }
    };
}

/// `order_by`, `and_order_by`, `limit`, `without_limit`.
macro_rules! impl_order_limit_methods {
    () => {
        /// Replace the ORDER BY terms.
        pub fn order_by<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
            self.order_by = $crate::qb::strings(terms);
            self
        }

        /// Append ORDER BY terms.
        pub fn and_order_by<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
            self.order_by.extend(terms.into_iter().map(Into::into));
            self
        }

        /// Set LIMIT.
        pub fn limit(mut self, n: u64) -> Self {
            self.limit = Some(n);
            self
        }

        /// Remove LIMIT.
        pub fn without_limit(mut self) -> Self {
            self.limit = None;
            self
        }
    };
}
