use super::MatchMode;
use crate::stmt::{Expr, Value, ValueSet};

/// A single test applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match
    Eq(Value),

    /// Closed interval; either bound may be open-ended. An inverted
    /// interval is kept as-is and matches nothing.
    Range {
        from: Option<Value>,
        to: Option<Value>,
    },

    /// Membership
    In(ValueSet),

    /// `LIKE` pattern
    Like { pattern: String, mode: MatchMode },
}

impl Predicate {
    /// Builds the filter expression testing `column`.
    pub fn to_expr(&self, column: &str) -> Expr {
        match self {
            Predicate::Eq(value) => Expr::eq(Expr::column(column), value.clone()),
            Predicate::Range { from, to } => {
                let lower = from
                    .as_ref()
                    .map(|from| Expr::ge(Expr::column(column), from.clone()));
                let upper = to
                    .as_ref()
                    .map(|to| Expr::le(Expr::column(column), to.clone()));

                Expr::and_from_vec(lower.into_iter().chain(upper).collect())
            }
            Predicate::In(set) => {
                Expr::in_list(Expr::column(column), Value::from(set.clone()))
            }
            Predicate::Like { pattern, mode } => {
                let pattern = Value::String(pattern.clone());
                if mode.is_case_insensitive() {
                    Expr::ilike(Expr::column(column), pattern)
                } else {
                    Expr::like(Expr::column(column), pattern)
                }
            }
        }
    }
}
