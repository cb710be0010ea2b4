use super::*;

/// Boolean expression over a single model's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// References a column of the model being queried
    Column(ExprColumn),

    /// In list
    InList(ExprInList),

    /// `LIKE` pattern match
    Like(ExprLike),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    /// Returns true if the expression is the constant `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
