use super::{Comma, Delimited, Flavor, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                fmt!(f, Delimited(&expr.operands, " AND "));
            }
            BinaryOp(expr) => {
                let lhs: &stmt::Expr = &expr.lhs;
                let rhs: &stmt::Expr = &expr.rhs;

                match (rhs, expr.op) {
                    // Comparisons with NULL are never true; test nullness instead
                    (Value(stmt::Value::Null), stmt::BinaryOp::Eq) => fmt!(f, lhs " IS NULL"),
                    (Value(stmt::Value::Null), stmt::BinaryOp::Ne) => {
                        fmt!(f, lhs " IS NOT NULL")
                    }
                    _ => fmt!(f, lhs " " expr.op " " rhs),
                }
            }
            Column(expr) => {
                fmt!(f, Ident(&expr.name));
            }
            InList(expr) => {
                let lhs: &stmt::Expr = &expr.expr;

                match &*expr.list {
                    // Matches nothing
                    Value(stmt::Value::List(items)) if items.is_empty() => {
                        fmt!(f, lhs " IN (NULL)")
                    }
                    Value(stmt::Value::List(items)) => fmt!(f, lhs " IN (" Comma(items) ")"),
                    list => fmt!(f, lhs " IN " list),
                }
            }
            Like(expr) => {
                let lhs: &stmt::Expr = &expr.expr;
                let pattern: &stmt::Expr = &expr.pattern;

                match (expr.case_insensitive, f.serializer.flavor) {
                    (false, _) => fmt!(f, lhs " LIKE " pattern),
                    (true, Flavor::Postgresql) => fmt!(f, lhs " ILIKE " pattern),
                    (true, Flavor::Sqlite) => {
                        fmt!(f, "lower(" lhs ") LIKE lower(" pattern ")")
                    }
                }
            }
            Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Lt => "<",
            stmt::BinaryOp::Le => "<=",
            stmt::BinaryOp::Ne => "<>",
        })
    }
}
