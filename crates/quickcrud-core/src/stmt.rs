mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_like;
pub use expr_like::ExprLike;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod record;
pub use record::Record;

mod time_tz;
pub use time_tz::TimeTz;

mod value;
pub use value::Value;

mod value_json;

mod value_set;
pub use value_set::ValueSet;
