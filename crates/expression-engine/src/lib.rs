pub mod ast;
pub mod error;
pub mod eval;
pub mod operator;
pub mod params;

pub use ast::TestExpression;
pub use error::{ExpressionError, ParamError, Result};
pub use eval::{Evaluator, test};
pub use operator::CompareOp;
pub use params::{ParamSource, ParamValue, Params};
