use crate::{ast::TestExpression, error::Result, params::ParamSource};
use compare::ComparisonEvaluator;
use tracing::trace;

mod compare;

/// Trait for evaluating a parsed expression against a parameter bag
pub trait Evaluator {
    fn evaluate(&self, params: &dyn ParamSource) -> Result<bool>;
}

impl Evaluator for TestExpression {
    fn evaluate(&self, params: &dyn ParamSource) -> Result<bool> {
        let value = params.lookup(&self.property);
        let result =
            ComparisonEvaluator::new(&self.property, value.as_deref(), self.op, &self.literal)
                .evaluate()?;

        trace!(expression = %self, value = ?value, result, "evaluated test");
        Ok(result)
    }
}

/// Parse and evaluate a test expression in one step.
pub fn test(expr: &str, params: &dyn ParamSource) -> Result<bool> {
    TestExpression::parse(expr)?.evaluate(params)
}
