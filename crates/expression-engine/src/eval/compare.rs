use crate::{
    error::{ExpressionError, Result},
    operator::CompareOp,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Only plain unsigned integers switch a comparison to numeric mode.
    static ref NUMERIC: Regex = Regex::new(r"^[0-9]+$").expect("valid numeric pattern");
}

/// Text used for an absent value on the left-hand side.
const NULL_LITERAL: &str = "null";

/// Compares a looked-up parameter value with the literal of a test.
///
/// The left-hand value decides the mode: digits only means both sides are
/// compared as numbers, anything else is a string comparison where ordering
/// operators are never true.
pub(crate) struct ComparisonEvaluator<'a> {
    property: &'a str,
    left: Option<&'a str>,
    op: CompareOp,
    literal: &'a str,
}

impl<'a> ComparisonEvaluator<'a> {
    pub fn new(property: &'a str, left: Option<&'a str>, op: CompareOp, literal: &'a str) -> Self {
        Self {
            property,
            left,
            op,
            literal,
        }
    }

    pub fn evaluate(&self) -> Result<bool> {
        match self.left {
            Some(left) if NUMERIC.is_match(left) => self.eval_numeric(left),
            Some(left) => Ok(self.eval_string(left)),
            None => Ok(self.eval_null()),
        }
    }

    fn eval_numeric(&self, left: &str) -> Result<bool> {
        let (Ok(l), Ok(r)) = (left.parse::<f64>(), self.literal.parse::<f64>()) else {
            return Err(ExpressionError::NonNumericLiteral {
                property: self.property.to_string(),
                literal: self.literal.to_string(),
            });
        };

        Ok(self.op.compare(&l, &r))
    }

    fn eval_string(&self, left: &str) -> bool {
        if self.op.is_ordering() {
            return false;
        }
        self.op.compare(left, self.literal)
    }

    fn eval_null(&self) -> bool {
        self.eval_string(NULL_LITERAL)
    }
}
