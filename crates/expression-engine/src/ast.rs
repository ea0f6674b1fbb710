use crate::{
    error::{ExpressionError, Result},
    operator::CompareOp,
};
use serde::Serialize;
use std::fmt;

/// A parsed `property operator literal` test, as written in the `test`
/// attribute of `<if>` and `<when>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestExpression {
    pub property: String,
    pub op: CompareOp,
    /// Right-hand side with its surrounding quotes removed.
    pub literal: String,
}

impl TestExpression {
    /// Split a test into its three whitespace-separated tokens.
    ///
    /// The literal may be quoted with `'` or `"`; only a quoted literal may
    /// contain whitespace.
    pub fn parse(expr: &str) -> Result<Self> {
        let malformed = || ExpressionError::MalformedExpression(expr.to_string());

        let (property, rest) = split_token(expr).ok_or_else(malformed)?;
        let (operator, rest) = split_token(rest).ok_or_else(malformed)?;

        let raw_literal = rest.trim();
        if raw_literal.is_empty() {
            return Err(malformed());
        }

        let literal = match unquote(raw_literal) {
            Some(inner) => inner,
            None if raw_literal.contains(char::is_whitespace) => return Err(malformed()),
            None => raw_literal,
        };

        let op = operator
            .parse::<CompareOp>()
            .map_err(|_| ExpressionError::UnknownOperator {
                operator: operator.to_string(),
                expression: expr.to_string(),
            })?;

        Ok(TestExpression {
            property: property.to_string(),
            op,
            literal: literal.to_string(),
        })
    }
}

impl fmt::Display for TestExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.property, self.op, self.literal)
    }
}

fn split_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    let end = input.find(char::is_whitespace)?;
    Some((&input[..end], &input[end..]))
}

const QUOTES: [char; 2] = ['"', '\''];

/// Strip one quote at each end of the literal. The two quotes need not
/// match, and a lone quote on one side is dropped too.
fn unquote(value: &str) -> Option<&str> {
    let inner = value.strip_prefix(QUOTES).unwrap_or(value);
    let inner = inner.strip_suffix(QUOTES).unwrap_or(inner);

    (inner.len() != value.len()).then_some(inner)
}
