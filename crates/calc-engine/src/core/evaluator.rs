//! AST evaluator
//!
//! Evaluation itself cannot fail: IEEE 754 arithmetic turns `x/0` into an
//! infinity. Whether a non-finite value is acceptable is decided by the
//! evaluator's `reject_non_finite` setting.

use crate::core::format::non_finite_repr;
use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult};

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    reject_non_finite: bool,
}

impl Evaluator {
    /// Creates an evaluator that passes infinities and NaN through as values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator that reports infinities and NaN as errors
    #[must_use]
    pub fn rejecting_non_finite() -> Self {
        Self {
            reject_non_finite: true,
        }
    }

    /// Returns true if non-finite results are reported as errors
    #[must_use]
    pub fn rejects_non_finite(&self) -> bool {
        self.reject_non_finite
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        let value = Self::eval_node(node);
        if self.reject_non_finite && !value.is_finite() {
            return Err(CalcError::NonFiniteResult(non_finite_repr(value).into()));
        }
        Ok(value)
    }

    /// Parses and evaluates a string expression
    ///
    /// The text must already be percent-free; see
    /// [`crate::core::sanitize::prepare`].
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    fn eval_node(node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -Self::eval_node(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(Self::eval_node(left), Self::eval_node(right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    #[test]
    fn test_evaluate_number() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_double_negative() {
        let eval = Evaluator::new();
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(eval.evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_binary() {
        let eval = Evaluator::new();
        let ast = AstNode::binary(AstNode::number(12.0), Operation::Divide, AstNode::number(4.0));
        assert_eq!(eval.evaluate(&ast), Ok(3.0));
    }

    #[test]
    fn test_evaluate_str_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("(2+3)*4"), Ok(20.0));
        assert_eq!(eval.evaluate_str("20/4/5"), Ok(1.0));
        assert_eq!(eval.evaluate_str("10-4-3"), Ok(3.0));
        assert_eq!(eval.evaluate_str("-5+10"), Ok(5.0));
    }

    #[test]
    fn test_division_by_zero_is_a_value_by_default() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("5/0"), Ok(f64::INFINITY));
        assert_eq!(eval.evaluate_str("-5/0"), Ok(f64::NEG_INFINITY));
        assert!(eval.evaluate_str("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_rejecting_non_finite() {
        let eval = Evaluator::rejecting_non_finite();
        assert!(eval.rejects_non_finite());
        assert_eq!(
            eval.evaluate_str("5/0"),
            Err(CalcError::NonFiniteResult("Infinity".into()))
        );
        assert_eq!(
            eval.evaluate_str("0/0"),
            Err(CalcError::NonFiniteResult("NaN".into()))
        );
        assert_eq!(eval.evaluate_str("1/4"), Ok(0.25));
    }

    #[test]
    fn test_evaluate_str_propagates_parse_errors() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("1 + + "),
            Err(CalcError::ParseError(_))
        ));
        assert!(matches!(
            eval.evaluate_str(""),
            Err(CalcError::EmptyExpression)
        ));
    }
}
