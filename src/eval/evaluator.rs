use crate::error::{ErrorKind, EvalError};
use crate::eval::{FunctionRegistry, PostfixEvaluator, ShuntingYard};
use crate::functions::register_functions;
use crate::token::{render_tokens, Token, TokenSequence, Tokenizer};
use log::debug;

/// Evaluates arithmetic expressions against a function registry.
///
/// Every call builds its own working state, so one `Evaluator` can be shared
/// freely and re-entered by nested function arguments.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    registry: FunctionRegistry,
}

impl Evaluator {
    /// Creates an `Evaluator` with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Creates an `Evaluator` with the stock function library registered.
    pub fn with_builtins() -> Self {
        let mut registry = FunctionRegistry::new();
        register_functions(&mut registry);
        Self::with_registry(registry)
    }

    /// Registers a function with the evaluator.
    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        self.registry.register(name, function);
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    /// Tokenizes an expression without evaluating it. Functions are not
    /// looked up yet, so unknown names are accepted here.
    pub fn tokenize(&self, expression: &str) -> Result<TokenSequence, EvalError> {
        if expression.trim().is_empty() {
            return Err(EvalError::new(ErrorKind::EmptyExpression));
        }
        Tokenizer::tokenize(expression)
    }

    /// Evaluates a given expression string.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if every stage succeeds.
    /// * `Err(EvalError)` from the first stage that fails.
    pub fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let tokens = self.tokenize(expression)?;
        let result = self.evaluate_tokens(&tokens)?;
        debug!("{} = {}", expression, result);
        Ok(result)
    }

    /// Evaluates an already tokenized expression, resolving function calls
    /// against the current registry.
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> Result<f64, EvalError> {
        self.evaluate_at_depth(tokens, 0)
    }

    /// `depth` counts the function calls enclosing `tokens`.
    pub(crate) fn evaluate_at_depth(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<f64, EvalError> {
        let postfix = self.postfix_from_tokens(tokens, depth)?;
        PostfixEvaluator::evaluate(&postfix)
    }

    /// Tokenizes, resolves function calls and returns the postfix order.
    pub fn to_postfix(&self, expression: &str) -> Result<TokenSequence, EvalError> {
        let tokens = self.tokenize(expression)?;
        self.postfix_from_tokens(&tokens, 0)
    }

    fn postfix_from_tokens(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<TokenSequence, EvalError> {
        if tokens.is_empty() {
            return Err(EvalError::new(ErrorKind::EmptyExpression));
        }
        let resolved = self.resolve_subexpressions(tokens, depth)?;
        let postfix = ShuntingYard::to_postfix(&resolved)?;
        debug!("Postfix: {}", render_tokens(&postfix));
        Ok(postfix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MAX_CALL_DEPTH;

    fn setup_evaluator() -> Evaluator {
        let mut evaluator = Evaluator::new();
        evaluator.register_function("sum", |args| Ok(args.iter().sum()));
        evaluator.register_function("square", |args| match args {
            [n] => Ok(n * n),
            _ => Err("Expected a single number".to_string()),
        });
        evaluator
    }

    fn error_kind(evaluator: &Evaluator, input: &str) -> ErrorKind {
        evaluator.evaluate(input).unwrap_err().kind
    }

    #[test]
    fn test_simple_arithmetic() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("2+3").unwrap(), 5.0);
        assert_eq!(evaluator.evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluator.evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluator.evaluate("7").unwrap(), 7.0);
    }

    #[test]
    fn test_modulo_precedence() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("2*3%4").unwrap(), 6.0);
        assert_eq!(evaluator.evaluate("10/4%3").unwrap(), 10.0);
        assert_eq!(evaluator.evaluate("(2*3)%4").unwrap(), 2.0);
    }

    #[test]
    fn test_left_to_right_evaluation() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluator.evaluate("64/4/2").unwrap(), 8.0);
        assert_eq!(evaluator.evaluate("8/4*2").unwrap(), 4.0);
        assert_eq!(evaluator.evaluate("10-2+3").unwrap(), 11.0);
    }

    #[test]
    fn test_decimals() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("1.5 * 4").unwrap(), 6.0);
        assert_eq!(evaluator.evaluate(".25 + .75").unwrap(), 1.0);
        assert_eq!(evaluator.evaluate("7.5 % 2").unwrap(), 1.5);
    }

    #[test]
    fn test_large_nested_expression() {
        let evaluator = Evaluator::new();
        let expr = "((10 * (5 + 3)) / 4) - (2 * ((6 / 3) + (7 - 5)))";
        assert_eq!(evaluator.evaluate(expr).unwrap(), 12.0);
    }

    #[test]
    fn test_excess_whitespace() {
        let evaluator = Evaluator::new();
        let expr = "   (   20   +  10  )   *   (  50  -  5  )   ";
        assert_eq!(evaluator.evaluate(expr).unwrap(), 1350.0);
    }

    #[test]
    fn test_error_cases() {
        let evaluator = setup_evaluator();
        assert_eq!(error_kind(&evaluator, "10/0"), ErrorKind::DivideByZero);
        assert_eq!(error_kind(&evaluator, "(1+2"), ErrorKind::MissingRightParen);
        assert_eq!(error_kind(&evaluator, "1 2"), ErrorKind::GrammarViolation);
        assert_eq!(error_kind(&evaluator, "3 + * 5"), ErrorKind::GrammarViolation);
        assert_eq!(error_kind(&evaluator, "1 +"), ErrorKind::GrammarViolation);
        assert_eq!(error_kind(&evaluator, "2 ^ 3"), ErrorKind::UnrecognizedCharacter);
        assert_eq!(error_kind(&evaluator, "-5 + 3"), ErrorKind::GrammarViolation);
    }

    #[test]
    fn test_extra_right_paren_index() {
        let evaluator = Evaluator::new();
        let err = evaluator.evaluate("1+2)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExtraRightParen);
        assert_eq!(err.index, Some(3));
    }

    #[test]
    fn test_empty_expression() {
        let evaluator = Evaluator::new();
        assert_eq!(error_kind(&evaluator, ""), ErrorKind::EmptyExpression);
        assert_eq!(error_kind(&evaluator, "  \t "), ErrorKind::EmptyExpression);
        assert_eq!(
            evaluator.evaluate_tokens(&[]).unwrap_err().kind,
            ErrorKind::EmptyExpression
        );
    }

    #[test]
    fn test_function_calls() {
        let evaluator = setup_evaluator();
        assert_eq!(evaluator.evaluate("sum(1,2,3)").unwrap(), 6.0);
        assert_eq!(evaluator.evaluate("sum(sum(1,2),3)").unwrap(), 6.0);
        assert_eq!(evaluator.evaluate("square(4) + 1").unwrap(), 17.0);
        assert_eq!(evaluator.evaluate("2 * (square(3) - sum())").unwrap(), 18.0);
    }

    #[test]
    fn test_deeply_nested_calls() {
        let evaluator = setup_evaluator();
        let expr = "sum(square(sum(1, 1)), sum(square(2) % 3, (1 + sum(2)) * 2))";
        // square(2) = 4, 4 + ((4 % 3) + 6)
        assert_eq!(evaluator.evaluate(expr).unwrap(), 11.0);
    }

    #[test]
    fn test_arithmetic_overflow() {
        let evaluator = Evaluator::new();
        let big = format!("1{}", "0".repeat(300));

        let err = evaluator.evaluate(&format!("{big} * {big}")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArithmeticOverflow);
        assert_eq!(err.token.as_deref(), Some("*"));

        // inf - inf would otherwise surface as NaN
        let expr = format!("{big} * {big} - {big} * {big}");
        assert_eq!(error_kind(&evaluator, &expr), ErrorKind::ArithmeticOverflow);

        assert_eq!(evaluator.evaluate(&format!("{big} / {big}")).unwrap(), 1.0);
    }

    #[test]
    fn test_nesting_limit() {
        let mut evaluator = Evaluator::new();
        evaluator.register_function("f", |args| Ok(args[0]));
        let nested = |depth: usize| format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));

        assert_eq!(evaluator.evaluate(&nested(MAX_CALL_DEPTH)).unwrap(), 1.0);
        for depth in [MAX_CALL_DEPTH + 1, 500, 5000] {
            let err = evaluator.evaluate(&nested(depth)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::NestingTooDeep);
            assert_eq!(err.token.as_deref(), Some("f"));
        }
    }

    #[test]
    fn test_unknown_function_fails_only_when_evaluated() {
        let evaluator = setup_evaluator();
        let tokens = evaluator.tokenize("unknown(3) + 1").unwrap();
        assert_eq!(tokens.len(), 3);

        let err = evaluator.evaluate_tokens(&tokens).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FunctionNotFound);
        assert_eq!(err.token.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_function_with_wrong_args() {
        let evaluator = setup_evaluator();
        let err = evaluator.evaluate("square(3, 4)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::FunctionFailed);
    }

    #[test]
    fn test_precompiled_tokens_follow_registry() {
        let mut evaluator = Evaluator::new();
        evaluator.register_function("k", |_| Ok(1.0));
        let tokens = evaluator.tokenize("k() * 10").unwrap();
        assert_eq!(evaluator.evaluate_tokens(&tokens).unwrap(), 10.0);

        evaluator.register_function("k", |_| Ok(2.0));
        assert_eq!(evaluator.evaluate_tokens(&tokens).unwrap(), 20.0);
        assert_eq!(evaluator.evaluate_tokens(&tokens).unwrap(), 20.0);
    }

    #[test]
    fn test_to_postfix() {
        let evaluator = setup_evaluator();
        let postfix = evaluator.to_postfix("sum(1, 2) * 3 % 2").unwrap();
        assert_eq!(render_tokens(&postfix), "3 3 2 % *");
    }

    #[test]
    fn test_with_builtins() {
        let evaluator = Evaluator::with_builtins();
        assert!(evaluator.registry().contains("sqrt"));
        assert_eq!(evaluator.evaluate("sqrt(16) + max(1, 5, 3)").unwrap(), 9.0);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let evaluator = setup_evaluator();
        let expr = "sum(1.5, 2) * (3 - 1) % 5";
        assert_eq!(
            evaluator.evaluate(expr).unwrap(),
            evaluator.evaluate(expr).unwrap()
        );
    }
}
