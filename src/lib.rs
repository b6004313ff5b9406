pub mod error;
pub mod eval;
pub mod functions;
pub mod token;

pub use error::{ErrorKind, EvalError};
pub use eval::{Evaluator, Function, FunctionRegistry};
pub use token::{Operator, Token, TokenKind, TokenSequence, Tokenizer, MAX_CALL_DEPTH};

/// Evaluates `expression` with the stock function library registered.
pub fn evaluate_expression(expression: &str) -> Result<f64, EvalError> {
    Evaluator::with_builtins().evaluate(expression)
}
