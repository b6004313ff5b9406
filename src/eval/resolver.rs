use crate::error::{ErrorKind, EvalError};
use crate::eval::Evaluator;
use crate::token::{Token, TokenSequence, MAX_CALL_DEPTH};
use log::debug;

impl Evaluator {
    /// Replaces each function call in `tokens` with an operand holding its
    /// result. Calls nested inside arguments are resolved when the argument
    /// itself is evaluated, one `depth` further down.
    pub(crate) fn resolve_subexpressions(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<TokenSequence, EvalError> {
        tokens
            .iter()
            .map(|token| match token {
                Token::FunctionCall { name, arguments } => {
                    self.call_function(name, arguments, depth).map(Token::Operand)
                }
                other => Ok(other.clone()),
            })
            .collect()
    }

    fn call_function(
        &self,
        name: &str,
        arguments: &[TokenSequence],
        depth: usize,
    ) -> Result<f64, EvalError> {
        if depth >= MAX_CALL_DEPTH {
            return Err(EvalError::new(ErrorKind::NestingTooDeep).with_token(name));
        }

        let function = self
            .registry()
            .get(name)
            .ok_or_else(|| EvalError::new(ErrorKind::FunctionNotFound).with_token(name))?;

        let values = arguments
            .iter()
            .map(|argument| self.evaluate_at_depth(argument, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Calling {}{:?}", name, values);
        let result = function(&values).map_err(|message| {
            EvalError::new(ErrorKind::FunctionFailed)
                .with_token(name)
                .with_detail(message)
        })?;

        if !result.is_finite() {
            return Err(EvalError::new(ErrorKind::FunctionReturnedNonNumber).with_token(name));
        }

        debug!("{} returned {}", name, result);
        Ok(result)
    }
}
