use crate::error::{ErrorKind, EvalError};
use crate::token::Token;
use log::trace;

/// Reduces a postfix sequence of operands and operators to a single value.
pub struct PostfixEvaluator {
    stack: Vec<f64>,
}

impl PostfixEvaluator {
    /// Evaluates `postfix` on a stack owned by this call.
    pub fn evaluate(postfix: &[Token]) -> Result<f64, EvalError> {
        let mut evaluator = Self {
            stack: Vec::with_capacity(postfix.len()),
        };
        evaluator.run(postfix)
    }

    fn run(&mut self, postfix: &[Token]) -> Result<f64, EvalError> {
        for token in postfix {
            match token {
                Token::Operand(value) => self.stack.push(*value),
                Token::Operator(op) => {
                    let right = self.pop_value()?;
                    let left = self.pop_value()?;
                    let result = op.apply(left, right)?;
                    if !result.is_finite() {
                        return Err(EvalError::new(ErrorKind::ArithmeticOverflow)
                            .with_token(op.symbol().to_string()));
                    }
                    trace!("{} {} {} = {}", left, op, right, result);
                    self.stack.push(result);
                }
                Token::FunctionCall { name, .. } => {
                    return Err(
                        EvalError::new(ErrorKind::UnresolvedFunctionCall).with_token(name.clone())
                    )
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(EvalError::new(ErrorKind::GrammarViolation).with_token(token.to_string()))
                }
            }
        }

        let result = self.pop_value()?;
        if !self.stack.is_empty() {
            return Err(EvalError::new(ErrorKind::ExcessOperands));
        }
        Ok(result)
    }

    fn pop_value(&mut self) -> Result<f64, EvalError> {
        self.stack
            .pop()
            .ok_or_else(|| EvalError::new(ErrorKind::StackUnderflow))
    }
}
