use crate::error::{ErrorKind, EvalError};
use crate::token::{Token, TokenSequence};
use log::trace;

/// Infix to postfix conversion.
pub struct ShuntingYard;

impl ShuntingYard {
    /// Reorders `infix` into postfix order.
    ///
    /// Function calls must already be resolved to operands. Operators of equal
    /// precedence are emitted left to right.
    pub fn to_postfix(infix: &[Token]) -> Result<TokenSequence, EvalError> {
        let mut output = Vec::with_capacity(infix.len());
        let mut stack: Vec<Token> = Vec::new();

        for token in infix {
            match token {
                Token::Operand(_) => output.push(token.clone()),
                Token::LeftParen => stack.push(Token::LeftParen),
                Token::RightParen => loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(popped) => output.push(popped),
                        None => return Err(EvalError::new(ErrorKind::StackUnderflow)),
                    }
                },
                Token::Operator(op) => {
                    while matches!(
                        stack.last(),
                        Some(Token::Operator(top)) if top.precedence() >= op.precedence()
                    ) {
                        output.extend(stack.pop());
                    }
                    stack.push(Token::Operator(*op));
                }
                Token::FunctionCall { name, .. } => {
                    return Err(
                        EvalError::new(ErrorKind::UnresolvedFunctionCall).with_token(name.clone())
                    )
                }
            }
        }

        while let Some(token) = stack.pop() {
            if token == Token::LeftParen {
                return Err(EvalError::new(ErrorKind::MissingRightParen));
            }
            output.push(token);
        }

        trace!("Postfix: {:?}", output);
        Ok(output)
    }
}
