use crate::error::{ErrorKind, EvalError};
use crate::token::TokenKind;

/// Kind of the last accepted token, used to validate the next one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GrammarState {
    #[default]
    Start,
    After(TokenKind),
}

const AFTER_VALUE: &[TokenKind] = &[TokenKind::Operator, TokenKind::RightParen];
const EXPECT_VALUE: &[TokenKind] = &[
    TokenKind::Operand,
    TokenKind::LeftParen,
    TokenKind::FunctionCall,
];

impl GrammarState {
    pub fn allowed(&self) -> &'static [TokenKind] {
        match self {
            GrammarState::Start
            | GrammarState::After(TokenKind::Operator)
            | GrammarState::After(TokenKind::LeftParen) => EXPECT_VALUE,
            GrammarState::After(TokenKind::Operand)
            | GrammarState::After(TokenKind::RightParen)
            | GrammarState::After(TokenKind::FunctionCall) => AFTER_VALUE,
        }
    }

    pub fn accepts(&self, next: TokenKind) -> bool {
        self.allowed().contains(&next)
    }

    pub fn advance(self, next: TokenKind) -> Result<GrammarState, EvalError> {
        if self.accepts(next) {
            Ok(GrammarState::After(next))
        } else {
            Err(EvalError::new(ErrorKind::GrammarViolation))
        }
    }

    /// Checks that input may end in this state. An empty sequence is accepted.
    pub fn finish(self) -> Result<(), EvalError> {
        match self {
            GrammarState::After(TokenKind::Operator) | GrammarState::After(TokenKind::LeftParen) => {
                Err(EvalError::new(ErrorKind::GrammarViolation))
            }
            _ => Ok(()),
        }
    }
}
