use crate::error::{ErrorKind, EvalError};
use std::fmt;

mod grammar;
mod tokenizer;

pub use grammar::GrammarState;
pub use tokenizer::Tokenizer;

pub type TokenSequence = Vec<Token>;

/// Deepest function-call nesting the tokenizer and resolver accept.
pub const MAX_CALL_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operand(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    /// A call whose arguments are tokenized but not yet evaluated.
    FunctionCall {
        name: String,
        arguments: Vec<TokenSequence>,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Operand(_) => TokenKind::Operand,
            Token::Operator(_) => TokenKind::Operator,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::FunctionCall { .. } => TokenKind::FunctionCall,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => write!(f, "{}", value),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::FunctionCall { name, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| render_tokens(argument))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", name, arguments)
            }
        }
    }
}

/// Joins a token sequence with single spaces, e.g. `2 3 4 * +`.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Operand,
    Operator,
    LeftParen,
    RightParen,
    FunctionCall,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Modulo,
    Divide,
    Multiply,
    Add,
    Subtract,
}

impl Operator {
    /// Binding strength. Modulo binds tighter than multiply and divide.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Modulo => 3,
            Operator::Divide | Operator::Multiply => 2,
            Operator::Add | Operator::Subtract => 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Modulo => '%',
            Operator::Divide => '/',
            Operator::Multiply => '*',
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    /// Computes `left OP right`. Modulo by zero raises `DivideByZero` as well.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide | Operator::Modulo if right == 0.0 => {
                Err(EvalError::new(ErrorKind::DivideByZero).with_token(self.symbol().to_string()))
            }
            Operator::Divide => Ok(left / right),
            Operator::Modulo => Ok(left % right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '%' => Ok(Operator::Modulo),
            '/' => Ok(Operator::Divide),
            '*' => Ok(Operator::Multiply),
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            _ => Err(value),
        }
    }
}
