use thiserror::Error;

/// Every way an evaluation can fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Divides by 0")]
    DivideByZero,
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Unrecognized character")]
    UnrecognizedCharacter,
    #[error("Mismatching parenthesis. Additional right parenthesis")]
    ExtraRightParen,
    #[error("Invalid number format")]
    InvalidNumberFormat,
    #[error("Invalid location for decimal point")]
    InvalidDecimalPointPlacement,
    #[error("Invalid function declaration")]
    InvalidFunctionDeclaration,
    #[error("Mismatching parenthesis. Missing right parenthesis")]
    MissingRightParen,
    #[error("Invalid expression. Token is not allowed here")]
    GrammarViolation,
    #[error("Invalid argument declaration in function")]
    InvalidFunctionArgumentDeclaration,
    #[error("Function is not registered")]
    FunctionNotFound,
    #[error("Function does not return a finite number")]
    FunctionReturnedNonNumber,
    #[error("Function call failed")]
    FunctionFailed,
    #[error("Expression is empty")]
    EmptyExpression,
    #[error("Malformed expression. Operands left without an operator")]
    ExcessOperands,
    #[error("Function call was not resolved before evaluation")]
    UnresolvedFunctionCall,
    #[error("Arithmetic result is not a finite number")]
    ArithmeticOverflow,
    #[error("Function calls are nested too deeply")]
    NestingTooDeep,
}

/// An evaluation failure.
///
/// `index` is a character offset into the string being scanned when the error
/// was detected. Errors raised while tokenizing a function argument are
/// indexed relative to that argument, and errors from the evaluation stages
/// carry no index at all.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}", describe_location(.index, .token, .detail))]
pub struct EvalError {
    pub kind: ErrorKind,
    pub index: Option<usize>,
    pub token: Option<String>,
    pub detail: Option<String>,
}

impl EvalError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            index: None,
            token: None,
            detail: None,
        }
    }

    pub fn at(kind: ErrorKind, index: usize) -> Self {
        Self::new(kind).with_index(index)
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<ErrorKind> for EvalError {
    fn from(kind: ErrorKind) -> Self {
        EvalError::new(kind)
    }
}

fn describe_location(
    index: &Option<usize>,
    token: &Option<String>,
    detail: &Option<String>,
) -> String {
    let mut out = String::new();
    if let Some(token) = token {
        out.push_str(&format!(" '{}'", token));
    }
    if let Some(index) = index {
        out.push_str(&format!(" at index {}", index));
    }
    if let Some(detail) = detail {
        out.push_str(&format!(": {}", detail));
    }
    out
}
