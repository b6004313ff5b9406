use crate::error::{ErrorKind, EvalError};
use crate::token::{GrammarState, Operator, Token, TokenSequence, MAX_CALL_DEPTH};
use log::{debug, trace};
use std::ops::Range;

pub struct Tokenizer;

impl Tokenizer {
    /// Splits `input` into a grammar-checked token sequence.
    ///
    /// Function arguments are tokenized recursively, so any error raised
    /// inside an argument is indexed relative to that argument's text.
    /// Calls nested deeper than [`MAX_CALL_DEPTH`] are rejected.
    pub fn tokenize(input: &str) -> Result<TokenSequence, EvalError> {
        debug!("Tokenizing expression: {}", input);
        let chars: Vec<char> = input.chars().collect();
        let tokens = Scanner::new(&chars, 0).run()?;
        debug!("Tokenized {:?} into {} token(s)", input, tokens.len());
        Ok(tokens)
    }
}

/// Scans one expression level. Arguments are scanned by child scanners over
/// sub-slices of the same buffer.
struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
    open_parens: usize,
    call_depth: usize,
    state: GrammarState,
    tokens: TokenSequence,
}

impl<'a> Scanner<'a> {
    fn new(chars: &'a [char], call_depth: usize) -> Self {
        Self {
            chars,
            pos: 0,
            open_parens: 0,
            call_depth,
            state: GrammarState::default(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<TokenSequence, EvalError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let token = match c {
                '(' => {
                    self.open_parens += 1;
                    self.pos += 1;
                    Token::LeftParen
                }
                ')' => {
                    if self.open_parens == 0 {
                        return Err(
                            EvalError::at(ErrorKind::ExtraRightParen, self.pos).with_token(")")
                        );
                    }
                    self.open_parens -= 1;
                    self.pos += 1;
                    Token::RightParen
                }
                c if c.is_ascii_digit() || c == '.' => self.scan_number()?,
                c if c.is_ascii_alphabetic() => self.scan_function_call()?,
                c => match Operator::try_from(c) {
                    Ok(op) => {
                        self.pos += 1;
                        Token::Operator(op)
                    }
                    Err(c) => {
                        return Err(EvalError::at(ErrorKind::UnrecognizedCharacter, self.pos)
                            .with_token(c.to_string()))
                    }
                },
            };

            trace!("Token {:?} ends at {}", token, self.pos);
            self.state = self.state.advance(token.kind())?;
            self.tokens.push(token);
        }

        if self.open_parens != 0 {
            return Err(EvalError::new(ErrorKind::MissingRightParen));
        }
        self.state.finish()?;

        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(c) if predicate(c)) {
            self.pos += 1;
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// `digits? ('.' digits)?`, with at least one digit after a decimal point.
    fn scan_number(&mut self) -> Result<Token, EvalError> {
        let start = self.pos;
        self.skip_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            let point = self.pos;
            self.pos += 1;
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(
                    EvalError::at(ErrorKind::InvalidDecimalPointPlacement, point).with_token(".")
                );
            }
            self.skip_while(|c| c.is_ascii_digit());
        }

        let literal = self.text(start, self.pos);
        if self.peek() == Some('.') {
            return Err(EvalError::at(ErrorKind::InvalidNumberFormat, self.pos)
                .with_token(format!("{}.", literal)));
        }

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Operand(value)),
            _ => Err(EvalError::at(ErrorKind::InvalidNumberFormat, start).with_token(literal)),
        }
    }

    fn scan_function_call(&mut self) -> Result<Token, EvalError> {
        let start = self.pos;
        self.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let name = self.text(start, self.pos);

        if self.peek() != Some('(') {
            return Err(
                EvalError::at(ErrorKind::InvalidFunctionDeclaration, self.pos).with_token(name)
            );
        }
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(EvalError::at(ErrorKind::NestingTooDeep, start).with_token(name));
        }

        let open = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        let mut inner_depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    return Err(EvalError::at(ErrorKind::MissingRightParen, open).with_token("("))
                }
                Some('(') => inner_depth += 1,
                Some(')') if inner_depth == 0 => break,
                Some(')') => inner_depth -= 1,
                Some(_) => {}
            }
            self.pos += 1;
        }
        let body_end = self.pos;
        // closing paren of the call
        self.pos += 1;

        let arguments = self
            .split_arguments(body_start, body_end)?
            .into_iter()
            .map(|range| Scanner::new(&self.chars[range], self.call_depth + 1).run())
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Function call {} with {} argument(s)", name, arguments.len());
        Ok(Token::FunctionCall { name, arguments })
    }

    /// Splits a call body on top-level commas into argument ranges. Blank
    /// segments are rejected with the index of the comma that delimits them.
    fn split_arguments(
        &self,
        body_start: usize,
        body_end: usize,
    ) -> Result<Vec<Range<usize>>, EvalError> {
        let body = &self.chars[body_start..body_end];
        let is_blank = |segment: &[char]| segment.iter().all(|c| c.is_whitespace());
        let comma_error = |offset: usize| {
            EvalError::at(ErrorKind::InvalidFunctionArgumentDeclaration, body_start + offset)
                .with_token(",")
        };

        if is_blank(body) {
            return Ok(Vec::new());
        }

        let mut arguments = Vec::new();
        let mut depth = 0usize;
        let mut segment_start = 0;
        for (offset, c) in body.iter().enumerate() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    if is_blank(&body[segment_start..offset]) {
                        return Err(comma_error(offset));
                    }
                    arguments.push(body_start + segment_start..body_start + offset);
                    segment_start = offset + 1;
                }
                _ => {}
            }
        }

        if is_blank(&body[segment_start..]) {
            return Err(comma_error(segment_start - 1));
        }
        arguments.push(body_start + segment_start..body_end);

        Ok(arguments)
    }
}
