use std::collections::VecDeque;
use std::io::{self, BufRead};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("expected an integer coordinate, got {0:?}")]
    InvalidNumber(String),
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whitespace separated tokens read lazily, one line at a time.
///
/// Tokens may span lines, so `1\n2\nR` reads the same as `1 2 R`.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::Closed);
            }
            self.pending
                .extend(line.split_whitespace().map(String::from));
        }
    }

    /// Next token as a signed integer; range checks are left to the board.
    pub fn next_coord(&mut self) -> Result<i64, InputError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| InputError::InvalidNumber(token))
    }

    /// First character of the next token.
    pub fn next_char(&mut self) -> Result<char, InputError> {
        let token = self.next_token()?;
        // split_whitespace never yields an empty token
        token.chars().next().ok_or(InputError::Closed)
    }

    /// Drops whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_span_lines() {
        let mut tokens = Tokens::new("3\n\n  4\nReveal\n".as_bytes());

        assert_eq!(tokens.next_coord().unwrap(), 3);
        assert_eq!(tokens.next_coord().unwrap(), 4);
        assert_eq!(tokens.next_char().unwrap(), 'R');
        assert!(matches!(tokens.next_token(), Err(InputError::Closed)));
    }

    #[test]
    fn negative_and_oversized_numbers_are_still_numbers() {
        let mut tokens = Tokens::new("-1 256 x 1.5".as_bytes());

        assert_eq!(tokens.next_coord().unwrap(), -1);
        assert_eq!(tokens.next_coord().unwrap(), 256);
        assert!(matches!(tokens.next_coord(), Err(InputError::InvalidNumber(token)) if token == "x"));
        assert!(matches!(tokens.next_coord(), Err(InputError::InvalidNumber(token)) if token == "1.5"));
    }

    #[test]
    fn discard_line_skips_rest_of_line_only() {
        let mut tokens = Tokens::new("a b c\n7 8\n".as_bytes());

        assert_eq!(tokens.next_token().unwrap(), "a");
        tokens.discard_line();
        assert_eq!(tokens.next_coord().unwrap(), 7);
        assert_eq!(tokens.next_coord().unwrap(), 8);
    }
}
