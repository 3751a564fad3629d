use crate::token::Token;
use std::fmt;
use std::ops::{Index, Range};

/// An ordered, mutable token buffer.
///
/// Built append-only by the tokenizer and shrunk in place by the evaluator: collapsed
/// sub-ranges are removed and the tail shifts left to close the gap. Indices into the
/// sequence are only valid until the next removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Overwrites the token at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, token: Token) -> Option<Token> {
        self.tokens
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, token))
    }

    /// Deletes `range` and shifts the remaining tokens left. Out-of-bounds ends are clamped.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        self.tokens.drain(start..end);
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
