use crate::config::{exceeded, Limits};
use crate::error::TokenizeError;
use crate::token::{Operator, Token, TokenSequence};
use log::{debug, trace};
use pest::error::InputLocation;
use pest::iterators::Pairs;
use pest::Parser;

mod grammar {
    use pest_derive::Parser;

    #[derive(Parser)]
    #[grammar = "tokenizer/tokens.pest"]
    pub struct TokenGrammar;
}

use grammar::{Rule, TokenGrammar};

/// Tokenizes `expression` without any size caps.
pub fn tokenize(expression: &str) -> Result<TokenSequence, TokenizeError> {
    Tokenizer::default().tokenize(expression)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    limits: Limits,
}

impl Tokenizer {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Converts an expression into a token sequence wrapped in an implicit `(` ... `)`.
    ///
    /// Implicit multiplication is inserted between adjacent terms: `2x`, `x y`,
    /// `(a)(b)` and `2(3)` all get a `*`. An identifier directly followed by `(` is left
    /// alone, since that is a function call.
    pub fn tokenize(&self, expression: &str) -> Result<TokenSequence, TokenizeError> {
        debug!("Tokenizing expression: {}", expression);
        let pairs = match TokenGrammar::parse(Rule::stream, expression) {
            Ok(pairs) => pairs,
            Err(error) => return Err(self.locate_failure(expression, &error)),
        };

        let tokens = self.build(pairs)?.finish()?;
        trace!("Token stream: {}", tokens);
        Ok(tokens)
    }

    fn build(&self, pairs: Pairs<Rule>) -> Result<SequenceBuilder, TokenizeError> {
        let mut builder = SequenceBuilder::start(self.limits)?;

        for pair in pairs.flatten() {
            let position = pair.as_span().start();
            match pair.as_rule() {
                Rule::number => builder.push_number(pair.as_str(), position)?,
                Rule::identifier => builder.push_identifier(pair.as_str(), position)?,
                Rule::operator => {
                    let symbol = pair.as_str().chars().next().unwrap_or_default();
                    let op = Operator::try_from(symbol).map_err(|character| {
                        TokenizeError::UnrecognizedCharacter {
                            position,
                            character,
                        }
                    })?;
                    builder.push_operator(op, position)?;
                }
                _ => {}
            }
        }

        Ok(builder)
    }

    /// The grammar stops at the first character it cannot lex. Anything wrong before that
    /// point (a stray `)`, an oversized literal) is reported first, in scan order.
    fn locate_failure(&self, expression: &str, error: &pest::error::Error<Rule>) -> TokenizeError {
        let position = match error.location {
            InputLocation::Pos(position) => position,
            InputLocation::Span((start, _)) => start,
        };
        debug!("Lexing stopped at byte {}", position);

        if let Some(prefix) = expression.get(..position) {
            if let Ok(pairs) = TokenGrammar::parse(Rule::stream, prefix) {
                if let Err(error) = self.build(pairs) {
                    return error;
                }
            }
        }

        let character = expression
            .get(position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or_default();
        TokenizeError::UnrecognizedCharacter {
            position,
            character,
        }
    }
}

struct SequenceBuilder {
    tokens: TokenSequence,
    paren_depth: usize,
    limits: Limits,
}

impl SequenceBuilder {
    fn start(limits: Limits) -> Result<Self, TokenizeError> {
        let mut builder = Self {
            tokens: TokenSequence::new(),
            paren_depth: 0,
            limits,
        };
        builder.push(Token::Operator(Operator::OpenParen))?;
        Ok(builder)
    }

    fn push(&mut self, token: Token) -> Result<(), TokenizeError> {
        if let Some(limit) = exceeded(self.limits.max_tokens, self.tokens.len() + 1) {
            return Err(TokenizeError::TooManyTokens { limit });
        }
        self.tokens.push(token);
        Ok(())
    }

    /// Inserts `*` when the previous token ends a term. An identifier only ends a term
    /// when the next token is not `(`.
    fn push_implicit_multiply(&mut self, before_open_paren: bool) -> Result<(), TokenizeError> {
        let ends_term = match self.tokens.last() {
            Some(Token::Number(_)) => true,
            Some(Token::Identifier(_)) => !before_open_paren,
            Some(Token::Operator(Operator::CloseParen)) => true,
            _ => false,
        };
        if ends_term {
            self.push(Token::Operator(Operator::Multiply))?;
        }
        Ok(())
    }

    fn push_number(&mut self, literal: &str, position: usize) -> Result<(), TokenizeError> {
        if let Some(limit) = exceeded(self.limits.max_literal_len, literal.len()) {
            return Err(TokenizeError::LiteralTooLong { position, limit });
        }
        let value = literal
            .parse::<f64>()
            .map_err(|_| TokenizeError::InvalidNumber {
                position,
                literal: literal.to_string(),
            })?;

        self.push_implicit_multiply(false)?;
        self.push(Token::Number(value))
    }

    fn push_identifier(&mut self, name: &str, position: usize) -> Result<(), TokenizeError> {
        if let Some(limit) = exceeded(self.limits.max_identifier_len, name.len()) {
            return Err(TokenizeError::IdentifierTooLong { position, limit });
        }

        self.push_implicit_multiply(false)?;
        self.push(Token::Identifier(name.to_string()))
    }

    fn push_operator(&mut self, op: Operator, position: usize) -> Result<(), TokenizeError> {
        match op {
            Operator::OpenParen => {
                self.paren_depth += 1;
                self.push_implicit_multiply(true)?;
            }
            Operator::CloseParen => {
                self.paren_depth = self
                    .paren_depth
                    .checked_sub(1)
                    .ok_or(TokenizeError::UnmatchedCloseParen { position })?;
            }
            _ => {}
        }
        self.push(Token::Operator(op))
    }

    fn finish(mut self) -> Result<TokenSequence, TokenizeError> {
        if self.paren_depth > 0 {
            return Err(TokenizeError::UnmatchedOpenParen);
        }
        self.push(Token::Operator(Operator::CloseParen))?;
        Ok(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expression: &str) -> String {
        tokenize(expression).unwrap().to_string()
    }

    #[test]
    fn test_wraps_expression_in_delimiters() {
        assert_eq!(render("1 + 2"), "( 1 + 2 )");
        assert_eq!(render(""), "( )");
    }

    #[test]
    fn test_all_operators() {
        assert_eq!(render("a^b*c/d-e+f"), "( a ^ b * c / d - e + f )");
        assert_eq!(render("pow(2,3)"), "( pow ( 2 , 3 ) )");
    }

    #[test]
    fn test_skips_spaces() {
        assert_eq!(render("   12 *  3   "), "( 12 * 3 )");
    }

    #[test]
    fn test_number_literals() {
        let tokens = tokenize("3.25 .5 7.").unwrap();
        let numbers: Vec<f64> = tokens.iter().filter_map(Token::as_number).collect();
        assert_eq!(numbers, vec![3.25, 0.5, 7.0]);
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(render("2x"), "( 2 * x )");
        assert_eq!(render("x y"), "( x * y )");
        assert_eq!(render("(a)(b)"), "( ( a ) * ( b ) )");
        assert_eq!(render("2(3)"), "( 2 * ( 3 ) )");
        assert_eq!(render("(1)2"), "( ( 1 ) * 2 )");
        assert_eq!(render("2pi"), "( 2 * pi )");
        assert_eq!(render("x2"), "( x * 2 )");
    }

    #[test]
    fn test_identifier_before_paren_is_a_call() {
        assert_eq!(render("sqrt(4)"), "( sqrt ( 4 ) )");
        assert_eq!(render("2sqrt(4)"), "( 2 * sqrt ( 4 ) )");
    }

    #[test]
    fn test_no_implicit_multiplication_after_operator() {
        assert_eq!(render("-(2)"), "( - ( 2 ) )");
        assert_eq!(render("2*(3)"), "( 2 * ( 3 ) )");
    }

    #[test]
    fn test_unmatched_open_paren() {
        assert_eq!(tokenize("(1+2"), Err(TokenizeError::UnmatchedOpenParen));
        assert_eq!(tokenize("(("), Err(TokenizeError::UnmatchedOpenParen));
    }

    #[test]
    fn test_unmatched_close_paren() {
        assert_eq!(
            tokenize("1+2)"),
            Err(TokenizeError::UnmatchedCloseParen { position: 3 })
        );
        assert_eq!(
            tokenize(")("),
            Err(TokenizeError::UnmatchedCloseParen { position: 0 })
        );
    }

    #[test]
    fn test_unrecognized_character_reports_byte_offset() {
        assert_eq!(
            tokenize("1@2"),
            Err(TokenizeError::UnrecognizedCharacter {
                position: 1,
                character: '@'
            })
        );
        assert_eq!(
            tokenize("1 + \t2"),
            Err(TokenizeError::UnrecognizedCharacter {
                position: 4,
                character: '\t'
            })
        );
        assert_eq!(
            tokenize("ab%"),
            Err(TokenizeError::UnrecognizedCharacter {
                position: 2,
                character: '%'
            })
        );
    }

    #[test]
    fn test_errors_are_reported_in_scan_order() {
        assert_eq!(
            tokenize("1)@"),
            Err(TokenizeError::UnmatchedCloseParen { position: 1 })
        );
        assert_eq!(
            tokenize("(1@"),
            Err(TokenizeError::UnrecognizedCharacter {
                position: 2,
                character: '@'
            })
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(TokenizeError::InvalidNumber {
                position: 0,
                literal: "1.2.3".to_string()
            })
        );
        assert!(matches!(
            tokenize("2 + ."),
            Err(TokenizeError::InvalidNumber { position: 4, .. })
        ));
    }

    #[test]
    fn test_literal_limits() {
        let tokenizer = Tokenizer::new(Limits::legacy());
        assert!(tokenizer.tokenize("123456789012345").is_ok());
        assert_eq!(
            tokenizer.tokenize("1 + 1234567890123456"),
            Err(TokenizeError::LiteralTooLong {
                position: 4,
                limit: 15
            })
        );

        let long_name = "a".repeat(32);
        assert_eq!(
            tokenizer.tokenize(&long_name),
            Err(TokenizeError::IdentifierTooLong {
                position: 0,
                limit: 31
            })
        );

        assert!(tokenize(&"9".repeat(64)).is_ok());
    }

    #[test]
    fn test_token_limit_counts_wrapper() {
        let tokenizer = Tokenizer::new(Limits::unbounded().with_max_tokens(5));
        assert!(tokenizer.tokenize("1+2").is_ok());
        assert_eq!(
            tokenizer.tokenize("1+2+3"),
            Err(TokenizeError::TooManyTokens { limit: 5 })
        );
    }
}
