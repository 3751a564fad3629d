use thiserror::Error;

/// Failures raised while turning an expression string into a token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unmatched '('")]
    UnmatchedOpenParen,

    #[error("unmatched ')' at {position}")]
    UnmatchedCloseParen { position: usize },

    #[error("unrecognized token at {position}: '{character}'")]
    UnrecognizedCharacter { position: usize, character: char },

    #[error("invalid number literal '{literal}' at {position}")]
    InvalidNumber { position: usize, literal: String },

    #[error("number literal at {position} is longer than {limit} characters")]
    LiteralTooLong { position: usize, limit: usize },

    #[error("identifier at {position} is longer than {limit} characters")]
    IdentifierTooLong { position: usize, limit: usize },

    #[error("expression has more than {limit} tokens")]
    TooManyTokens { limit: usize },
}

/// Failures raised while collapsing a token sequence into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid token order")]
    InvalidTokenOrder,

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("unknown function: {0}()")]
    UnknownFunction(String),

    #[error("function {name}() requires exactly {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("uncollapsible expression after minus factor")]
    UncollapsibleUnaryMinus,

    #[error("function {name}() called with more than {limit} arguments")]
    TooManyArguments { name: String, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
