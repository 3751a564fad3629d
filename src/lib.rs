pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod registry;
pub mod token;
pub mod tokenizer;

pub use config::Limits;
pub use environment::Environment;
pub use error::{Error, EvalError, TokenizeError};
pub use evaluator::Evaluator;
pub use registry::{FunctionRegistry, NativeFunction, VariableRegistry};
pub use token::{Operator, Token, TokenSequence};
pub use tokenizer::{tokenize, Tokenizer};

/// Evaluates `expression` with the built-in functions and constants.
pub fn evaluate_expression(expression: &str) -> Result<f64, Error> {
    Environment::with_builtins().evaluate(expression)
}
