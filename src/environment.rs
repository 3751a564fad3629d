use crate::config::Limits;
use crate::error::Error;
use crate::evaluator::Evaluator;
use crate::functions::{register_constants, register_functions};
use crate::registry::{FunctionRegistry, NativeFunction, VariableRegistry};
use crate::tokenizer::Tokenizer;
use log::debug;
use rayon::prelude::*;

/// The variables, functions and limits that expressions are evaluated against.
///
/// Evaluation only reads from the environment, so one environment can serve many
/// evaluations at once.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: VariableRegistry,
    functions: FunctionRegistry,
    limits: Limits,
}

impl Environment {
    /// An empty environment: no variables, no functions, no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment with the built-in functions and the constants `pi` and `e`.
    pub fn with_builtins() -> Self {
        let mut environment = Self::new();
        register_functions(&mut environment.functions);
        register_constants(&mut environment.variables);
        environment
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.set(name, value);
    }

    pub fn unset_variable(&mut self, name: &str) -> Option<f64> {
        self.variables.unset(name)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name)
    }

    pub fn register_function<F>(&mut self, name: &str, arity: usize, computation: F)
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions.register(name, arity, computation);
    }

    pub fn lookup_function(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    /// Tokenizes and evaluates a single expression.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` with the value, which may be NaN or infinite.
    /// * `Err(Error)` if the expression is malformed or refers to unknown symbols.
    pub fn evaluate(&self, expression: &str) -> Result<f64, Error> {
        let tokens = Tokenizer::new(self.limits).tokenize(expression)?;
        let result = Evaluator::new(&self.variables, &self.functions)
            .with_limits(self.limits)
            .evaluate(tokens)?;
        debug!("{} = {}", expression, result);
        Ok(result)
    }

    /// Evaluates independent expressions in parallel. Results keep the input order.
    pub fn evaluate_batch(&self, expressions: &[&str]) -> Vec<Result<f64, Error>> {
        debug!("Evaluating batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate(expression))
            .collect()
    }
}
