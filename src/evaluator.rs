use crate::config::{exceeded, Limits};
use crate::error::EvalError;
use crate::registry::{FunctionRegistry, VariableRegistry};
use crate::token::{Associativity, Operator, Token, TokenSequence};
use log::{debug, trace};

/// Evaluates token sequences in place.
///
/// There is no syntax tree. Every non-numeric term (a group, a call, a negation, an
/// identifier) is collapsed into a single `Number` token where it stands, and binary
/// operators are folded into their right operand's slot. The working position only moves
/// right past an operator when the operator after it binds tighter, so how far it has
/// advanced plays the role of an operator stack.
///
/// Nesting is handled with plain recursion, so stack usage grows with the nesting depth of
/// the input.
pub struct Evaluator<'a> {
    variables: &'a VariableRegistry,
    functions: &'a FunctionRegistry,
    limits: Limits,
}

impl<'a> Evaluator<'a> {
    pub fn new(variables: &'a VariableRegistry, functions: &'a FunctionRegistry) -> Self {
        Self {
            variables,
            functions,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Consumes a tokenized expression and returns its value.
    ///
    /// Everything must collapse: after evaluation only `( number )` may remain.
    pub fn evaluate(&self, mut tokens: TokenSequence) -> Result<f64, EvalError> {
        debug!("Evaluating token stream: {}", tokens);
        let result = self.evaluate_at(&mut tokens, 0)?;

        match tokens.as_slice() {
            [Token::Operator(Operator::OpenParen), Token::Number(_), Token::Operator(Operator::CloseParen)] => {
                Ok(result)
            }
            rest => {
                debug!("Trailing tokens after evaluation: {}", tokens);
                trace!("{} tokens left", rest.len());
                Err(EvalError::InvalidTokenOrder)
            }
        }
    }

    /// Evaluates the sub-expression that starts at the delimiter `tokens[start]` and runs
    /// up to the next delimiter at the same depth.
    ///
    /// On success the sub-expression has been collapsed so that `tokens[start + 1]` holds
    /// the result and `tokens[start + 2]` is the closing delimiter. Neither delimiter is
    /// removed; that is up to the caller.
    pub fn evaluate_at(&self, tokens: &mut TokenSequence, start: usize) -> Result<f64, EvalError> {
        if tokens.get(start).and_then(Token::as_delimiter).is_none() {
            return Err(EvalError::InvalidTokenOrder);
        }

        let mut pos = start;
        loop {
            self.collapse(tokens, pos)?;

            let (current, rhs, next) = match (tokens.get(pos), tokens.get(pos + 1), tokens.get(pos + 2)) {
                (Some(Token::Operator(current)), Some(Token::Number(rhs)), Some(Token::Operator(next))) => {
                    (*current, *rhs, *next)
                }
                _ => {
                    trace!("Invalid token order at {} in {}", pos, tokens);
                    return Err(EvalError::InvalidTokenOrder);
                }
            };

            if current.is_delimiter() && next.is_delimiter() {
                return Ok(rhs);
            }

            if binds_first(next, current) {
                pos += 2;
                continue;
            }

            // `current` is a binary operator here, so `pos > start` and its left operand
            // sits at `pos - 1`.
            let lhs = pos
                .checked_sub(1)
                .and_then(|index| tokens.get(index))
                .and_then(Token::as_number)
                .ok_or(EvalError::InvalidTokenOrder)?;
            let result = current
                .apply(lhs, rhs)
                .ok_or(EvalError::InvalidTokenOrder)?;
            trace!("Fold {} {} {} = {}", lhs, current, rhs, result);

            tokens.replace(pos + 1, Token::Number(result));
            tokens.remove_range(pos - 1..pos + 1);
            pos -= 2;
        }
    }

    /// Reduces the term right after `pos` to a number.
    fn collapse(&self, tokens: &mut TokenSequence, pos: usize) -> Result<(), EvalError> {
        let term = pos + 1;
        match tokens.get(term) {
            Some(Token::Operator(Operator::Subtract)) => self.collapse_negation(tokens, term),
            Some(Token::Operator(Operator::OpenParen)) => self.collapse_group(tokens, term),
            Some(Token::Identifier(_)) => {
                let is_call = tokens
                    .get(term + 1)
                    .is_some_and(|token| token.is_operator(Operator::OpenParen));
                if is_call {
                    self.collapse_call(tokens, term)
                } else {
                    self.collapse_variable(tokens, term)
                }
            }
            _ => Ok(()),
        }
    }

    /// A minus in term position negates the next term, whatever it collapses to.
    fn collapse_negation(&self, tokens: &mut TokenSequence, minus: usize) -> Result<(), EvalError> {
        self.collapse(tokens, minus)?;

        let value = tokens
            .get(minus + 1)
            .and_then(Token::as_number)
            .ok_or(EvalError::UncollapsibleUnaryMinus)?;
        tokens.replace(minus + 1, Token::Number(-value));
        tokens.remove_range(minus..minus + 1);
        Ok(())
    }

    fn collapse_group(&self, tokens: &mut TokenSequence, open: usize) -> Result<(), EvalError> {
        let value = self.evaluate_at(tokens, open)?;

        let closed = tokens
            .get(open + 2)
            .is_some_and(|token| token.is_operator(Operator::CloseParen));
        if !closed {
            return Err(EvalError::InvalidTokenOrder);
        }

        tokens.replace(open, Token::Number(value));
        tokens.remove_range(open + 1..open + 3);
        Ok(())
    }

    fn collapse_call(&self, tokens: &mut TokenSequence, at: usize) -> Result<(), EvalError> {
        let name = match tokens.get(at) {
            Some(Token::Identifier(name)) => name.clone(),
            _ => return Err(EvalError::InvalidTokenOrder),
        };

        let args = self.collect_arguments(tokens, at + 1, &name)?;

        let function = self
            .functions
            .get(&name)
            .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
        if function.arity() != args.len() {
            return Err(EvalError::ArityMismatch {
                name,
                expected: function.arity(),
                got: args.len(),
            });
        }

        let result = function.call(&args);
        debug!("Call {}({:?}) = {}", name, args, result);
        tokens.replace(at, Token::Number(result));
        Ok(())
    }

    /// Evaluates each argument between the `(` at `open` and its matching `)`, removing the
    /// whole argument list from the sequence.
    fn collect_arguments(
        &self,
        tokens: &mut TokenSequence,
        open: usize,
        name: &str,
    ) -> Result<Vec<f64>, EvalError> {
        let mut args = Vec::new();

        if tokens
            .get(open + 1)
            .is_some_and(|token| token.is_operator(Operator::CloseParen))
        {
            tokens.remove_range(open..open + 2);
            return Ok(args);
        }

        loop {
            // Each argument starts at the delimiter left over from the previous one.
            let value = self.evaluate_at(tokens, open)?;
            if let Some(limit) = exceeded(self.limits.max_arguments, args.len() + 1) {
                return Err(EvalError::TooManyArguments {
                    name: name.to_string(),
                    limit,
                });
            }
            args.push(value);

            match tokens.get(open + 2).and_then(Token::as_delimiter) {
                Some(Operator::Comma) => tokens.remove_range(open..open + 2),
                Some(Operator::CloseParen) => {
                    tokens.remove_range(open..open + 3);
                    return Ok(args);
                }
                _ => return Err(EvalError::InvalidTokenOrder),
            }
        }
    }

    fn collapse_variable(&self, tokens: &mut TokenSequence, at: usize) -> Result<(), EvalError> {
        let value = match tokens.get(at) {
            Some(Token::Identifier(name)) => self
                .variables
                .get(name)
                .ok_or_else(|| EvalError::UnknownVariable(name.clone()))?,
            _ => return Err(EvalError::InvalidTokenOrder),
        };
        tokens.replace(at, Token::Number(value));
        Ok(())
    }
}

/// Whether `next` must be applied before `current`.
fn binds_first(next: Operator, current: Operator) -> bool {
    next.precedence() > current.precedence()
        || (next.precedence() == current.precedence()
            && current.associativity() == Associativity::Right)
}
