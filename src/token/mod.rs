use std::fmt;

mod sequence;

pub use sequence::TokenSequence;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operator(Operator),
    Number(f64),
    Identifier(String),
}

impl Token {
    /// Returns the operator if this token is a precedence-0 delimiter.
    pub fn as_delimiter(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) if op.is_delimiter() => Some(*op),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Token::Number(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(other) if *other == op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::Number(value) => write!(f, "{}", value),
            Token::Identifier(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    OpenParen,
    CloseParen,
    Comma,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::OpenParen => '(',
            Operator::CloseParen => ')',
            Operator::Comma => ',',
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Binding strength. Zero is reserved for delimiters.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::OpenParen | Operator::CloseParen | Operator::Comma => 0,
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            Operator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        self.precedence() == 0
    }

    /// Applies a binary operator. Delimiters have no arithmetic meaning and return `None`.
    pub fn apply(&self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => Some(left / right),
            Operator::Power => Some(left.powf(right)),
            Operator::OpenParen | Operator::CloseParen | Operator::Comma => None,
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
            '(' => Ok(Operator::OpenParen),
            ')' => Ok(Operator::CloseParen),
            ',' => Ok(Operator::Comma),
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            other => Err(other),
        }
    }
}
