use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type Computation = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Named numeric values visible to an evaluation. Setting an existing name overwrites it.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    values: HashMap<String, f64>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Removes `name`, returning its last value if it was set.
    pub fn unset(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// A native function with a fixed number of arguments.
#[derive(Clone)]
pub struct NativeFunction {
    arity: usize,
    computation: Computation,
}

impl NativeFunction {
    pub fn new<F>(arity: usize, computation: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            arity,
            computation: Arc::new(computation),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[f64]) -> f64 {
        (self.computation)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, NativeFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function. A later registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, arity: usize, computation: F)
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_string(), NativeFunction::new(arity, computation));
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
