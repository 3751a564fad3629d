pub mod arithmetic;
pub mod rounding;
pub mod trigonometry;

use crate::registry::{FunctionRegistry, VariableRegistry};

/// Installs `sqrt`, `pow`, `mod`, `round`, `floor`, `ceil`, `sin` and `cos`.
pub fn register_functions(functions: &mut FunctionRegistry) {
    arithmetic::register(functions);
    rounding::register(functions);
    trigonometry::register(functions);
}

/// Installs the constants `pi` and `e`.
pub fn register_constants(variables: &mut VariableRegistry) {
    variables.set("pi", std::f64::consts::PI);
    variables.set("e", std::f64::consts::E);
}
