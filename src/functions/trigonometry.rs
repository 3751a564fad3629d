use crate::registry::FunctionRegistry;
use calcspan_macros::native_fn;

pub fn register(functions: &mut FunctionRegistry) {
    functions.register("sin", SIN_ARITY, sin);
    functions.register("cos", COS_ARITY, cos);
}

// Angles are in radians.

#[native_fn]
pub fn sin(x: f64) -> f64 {
    x.sin()
}

#[native_fn]
pub fn cos(x: f64) -> f64 {
    x.cos()
}
