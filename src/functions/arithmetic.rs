use crate::registry::FunctionRegistry;
use calcspan_macros::native_fn;

pub fn register(functions: &mut FunctionRegistry) {
    functions.register("sqrt", SQRT_ARITY, sqrt);
    functions.register("pow", POW_ARITY, pow);
    functions.register("mod", MODULO_ARITY, modulo);
}

#[native_fn]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[native_fn]
pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Floating-point remainder; the result has the sign of the dividend.
#[native_fn]
pub fn modulo(dividend: f64, divisor: f64) -> f64 {
    dividend % divisor
}
