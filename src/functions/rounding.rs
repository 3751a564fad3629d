use crate::registry::FunctionRegistry;
use calcspan_macros::native_fn;

pub fn register(functions: &mut FunctionRegistry) {
    functions.register("round", ROUND_ARITY, round);
    functions.register("floor", FLOOR_ARITY, floor);
    functions.register("ceil", CEIL_ARITY, ceil);
}

/// Rounds half-way cases away from zero.
#[native_fn]
pub fn round(x: f64) -> f64 {
    x.round()
}

#[native_fn]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[native_fn]
pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round(&[2.5]), 3.0);
        assert_eq!(round(&[-2.5]), -3.0);
        assert_eq!(round(&[2.4]), 2.0);
    }

    #[test]
    fn test_floor_and_ceil() {
        assert_eq!(floor(&[-1.5]), -2.0);
        assert_eq!(ceil(&[-1.5]), -1.0);
        assert_eq!(floor(&[3.0]), 3.0);
        assert_eq!(ceil(&[3.0001]), 4.0);
    }
}
