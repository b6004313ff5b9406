pub mod aggregate;
pub mod math;

use crate::eval::FunctionRegistry;

pub fn register_functions(registry: &mut FunctionRegistry) {
    aggregate::register(registry);
    math::register(registry);
}
