mod evaluator;
mod postfix;
mod registry;
mod resolver;
mod shunting_yard;

pub use evaluator::Evaluator;
pub use postfix::PostfixEvaluator;
pub use registry::{Function, FunctionRegistry};
pub use shunting_yard::ShuntingYard;
