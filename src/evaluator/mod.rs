pub mod driver;
pub mod env;
pub mod errors;
pub mod expr;

pub type EvalResult<T> = std::result::Result<T, crate::evaluator::errors::EvalError>;
