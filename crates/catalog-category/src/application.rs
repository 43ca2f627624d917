//! Application services of the Category context.

pub mod validations;
