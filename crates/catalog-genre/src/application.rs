//! Application services of the Genre context.

pub mod validations;
