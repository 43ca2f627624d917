//! Application services of the Cast Member context.

pub mod validations;
