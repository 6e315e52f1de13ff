//! Input rules applied before anything reaches the store.

mod validation;
pub use validation::RequestValidator;
