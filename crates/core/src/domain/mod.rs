pub mod instrument;
pub mod pricing;
pub mod recommendation;
pub mod signal;
