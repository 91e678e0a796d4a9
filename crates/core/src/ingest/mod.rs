pub mod history;
pub mod quotes;
pub mod shapes;
pub mod types;
