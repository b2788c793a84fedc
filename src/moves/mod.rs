pub mod movegen;
pub mod types;
