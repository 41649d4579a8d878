pub mod parser;
pub mod strategy;
