pub mod error;
pub mod resolver;
pub mod strategies;
pub mod targets;
