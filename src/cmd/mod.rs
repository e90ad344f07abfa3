pub mod config;
pub mod prepare;
pub mod resolve;
pub mod validate;
