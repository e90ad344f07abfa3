pub mod prepare;
pub mod validate;
