pub mod branch;
pub mod message;
pub mod pattern;
pub mod ticket;
