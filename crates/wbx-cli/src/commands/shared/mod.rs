pub mod lines;
pub mod mapping;
pub mod policy;
