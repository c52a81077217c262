pub mod engine;
pub mod serialization;
pub mod table;
