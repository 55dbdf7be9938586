pub mod core;
pub mod dictionary;
pub mod parser;
pub mod persistence;
pub mod render;
pub mod segmentation;
pub mod tools;
