pub mod engine;
pub mod phonetic;
pub mod types;
pub mod vocabulary;
