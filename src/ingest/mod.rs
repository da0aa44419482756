pub mod book;
pub mod ingestor;
pub mod reader;
