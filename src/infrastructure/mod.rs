pub mod corpus;
pub mod embeddings;
pub mod index;
pub mod llm;
pub mod parsers;
pub mod sessions;
pub mod sqlite;
