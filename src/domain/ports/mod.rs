pub mod corpus_source;
pub mod embedding_port;
pub mod holdings_parser;
pub mod language_model;
pub mod session_store;
pub mod vector_store;
