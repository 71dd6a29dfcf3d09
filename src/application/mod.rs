pub mod analytics;
pub mod build_index;
pub mod chat;
pub mod prompt;
pub mod search;
