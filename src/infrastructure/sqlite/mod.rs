pub mod migrations;
pub mod news_corpus;
