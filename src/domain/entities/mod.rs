pub mod holding;
pub mod news_article;
pub mod session;
