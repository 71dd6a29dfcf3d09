pub mod error;
pub mod handlers;

use crate::domain::error::DomainError;
use crate::FolioRag;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<FolioRag>,
}

pub fn create_app(app: Arc<FolioRag>) -> Router {
    Router::<AppState>::new()
        .route("/", get(handlers::root))
        .route("/upload/", post(handlers::upload))
        .route("/ask-portfolio/", post(handlers::ask_portfolio))
        .route("/search-news/", get(handlers::search_news))
        .route("/search-news/company/:company", get(handlers::company_news))
        .route("/search-news/topic/:topic", get(handlers::topic_news))
        .route("/chat/session", post(handlers::create_session))
        .route("/chat/upload", post(handlers::chat_upload))
        .route("/chat/ask", post(handlers::chat_ask))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { app })
}

pub async fn serve(app: Arc<FolioRag>, bind_addr: &str) -> Result<(), DomainError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| DomainError::Configuration(format!("cannot bind {bind_addr}: {e}")))?;
    info!("portfolio assistant listening on http://{bind_addr}/");
    axum::serve(listener, create_app(app))
        .await
        .map_err(|e| DomainError::Configuration(format!("server error: {e}")))
}
