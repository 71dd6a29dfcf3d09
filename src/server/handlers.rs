use crate::application::chat::{AskResponse, UploadResponse};
use crate::domain::error::DomainError;
use crate::domain::values::portfolio::PortfolioAnalysis;
use crate::domain::values::search::{NewsSearchResult, DEFAULT_QUERY_THRESHOLD, DEFAULT_TOP_K};
use crate::server::error::ApiError;
use crate::server::AppState;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub top_k: Option<usize>,
    pub threshold: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct TopKParams {
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub session_id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
}

/// Multipart fields the upload endpoints accept.
#[derive(Default)]
struct UploadForm {
    session_id: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some((filename, bytes.to_vec()));
            }
            Some("session_id") => form.session_id = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

fn require_file(form: &UploadForm) -> Result<(&str, &[u8]), ApiError> {
    form.file
        .as_ref()
        .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
        .ok_or_else(|| DomainError::InvalidInput("Missing 'file' upload field.".into()).into())
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Investor Portfolio Assistant API is running!" }))
}

pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>, ApiError> {
    let form = read_upload(multipart).await?;
    let (filename, content) = require_file(&form)?;
    let analysis: PortfolioAnalysis = state.app.analyze_upload(filename, content)?;
    Ok(Json(json!({ "analysis": analysis })))
}

pub async fn ask_portfolio(
    State(state): State<AppState>,
    params: Result<Query<QuestionParams>, QueryRejection>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let form = read_upload(multipart).await?;
    let (filename, content) = require_file(&form)?;
    let answer = state.app.ask_portfolio(filename, content, &params.question).await?;
    Ok(Json(json!({ "answer": answer })))
}

pub async fn search_news(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<NewsSearchResult>, ApiError> {
    let Query(params) = params?;
    let result = state
        .app
        .search_news(
            &params.query,
            params.top_k.unwrap_or(DEFAULT_TOP_K),
            params.threshold.unwrap_or(DEFAULT_QUERY_THRESHOLD),
        )
        .await?;
    Ok(Json(result))
}

pub async fn company_news(
    State(state): State<AppState>,
    Path(company): Path<String>,
    params: Result<Query<TopKParams>, QueryRejection>,
) -> Result<Json<NewsSearchResult>, ApiError> {
    let Query(params) = params?;
    let result = state
        .app
        .company_news(&company, params.top_k.unwrap_or(DEFAULT_TOP_K))
        .await?;
    Ok(Json(result))
}

pub async fn topic_news(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    params: Result<Query<TopKParams>, QueryRejection>,
) -> Result<Json<NewsSearchResult>, ApiError> {
    let Query(params) = params?;
    let result = state
        .app
        .topic_news(&topic, params.top_k.unwrap_or(DEFAULT_TOP_K))
        .await?;
    Ok(Json(result))
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreated> {
    let session = state.app.create_session();
    Json(SessionCreated { session_id: session.id })
}

pub async fn chat_upload(State(state): State<AppState>, multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    let form = read_upload(multipart).await?;
    let session_id = form
        .session_id
        .as_deref()
        .ok_or_else(|| DomainError::InvalidInput("Missing 'session_id' field.".into()))?;
    let (filename, content) = require_file(&form)?;
    Ok(Json(state.app.upload(session_id, filename, content)?))
}

pub async fn chat_ask(
    State(state): State<AppState>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Form(form) = form?;
    Ok(Json(state.app.ask(&form.session_id, &form.question).await?))
}
