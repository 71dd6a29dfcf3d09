use crate::application::analytics::AnalyticsUseCase;
use crate::application::prompt::build_prompt;
use crate::application::search::RetrievalEngine;
use crate::domain::entities::session::{ChatTurn, Session};
use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::ports::session_store::SessionStore;
use crate::domain::values::portfolio::PortfolioAnalysis;
use crate::domain::values::search::DEFAULT_TOP_K;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub holdings: usize,
    pub analysis: PortfolioAnalysis,
}

/// Portfolio Q&A: combines analytics, retrieved news and prior turns into
/// one prompt for the language model.
pub struct ChatUseCase {
    sessions: Arc<dyn SessionStore>,
    retrieval: Arc<RetrievalEngine>,
    analytics: Arc<AnalyticsUseCase>,
    llm: Arc<dyn LanguageModel>,
}

impl ChatUseCase {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        retrieval: Arc<RetrievalEngine>,
        analytics: Arc<AnalyticsUseCase>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self { sessions, retrieval, analytics, llm }
    }

    pub fn create_session(&self) -> Session {
        let session = self.sessions.create();
        info!(session_id = %session.id, "created chat session");
        session
    }

    fn require_session(&self, session_id: &str) -> Result<Session, DomainError> {
        self.sessions
            .get(session_id)?
            .ok_or_else(|| DomainError::NotFound(format!("session {session_id}")))
    }

    /// Parse and validate an uploaded portfolio, then attach it to the
    /// session, replacing any earlier upload.
    pub fn upload(&self, session_id: &str, filename: &str, content: &[u8]) -> Result<UploadResponse, DomainError> {
        self.require_session(session_id)?;
        let (records, analysis) = self.analytics.analyze_upload(filename, content)?;
        let holdings = records.len();
        self.sessions.set_holdings(session_id, records)?;
        info!(session_id, holdings, "portfolio uploaded");
        Ok(UploadResponse {
            session_id: session_id.to_string(),
            holdings,
            analysis,
        })
    }

    pub async fn ask(&self, session_id: &str, question: &str) -> Result<AskResponse, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::InvalidInput("Question cannot be empty.".into()));
        }
        let session = self.require_session(session_id)?;
        let records = session.holdings.ok_or_else(|| {
            DomainError::InvalidInput("No portfolio uploaded for this session.".into())
        })?;
        let analysis = self.analytics.analyze(records)?;

        let answer = self.answer(&analysis, &session.history, question).await?;
        let history = self.sessions.append_turns(
            session_id,
            vec![ChatTurn::user(question), ChatTurn::assistant(answer.clone())],
        )?;
        Ok(AskResponse { answer, history })
    }

    /// One-off question about an uploaded file, without a session.
    pub async fn ask_portfolio(&self, filename: &str, content: &[u8], question: &str) -> Result<String, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::InvalidInput("Question cannot be empty.".into()));
        }
        let (_, analysis) = self.analytics.analyze_upload(filename, content)?;
        self.answer(&analysis, &[], question).await
    }

    async fn answer(
        &self,
        analysis: &PortfolioAnalysis,
        history: &[ChatTurn],
        question: &str,
    ) -> Result<String, DomainError> {
        let news = self
            .retrieval
            .search(question, DEFAULT_TOP_K, self.retrieval.default_threshold())
            .await?;
        let prompt = build_prompt(analysis, &news, history, question);
        info!(news = news.len(), prompt_chars = prompt.len(), "asking language model");
        self.llm.generate(&prompt).await
    }
}
