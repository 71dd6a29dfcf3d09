use crate::domain::entities::holding::HoldingRecord;
use crate::domain::entities::session::{ChatTurn, Session};
use crate::domain::error::DomainError;
use crate::domain::ports::session_store::SessionStore;
use dashmap::DashMap;

/// Process-lifetime session storage. Sharded locking keeps requests for
/// different sessions independent; nothing is persisted.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::NotFound(format!("session {id}"))
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> Session {
        let session = Session::new();
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    fn get(&self, id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.get(id).map(|s| s.value().clone()))
    }

    fn set_holdings(&self, id: &str, holdings: Vec<HoldingRecord>) -> Result<(), DomainError> {
        let mut session = self.sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.holdings = Some(holdings);
        Ok(())
    }

    fn append_turns(&self, id: &str, turns: Vec<ChatTurn>) -> Result<Vec<ChatTurn>, DomainError> {
        let mut session = self.sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.history.extend(turns);
        Ok(session.history.clone())
    }
}
