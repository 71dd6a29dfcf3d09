use crate::domain::entities::holding::HoldingRecord;
use crate::domain::entities::session::{ChatTurn, Session};
use crate::domain::error::DomainError;

/// Keyed conversation state. Operations on different sessions must not
/// block or affect each other; concurrent appends to one session are
/// applied in an unspecified order.
pub trait SessionStore: Send + Sync {
    fn create(&self) -> Session;
    fn get(&self, id: &str) -> Result<Option<Session>, DomainError>;
    fn set_holdings(&self, id: &str, holdings: Vec<HoldingRecord>) -> Result<(), DomainError>;
    fn append_turns(&self, id: &str, turns: Vec<ChatTurn>) -> Result<Vec<ChatTurn>, DomainError>;
}
