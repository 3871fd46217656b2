//! Session storage
//!
//! Process-wide mapping from session id to live intake state.
//! In-memory only: an intake that dies with the process is simply
//! restarted with /start.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::intake::{CapacityMode, IntakeDraft, IntakeStage, IntakeStateMachine};
use crate::Result;

/// Opaque per-conversation identifier.
///
/// Channels hand us arbitrary strings (chat ids, user handles); we fold
/// them into a stable UUID so the same channel id always reaches the
/// same session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn from_channel_id(raw: &str) -> Self {
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => SessionId(id),
            Err(_) => SessionId(stable_uuid_from_string(raw)),
        }
    }
}

fn stable_uuid_from_string(input: &str) -> Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// One active intake conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    pub mode: CapacityMode,
    pub stage: IntakeStage,
    pub draft: IntakeDraft,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// A completely fresh session: stage at the top of the flow, empty
    /// draft. Restarting must never reuse fields from an earlier run.
    pub fn new(session_id: SessionId, mode: CapacityMode) -> Self {
        Self {
            session_id,
            mode,
            stage: IntakeStateMachine::initial_stage(),
            draft: IntakeDraft::default(),
            started_at: Utc::now(),
        }
    }
}

/// Handle to one session, locked for the duration of a turn.
///
/// Distinct session ids never contend; two messages for the same id are
/// serialized by this mutex.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Trait for session storage
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Create (or reset) the session for an id.
    async fn begin(&self, id: SessionId, mode: CapacityMode) -> Result<SessionHandle>;
    /// Look up a live session.
    async fn get(&self, id: SessionId) -> Result<Option<SessionHandle>>;
    /// Tear a session down (completion or cancellation).
    async fn remove(&self, id: SessionId) -> Result<()>;
}

/// In-memory session store
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn begin(&self, id: SessionId, mode: CapacityMode) -> Result<SessionHandle> {
        let handle: SessionHandle = Arc::new(Mutex::new(Session::new(id, mode)));

        let mut sessions = self.sessions.write().await;
        // Replace, never merge: /start mid-flow discards the old draft
        sessions.insert(id, Arc::clone(&handle));

        Ok(handle)
    }

    async fn get(&self, id: SessionId) -> Result<Option<SessionHandle>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn remove(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id);
        Ok(())
    }
}
