//! Registry of live sessions
//!
//! Every session id maps to its own [`Session`] behind its own async mutex.
//! A caller holds that mutex for a whole exchange, which keeps at most one
//! generation call in flight per session and hides half-finished exchanges.

use super::Session;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Sessions idle longer than this are dropped when new ones are created
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Session not found: {0}")]
pub struct SessionNotFound(pub String);

struct SessionEntry {
    state: Mutex<Session>,
    /// Unix millis of the last lookup
    last_active: AtomicI64,
}

impl SessionEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(Session::new()),
            last_active: AtomicI64::new(now.timestamp_millis()),
        }
    }

    fn touch(&self, now: DateTime<Utc>) {
        self.last_active
            .store(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        let idle_ms = now.timestamp_millis() - self.last_active.load(Ordering::Relaxed);
        Duration::from_millis(u64::try_from(idle_ms).unwrap_or(0))
    }
}

/// Handle to one session's state
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    entry: Arc<SessionEntry>,
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for exclusive access to the session
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.entry.state.lock().await
    }
}

/// Owner of all live sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
    idle_ttl: Duration,
}

impl SessionManager {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Start a fresh session with empty history and hidden form
    pub async fn create(&self) -> SessionHandle {
        let now = Utc::now();
        let pruned = self.prune_idle(now).await;
        if pruned > 0 {
            tracing::info!(pruned, "Dropped idle sessions");
        }

        let id = uuid::Uuid::new_v4().to_string();
        let entry = Arc::new(SessionEntry::new(now));
        let live = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(id.clone(), entry.clone());
            sessions.len()
        };

        tracing::debug!(session_id = %id, live, "Session created");
        SessionHandle { id, entry }
    }

    /// Look up a live session and mark it active
    pub async fn get(&self, id: &str) -> Result<SessionHandle, SessionNotFound> {
        let sessions = self.sessions.read().await;
        let entry = sessions
            .get(id)
            .ok_or_else(|| SessionNotFound(id.to_string()))?;
        entry.touch(Utc::now());

        Ok(SessionHandle {
            id: id.to_string(),
            entry: entry.clone(),
        })
    }

    /// End a session, discarding its state
    pub async fn end(&self, id: &str) -> Result<(), SessionNotFound> {
        if self.sessions.write().await.remove(id).is_none() {
            return Err(SessionNotFound(id.to_string()));
        }
        tracing::debug!(session_id = %id, "Session ended");
        Ok(())
    }

    /// Drop sessions idle for longer than the TTL. Returns how many went.
    pub async fn prune_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.idle_for(now) <= self.idle_ttl);
        before - sessions.len()
    }

    #[cfg(test)]
    async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let manager = SessionManager::default();
        let a = manager.create().await;
        let b = manager.create().await;
        assert_ne!(a.id(), b.id());

        {
            let mut state = a.lock().await;
            state.append_exchange("appointment", "form below");
            state.set_show_form(true);
        }

        let b_state = b.lock().await;
        assert!(b_state.history().is_empty());
        assert!(!b_state.show_form());
    }

    #[tokio::test]
    async fn test_get_returns_same_state() {
        let manager = SessionManager::default();
        let created = manager.create().await;
        created.lock().await.append_exchange("hi", "hello");

        let fetched = manager.get(created.id()).await.unwrap();
        assert_eq!(fetched.lock().await.history().len(), 2);
    }

    #[tokio::test]
    async fn test_end_destroys_session() {
        let manager = SessionManager::default();
        let handle = manager.create().await;
        let id = handle.id().to_string();

        manager.end(&id).await.unwrap();
        assert_eq!(manager.get(&id).await.err(), Some(SessionNotFound(id.clone())));
        assert!(manager.end(&id).await.is_err());
        assert_eq!(manager.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_prune_idle_keeps_recent_sessions() {
        let manager = SessionManager::new(Duration::from_secs(60));
        let stale = manager.create().await;
        let fresh = manager.create().await;

        let later = Utc::now() + chrono::Duration::seconds(120);
        fresh.entry.touch(later);

        assert_eq!(manager.prune_idle(later).await, 1);
        assert!(manager.get(stale.id()).await.is_err());
        assert!(manager.get(fresh.id()).await.is_ok());
    }
}
