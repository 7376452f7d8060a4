//! Per-session fleet store.
//!
//! Every session key owns its own `Session` (fleet + RNG). Nothing is shared
//! between sessions; the map lock only guards membership and is held for
//! the synchronous length of one cycle.

use crate::config::SessionConfig;
use crate::error::ApiError;
use hyperloop_common::Session;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    config: SessionConfig,
    base_seed: Option<u64>,
    created: AtomicU64,
}

impl SessionStore {
    pub fn new(config: SessionConfig, base_seed: Option<u64>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            base_seed,
            created: AtomicU64::new(0),
        }
    }

    /// Start a session with a fresh fleet
    pub async fn create(&self) -> Result<Uuid, ApiError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(ApiError::SessionLimit(sessions.len()));
        }

        let n = self.created.fetch_add(1, Ordering::Relaxed);
        let seed = self.base_seed.map(|base| base.wrapping_add(n));
        let session = Session::new(seed);
        let id = session.id();
        sessions.insert(id, session);

        info!("  Session {} created ({} active)", id, sessions.len());
        Ok(id)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(&id) {
            Some(session) => {
                info!(
                    "  Session {} ended after {} cycles",
                    id,
                    session.cycle_count()
                );
                Ok(())
            }
            None => Err(ApiError::SessionNotFound(id)),
        }
    }

    /// Run `f` against one session
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(ApiError::SessionNotFound(id))?;
        Ok(f(session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the configured timeout
    pub async fn reap_idle(&self, now: Instant) -> usize {
        let idle_timeout = self.config.idle_timeout();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let keep = now.saturating_duration_since(session.last_seen()) <= idle_timeout;
            if !keep {
                debug!("  Reaping idle session {}", id);
            }
            keep
        });

        let reaped = before - sessions.len();
        if reaped > 0 {
            info!("  Reaped {} idle sessions ({} active)", reaped, sessions.len());
        }
        reaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperloop_common::DashboardQuery;
    use std::time::Duration;

    fn store(max_sessions: usize) -> SessionStore {
        SessionStore::new(
            SessionConfig {
                max_sessions,
                idle_timeout_secs: 30,
                reap_interval_secs: 1,
            },
            Some(100),
        )
    }

    #[tokio::test]
    async fn test_create_and_remove() {
        let store = store(4);
        let id = store.create().await.unwrap();
        assert_eq!(store.len().await, 1);

        store.remove(id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.remove(id).await,
            Err(ApiError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_session_limit() {
        let store = store(2);
        store.create().await.unwrap();
        store.create().await.unwrap();
        assert!(matches!(store.create().await, Err(ApiError::SessionLimit(2))));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = store(4);
        let a = store.create().await.unwrap();
        let b = store.create().await.unwrap();

        let b_before = store
            .with_session(b, |s| s.fleet().clone())
            .await
            .unwrap();
        for _ in 0..5 {
            store
                .with_session(a, |s| s.cycle(&DashboardQuery::default()))
                .await
                .unwrap()
                .unwrap();
        }

        let (b_after, b_cycles) = store
            .with_session(b, |s| (s.fleet().clone(), s.cycle_count()))
            .await
            .unwrap();
        assert_eq!(b_after, b_before);
        assert_eq!(b_cycles, 0);
        assert_eq!(store.with_session(a, |s| s.cycle_count()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_reap_idle() {
        let store = store(4);
        store.create().await.unwrap();

        assert_eq!(store.reap_idle(Instant::now()).await, 0);
        let later = Instant::now() + Duration::from_secs(31);
        assert_eq!(store.reap_idle(later).await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = store(4);
        let result = store.with_session(Uuid::new_v4(), |s| s.cycle_count()).await;
        assert!(matches!(result, Err(ApiError::SessionNotFound(_))));
    }
}
