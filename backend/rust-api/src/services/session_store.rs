use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info};
use uuid::Uuid;

use crate::metrics::{SESSIONS_ACTIVE, SESSIONS_TOTAL};
use crate::models::SessionData;

struct SessionEntry {
    data: Arc<Mutex<SessionData>>,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self {
            data: Arc::new(Mutex::new(SessionData::default())),
            last_seen: now,
        }
    }
}

/// Session resolved for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: String,
    pub is_new: bool,
}

/// In-memory server-side sessions with a sliding TTL.
///
/// The map lock is held only for lookup and bookkeeping. Each entry keeps
/// its data behind its own mutex, so requests of one session are serialized
/// while different sessions proceed independently.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) >= self.ttl
    }

    /// Returns the live session for `id`, or opens a new one under a fresh id.
    /// Unknown or expired ids are never adopted.
    pub async fn resolve(&self, id: Option<&str>) -> SessionHandle {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = id {
            let expired = match sessions.get_mut(id) {
                Some(entry) if !self.is_expired(entry, now) => {
                    entry.last_seen = now;
                    return SessionHandle {
                        id: id.to_string(),
                        is_new: false,
                    };
                }
                Some(_) => true,
                None => false,
            };
            if expired {
                sessions.remove(id);
                SESSIONS_TOTAL.with_label_values(&["expired"]).inc();
                debug!(session_id = id, "Session expired on access");
            }
        }

        let new_id = Uuid::new_v4().to_string();
        sessions.insert(new_id.clone(), SessionEntry::new(now));
        SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        SESSIONS_ACTIVE.set(sessions.len() as i64);
        debug!(session_id = %new_id, "Session created");

        SessionHandle {
            id: new_id,
            is_new: true,
        }
    }

    /// Runs `f` against the session data under that session's lock.
    /// A session evicted since it was resolved starts over empty.
    pub async fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let data = {
            let now = Instant::now();
            let mut sessions = self.sessions.lock().await;
            let entry = sessions
                .entry(id.to_string())
                .or_insert_with(|| SessionEntry::new(now));
            entry.last_seen = now;
            entry.data.clone()
        };

        let mut guard = data.lock().await;
        f(&mut guard)
    }

    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        let evicted = before - sessions.len();

        if evicted > 0 {
            SESSIONS_TOTAL
                .with_label_values(&["expired"])
                .inc_by(evicted as u64);
        }
        SESSIONS_ACTIVE.set(sessions.len() as i64);
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

/// Background loop evicting expired sessions
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self) {
        info!(
            "Starting session sweeper loop (interval {}s, ttl {}s)",
            self.interval.as_secs(),
            self.store.ttl().as_secs()
        );

        loop {
            sleep(self.interval).await;
            self.run_once().await;
        }
    }

    pub async fn run_once(&self) -> usize {
        let evicted = self.store.evict_expired().await;
        if evicted > 0 {
            info!(evicted, "Evicted expired sessions");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flash, QuizProgress};

    async fn is_live(store: &SessionStore, id: &str) -> bool {
        let now = Instant::now();
        let sessions = store.sessions.lock().await;
        sessions
            .get(id)
            .is_some_and(|entry| !store.is_expired(entry, now))
    }

    #[tokio::test]
    async fn test_resolve_without_cookie_creates_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let handle = store.resolve(None).await;
        assert!(handle.is_new);
        assert!(is_live(&store, &handle.id).await);
    }

    #[tokio::test]
    async fn test_resolve_known_id_reuses_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.resolve(None).await;
        let second = store.resolve(Some(&first.id)).await;
        assert_eq!(second.id, first.id);
        assert!(!second.is_new);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_not_adopted() {
        let store = SessionStore::new(Duration::from_secs(60));
        let handle = store.resolve(Some("attacker-chosen")).await;
        assert!(handle.is_new);
        assert_ne!(handle.id, "attacker-chosen");
    }

    #[tokio::test]
    async fn test_with_session_mutates_data() {
        let store = SessionStore::new(Duration::from_secs(60));
        let handle = store.resolve(None).await;

        store
            .with_session(&handle.id, |data| data.set_flash(Flash::success("saved")))
            .await;

        let flash = store
            .with_session(&handle.id, |data| data.take_flash())
            .await;
        assert_eq!(flash, Some(Flash::success("saved")));

        let again = store
            .with_session(&handle.id, |data| data.take_flash())
            .await;
        assert_eq!(again, None);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_hidden_and_evicted() {
        let store = Arc::new(SessionStore::new(Duration::from_millis(50)));
        let stale = store.resolve(None).await;

        tokio::time::sleep(Duration::from_millis(80)).await;
        let fresh = store.resolve(None).await;

        assert!(!is_live(&store, &stale.id).await);
        assert!(is_live(&store, &fresh.id).await);

        let sweeper = SessionSweeper::new(store.clone(), Duration::from_secs(60));
        assert_eq!(sweeper.run_once().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_id_gets_a_new_session() {
        let store = SessionStore::new(Duration::from_millis(30));
        let stale = store.resolve(None).await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        let handle = store.resolve(Some(&stale.id)).await;
        assert!(handle.is_new);
        assert_ne!(handle.id, stale.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_to_one_session_are_serialized() {
        let store = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let handle = store.resolve(None).await;

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                let id = handle.id.clone();
                tokio::spawn(async move {
                    store
                        .with_session(&id, |data| {
                            data.quiz.get_or_insert_with(QuizProgress::default).score += 1
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let score = store
            .with_session(&handle.id, |data| data.quiz.as_ref().map(|q| q.score))
            .await;
        assert_eq!(score, Some(50));
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_data() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.resolve(None).await;
        let second = store.resolve(None).await;

        store
            .with_session(&first.id, |data| data.set_flash(Flash::error("first only")))
            .await;

        let flash = store
            .with_session(&second.id, |data| data.take_flash())
            .await;
        assert_eq!(flash, None);
    }
}
