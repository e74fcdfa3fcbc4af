//! In-memory session store with TTL and cap-based eviction

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use agentix_application::SessionStore;
use agentix_domain::SharedContext;

struct SessionSlot {
    context: SharedContext,
    last_touched: Instant,
}

/// Process-local [`SessionStore`].
///
/// Sessions idle longer than the TTL are evicted lazily on the next
/// store access. When the map is full, creating a new session evicts
/// the stalest live one first, so the map never exceeds `max_sessions`.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionSlot>>,
    ttl: Duration,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionSlot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_expired(&self, sessions: &mut HashMap<String, SessionSlot>) {
        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, slot| slot.last_touched.elapsed() < ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "expired sessions evicted");
        }
    }

    fn evict_stalest(sessions: &mut HashMap<String, SessionSlot>) {
        let stalest = sessions
            .iter()
            .min_by_key(|(_, slot)| slot.last_touched)
            .map(|(id, _)| id.clone());
        if let Some(id) = stalest {
            debug!(session_id = id.as_str(), "session cap reached, evicting stalest");
            sessions.remove(&id);
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn with_session(&self, session_id: &str, f: &mut dyn FnMut(&mut SharedContext)) {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);

        if !sessions.contains_key(session_id) && sessions.len() >= self.max_sessions {
            Self::evict_stalest(&mut sessions);
        }

        let slot = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionSlot {
                context: SharedContext::default(),
                last_touched: Instant::now(),
            });
        slot.last_touched = Instant::now();
        f(&mut slot.context);
    }

    fn snapshot(&self, session_id: &str) -> Option<Value> {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        sessions.get(session_id).map(|slot| slot.context.snapshot())
    }

    fn clear(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    fn active_sessions(&self) -> Vec<String> {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort();
        ids
    }
}
