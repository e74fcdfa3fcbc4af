//! Session store port
//!
//! Keeps one [`SharedContext`] per session id. Implementations must
//! guard access with a lock and bound the map (TTL plus a max-session
//! cap): concurrent requests may touch the same session, and sessions
//! must not accumulate for the process lifetime.

use serde_json::Value;

use agentix_domain::SharedContext;

/// Port for per-session context storage.
///
/// Access is closure-based so implementations can hold their lock for
/// exactly the duration of one mutation.
pub trait SessionStore: Send + Sync {
    /// Run `f` against the session's context, creating the session on
    /// first use.
    fn with_session(&self, session_id: &str, f: &mut dyn FnMut(&mut SharedContext));

    /// Serialized snapshot of a session's context, if the session exists.
    fn snapshot(&self, session_id: &str) -> Option<Value>;

    /// Drop a session outright.
    fn clear(&self, session_id: &str);

    /// Ids of all live sessions.
    fn active_sessions(&self) -> Vec<String>;
}
