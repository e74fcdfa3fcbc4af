//! Shared per-session context
//!
//! Mutable key/value state scoped to one workflow session, plus the
//! cross-check results accumulated so far and a capped audit trail of
//! mutations. The context itself does no locking; the session store
//! guards access (see the application layer's `SessionStore` port).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::VecDeque;

use crate::protocol::cross_check::CrossCheckResult;

/// Maximum audit entries retained per session
const HISTORY_CAP: usize = 50;

/// Maximum characters of mutation detail recorded per entry
const DETAIL_MAX_CHARS: usize = 100;

/// One redacted snapshot of a context mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    /// What happened: "set", "update", "cross_check", "clear"
    pub action: String,
    /// Truncated description of the mutation
    pub detail: String,
}

/// Per-session mutable state shared across agents in a workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedContext {
    values: Map<String, Value>,
    cross_checks: Vec<CrossCheckResult>,
    history: VecDeque<AuditEntry>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single key, recording the mutation in the audit trail
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.record("set", format!("{key}={value}"));
        self.values.insert(key, value);
    }

    /// Get a value by key, or the provided default
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value by key, falling back to a default
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }

    /// Merge a map of keys into the context in one audited step
    pub fn update(&mut self, entries: Map<String, Value>) {
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        self.record("update", format!("keys=[{}]", keys.join(",")));
        for (key, value) in entries {
            self.values.insert(key, value);
        }
    }

    /// Record a cross-check verdict against this session
    pub fn add_cross_check(&mut self, result: CrossCheckResult) {
        self.record(
            "cross_check",
            format!("{}:{:?}", result.validator_agent, result.result),
        );
        self.cross_checks.push(result);
    }

    pub fn cross_checks(&self) -> &[CrossCheckResult] {
        &self.cross_checks
    }

    /// True iff any accumulated cross-check came back invalid
    pub fn has_validation_errors(&self) -> bool {
        self.cross_checks.iter().any(|c| c.is_invalid())
    }

    /// Drop all values and cross-checks. The clear itself is audited.
    pub fn clear(&mut self) {
        self.values.clear();
        self.cross_checks.clear();
        self.record("clear", String::new());
    }

    pub fn history(&self) -> impl Iterator<Item = &AuditEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Serialize values, cross-checks, and the audit trail for
    /// inclusion in an outgoing `AgentMessage.context`.
    pub fn snapshot(&self) -> Value {
        json!({
            "context": self.values,
            "cross_checks": self.cross_checks,
            "history": self.history,
        })
    }

    fn record(&mut self, action: &str, detail: String) {
        let detail = if detail.chars().count() > DETAIL_MAX_CHARS {
            detail.chars().take(DETAIL_MAX_CHARS).collect()
        } else {
            detail
        };
        if self.history.len() == HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(AuditEntry {
            timestamp: Utc::now(),
            action: action.to_string(),
            detail,
        });
    }
}
