use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::application::ports::ChatTurn;
use crate::domain::SessionId;

/// Conversation context the provider sees for one session.
#[derive(Debug, Default)]
pub struct ChatHandle {
    history: Vec<ChatTurn>,
}

impl ChatHandle {
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn record_exchange(&mut self, prompt: &str, reply: &str) {
        self.history.push(ChatTurn::user(prompt));
        self.history.push(ChatTurn::model(reply));
    }
}

struct CacheEntry {
    handle: Arc<Mutex<ChatHandle>>,
    last_used: Instant,
}

/// Per-session chat handles with idle expiry and a hard capacity.
///
/// Handles are created lazily through the map's entry API, so two requests racing
/// on a new session share one handle. Requests on the same session serialize on
/// the handle's mutex.
pub struct ChatHandleCache {
    entries: DashMap<SessionId, CacheEntry>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl ChatHandleCache {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_sessions: max_sessions.max(1),
            idle_ttl,
        }
    }

    pub fn get_or_create(&self, session_id: &SessionId) -> Arc<Mutex<ChatHandle>> {
        let now = Instant::now();

        if let Some(mut entry) = self.entries.get_mut(session_id) {
            entry.last_used = now;
            return Arc::clone(&entry.handle);
        }

        if self.entries.len() >= self.max_sessions {
            self.evict_idle();
            while self.entries.len() >= self.max_sessions {
                if !self.evict_least_recently_used() {
                    break;
                }
            }
        }

        let entry = self
            .entries
            .entry(session_id.clone())
            .or_insert_with(|| {
                tracing::debug!(session_id = %session_id, "Creating chat handle");
                CacheEntry {
                    handle: Arc::new(Mutex::new(ChatHandle::default())),
                    last_used: now,
                }
            });

        Arc::clone(&entry.handle)
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.entries.contains_key(session_id)
    }

    pub fn remove(&self, session_id: &SessionId) -> bool {
        self.entries.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every handle unused for longer than the idle TTL.
    pub fn evict_idle(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.idle_ttl;
        self.entries.retain(|_, entry| entry.last_used.elapsed() <= ttl);
        let evicted = before.saturating_sub(self.entries.len());

        if evicted > 0 {
            tracing::info!(evicted, remaining = self.entries.len(), "Evicted idle chat handles");
        }
        evicted
    }

    fn evict_least_recently_used(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().last_used)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(session_id) => {
                tracing::info!(session_id = %session_id, "Evicting least recently used chat handle");
                self.entries.remove(&session_id).is_some()
            }
            None => false,
        }
    }
}
