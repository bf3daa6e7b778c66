use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::session::models::ChatSession;

pub type SessionPool = Arc<Mutex<SessionStore>>;

/// Process-local session registry. Lost on restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, ChatSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_pool(self) -> SessionPool {
        Arc::new(Mutex::new(self))
    }

    pub fn create(&mut self) -> &ChatSession {
        let session = ChatSession::new();
        let id = session.id();
        self.sessions.entry(id).or_insert(session)
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ChatSession> {
        self.sessions.get_mut(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Newest first.
    pub fn list(&self) -> Vec<&ChatSession> {
        let mut sessions: Vec<&ChatSession> = self.sessions.values().collect();
        sessions.sort_by_key(|s| std::cmp::Reverse(s.created_at()));
        sessions
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
