use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Tracks which sessions have a requirements submission in flight, so a
/// double-clicked submit from the same session is turned away.
#[derive(Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `session_key`. Returns `None` if it is already taken.
    /// The slot is released when the returned permit is dropped.
    pub fn try_enter(&self, session_key: &str) -> Option<SubmissionPermit> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(session_key.to_string()) {
            return None;
        }
        Some(SubmissionPermit {
            in_flight: Arc::clone(&self.in_flight),
            key: session_key.to_string(),
        })
    }

    pub fn is_busy(&self, session_key: &str) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(session_key)
    }
}

pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
    }
}
