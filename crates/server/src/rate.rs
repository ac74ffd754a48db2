use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_PER_WINDOW: usize = 5;
const WINDOW: Duration = Duration::from_secs(60);

/// Sliding-window limiter for comment submission, keyed by client
/// address. State is process-local, like the rest of the in-memory
/// plumbing.
#[derive(Clone)]
pub struct RateGuard {
    hits: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
    max_per_window: usize,
    window: Duration,
}

impl RateGuard {
    pub fn new() -> Self {
        Self::with_limit(MAX_PER_WINDOW, WINDOW)
    }

    pub fn with_limit(max_per_window: usize, window: Duration) -> Self {
        Self {
            hits: Arc::new(Mutex::new(HashMap::new())),
            max_per_window,
            window,
        }
    }

    /// Records one hit for `key` and reports whether it was within the
    /// limit.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut map = self.hits.lock().expect("rate guard lock poisoned");
        let hits = map.entry(key.to_string()).or_default();
        hits.retain(|t| now.duration_since(*t) < self.window);
        if hits.len() >= self.max_per_window {
            return false;
        }
        hits.push(now);
        true
    }
}

impl Default for RateGuard {
    fn default() -> Self {
        Self::new()
    }
}
