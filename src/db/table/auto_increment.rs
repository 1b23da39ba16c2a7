use std::sync::atomic::{AtomicI64, Ordering};

/// Per-table surrogate key counter. Keys are handed out with an atomic
/// increment, so concurrent inserts never see the same key, and they are
/// never handed back: rolling back an insert leaves a gap.
#[derive(Debug, Default)]
pub struct AutoIncrement {
    counter: AtomicI64,
}

impl AutoIncrement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Moves the counter past an explicitly supplied key.
    pub fn observe(&self, key: i64) {
        self.counter.fetch_max(key, Ordering::SeqCst);
    }

    /// The last key handed out or observed, 0 when none.
    pub fn current(&self) -> i64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn next_is_strictly_increasing_from_one() {
        let counter = AutoIncrement::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn observe_skips_past_explicit_keys_but_never_rewinds() {
        let counter = AutoIncrement::new();
        counter.observe(10);
        assert_eq!(counter.next(), 11);
        counter.observe(3);
        assert_eq!(counter.next(), 12);
    }

    #[test]
    fn concurrent_callers_never_share_a_key() {
        let counter = Arc::new(AutoIncrement::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || (0..1000).map(|_| counter.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(seen.insert(key), "key {} handed out twice", key);
            }
        }
        assert_eq!(seen.len(), 8000);
        assert_eq!(counter.current(), 8000);
    }
}
