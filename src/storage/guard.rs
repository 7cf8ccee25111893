use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

static MUTATION_LOCK: Mutex<()> = Mutex::new(());

/// Process-wide write serialization.
///
/// At most one guard exists at a time, regardless of which database or
/// entities the holder writes. Readers never take it.
#[must_use = "the mutation guard releases the lock when dropped"]
pub(crate) struct MutationGuard {
    operation: &'static str,
    _lock: MutexGuard<'static, ()>,
}

impl MutationGuard {
    /// Blocks until no other mutation is in flight.
    pub(crate) fn acquire(operation: &'static str) -> Self {
        // Poisoning is ignored: the lock guards no data.
        let lock = MUTATION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(operation, "mutation guard acquired");
        Self {
            operation,
            _lock: lock,
        }
    }
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        debug!(operation = self.operation, "mutation guard released");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn guards_never_overlap() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let in_flight = Arc::clone(&in_flight);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    for _ in 0..5 {
                        let _guard = MutationGuard::acquire("test");
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(1));
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn survives_poisoned_lock() {
        let _ = thread::spawn(|| {
            let _guard = MutationGuard::acquire("panicking");
            panic!("writer failed");
        })
        .join();

        let _guard = MutationGuard::acquire("after panic");
    }
}
