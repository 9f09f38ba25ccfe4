//! Identity allocation for actions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::atomic::{AtomicU64, Ordering};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static GLOBAL_ALLOCATOR: IdAllocator = IdAllocator::new();

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A source of strictly increasing action ids.
///
/// Ids start at 1 and are never reused. The allocator can be shared between
/// threads, each id is only handed out once.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl IdAllocator {
    /// The first id handed out by a new allocator.
    pub const FIRST_ID: u64 = 1;

    /// Create a new allocator starting at [`IdAllocator::FIRST_ID`].
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(Self::FIRST_ID),
        }
    }

    /// The process-wide allocator, used by actions built outside of a
    /// [`Program`](super::Program).
    pub fn global() -> &'static IdAllocator {
        &GLOBAL_ALLOCATOR
    }

    /// Take the next id.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id that will be returned by the next call to
    /// [`IdAllocator::next_id`], without taking it.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequence() {
        let ids = IdAllocator::new();

        assert_eq!(ids.peek(), 1);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.peek(), 3);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_threads() {
        const NUM_THREADS: usize = 4;
        const IDS_PER_THREAD: usize = 1000;

        let ids = Arc::new(IdAllocator::default());

        let handles: Vec<_> = (0..NUM_THREADS)
            .map(|_| {
                let ids = ids.clone();
                thread::spawn(move || {
                    let taken: Vec<u64> = (0..IDS_PER_THREAD).map(|_| ids.next_id()).collect();

                    // Increasing within each thread
                    assert!(taken.windows(2).all(|w| w[0] < w[1]));
                    taken
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();

        assert_eq!(all.len(), NUM_THREADS * IDS_PER_THREAD);
        assert_eq!(all[0], 1);
        assert_eq!(*all.last().unwrap(), (NUM_THREADS * IDS_PER_THREAD) as u64);
    }
}
