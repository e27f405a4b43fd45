use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::InstanceId;

/// Hands out instance ids. Ids are never handed out twice; once the range
/// is used up `allocate` returns `None` instead of wrapping.
#[derive(Debug)]
pub struct InstanceIdAllocator {
    next: AtomicU32,
}

impl InstanceIdAllocator {
    /// Start allocating at `first`.
    pub const fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    pub fn allocate(&self) -> Option<InstanceId> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .ok()
            .map(InstanceId)
    }
}

impl Default for InstanceIdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn allocates_sequentially_from_one() {
        let ids = InstanceIdAllocator::default();
        assert_eq!(ids.allocate(), Some(InstanceId(1)));
        assert_eq!(ids.allocate(), Some(InstanceId(2)));
    }

    #[test]
    fn starting_at_custom_value() {
        let ids = InstanceIdAllocator::starting_at(100);
        assert_eq!(ids.allocate(), Some(InstanceId(100)));
    }

    #[test]
    fn exhausted_range_never_wraps() {
        let ids = InstanceIdAllocator::starting_at(u32::MAX - 1);
        assert_eq!(ids.allocate(), Some(InstanceId(u32::MAX - 1)));
        assert_eq!(ids.allocate(), None);
        assert_eq!(ids.allocate(), None);
    }

    #[test]
    fn concurrent_allocation_is_unique() {
        let ids = Arc::new(InstanceIdAllocator::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.allocate().unwrap()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
