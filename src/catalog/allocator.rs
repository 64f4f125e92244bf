//! Monotonic record id allocator
//!
//! Owned by a single [`super::Catalog`]; there is no process-wide counter.
//! Ids run from 1 to [`MAX_ID`]. `u64::MAX` is never issued so the counter
//! always has room for the id after the highest one loaded.

/// Highest id the allocator hands out and the loader accepts
pub const MAX_ID: u64 = u64::MAX - 1;

/// Hands out strictly increasing record ids, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocator for an empty catalog
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocator positioned after the highest id seen on load
    pub fn after(max_id: Option<u64>) -> Self {
        Self {
            next: max_id.map_or(1, |max| max.saturating_add(1)),
        }
    }

    /// Returns the id the next call to [`allocate`](Self::allocate) will return
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Returns the next id and advances, or `None` once past [`MAX_ID`]
    pub fn allocate(&mut self) -> Option<u64> {
        if self.next > MAX_ID {
            return None;
        }
        let id = self.next;
        self.next += 1;
        Some(id)
    }

    /// Moves the allocator forward so it stays past `max_id`. Never moves back.
    pub fn advance_past(&mut self, max_id: Option<u64>) {
        if let Some(max) = max_id {
            self.next = self.next.max(max.saturating_add(1));
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
