//! Coalescing cache of named integer variables awaiting broadcast.
//!
//! Every variable the application has ever set occupies one slot.
//! A slot is *dirty* while its value has not yet been selected for
//! transmission since it last changed. Capacity is fixed; when a new
//! name arrives and the cache is full, the slot at the insertion
//! cursor is overwritten unconditionally, so eviction follows
//! insertion order regardless of dirty state. A still-pending
//! variable can be lost this way.

use crate::config::VAR_NAME_MAX;
use heapless::{String, Vec};

/// One tracked variable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VarRecord {
    /// Unique key within the cache.
    pub name: String<VAR_NAME_MAX>,
    /// Last value passed to `set`.
    pub value: i32,
    /// True until the value is selected for transmission.
    pub dirty: bool,
}

/// A (name, value) pair handed to the scheduler when selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VarUpdate {
    pub name: String<VAR_NAME_MAX>,
    pub value: i32,
}

/// Copy `name` into a bounded string, truncating past `VAR_NAME_MAX`.
fn bounded_name(name: &str) -> String<VAR_NAME_MAX> {
    let mut n: String<VAR_NAME_MAX> = String::new();
    for c in name.chars() {
        if n.push(c).is_err() {
            break;
        }
    }
    n
}

/// Fixed-capacity variable cache with dirty tracking.
#[derive(Debug)]
pub struct MessageCache<const N: usize> {
    slots: Vec<VarRecord, N>,
    /// Next slot to use for a previously unseen name. Advances modulo
    /// capacity on every insertion, independent of dirty state.
    cursor: usize,
}

impl<const N: usize> MessageCache<N> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
        }
    }

    /// Record `name = value`.
    ///
    /// Returns `true` if this call marked a record dirty that was not
    /// dirty before (the caller uses that edge to kick the scheduler).
    /// Setting an unchanged value on a clean record is a no-op.
    pub fn set(&mut self, name: &str, value: i32) -> bool {
        let name = bounded_name(name);

        if let Some(rec) = self.slots.iter_mut().find(|r| r.name == name) {
            if rec.value == value {
                // Already recorded and either clean (delivered) or
                // dirty (queued) - nothing new to say.
                return false;
            }
            rec.value = value;
            if rec.dirty {
                return false;
            }
            rec.dirty = true;
            return true;
        }

        // Unseen name: claim the cursor slot, evicting whatever held it.
        let rec = VarRecord {
            name,
            value,
            dirty: true,
        };
        if self.slots.is_full() {
            self.slots[self.cursor] = rec;
        } else {
            let _ = self.slots.push(rec);
        }
        self.cursor = (self.cursor + 1) % N;
        true
    }

    /// Select the next variable to transmit.
    ///
    /// Scans slots in fixed positional order and returns the first
    /// dirty record, clearing its flag - selection commits to
    /// transmitting that value exactly once.
    pub fn next_dirty(&mut self) -> Option<VarUpdate> {
        let rec = self.slots.iter_mut().find(|r| r.dirty)?;
        rec.dirty = false;
        Some(VarUpdate {
            name: rec.name.clone(),
            value: rec.value,
        })
    }

    /// Whether `name` currently has an undelivered value.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|r| r.name.as_str() == name && r.dirty)
    }

    /// Whether `name` currently occupies a slot.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|r| r.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<const N: usize> Default for MessageCache<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_set_creates_dirty_record() {
        let mut cache: MessageCache<5> = MessageCache::new();
        assert!(cache.set("col", 7));
        assert!(cache.is_dirty("col"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn repeat_value_is_noop() {
        let mut cache: MessageCache<5> = MessageCache::new();
        assert!(cache.set("col", 7));
        cache.next_dirty();
        assert!(!cache.set("col", 7));
        assert!(!cache.is_dirty("col"));
    }

    #[test]
    fn changed_value_redirties_after_selection() {
        let mut cache: MessageCache<5> = MessageCache::new();
        cache.set("col", 7);
        let upd = cache.next_dirty().unwrap();
        assert_eq!(upd.value, 7);
        assert!(!cache.is_dirty("col"));

        assert!(cache.set("col", 8));
        assert!(cache.is_dirty("col"));
    }

    #[test]
    fn set_while_already_dirty_does_not_report_new_edge() {
        let mut cache: MessageCache<5> = MessageCache::new();
        assert!(cache.set("col", 1));
        // Still dirty - the value coalesces into the pending record.
        assert!(!cache.set("col", 2));
        let upd = cache.next_dirty().unwrap();
        assert_eq!(upd.value, 2);
    }

    #[test]
    fn dirty_readback_tracks_selection_not_set_count() {
        let mut cache: MessageCache<5> = MessageCache::new();
        cache.set("a", 1);
        cache.set("a", 2);
        cache.set("a", 3);
        assert!(cache.is_dirty("a"));
        assert_eq!(cache.next_dirty().unwrap().value, 3);
        assert!(!cache.is_dirty("a"));
        assert!(cache.next_dirty().is_none());
    }

    #[test]
    fn selection_scans_in_slot_order() {
        let mut cache: MessageCache<5> = MessageCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "a");
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "b");

        // Redirty "a": its lower slot index wins over still-dirty "c".
        cache.set("a", 10);
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "a");
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "c");
        assert!(cache.next_dirty().is_none());
    }

    #[test]
    fn eviction_is_fifo_by_insertion_order() {
        let mut cache: MessageCache<3> = MessageCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        // Touch "a" so it is the most recently dirtied - it must still
        // be the one evicted, because eviction follows insertion order.
        cache.next_dirty();
        cache.next_dirty();
        cache.next_dirty();
        cache.set("a", 100);

        cache.set("d", 4);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
        assert!(cache.contains("d"));

        cache.set("e", 5);
        assert!(!cache.contains("b"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn eviction_can_drop_a_pending_variable() {
        let mut cache: MessageCache<2> = MessageCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        // "a" never selected; a third name overwrites its slot.
        cache.set("c", 3);
        assert!(!cache.contains("a"));
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "c");
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "b");
    }

    #[test]
    fn evicted_slot_starts_a_fresh_record() {
        let mut cache: MessageCache<2> = MessageCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.next_dirty();
        cache.next_dirty();

        cache.set("c", 3);
        // "c" landed in slot 0 (where "a" was) and is dirty.
        assert_eq!(cache.next_dirty().unwrap().name.as_str(), "c");
        // Re-adding "a" is a brand new record, evicting "b".
        assert!(cache.set("a", 1));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn overlong_name_is_truncated_to_cache_key_limit() {
        let mut cache: MessageCache<5> = MessageCache::new();
        let long = "a_very_long_variable_name_indeed";
        cache.set(long, 1);
        assert!(!cache.contains(long));
        assert!(cache.contains(&long[..VAR_NAME_MAX]));
        // A second set through the long name finds the same record.
        assert!(!cache.set(long, 1));
    }
}
