//! Slot-stable storage for crates

use crate::crates::Crate;

/// Stable handle to a crate slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrateHandle(u32);

impl CrateHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Bounded crate storage
///
/// Removing a crate leaves a tombstone in its slot; slots are never compacted
/// or reused until the arena is cleared, so a handle keeps naming the same
/// crate for as long as the level is loaded.
#[derive(Debug, Clone)]
pub struct CrateArena {
    slots: Vec<Option<Crate>>,
    capacity: usize,
}

impl CrateArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a crate, or hand it back when every slot has been used
    pub fn insert(&mut self, item: Crate) -> Result<CrateHandle, Crate> {
        if self.slots.len() >= self.capacity {
            return Err(item);
        }
        let handle = CrateHandle(self.slots.len() as u32);
        self.slots.push(Some(item));
        Ok(handle)
    }

    /// Free a slot; freeing an empty slot does nothing
    pub fn remove(&mut self, handle: CrateHandle) -> Option<Crate> {
        self.slots.get_mut(handle.index()).and_then(Option::take)
    }

    pub fn get(&self, handle: CrateHandle) -> Option<&Crate> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: CrateHandle) -> Option<&mut Crate> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    /// Live crates in slot order
    pub fn iter(&self) -> impl Iterator<Item = (CrateHandle, &Crate)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (CrateHandle(i as u32), c)))
    }

    /// Handles of live crates in slot order
    pub fn handles(&self) -> Vec<CrateHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Number of live crates
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots handed out, live or freed
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every crate and start handing out slots from zero again
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
