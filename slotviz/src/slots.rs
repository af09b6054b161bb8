//! Fixed-capacity slot array backing the visualized table.
//!
//! A write always replaces the previous content of the slot: there is no chaining, no probing
//! and no check whether the same key already lives elsewhere.
use slotviz_core::{SlotVizError, SlotVizResult};
use std::num::NonZeroUsize;

/// A key/value pair held by a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One addressable cell of the table.
pub type Slot = Option<Entry>;

/// Fixed-capacity ordered sequence of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore {
    slots: Box<[Slot]>,
}

impl SlotStore {
    /// Create a store with `capacity` empty slots.
    ///
    /// # Errors
    ///
    /// - [`SlotVizError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> SlotVizResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(SlotVizError::InvalidCapacity)?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a store with `capacity` empty slots.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            slots: vec![None; capacity.get()].into_boxed_slice(),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Read the slot at `index`.
    pub fn read(&self, index: usize) -> SlotVizResult<&Slot> {
        self.slots.get(index).ok_or(SlotVizError::IndexOutOfRange {
            index,
            capacity: self.capacity(),
        })
    }

    /// Iterate over `(index, slot)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().enumerate()
    }

    /// All slots in index order.
    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Overwrite the slot at `index` with `(key, value)`, returning what was there before.
    pub(crate) fn insert(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> SlotVizResult<Slot> {
        let slot = self.slot_mut(index)?;
        Ok(slot.replace(Entry::new(key, value)))
    }

    /// Empty the slot at `index` whatever it holds, returning what was there before.
    pub(crate) fn remove(&mut self, index: usize) -> SlotVizResult<Slot> {
        let slot = self.slot_mut(index)?;
        Ok(slot.take())
    }

    /// Empty every slot. Capacity is unchanged.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(None);
    }

    fn slot_mut(&mut self, index: usize) -> SlotVizResult<&mut Slot> {
        let capacity = self.capacity();
        self.slots
            .get_mut(index)
            .ok_or(SlotVizError::IndexOutOfRange { index, capacity })
    }
}
