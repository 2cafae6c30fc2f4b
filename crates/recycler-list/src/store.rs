//! Ordered store of materialized handles.
//!
//! Handles live in a `SlotMap`; `order` lists their keys top to bottom and
//! `by_id` maps record ids to keys. Pushing at either end is O(1), which is
//! what filling and scrolling do almost exclusively.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;

use recycler_core::ItemId;
use slotmap::{SlotMap, new_key_type};

use crate::ItemHandle;

new_key_type! {
    /// Stable key of a materialized handle. Stale keys (after eviction) simply
    /// stop resolving.
    pub struct HandleKey;
}

pub struct ItemStore<V> {
    slots: SlotMap<HandleKey, ItemHandle<V>>,
    order: VecDeque<HandleKey>,
    by_id: HashMap<ItemId, HandleKey>,
}

impl<V> Default for ItemStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ItemStore<V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: VecDeque::new(),
            by_id: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn key_of(&self, id: ItemId) -> Option<HandleKey> {
        self.by_id.get(&id).copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemHandle<V>> {
        self.key_of(id).and_then(|k| self.slots.get(k))
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemHandle<V>> {
        let key = self.key_of(id)?;
        self.slots.get_mut(key)
    }

    /// Position of `id` counted from the top.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        let key = self.key_of(id)?;
        self.order.iter().position(|&k| k == key)
    }

    pub fn at(&self, index: usize) -> Option<&ItemHandle<V>> {
        self.order.get(index).map(|&k| &self.slots[k])
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut ItemHandle<V>> {
        let key = *self.order.get(index)?;
        self.slots.get_mut(key)
    }

    pub fn first(&self) -> Option<&ItemHandle<V>> {
        self.at(0)
    }

    pub fn last(&self) -> Option<&ItemHandle<V>> {
        self.order.back().map(|&k| &self.slots[k])
    }

    /// Handles top to bottom.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ItemHandle<V>> + '_ {
        self.order.iter().map(|&k| &self.slots[k])
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ItemHandle<V>> + '_ {
        // Every handle is reachable once through `slots`; order does not matter here.
        self.slots.values_mut()
    }

    pub(crate) fn shift_range(&mut self, range: Range<usize>, dy: f32) {
        if dy == 0.0 {
            return;
        }
        for i in range {
            let key = self.order[i];
            self.slots[key].shift(dy);
        }
    }

    /// Inserts at `index` (0 = top). Materializing the same id twice is a bug.
    pub(crate) fn insert(&mut self, index: usize, handle: ItemHandle<V>) {
        let id = handle.id();
        assert!(
            !self.by_id.contains_key(&id),
            "item {id} is already materialized"
        );
        let key = self.slots.insert(handle);
        self.by_id.insert(id, key);
        if index == 0 {
            self.order.push_front(key);
        } else if index >= self.order.len() {
            self.order.push_back(key);
        } else {
            self.order.insert(index, key);
        }
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<ItemHandle<V>> {
        let key = self.order.remove(index)?;
        let handle = self.slots.remove(key)?;
        self.by_id.remove(&handle.id());
        Some(handle)
    }
}
