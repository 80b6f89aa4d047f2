//! Generational arena owning graph records
//!
//! The arena is the single owner of every node, edge and group record.
//! Cross references between records are plain keys resolved through the
//! arena, so records never own each other. Freed slots are reused, and each
//! reuse bumps the slot generation so stale keys stop resolving.

use super::types::{EdgeId, GroupId, NodeId};
use std::marker::PhantomData;

/// Key types that can address an arena slot
pub(crate) trait ArenaKey: Copy {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn slot(&self) -> u32;
    fn slot_generation(&self) -> u32;
}

impl ArenaKey for NodeId {
    fn from_parts(index: u32, generation: u32) -> Self {
        NodeId::new(index, generation)
    }

    fn slot(&self) -> u32 {
        self.index()
    }

    fn slot_generation(&self) -> u32 {
        self.generation()
    }
}

impl ArenaKey for EdgeId {
    fn from_parts(index: u32, generation: u32) -> Self {
        EdgeId::new(index, generation)
    }

    fn slot(&self) -> u32 {
        self.index()
    }

    fn slot_generation(&self) -> u32 {
        self.generation()
    }
}

impl ArenaKey for GroupId {
    fn from_parts(index: u32, generation: u32) -> Self {
        GroupId::new(index, generation)
    }

    fn slot(&self) -> u32 {
        self.index()
    }

    fn slot_generation(&self) -> u32 {
        self.generation()
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Slot<T>>,

    /// Vacant slot indices available for reuse
    free: Vec<u32>,

    len: usize,

    _key: PhantomData<K>,
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Store a value, handing it back when the slot space is exhausted
    pub fn try_insert(&mut self, value: T) -> Result<K, T> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.len += 1;
            return Ok(K::from_parts(index, slot.generation));
        }

        let index = match u32::try_from(self.slots.len()) {
            Ok(index) => index,
            Err(_) => return Err(value),
        };
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.len += 1;
        Ok(K::from_parts(index, 0))
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.slots
            .get(key.slot() as usize)
            .filter(|slot| slot.generation == key.slot_generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots
            .get_mut(key.slot() as usize)
            .filter(|slot| slot.generation == key.slot_generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: K) -> Option<T> {
        let index = key.slot();
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != key.slot_generation() {
            return None;
        }
        let value = slot.value.take()?;

        // A slot whose generation would wrap is retired instead of reused
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(index);
        }
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (K::from_parts(index as u32, slot.generation), value))
        })
    }
}
