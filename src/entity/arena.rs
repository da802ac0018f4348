//! Generational arena backing the object store
//!
//! Slots are reused after removal, but each reuse bumps the slot generation,
//! so an `ObjectId` minted before the removal no longer resolves.

use crate::core::types::ObjectId;

struct Entry<T> {
    generation: u32,
    item: Option<T>,
}

pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free_slots: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_slots: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, item: T) -> ObjectId {
        self.len += 1;
        match self.free_slots.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.generation = entry.generation.wrapping_add(1);
                entry.item = Some(item);
                ObjectId::new(index, entry.generation)
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    item: Some(item),
                });
                ObjectId::new(index, 0)
            }
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        let entry = self.entries.get(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.item.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.item.as_mut()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        let item = entry.item.take()?;
        self.free_slots.push(id.index);
        self.len -= 1;
        Some(item)
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry
                .item
                .as_ref()
                .map(|item| (ObjectId::new(index as u32, entry.generation), item))
        })
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
