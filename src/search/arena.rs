use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena is full after {0} slots")]
    Full(u32),
}

/// Append-only storage for the nodes of one search tree.
/// Values are never removed; the whole arena is dropped at once.
pub struct Arena<T> {
    data: Vec<T>,
    max_slots: u32,
}

/// A typed handle to a value stored in an [`Arena`].
pub struct Index<T> {
    data: NonZeroU32,
    phantom: PhantomData<T>,
}

impl<T> Index<T> {
    fn new(data: NonZeroU32) -> Self {
        Self {
            data,
            phantom: PhantomData,
        }
    }

    fn slot(self) -> usize {
        self.data.get() as usize - 1
    }
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Eq for Index<T> {}

impl<T> Hash for Index<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state)
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({})", self.data)
    }
}

impl<T> Arena<T> {
    /// An arena that holds at most `max_slots` values.
    pub fn new(max_slots: u32) -> Self {
        Self {
            data: Vec::with_capacity(max_slots.min(1024) as usize),
            max_slots: max_slots.min(u32::MAX - 1),
        }
    }

    pub fn get(&self, index: Index<T>) -> &T {
        &self.data[index.slot()]
    }

    pub fn get_mut(&mut self, index: Index<T>) -> &mut T {
        &mut self.data[index.slot()]
    }

    pub fn add(&mut self, value: T) -> Result<Index<T>, ArenaError> {
        let slots_used = self.slots_used();
        if slots_used >= self.max_slots {
            return Err(ArenaError::Full(slots_used));
        }
        // Slot numbers start at 1, so they always fit in a NonZeroU32
        let raw = NonZeroU32::new(slots_used + 1).ok_or(ArenaError::Full(slots_used))?;
        self.data.push(value);
        Ok(Index::new(raw))
    }

    pub fn slots_used(&self) -> u32 {
        self.data.len() as u32
    }
}
