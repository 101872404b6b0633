//! Submodule that implements [`Slots`].
//!

use std::{any::Any, fmt};

/// [`Slots`] struct is a fixed-length array of type-erased optional values.
///
/// # Usage
/// Usage of this struct is fairly advanced.
/// Most of the time you should use convenient statically typed API,
/// which is provided by [`TypeTable`](super::TypeTable) and [`EventDispatcher`](super::EventDispatcher).
///
/// Those structs compute slot indices from types at compile time and
/// operate on [`Slots`] by those indices.
/// Length of [`Slots`] is fixed at creation; indexing past it panics on writes
/// and returns `None` on reads.
///
pub struct Slots {
    /// Type-erased slots.
    ///
    slots: Box<[Option<Box<dyn Any>>]>,
}
impl Slots {
    /// Creates [`Slots`] with `len` empty slots.
    ///
    /// # Example
    /// ```rust
    /// # use ggsdl::dispatchcore::Slots;
    /// let slots: Slots = Slots::with_len(3);
    /// assert_eq!(slots.len(), 3);
    /// assert_eq!(slots.occupied(), 0);
    /// ```
    ///
    pub fn with_len(len: usize) -> Self {
        Slots {
            slots: (0..len).map(|_| None).collect(),
        }
    }

    /// Returns number of slots.
    ///
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    /// Returns whether there are no slots at all.
    ///
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    /// Returns number of occupied slots.
    ///
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
    /// Returns whether slot at `index` is occupied.
    ///
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Writes value to the slot at `index`, returning previous occupant.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    pub fn set(&mut self, index: usize, value: Box<dyn Any>) -> Option<Box<dyn Any>> {
        self.slots[index].replace(value)
    }
    /// Removes value from the slot at `index`.
    ///
    pub fn take(&mut self, index: usize) -> Option<Box<dyn Any>> {
        self.slots.get_mut(index)?.take()
    }
    /// Returns reference to the value at `index`.
    ///
    pub fn get(&self, index: usize) -> Option<&(dyn Any + 'static)> {
        self.slots.get(index)?.as_deref()
    }
    /// Returns mutable reference to the value at `index`.
    ///
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Any + 'static)> {
        self.slots.get_mut(index)?.as_deref_mut()
    }
    /// Returns reference to the value at `index` if it is of type `T`.
    ///
    pub fn downcast_ref<T: Any>(&self, index: usize) -> Option<&T> {
        self.get(index)?.downcast_ref::<T>()
    }
    /// Returns mutable reference to the value at `index` if it is of type `T`.
    ///
    pub fn downcast_mut<T: Any>(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)?.downcast_mut::<T>()
    }

    /// Empties every slot. Length is kept.
    ///
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}
impl fmt::Debug for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots")
            .field("len", &self.len())
            .field("occupied", &self.occupied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Slots;

    #[test]
    fn slots() {
        let mut slots: Slots = Slots::with_len(2);
        assert!(slots.set(0, Box::new(10_u32)).is_none());
        assert!(slots.is_occupied(0));
        assert!(!slots.is_occupied(1));
        assert!(!slots.is_occupied(2));
        assert_eq!(slots.occupied(), 1);

        assert_eq!(slots.downcast_ref::<u32>(0), Some(&10));
        assert!(slots.downcast_ref::<i32>(0).is_none());
        *slots.downcast_mut::<u32>(0).expect("Slot holds `u32`") += 1;

        let previous = slots.set(0, Box::new("text")).expect("Slot was occupied");
        assert_eq!(previous.downcast_ref::<u32>(), Some(&11));
        assert!(slots.get(5).is_none());
        assert!(slots.take(5).is_none());

        let _ = slots.set(1, Box::new(()));
        assert_eq!(slots.occupied(), 2);
        slots.clear();
        assert_eq!(slots.occupied(), 0);
        assert_eq!(slots.len(), 2);
    }
}
