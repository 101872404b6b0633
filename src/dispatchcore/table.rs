//! Submodule that implements [`TypeTable`].
//!

use super::{
    slots::Slots,
    typelist::{Position, TypeList},
};
use std::{fmt, marker::PhantomData};

/// [`TypeTable`] struct is a cache that holds at most one value for each type of the type list `L`.
///
/// Slot of every type is found by an index that is computed at compile time
/// (see [`typelist`](super::typelist) submodule), so no hashing or runtime type identification
/// happens on lookups. The set of keys is closed: only types from `L` can be stored.
///
/// # Example
/// ```rust
/// # use ggsdl::dispatchcore::TypeTable;
/// struct Title(String);
/// struct Score(u32);
///
/// let mut table: TypeTable<(Title, Score)> = TypeTable::new();
/// assert!(table.store(Score(10)).is_none());
/// assert_eq!(table.store(Score(20)).map(|Score(score)| score), Some(10));
/// assert_eq!(table.get::<Score, _>().map(|score| score.0), Some(20));
/// assert!(!table.contains::<Title, _>());
/// assert_eq!(table.count(), 1);
/// ```
///
pub struct TypeTable<L: TypeList> {
    /// Slots of the table.
    ///
    slots: Slots,
    /// Type list marker.
    ///
    list: PhantomData<fn() -> L>,
}
impl<L: TypeList> TypeTable<L> {
    /// Creates empty [`TypeTable`] with one slot for each type of `L`.
    ///
    pub fn new() -> Self {
        TypeTable {
            slots: Slots::with_len(L::LEN),
            list: PhantomData,
        }
    }

    /// Stores value in the slot of its type, returning previous value if present.
    ///
    pub fn store<K: 'static, I>(&mut self, value: K) -> Option<K>
    where
        L: Position<K, I>,
    {
        self.slots
            .set(<L as Position<K, I>>::INDEX, Box::new(value))
            .and_then(|previous| previous.downcast::<K>().ok())
            .map(|previous| *previous)
    }
    /// Removes value of type `K` from the table and returns it if present.
    ///
    pub fn take<K: 'static, I>(&mut self) -> Option<K>
    where
        L: Position<K, I>,
    {
        self.slots
            .take(<L as Position<K, I>>::INDEX)
            .and_then(|value| value.downcast::<K>().ok())
            .map(|value| *value)
    }
    /// Returns reference to value of type `K` if present.
    ///
    pub fn get<K: 'static, I>(&self) -> Option<&K>
    where
        L: Position<K, I>,
    {
        self.slots.downcast_ref::<K>(<L as Position<K, I>>::INDEX)
    }
    /// Returns mutable reference to value of type `K` if present.
    ///
    pub fn get_mut<K: 'static, I>(&mut self) -> Option<&mut K>
    where
        L: Position<K, I>,
    {
        self.slots.downcast_mut::<K>(<L as Position<K, I>>::INDEX)
    }
    /// Returns reference to value of type `K`, storing result of `f` first if the slot is empty.
    ///
    pub fn get_or_store_with<K: 'static, I>(&mut self, f: impl FnOnce() -> K) -> &mut K
    where
        L: Position<K, I>,
    {
        let index: usize = <L as Position<K, I>>::INDEX;
        if !self.slots.is_occupied(index) {
            let _ = self.slots.set(index, Box::new(f()));
        }
        self.slots
            .downcast_mut::<K>(index)
            .expect("Slot of `K` is occupied by value of type `K`")
    }
    /// Returns whether value of type `K` is stored.
    ///
    pub fn contains<K: 'static, I>(&self) -> bool
    where
        L: Position<K, I>,
    {
        self.slots.is_occupied(<L as Position<K, I>>::INDEX)
    }

    /// Returns number of stored values.
    ///
    pub fn count(&self) -> usize {
        self.slots.occupied()
    }
    /// Returns number of slots (length of the type list).
    ///
    pub fn capacity(&self) -> usize {
        L::LEN
    }
    /// Removes every stored value.
    ///
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}
impl<L: TypeList> Default for TypeTable<L> {
    fn default() -> Self {
        TypeTable::new()
    }
}
impl<L: TypeList> fmt::Debug for TypeTable<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTable")
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeTable;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Small(u8);
    #[derive(Debug, PartialEq)]
    struct Name(&'static str);
    #[derive(Debug, PartialEq)]
    struct Shared(Rc<()>);

    #[test]
    fn store_and_lookup() {
        let mut table: TypeTable<(Small, Name, Shared)> = TypeTable::new();
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.count(), 0);

        assert!(table.store(Name("first")).is_none());
        assert_eq!(table.store(Name("second")), Some(Name("first")));
        assert_eq!(table.get::<Name, _>(), Some(&Name("second")));
        assert!(table.get::<Small, _>().is_none());

        table.get_or_store_with::<Small, _>(|| Small(1)).0 += 1;
        table.get_or_store_with::<Small, _>(|| Small(100)).0 += 1;
        assert_eq!(table.get::<Small, _>(), Some(&Small(3)));
        assert_eq!(table.count(), 2);

        assert_eq!(table.take::<Small, _>(), Some(Small(3)));
        assert!(!table.contains::<Small, _>());
        assert!(table.contains::<Name, _>());
    }

    #[test]
    fn reset_drops_values() {
        let counter: Rc<()> = Rc::new(());
        let mut table: TypeTable<(Small, Shared)> = TypeTable::default();
        let _ = table.store(Shared(Rc::clone(&counter)));
        let _ = table.store(Small(0));
        assert_eq!(Rc::strong_count(&counter), 2);

        if let Some(shared) = table.get_mut::<Shared, _>() {
            shared.0 = Rc::new(());
        }
        assert_eq!(Rc::strong_count(&counter), 1);
        let _ = table.store(Shared(Rc::clone(&counter)));

        table.reset();
        assert_eq!(table.count(), 0);
        assert_eq!(Rc::strong_count(&counter), 1);
    }
}
