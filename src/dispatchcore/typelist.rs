//! `dispatchcore::typelist` submodule defines traits that turn tuples of types into closed type lists.
//!
//! This submodule leverages Rust type system a lot.
//! The idea is that for a tuple `(A, B, C)` position of every element is known to the compiler,
//! so [`Position`] trait is implemented for each of them with the index as an associated constant.
//! When `ggsdl` needs an index of type `B`, it asks for `<(A, B, C) as Position<B, _>>::INDEX`
//! and lets trait selection find the only implementation that matches.
//!
//! Consequences of that approach:
//! 1. Looking up a type that is not in the list is a compile error.
//! 2. Looking up a type that is listed twice is a compile error (inference is ambiguous).
//! 3. Lists are limited to 16 types.
//!

use seq_macro::seq;

/// [`TypeList`] trait is implemented for tuples of up to 16 `'static` types.
///
pub trait TypeList: 'static {
    /// Number of types in the list.
    ///
    const LEN: usize;
}
/// `impl_type_list` macro implements [`TypeList`] trait for tuples.
///
macro_rules! impl_type_list {
    ($size:expr => $($t:ident),* $(,)?) => {
        impl<$($t: 'static,)*> TypeList for ($($t,)*) {
            const LEN: usize = $size;
        }
    };
}
seq!(SIZE in 0..=16 {
    #(seq!(N in 0..SIZE { impl_type_list!(SIZE => #(T~N,)*); });)*
});

/// [`Index`] struct is a type-level index that disambiguates [`Position`] implementations.
///
/// It is never constructed by `ggsdl`; it only appears as a type parameter that is inferred
/// (usually written as `_` in turbofish).
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Index<const N: usize>;

/// [`Position`] trait is implemented by type lists which contain `T` at position `I`.
///
/// # Example
/// ```rust
/// # use ggsdl::dispatchcore::typelist::{Position, TypeList};
/// struct A;
/// struct B;
/// struct C;
///
/// fn index_of<L: Position<T, I>, T, I>() -> usize {
///     L::INDEX
/// }
///
/// assert_eq!(<(A, B, C) as TypeList>::LEN, 3);
/// assert_eq!(index_of::<(A, B, C), B, _>(), 1);
/// assert_eq!(index_of::<(A, B, C), C, _>(), 2);
/// ```
///
/// Type that is not in the list has no position:
/// ```rust, compile_fail
/// # use ggsdl::dispatchcore::typelist::Position;
/// struct A;
/// struct B;
/// struct Missing;
///
/// fn index_of<L: Position<T, I>, T, I>() -> usize {
///     L::INDEX
/// }
///
/// let _ = index_of::<(A, B), Missing, _>();
/// ```
///
pub trait Position<T, I>: TypeList {
    /// Position of `T` in the list.
    ///
    const INDEX: usize;
}
/// `impl_position` macro implements [`Position`] trait for one element of a tuple.
///
macro_rules! impl_position {
    ($index:tt, $selected:ident => $($t:ident),* $(,)?) => {
        impl<$($t: 'static,)*> Position<$selected, Index<$index>> for ($($t,)*) {
            const INDEX: usize = $index;
        }
    };
}
seq!(SIZE in 1..=16 {
    #(
        seq!(P in 0..SIZE {
            #(
                seq!(N in 0..SIZE { impl_position!(P, T~P => #(T~N,)*); });
            )*
        });
    )*
});

#[cfg(test)]
mod tests {
    use super::{Position, TypeList};

    struct First;
    struct Second;
    struct Third;

    fn index_of<L: Position<T, I>, T, I>() -> usize {
        L::INDEX
    }

    #[test]
    fn lengths() {
        assert_eq!(<() as TypeList>::LEN, 0);
        assert_eq!(<(First,) as TypeList>::LEN, 1);
        assert_eq!(<(First, Second, Third) as TypeList>::LEN, 3);
        assert_eq!(
            <(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool, (), String, First, Second) as TypeList>::LEN,
            16
        );
    }

    #[test]
    fn positions() {
        assert_eq!(index_of::<(First,), First, _>(), 0);
        assert_eq!(index_of::<(First, Second, Third), First, _>(), 0);
        assert_eq!(index_of::<(First, Second, Third), Second, _>(), 1);
        assert_eq!(index_of::<(First, Second, Third), Third, _>(), 2);
        assert_eq!(index_of::<(Third, Second, First), First, _>(), 2);
        assert_eq!(
            index_of::<(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool, (), String, First, Second), Second, _>(),
            15
        );
    }
}
