//! `ggsdl::ownership` module implements the ownership-polymorphic body that every native resource
//! of `ggsdl` is built from.
//!
//! # Model
//! Native libraries hand out raw pointers: some of them are returned by create/open functions and have
//! to be destroyed exactly once, some are returned by queries and must never be destroyed by the caller.
//! `ggsdl` covers both cases with one struct - [`BasicResource`] - which is parameterized by
//! 1. a resource kind ([`NativeResource`] implementor), which knows the native type and its destroy function;
//! 2. an ownership tag ([`Ownership`] implementor), which is either [`Owning`] or [`Borrowing`].
//!
//! Every operation of a resource is written once for `BasicResource<Kind, O>` and is available
//! for both variants; only the destructor (and a handful of owner-only extensions) differ.
//!
//! [`Owner`] is a unique, move-only value that releases its pointer when dropped.
//! [`Handle`] is a freely clonable reference that never releases anything.
//!
//! ## Handles and lifetimes
//! Handles that are obtained from owners ([`Owner::handle`](BasicResource::handle)) borrow their owner,
//! so the borrow checker does not allow an owner to be dropped while such handles are alive.
//! Handles that are built from raw pointers (`unsafe` [`Handle::from_raw`](BasicResource::from_raw)) are not checked -
//! the caller guarantees that the resource outlives them.
//!
//! ## Owners and parents
//! Some native resources are destroyed together with another one: textures die with their renderer,
//! fonts die when SDL_ttf quits, windows die when the video subsystem quits.
//! Owners of such resources carry the lifetime of their parent ([`Owning<'p>`](Owning)),
//! so dropping the parent first is rejected at compile time
//! and the native destroy function never sees a pointer that was already freed.
//! Owners without a parent use `'static`.
//!
//! ```rust, compile_fail
//! # use ggsdl::resourcecore::{pixels::PixelFormat, rendering::{Renderer, Texture}, surfaces::Surface};
//! let surface: Surface = Surface::new(4, 4, PixelFormat::RGBA32).expect("Memory should be available");
//! let renderer: Renderer = surface.create_renderer().expect("Software renderer is always available");
//! let texture: Texture = renderer
//!     .create_texture_from_surface(&surface)
//!     .expect("Texture should be created");
//! drop(renderer);
//! drop(texture);
//! ```
//!
//! ## Threads
//! Neither owners nor handles are `Send` or `Sync` - native libraries that `ggsdl` wraps impose
//! their own threading rules, and `ggsdl` does not synchronize anything.
//!

use crate::error::{Error, Result};
use log::debug;
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

/// `sealed` submodule prevents [`Ownership`] from being implemented outside of `ggsdl`.
///
mod sealed {
    /// Supertrait of [`Ownership`](super::Ownership).
    ///
    #[allow(unreachable_pub)]
    pub trait Sealed {}
}

/// [`Ownership`] trait is implemented by two zero-sized tags that select behaviour of [`BasicResource`].
///
/// This trait is sealed: the only implementors are [`Owning`] and [`Borrowing`].
///
pub trait Ownership: sealed::Sealed {
    /// Whether resources with this tag release their pointer when dropped.
    ///
    const OWNING: bool;
}
/// [`Owning`] tag marks resources that manage lifetime of their native pointer.
///
/// Lifetime `'p` is the lifetime of the parent that has to outlive the resource
/// (`'static` for resources that do not depend on anything).
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Owning<'p>(PhantomData<&'p ()>);
impl sealed::Sealed for Owning<'_> {}
impl Ownership for Owning<'_> {
    const OWNING: bool = true;
}
/// [`Borrowing`] tag marks resources that only reference their native pointer.
///
/// Lifetime `'a` is the lifetime of the borrow from which the handle was obtained
/// (it is unconstrained for handles that were built from raw pointers).
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Borrowing<'a>(PhantomData<&'a ()>);
impl sealed::Sealed for Borrowing<'_> {}
impl Ownership for Borrowing<'_> {
    const OWNING: bool = false;
}

/// [`NativeResource`] trait describes one kind of native resource (window, texture, font, ...).
///
/// Implementors are usually uninhabited enums - they are never instantiated and
/// exist only to be passed as a type parameter to [`BasicResource`].
///
/// # Example
/// ```rust
/// # use ggsdl::ownership::{NativeResource, Owner, Handle};
/// # use std::ptr::NonNull;
/// enum Buffer {}
/// impl NativeResource for Buffer {
///     type Raw = u8;
///     const NAME: &'static str = "buffer";
///
///     unsafe fn release(raw: NonNull<u8>) {
///         drop(unsafe { Box::from_raw(raw.as_ptr()) });
///     }
/// }
///
/// let owner: Owner<'static, Buffer> = unsafe { Owner::from_raw(Box::into_raw(Box::new(7))) }
///     .expect("Pointer is not null");
/// let handle: Handle<Buffer> = owner.handle();
/// assert_eq!(owner, handle);
/// ```
///
pub trait NativeResource: 'static {
    /// Native type that the resource points to.
    ///
    type Raw;
    /// Name of the resource kind (used in errors and logs).
    ///
    const NAME: &'static str;

    /// Destroys native resource.
    ///
    /// # Safety
    /// `raw` must be a live pointer that was produced by the matching create/open function
    /// and that was not released before.
    ///
    unsafe fn release(raw: NonNull<Self::Raw>);
}

/// [`BasicResource`] struct is a single body for both owning and non-owning wrappers of one native pointer.
///
/// You would rarely name this struct directly: use [`Owner`] and [`Handle`] type aliases
/// (or per-kind aliases such as `Window` and `WindowHandle`).
///
pub struct BasicResource<R: NativeResource, O: Ownership> {
    /// Wrapped pointer (`None` only for empty handles).
    ///
    raw: Option<NonNull<R::Raw>>,
    /// Marker that binds resource kind and ownership tag.
    ///
    marker: PhantomData<(fn() -> R, O)>,
}
/// Type alias for the owning variant of [`BasicResource`].
///
/// Owners are never [`Clone`]:
/// ```rust, compile_fail
/// # use ggsdl::resourcecore::{pixels::PixelFormat, surfaces::Surface};
/// let surface: Surface = Surface::new(4, 4, PixelFormat::RGBA32).expect("Memory should be available");
/// let copy: Surface = surface.clone();
/// ```
///
pub type Owner<'p, R> = BasicResource<R, Owning<'p>>;
/// Type alias for the non-owning variant of [`BasicResource`].
///
pub type Handle<'a, R> = BasicResource<R, Borrowing<'a>>;

impl<R: NativeResource, O: Ownership> BasicResource<R, O> {
    /// Wraps pointer without any checks.
    ///
    fn wrap(raw: Option<NonNull<R::Raw>>) -> Self {
        BasicResource {
            raw,
            marker: PhantomData,
        }
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns wrapped pointer or [`Error::NullResource`] for empty handles.
    ///
    pub(crate) fn get(&self) -> Result<*mut R::Raw> {
        self.raw
            .map(NonNull::as_ptr)
            .ok_or(Error::NullResource { kind: R::NAME })
    }

    /// Returns wrapped pointer (null for empty handles).
    ///
    /// Returned pointer stays owned by this resource (or by whoever owns the handle's referent).
    ///
    pub fn as_raw(&self) -> *mut R::Raw {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }
    /// Returns whether wrapped pointer is not null.
    ///
    /// Owners are always valid; handles might be empty.
    ///
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }
    /// Returns whether wrapped pointer is null.
    ///
    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }
    /// Returns whether this resource releases its pointer when dropped.
    ///
    pub fn is_owning(&self) -> bool {
        O::OWNING
    }
    /// Returns name of the resource kind.
    ///
    pub fn kind(&self) -> &'static str {
        R::NAME
    }
}

impl<'p, R: NativeResource> BasicResource<R, Owning<'p>> {
    /// Takes ownership of the native pointer.
    ///
    /// Returns [`Error::NullResource`] if `raw` is null - owners are never empty.
    ///
    /// # Safety
    /// `raw` must be a live pointer of the correct kind that nobody else is going to release.
    ///
    pub unsafe fn from_raw(raw: *mut R::Raw) -> Result<Self> {
        NonNull::new(raw)
            .map(|raw| Self::wrap(Some(raw)))
            .ok_or(Error::NullResource { kind: R::NAME })
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Takes ownership of the result of the native create/open function.
    ///
    /// Null pointer is turned into [`Error::Acquisition`] with the native library's last error.
    ///
    /// # Safety
    /// `raw` must be null or a freshly created pointer of the correct kind.
    ///
    pub(crate) unsafe fn acquire(raw: *mut R::Raw) -> Result<Self> {
        match NonNull::new(raw) {
            Some(raw) => {
                debug!("acquired `{kind}` at {raw:p}", kind = R::NAME);
                Ok(Self::wrap(Some(raw)))
            }
            None => Err(Error::acquisition(R::NAME)),
        }
    }

    /// Returns handle that references this owner's resource.
    ///
    /// Handle borrows the owner, so the owner cannot be dropped while the handle is alive.
    ///
    pub fn handle(&self) -> Handle<'_, R> {
        BasicResource::wrap(self.raw)
    }
    /// Gives up ownership and returns the native pointer.
    ///
    /// The resource is not released; the caller becomes responsible for it.
    ///
    pub fn into_raw(self) -> *mut R::Raw {
        let raw: *mut R::Raw = self.as_raw();
        mem::forget(self);
        raw
    }
}

impl<'a, R: NativeResource> BasicResource<R, Borrowing<'a>> {
    /// Returns empty handle.
    ///
    pub fn null() -> Self {
        Self::wrap(None)
    }
    /// Wraps the native pointer without taking ownership.
    ///
    /// Null pointer is accepted and produces an empty handle.
    ///
    /// # Safety
    /// `raw` must be null or a pointer of the correct kind that stays alive for `'a`.
    ///
    pub unsafe fn from_raw(raw: *mut R::Raw) -> Self {
        Self::wrap(NonNull::new(raw))
    }
}
impl<R: NativeResource> Clone for BasicResource<R, Borrowing<'_>> {
    fn clone(&self) -> Self {
        Self::wrap(self.raw)
    }
}
impl<R: NativeResource> Default for BasicResource<R, Borrowing<'_>> {
    fn default() -> Self {
        Self::null()
    }
}
impl<'a, R: NativeResource> From<&'a BasicResource<R, Owning<'_>>> for BasicResource<R, Borrowing<'a>> {
    fn from(owner: &'a BasicResource<R, Owning<'_>>) -> Self {
        owner.handle()
    }
}

impl<R: NativeResource, O: Ownership> Drop for BasicResource<R, O> {
    fn drop(&mut self) {
        if !O::OWNING {
            return;
        }
        if let Some(raw) = self.raw.take() {
            debug!("releasing `{kind}` at {raw:p}", kind = R::NAME);
            unsafe { R::release(raw) }
        }
    }
}

impl<R: NativeResource, O: Ownership, P: Ownership> PartialEq<BasicResource<R, P>>
    for BasicResource<R, O>
{
    fn eq(&self, other: &BasicResource<R, P>) -> bool {
        self.raw == other.raw
    }
}
impl<R: NativeResource, O: Ownership> Eq for BasicResource<R, O> {}
impl<R: NativeResource, O: Ownership> Hash for BasicResource<R, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
impl<R: NativeResource, O: Ownership> fmt::Debug for BasicResource<R, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(if O::OWNING { "Owner" } else { "Handle" })
            .field("kind", &R::NAME)
            .field("raw", &self.as_raw())
            .finish()
    }
}

/// `native_resource` macro declares resource kind together with its owner and handle aliases.
///
/// Arguments are: kind marker, native type, kind name, native destroy function,
/// owner alias and handle alias (each item may be preceded by its docs).
/// Owner alias that is followed by a lifetime (`Texture<'r>`) is tied to its parent;
/// owner alias without one is `'static`.
///
macro_rules! native_resource {
    (@owner $(#[$owner_meta:meta])* $owner:ident<$parent:lifetime>, $kind:ident) => {
        $(#[$owner_meta])*
        pub type $owner<$parent> = $crate::ownership::Owner<$parent, $kind>;
    };
    (@owner $(#[$owner_meta:meta])* $owner:ident, $kind:ident) => {
        $(#[$owner_meta])*
        pub type $owner = $crate::ownership::Owner<'static, $kind>;
    };
    (
        $(#[$kind_meta:meta])* $kind:ident => $raw:ty, $name:literal, $release:path;
        $(#[$owner_meta:meta])* $owner:ident $(<$parent:lifetime>)?;
        $(#[$handle_meta:meta])* $handle:ident;
    ) => {
        $(#[$kind_meta])*
        #[derive(Copy, Clone, Debug)]
        pub enum $kind {}
        impl $crate::ownership::NativeResource for $kind {
            type Raw = $raw;
            const NAME: &'static str = $name;

            unsafe fn release(raw: ::std::ptr::NonNull<$raw>) {
                unsafe { $release(raw.as_ptr()) }
            }
        }
        $crate::ownership::native_resource!(@owner $(#[$owner_meta])* $owner $(<$parent>)?, $kind);
        $(#[$handle_meta])*
        pub type $handle<'a> = $crate::ownership::Handle<'a, $kind>;
    };
}
pub(crate) use native_resource;

#[cfg(test)]
mod tests {
    use super::{BasicResource, Handle, NativeResource, Owner, Ownership, Owning};
    use crate::error::{Error, Result};
    use std::{
        cell::RefCell,
        ptr::{self, NonNull},
    };

    thread_local! {
        static RELEASED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    /// Resource kind that records releases instead of freeing memory
    /// (so that addresses are never reused inside one test).
    ///
    enum Counter {}
    impl NativeResource for Counter {
        type Raw = u64;
        const NAME: &'static str = "counter";

        unsafe fn release(raw: NonNull<u64>) {
            RELEASED.with(|released| released.borrow_mut().push(raw.as_ptr() as usize));
        }
    }
    impl<O: Ownership> BasicResource<Counter, O> {
        fn value(&self) -> Result<u64> {
            Ok(unsafe { *self.get()? })
        }
    }
    impl BasicResource<Counter, Owning<'_>> {
        fn successor(&self) -> Result<Owner<'static, Counter>> {
            let value: u64 = self.value()? + 1;
            unsafe { Owner::acquire(allocate(value)) }
        }
        fn child(&self) -> Result<Owner<'_, Counter>> {
            let value: u64 = self.value()?;
            unsafe { Owner::acquire(allocate(value * 10)) }
        }
    }

    fn allocate(value: u64) -> *mut u64 {
        Box::into_raw(Box::new(value))
    }
    fn releases(raw: *mut u64) -> usize {
        RELEASED.with(|released| {
            released
                .borrow()
                .iter()
                .filter(|&&address| address == raw as usize)
                .count()
        })
    }
    fn total_releases() -> usize {
        RELEASED.with(|released| released.borrow().len())
    }

    #[test]
    fn owner_releases_once() {
        let raw: *mut u64 = allocate(5);
        let owner: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        assert!(owner.is_valid());
        assert!(owner.is_owning());

        let handle: Handle<Counter> = owner.handle();
        assert!(handle.is_valid());
        assert!(!handle.is_owning());
        assert_eq!(handle.value().expect("Handle is valid"), 5);
        drop(handle);
        assert_eq!(releases(raw), 0);

        drop(owner);
        assert_eq!(releases(raw), 1);
    }

    #[test]
    fn null_pointers() {
        let result: Result<Owner<'static, Counter>> = unsafe { Owner::from_raw(ptr::null_mut()) };
        assert!(matches!(result, Err(Error::NullResource { kind: "counter" })));
        drop(result);
        assert_eq!(total_releases(), 0);

        let handle: Handle<Counter> = unsafe { Handle::from_raw(ptr::null_mut()) };
        assert!(!handle.is_valid());
        assert!(handle.is_null());
        assert!(matches!(
            handle.value(),
            Err(Error::NullResource { kind: "counter" })
        ));
        assert_eq!(handle, Handle::<Counter>::null());
        assert_eq!(handle, Handle::<Counter>::default());
        drop(handle);
        assert_eq!(total_releases(), 0);
    }

    #[test]
    fn moves_transfer_ownership() {
        let raw: *mut u64 = allocate(1);
        let first: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        let second: Owner<'static, Counter> = first;
        assert_eq!(releases(raw), 0);
        drop(second);
        assert_eq!(releases(raw), 1);

        let replaced: *mut u64 = allocate(2);
        let replacement: *mut u64 = allocate(3);
        let mut owner: Owner<'static, Counter> =
            unsafe { Owner::from_raw(replaced) }.expect("Pointer is not null");
        assert_eq!(owner.value().expect("Owner is valid"), 2);
        owner = unsafe { Owner::from_raw(replacement) }.expect("Pointer is not null");
        assert_eq!(releases(replaced), 1);
        assert_eq!(releases(replacement), 0);
        drop(owner);
        assert_eq!(releases(replacement), 1);
    }

    #[test]
    fn into_raw_gives_up_ownership() {
        let raw: *mut u64 = allocate(9);
        let owner: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        assert_eq!(owner.into_raw(), raw);
        assert_eq!(releases(raw), 0);

        let owner: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        drop(owner);
        assert_eq!(releases(raw), 1);
    }

    #[test]
    fn handle_copies_never_release() {
        let raw: *mut u64 = allocate(0);
        let owner: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        {
            let handle: Handle<Counter> = Handle::from(&owner);
            let copies: Vec<Handle<Counter>> = (0..10).map(|_| handle.clone()).collect();
            assert!(copies.iter().all(|copy| *copy == owner));
        }
        let unchecked: Handle<Counter> = unsafe { Handle::from_raw(raw) };
        drop(unchecked.clone());
        drop(unchecked);
        assert_eq!(releases(raw), 0);

        drop(owner);
        assert_eq!(releases(raw), 1);
    }

    #[test]
    fn owner_only_extensions() {
        let raw: *mut u64 = allocate(41);
        let owner: Owner<'static, Counter> = unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        let successor: Owner<'static, Counter> = owner.successor().expect("Allocation should not fail");
        assert_eq!(successor.value().expect("Owner is valid"), 42);
        assert_ne!(successor, owner);

        let successor_raw: *mut u64 = successor.as_raw();
        drop(successor);
        drop(owner);
        assert_eq!(releases(successor_raw), 1);
        assert_eq!(releases(raw), 1);
    }

    #[test]
    fn children_are_released_before_parents() {
        let raw: *mut u64 = allocate(3);
        let parent: Owner<'static, Counter> =
            unsafe { Owner::from_raw(raw) }.expect("Pointer is not null");
        let child: Owner<'_, Counter> = parent.child().expect("Allocation should not fail");
        assert_eq!(child.value().expect("Owner is valid"), 30);

        let child_raw: *mut u64 = child.as_raw();
        drop(child);
        assert_eq!(releases(child_raw), 1);
        assert_eq!(releases(raw), 0);
        drop(parent);
        assert_eq!(releases(raw), 1);
    }
}
