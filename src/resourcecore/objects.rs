//! `resourcecore::objects` submodule implements dynamically loaded libraries: [`SharedObject`] owner and [`SharedObjectHandle`].
//!

use crate::{
    error::{Error, Result},
    ffi::{c_path, c_string},
    ownership::{native_resource, BasicResource, Owner, Ownership},
};
use sdl2::sys::{SDL_LoadFunction, SDL_LoadObject, SDL_UnloadObject};
use std::{ffi::c_void, path::Path, ptr::NonNull};

native_resource! {
    /// [`SharedObjectKind`] marks shared objects that SDL loaded.
    ///
    /// Native pointer is opaque.
    ///
    SharedObjectKind => c_void, "shared object", SDL_UnloadObject;
    /// [`SharedObject`] owns a loaded shared object and unloads it when dropped.
    ///
    /// # Drop order
    /// Symbols that were looked up become dangling once the object is unloaded.
    ///
    SharedObject;
    /// [`SharedObjectHandle`] references a shared object without owning it.
    ///
    SharedObjectHandle;
}

impl SharedObject {
    /// Loads shared object (`.so`, `.dll`, `.dylib`) by path or by name.
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::resourcecore::objects::SharedObject;
    /// let library: SharedObject = SharedObject::load("libm.so.6").expect("Library should exist");
    /// let cos: extern "C" fn(f64) -> f64 = unsafe {
    ///     std::mem::transmute(library.symbol("cos").expect("Symbol should exist").as_ptr())
    /// };
    /// assert_eq!(cos(0.0), 1.0);
    /// ```
    ///
    pub fn load(path: impl AsRef<Path>) -> Result<SharedObject> {
        let path = c_path(path.as_ref())?;
        unsafe { Owner::acquire(SDL_LoadObject(path.as_ptr())) }
    }
}
impl<O: Ownership> BasicResource<SharedObjectKind, O> {
    /// Looks up address of the symbol.
    ///
    /// Address is valid while the object stays loaded; casting it to the right
    /// function type is the caller's responsibility.
    ///
    pub fn symbol(&self, name: &str) -> Result<NonNull<c_void>> {
        let object: *mut c_void = self.get()?;
        let symbol = c_string(name)?;
        NonNull::new(unsafe { SDL_LoadFunction(object, symbol.as_ptr()) })
            .ok_or_else(|| Error::native("SDL_LoadFunction"))
    }
}

#[cfg(test)]
mod tests {
    use super::{SharedObject, SharedObjectHandle};
    use crate::error::Error;

    #[test]
    fn missing_library() {
        assert!(matches!(
            SharedObject::load("ggsdl-library-that-does-not-exist.so"),
            Err(Error::Acquisition {
                kind: "shared object",
                ..
            })
        ));
        assert!(matches!(
            SharedObjectHandle::null().symbol("main"),
            Err(Error::NullResource {
                kind: "shared object"
            })
        ));
    }
}
