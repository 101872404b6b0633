//! `resourcecore::cursors` submodule implements mouse cursors: [`Cursor`] owner and [`CursorHandle`].
//!

use super::surfaces::SurfaceKind;
use crate::{
    error::Result,
    ffi::check,
    ownership::{native_resource, BasicResource, Borrowing, Owner, Ownership},
    Context, Subsystems,
};
use sdl2::sys::{
    SDL_CreateColorCursor, SDL_CreateSystemCursor, SDL_Cursor, SDL_FreeCursor, SDL_GetCursor,
    SDL_GetDefaultCursor, SDL_SetCursor, SDL_ShowCursor, SDL_SystemCursor,
};
use std::os::raw::c_int;

native_resource! {
    /// [`CursorKind`] marks mouse cursors (`SDL_Cursor`).
    ///
    CursorKind => SDL_Cursor, "cursor", SDL_FreeCursor;
    /// [`Cursor`] owns a cursor.
    ///
    /// # Drop order
    /// Active cursor should be replaced before it is dropped.
    /// Cursor borrows [`Context`] that created it.
    ///
    Cursor<'ctx>;
    /// [`CursorHandle`] references a cursor without owning it.
    ///
    CursorHandle;
}

/// [`SystemCursor`] enum lists cursors that the platform provides.
///
/// Discriminants are values of native `SDL_SystemCursor`.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SystemCursor {
    /// Arrow.
    ///
    Arrow = 0,
    /// I-beam.
    ///
    IBeam = 1,
    /// Wait.
    ///
    Wait = 2,
    /// Crosshair.
    ///
    Crosshair = 3,
    /// Small wait cursor (or wait if not available).
    ///
    WaitArrow = 4,
    /// Double arrow pointing northwest and southeast.
    ///
    SizeNWSE = 5,
    /// Double arrow pointing northeast and southwest.
    ///
    SizeNESW = 6,
    /// Double arrow pointing west and east.
    ///
    SizeWE = 7,
    /// Double arrow pointing north and south.
    ///
    SizeNS = 8,
    /// Four pointed arrow.
    ///
    SizeAll = 9,
    /// Slashed circle or crossbones.
    ///
    No = 10,
    /// Hand.
    ///
    Hand = 11,
}
const _: () = {
    assert!(SystemCursor::Arrow as u32 == SDL_SystemCursor::SDL_SYSTEM_CURSOR_ARROW as u32);
    assert!(SystemCursor::SizeAll as u32 == SDL_SystemCursor::SDL_SYSTEM_CURSOR_SIZEALL as u32);
    assert!(SystemCursor::Hand as u32 == SDL_SystemCursor::SDL_SYSTEM_CURSOR_HAND as u32);
};
impl SystemCursor {
    /// Returns native representation of this cursor.
    ///
    fn to_sys(self) -> SDL_SystemCursor {
        use SDL_SystemCursor as C;
        match self {
            SystemCursor::Arrow => C::SDL_SYSTEM_CURSOR_ARROW,
            SystemCursor::IBeam => C::SDL_SYSTEM_CURSOR_IBEAM,
            SystemCursor::Wait => C::SDL_SYSTEM_CURSOR_WAIT,
            SystemCursor::Crosshair => C::SDL_SYSTEM_CURSOR_CROSSHAIR,
            SystemCursor::WaitArrow => C::SDL_SYSTEM_CURSOR_WAITARROW,
            SystemCursor::SizeNWSE => C::SDL_SYSTEM_CURSOR_SIZENWSE,
            SystemCursor::SizeNESW => C::SDL_SYSTEM_CURSOR_SIZENESW,
            SystemCursor::SizeWE => C::SDL_SYSTEM_CURSOR_SIZEWE,
            SystemCursor::SizeNS => C::SDL_SYSTEM_CURSOR_SIZENS,
            SystemCursor::SizeAll => C::SDL_SYSTEM_CURSOR_SIZEALL,
            SystemCursor::No => C::SDL_SYSTEM_CURSOR_NO,
            SystemCursor::Hand => C::SDL_SYSTEM_CURSOR_HAND,
        }
    }
}

impl<'ctx> Cursor<'ctx> {
    /// Creates one of the platform's cursors.
    ///
    pub fn system(context: &'ctx Context, cursor: SystemCursor) -> Result<Cursor<'ctx>> {
        context.require(Subsystems::VIDEO, "video")?;
        unsafe { Owner::acquire(SDL_CreateSystemCursor(cursor.to_sys())) }
    }
    /// Creates color cursor from the surface; `hot_x` and `hot_y` are position of the click point.
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, resourcecore::{cursors::Cursor, pixels::{Color, PixelFormat}, surfaces::Surface}};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let image: Surface = Surface::new(16, 16, PixelFormat::RGBA32).expect("Memory should be available");
    /// image.fill_rect(None, Color::rgb(255, 0, 0)).expect("Surface is valid");
    /// let cursor: Cursor = Cursor::from_surface(&context, &image, 8, 8).expect("Cursor should be created");
    /// cursor.set_active().expect("Cursor is valid");
    /// ```
    ///
    pub fn from_surface<O: Ownership>(
        context: &'ctx Context,
        surface: &BasicResource<SurfaceKind, O>,
        hot_x: i32,
        hot_y: i32,
    ) -> Result<Cursor<'ctx>> {
        context.require(Subsystems::VIDEO, "video")?;
        unsafe { Owner::acquire(SDL_CreateColorCursor(surface.get()?, hot_x, hot_y)) }
    }
}
impl<'a> BasicResource<CursorKind, Borrowing<'a>> {
    /// Returns handle of the active cursor (empty handle if there is none).
    ///
    /// # Safety
    /// The cursor must not be freed for `'a`.
    ///
    pub unsafe fn active() -> Self {
        unsafe { Self::from_raw(SDL_GetCursor()) }
    }
}
impl<O: Ownership> BasicResource<CursorKind, O> {
    /// Makes this cursor the active one.
    ///
    pub fn set_active(&self) -> Result<()> {
        unsafe { SDL_SetCursor(self.get()?) };
        Ok(())
    }
    /// Returns whether this cursor is the active one.
    ///
    pub fn is_active(&self) -> Result<bool> {
        Ok(self.get()? == unsafe { SDL_GetCursor() })
    }
}

impl Context {
    /// Returns handle of the platform's default cursor.
    ///
    /// Default cursor is owned by SDL; the handle borrows the context.
    ///
    pub fn default_cursor(&self) -> Result<CursorHandle<'_>> {
        self.require(Subsystems::VIDEO, "video")?;
        Ok(unsafe { CursorHandle::from_raw(SDL_GetDefaultCursor()) })
    }
    /// Shows or hides the cursor.
    ///
    pub fn show_cursor(&self, shown: bool) -> Result<()> {
        self.require(Subsystems::VIDEO, "video")?;
        let _ = check("SDL_ShowCursor", unsafe {
            SDL_ShowCursor(c_int::from(shown))
        })?;
        Ok(())
    }
    /// Returns whether the cursor is shown.
    ///
    pub fn is_cursor_shown(&self) -> Result<bool> {
        self.require(Subsystems::VIDEO, "video")?;
        // -1 queries the state.
        let state: c_int = check("SDL_ShowCursor", unsafe { SDL_ShowCursor(-1) })?;
        Ok(state == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorHandle, SystemCursor};
    use crate::error::Error;

    #[test]
    fn system_cursors() {
        assert_eq!(SystemCursor::No as u32, 10);
        assert_eq!(SystemCursor::IBeam.to_sys() as u32, 1);
        assert_eq!(SystemCursor::Hand.to_sys() as u32, SystemCursor::Hand as u32);
    }

    #[test]
    fn empty_handle_is_rejected() {
        let handle: CursorHandle = CursorHandle::default();
        assert!(matches!(
            handle.set_active(),
            Err(Error::NullResource { kind: "cursor" })
        ));
    }
}
