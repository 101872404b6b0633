//! `resourcecore::windows` submodule implements native windows: [`Window`] owner and [`WindowHandle`].
//!
//! Windows are created by [`Context::build_window`] and borrow the context; handles to existing windows are
//! obtained from owners, from renderers ([`RendererHandle::window`](super::rendering::RendererHandle))
//! or from window ids that come with events ([`WindowHandle::from_id`]).
//! The last two are not checked by the borrow checker and are therefore `unsafe`.
//!

use super::{
    rendering::{Renderer, RendererHandle, RendererSettings},
    surfaces::SurfaceKind,
};
use crate::{
    error::{Error, Result},
    ffi::{c_string, check, string_from, to_c_int},
    ownership::{native_resource, BasicResource, Borrowing, Ownership, Owner, Owning},
    Context, Subsystems,
};
use bitflags::bitflags;
use sdl2::sys::{
    SDL_CreateRenderer, SDL_CreateWindow, SDL_DestroyWindow, SDL_GetRenderer, SDL_GetWindowFlags,
    SDL_GetWindowFromID, SDL_GetWindowID, SDL_GetWindowPosition, SDL_GetWindowSize,
    SDL_GetWindowTitle, SDL_HideWindow, SDL_MaximizeWindow, SDL_MinimizeWindow, SDL_RaiseWindow,
    SDL_RestoreWindow, SDL_SetWindowFullscreen, SDL_SetWindowIcon, SDL_SetWindowPosition,
    SDL_SetWindowResizable, SDL_SetWindowSize, SDL_SetWindowTitle, SDL_ShowWindow, SDL_Window,
    SDL_WindowFlags, SDL_bool,
};
use serde::{Deserialize, Serialize};
use std::os::raw::{c_char, c_int};

native_resource! {
    /// [`WindowKind`] marks native windows (`SDL_Window`).
    ///
    WindowKind => SDL_Window, "window", SDL_DestroyWindow;
    /// [`Window`] owns native window and destroys it when dropped.
    ///
    /// # Drop order
    /// Window is destroyed when video subsystem quits, so it borrows the [`Context`] that created it.
    /// Renderers that were created for a window borrow the window.
    ///
    Window<'ctx>;
    /// [`WindowHandle`] references native window without owning it.
    ///
    WindowHandle;
}

bitflags! {
    /// [`WindowFlags`] bitflag struct lists states of native windows.
    ///
    /// Values are the same as native `SDL_WindowFlags`.
    ///
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Fullscreen window.
        ///
        const FULLSCREEN = 0x0000_0001;
        /// Window usable with OpenGL context.
        ///
        const OPENGL = 0x0000_0002;
        /// Window is visible.
        ///
        const SHOWN = 0x0000_0004;
        /// Window is not visible.
        ///
        const HIDDEN = 0x0000_0008;
        /// No window decoration.
        ///
        const BORDERLESS = 0x0000_0010;
        /// Window can be resized.
        ///
        const RESIZABLE = 0x0000_0020;
        /// Window is minimized.
        ///
        const MINIMIZED = 0x0000_0040;
        /// Window is maximized.
        ///
        const MAXIMIZED = 0x0000_0080;
        /// Window has grabbed mouse input.
        ///
        const MOUSE_GRABBED = 0x0000_0100;
        /// Window has input focus.
        ///
        const INPUT_FOCUS = 0x0000_0200;
        /// Window has mouse focus.
        ///
        const MOUSE_FOCUS = 0x0000_0400;
        /// Fullscreen window at desktop resolution.
        ///
        const FULLSCREEN_DESKTOP = 0x0000_1001;
        /// Window was not created by SDL.
        ///
        const FOREIGN = 0x0000_0800;
        /// Window uses high-DPI mode if supported.
        ///
        const ALLOW_HIGHDPI = 0x0000_2000;
        /// Window has captured mouse.
        ///
        const MOUSE_CAPTURE = 0x0000_4000;
        /// Window is always above others.
        ///
        const ALWAYS_ON_TOP = 0x0000_8000;
        /// Window is not added to the taskbar.
        ///
        const SKIP_TASKBAR = 0x0001_0000;
        /// Window is a utility window.
        ///
        const UTILITY = 0x0002_0000;
        /// Window is a tooltip.
        ///
        const TOOLTIP = 0x0004_0000;
        /// Window is a popup menu.
        ///
        const POPUP_MENU = 0x0008_0000;
        /// Window has grabbed keyboard input.
        ///
        const KEYBOARD_GRABBED = 0x0010_0000;
        /// Window usable with Vulkan.
        ///
        const VULKAN = 0x1000_0000;
        /// Window usable with Metal.
        ///
        const METAL = 0x2000_0000;
    }
}
const _: () = {
    assert!(WindowFlags::FULLSCREEN.bits() == SDL_WindowFlags::SDL_WINDOW_FULLSCREEN as u32);
    assert!(WindowFlags::HIDDEN.bits() == SDL_WindowFlags::SDL_WINDOW_HIDDEN as u32);
    assert!(WindowFlags::RESIZABLE.bits() == SDL_WindowFlags::SDL_WINDOW_RESIZABLE as u32);
    assert!(
        WindowFlags::FULLSCREEN_DESKTOP.bits()
            == SDL_WindowFlags::SDL_WINDOW_FULLSCREEN_DESKTOP as u32
    );
    assert!(WindowFlags::ALWAYS_ON_TOP.bits() == SDL_WindowFlags::SDL_WINDOW_ALWAYS_ON_TOP as u32);
};

/// Native value that centers window on the screen.
///
const WINDOWPOS_CENTERED: c_int = 0x2FFF_0000;
/// Native value that lets the platform pick window position.
///
const WINDOWPOS_UNDEFINED: c_int = 0x1FFF_0000;

/// [`WindowPosition`] enum encapsulates possible position settings.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowPosition {
    /// Exact position of upper left corner (upper left corner of the screen is `(0, 0)`).
    ///
    Exact(i32, i32),
    /// Centered position.
    ///
    Centered,
}
impl WindowPosition {
    /// Returns native coordinates.
    ///
    fn to_raw(position: Option<WindowPosition>) -> (c_int, c_int) {
        match position {
            Some(WindowPosition::Exact(x, y)) => (x, y),
            Some(WindowPosition::Centered) => (WINDOWPOS_CENTERED, WINDOWPOS_CENTERED),
            None => (WINDOWPOS_UNDEFINED, WINDOWPOS_UNDEFINED),
        }
    }
}
/// [`FullscreenType`] lists types of fullscreen that are applicable to window.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullscreenType {
    /// Real fullscreen mode - video mode is changed for the window.
    ///
    Fullscreen,
    /// 'Fake' fullscreen - window covers the desktop, video mode does not change.
    ///
    DesktopFullscreen,
}
impl FullscreenType {
    /// Returns native flags of fullscreen mode (`None` is windowed mode).
    ///
    fn to_flags(this: Option<FullscreenType>) -> WindowFlags {
        match this {
            Some(FullscreenType::Fullscreen) => WindowFlags::FULLSCREEN,
            Some(FullscreenType::DesktopFullscreen) => WindowFlags::FULLSCREEN_DESKTOP,
            None => WindowFlags::empty(),
        }
    }
    /// Reads fullscreen mode from window flags.
    ///
    fn from_flags(flags: WindowFlags) -> Option<FullscreenType> {
        if flags.contains(WindowFlags::FULLSCREEN_DESKTOP) {
            Some(FullscreenType::DesktopFullscreen)
        } else if flags.contains(WindowFlags::FULLSCREEN) {
            Some(FullscreenType::Fullscreen)
        } else {
            None
        }
    }
}
/// [`InitialSizing`] enum lists possible states for window initial sizing.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitialSizing {
    /// Window will be minimized upon creation.
    ///
    Minimized,
    /// Window will be maximized upon creation.
    ///
    Maximized,
}

/// [`WindowSettings`] struct carries data that is needed for window configuration.
///
/// If you do not want to tweak settings, just pass `..Default::default()` to fill up remaining options.
///
/// # Examples
/// ```rust
/// # use ggsdl::resourcecore::windows::{WindowSettings, WindowPosition, FullscreenType, WindowFlags};
/// let settings: WindowSettings = WindowSettings {
///     position: Some(WindowPosition::Centered),
///     fullscreen: Some(FullscreenType::DesktopFullscreen),
///     ..WindowSettings::default()
/// };
/// assert!(settings.flags().contains(WindowFlags::FULLSCREEN_DESKTOP | WindowFlags::RESIZABLE));
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Initial window position (`None` lets the platform decide).
    ///
    pub position: Option<WindowPosition>,

    /// Fullscreen mode of the window.
    ///
    pub fullscreen: Option<FullscreenType>,
    /// Decides whether the window will always be on top or not.
    ///
    pub always_on_top: bool,

    /// Decides whether the window will be resizable or not.
    ///
    pub resizable: bool,
    /// Initial sizing of the window.
    ///
    pub initial_sizing: Option<InitialSizing>,

    /// Decides whether the window will be hidden or not.
    ///
    pub hidden: bool,
    /// Decides whether the window will be borderless or not.
    ///
    pub borderless: bool,
    /// Decides whether the window will allow high dpi or not.
    ///
    pub allow_high_dpi: bool,
}
impl WindowSettings {
    /// Returns native flags that correspond to these settings.
    ///
    pub fn flags(&self) -> WindowFlags {
        let mut flags: WindowFlags = FullscreenType::to_flags(self.fullscreen);
        flags.set(WindowFlags::ALWAYS_ON_TOP, self.always_on_top);
        flags.set(WindowFlags::RESIZABLE, self.resizable);
        match self.initial_sizing {
            Some(InitialSizing::Minimized) => flags.insert(WindowFlags::MINIMIZED),
            Some(InitialSizing::Maximized) => flags.insert(WindowFlags::MAXIMIZED),
            None => {}
        }
        flags.set(WindowFlags::HIDDEN, self.hidden);
        flags.set(WindowFlags::BORDERLESS, self.borderless);
        flags.set(WindowFlags::ALLOW_HIGHDPI, self.allow_high_dpi);
        flags
    }
}
impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            position: None,

            fullscreen: None,
            always_on_top: false,

            resizable: true,
            initial_sizing: None,

            hidden: false,
            borderless: false,
            allow_high_dpi: true,
        }
    }
}

impl Context {
    /// Builds window with given settings.
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, resourcecore::windows::Window};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let window: Window = context
    ///     .build_window("GGSDL", 1600, 900, Default::default())
    ///     .expect("Window should be created");
    /// ```
    ///
    pub fn build_window(
        &self,
        title: &str,
        width: u32,
        height: u32,
        settings: WindowSettings,
    ) -> Result<Window<'_>> {
        self.require(Subsystems::VIDEO, "video")?;
        let title = c_string(title)?;
        let (x, y): (c_int, c_int) = WindowPosition::to_raw(settings.position);
        unsafe {
            Owner::acquire(SDL_CreateWindow(
                title.as_ptr(),
                x,
                y,
                to_c_int(width, "window width")?,
                to_c_int(height, "window height")?,
                settings.flags().bits(),
            ))
        }
    }
}

impl<'a> BasicResource<WindowKind, Borrowing<'a>> {
    /// Returns handle of the window with given id (empty handle if there is no such window).
    ///
    /// # Safety
    /// The window must stay alive for `'a`.
    ///
    pub unsafe fn from_id(id: u32) -> Self {
        unsafe { Self::from_raw(SDL_GetWindowFromID(id)) }
    }
}
impl<O: Ownership> BasicResource<WindowKind, O> {
    /// Returns id of the window (it is used in window-related events).
    ///
    pub fn id(&self) -> Result<u32> {
        let id: u32 = unsafe { SDL_GetWindowID(self.get()?) };
        if id == 0 {
            Err(Error::native("SDL_GetWindowID"))
        } else {
            Ok(id)
        }
    }

    /// Returns window's title.
    ///
    pub fn title(&self) -> Result<String> {
        let title: *const c_char = unsafe { SDL_GetWindowTitle(self.get()?) };
        Ok(unsafe { string_from(title) }.unwrap_or_default())
    }
    /// Sets new title for the window.
    ///
    pub fn set_title(&self, title: &str) -> Result<()> {
        let title = c_string(title)?;
        unsafe { SDL_SetWindowTitle(self.get()?, title.as_ptr()) };
        Ok(())
    }

    /// Returns current size of the window (in screen coordinates).
    ///
    pub fn size(&self) -> Result<(u32, u32)> {
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        unsafe { SDL_GetWindowSize(self.get()?, &mut width, &mut height) };
        Ok((width.unsigned_abs(), height.unsigned_abs()))
    }
    /// Sets new size for the window.
    ///
    pub fn set_size(&self, width: u32, height: u32) -> Result<()> {
        let (width, height) = (
            to_c_int(width, "window width")?,
            to_c_int(height, "window height")?,
        );
        unsafe { SDL_SetWindowSize(self.get()?, width, height) };
        Ok(())
    }

    /// Returns current position of the window's upper left corner.
    ///
    pub fn position(&self) -> Result<(i32, i32)> {
        let (mut x, mut y): (c_int, c_int) = (0, 0);
        unsafe { SDL_GetWindowPosition(self.get()?, &mut x, &mut y) };
        Ok((x, y))
    }
    /// Sets new position of the window.
    ///
    pub fn set_position(&self, position: WindowPosition) -> Result<()> {
        let (x, y): (c_int, c_int) = WindowPosition::to_raw(Some(position));
        unsafe { SDL_SetWindowPosition(self.get()?, x, y) };
        Ok(())
    }

    /// Returns current state of the window.
    ///
    pub fn flags(&self) -> Result<WindowFlags> {
        Ok(WindowFlags::from_bits_retain(unsafe {
            SDL_GetWindowFlags(self.get()?)
        }))
    }
    /// Returns current fullscreen mode of the window (`None` is windowed mode).
    ///
    pub fn fullscreen(&self) -> Result<Option<FullscreenType>> {
        Ok(FullscreenType::from_flags(self.flags()?))
    }
    /// Switches fullscreen mode of the window (`None` is windowed mode).
    ///
    pub fn set_fullscreen(&self, fullscreen: Option<FullscreenType>) -> Result<()> {
        let flags: u32 = FullscreenType::to_flags(fullscreen).bits();
        let _ = check("SDL_SetWindowFullscreen", unsafe {
            SDL_SetWindowFullscreen(self.get()?, flags)
        })?;
        Ok(())
    }
    /// Allows or forbids user to resize the window.
    ///
    pub fn set_resizable(&self, resizable: bool) -> Result<()> {
        let resizable: SDL_bool = if resizable {
            SDL_bool::SDL_TRUE
        } else {
            SDL_bool::SDL_FALSE
        };
        unsafe { SDL_SetWindowResizable(self.get()?, resizable) };
        Ok(())
    }
    /// Sets icon of the window.
    ///
    pub fn set_icon<P: Ownership>(&self, icon: &BasicResource<SurfaceKind, P>) -> Result<()> {
        unsafe { SDL_SetWindowIcon(self.get()?, icon.get()?) };
        Ok(())
    }

    /// Shows the window.
    ///
    pub fn show(&self) -> Result<()> {
        unsafe { SDL_ShowWindow(self.get()?) };
        Ok(())
    }
    /// Hides the window.
    ///
    pub fn hide(&self) -> Result<()> {
        unsafe { SDL_HideWindow(self.get()?) };
        Ok(())
    }
    /// Raises the window above others and sets input focus.
    ///
    pub fn raise(&self) -> Result<()> {
        unsafe { SDL_RaiseWindow(self.get()?) };
        Ok(())
    }
    /// Minimizes the window.
    ///
    pub fn minimize(&self) -> Result<()> {
        unsafe { SDL_MinimizeWindow(self.get()?) };
        Ok(())
    }
    /// Maximizes the window.
    ///
    pub fn maximize(&self) -> Result<()> {
        unsafe { SDL_MaximizeWindow(self.get()?) };
        Ok(())
    }
    /// Restores size and position of minimized or maximized window.
    ///
    pub fn restore(&self) -> Result<()> {
        unsafe { SDL_RestoreWindow(self.get()?) };
        Ok(())
    }

    /// Returns handle of the renderer that draws to this window (empty handle if there is none).
    ///
    /// # Safety
    /// The renderer is owned by whoever created it, not by the window:
    /// it must not be destroyed while the returned handle is alive.
    ///
    pub unsafe fn renderer(&self) -> Result<RendererHandle<'_>> {
        Ok(unsafe { RendererHandle::from_raw(SDL_GetRenderer(self.get()?)) })
    }
}
impl<'ctx> BasicResource<WindowKind, Owning<'ctx>> {
    /// Creates renderer that draws to this window.
    ///
    /// Only one renderer can exist per window; renderer borrows the window.
    /// This function exists only for owners - handles cannot create renderers:
    /// ```rust, compile_fail
    /// # use ggsdl::{Context, ContextSettings, resourcecore::windows::{Window, WindowHandle}};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let window: Window = context
    ///     .build_window("GGSDL", 800, 600, Default::default())
    ///     .expect("Window should be created");
    /// let handle: WindowHandle = window.handle();
    /// let _ = handle.create_renderer(Default::default());
    /// ```
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, resourcecore::{windows::Window, rendering::Renderer}};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let window: Window = context
    ///     .build_window("GGSDL", 800, 600, Default::default())
    ///     .expect("Window should be created");
    /// let renderer: Renderer = window
    ///     .create_renderer(Default::default())
    ///     .expect("Renderer should be created");
    /// assert_eq!(unsafe { window.renderer() }.expect("Window is valid"), renderer);
    /// ```
    ///
    pub fn create_renderer(&self, settings: RendererSettings) -> Result<Renderer<'_>> {
        let index: c_int = match settings.driver_index {
            Some(index) => to_c_int(index, "render driver index")?,
            None => -1,
        };
        unsafe {
            Owner::acquire(SDL_CreateRenderer(
                self.get()?,
                index,
                settings.flags().bits(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FullscreenType, InitialSizing, WindowFlags, WindowHandle, WindowPosition, WindowSettings,
        WINDOWPOS_CENTERED, WINDOWPOS_UNDEFINED,
    };
    use crate::error::Error;

    #[test]
    fn settings_to_flags() {
        let default: WindowFlags = WindowSettings::default().flags();
        assert_eq!(default, WindowFlags::RESIZABLE | WindowFlags::ALLOW_HIGHDPI);

        let settings: WindowSettings = WindowSettings {
            fullscreen: Some(FullscreenType::Fullscreen),
            initial_sizing: Some(InitialSizing::Maximized),
            hidden: true,
            resizable: false,
            allow_high_dpi: false,
            ..WindowSettings::default()
        };
        assert_eq!(
            settings.flags(),
            WindowFlags::FULLSCREEN | WindowFlags::MAXIMIZED | WindowFlags::HIDDEN
        );
        assert_eq!(
            FullscreenType::from_flags(WindowFlags::FULLSCREEN_DESKTOP | WindowFlags::SHOWN),
            Some(FullscreenType::DesktopFullscreen)
        );
        assert_eq!(FullscreenType::from_flags(WindowFlags::SHOWN), None);
    }

    #[test]
    fn positions() {
        assert_eq!(WindowPosition::to_raw(Some(WindowPosition::Exact(3, 4))), (3, 4));
        assert_eq!(
            WindowPosition::to_raw(Some(WindowPosition::Centered)),
            (WINDOWPOS_CENTERED, WINDOWPOS_CENTERED)
        );
        assert_eq!(
            WindowPosition::to_raw(None),
            (WINDOWPOS_UNDEFINED, WINDOWPOS_UNDEFINED)
        );
    }

    #[test]
    fn empty_handle_is_rejected() {
        let handle: WindowHandle = WindowHandle::null();
        assert!(matches!(
            handle.title(),
            Err(Error::NullResource { kind: "window" })
        ));
        assert!(matches!(
            unsafe { handle.renderer() },
            Err(Error::NullResource { kind: "window" })
        ));
    }
}
