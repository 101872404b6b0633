//! `resourcecore::rendering` submodule implements 2D rendering: [`Renderer`] and [`Texture`] resources.
//!
//! # Model
//! Renderer draws to a window (see [`Window::create_renderer`](super::windows::Window))
//! or to a surface ([`Surface::create_renderer`](super::surfaces::Surface)).
//! Textures are pixel data that lives on the renderer's side; they belong to the renderer
//! that created them and can only be drawn by it.
//!
//! # Drop order
//! Destroying a renderer destroys all of its textures, so owned textures borrow their renderer.
//! Renderers borrow their window or surface in the same way.
//!
//! ```rust, compile_fail
//! # use ggsdl::resourcecore::{pixels::{PixelFormat, TextureAccess}, rendering::{Renderer, Texture}, surfaces::Surface};
//! let surface: Surface = Surface::new(2, 2, PixelFormat::RGBA32).expect("Memory should be available");
//! let texture: Texture = {
//!     let renderer: Renderer = surface.create_renderer().expect("Software renderer is always available");
//!     renderer
//!         .create_texture(PixelFormat::RGBA32, TextureAccess::Static, 2, 2)
//!         .expect("Software renderer supports RGBA32")
//! };
//! ```
//!

use super::{
    pixels::{rect_ptr, sys_rect, BlendMode, Color, PixelFormat, Rect, TextureAccess},
    surfaces::SurfaceKind,
    windows::WindowHandle,
};
use crate::{
    error::{Error, Result},
    ffi::{check, to_c_int},
    ownership::{native_resource, BasicResource, Owner, Ownership},
};
use bitflags::bitflags;
use sdl2::sys::{
    SDL_BlendMode, SDL_CreateSoftwareRenderer, SDL_CreateTexture, SDL_CreateTextureFromSurface,
    SDL_DestroyRenderer, SDL_DestroyTexture, SDL_GetRenderDrawBlendMode, SDL_GetRenderDrawColor,
    SDL_GetRendererOutputSize, SDL_GetTextureAlphaMod, SDL_GetTextureBlendMode,
    SDL_GetTextureColorMod, SDL_QueryTexture, SDL_Rect, SDL_RenderClear, SDL_RenderCopy,
    SDL_RenderDrawLine, SDL_RenderDrawPoint, SDL_RenderDrawRect, SDL_RenderFillRect,
    SDL_RenderGetWindow, SDL_RenderPresent, SDL_Renderer, SDL_RendererFlags,
    SDL_SetRenderDrawBlendMode, SDL_SetRenderDrawColor, SDL_SetTextureAlphaMod,
    SDL_SetTextureBlendMode, SDL_SetTextureColorMod, SDL_Texture, SDL_UpdateTexture,
};
use serde::{Deserialize, Serialize};
use std::os::raw::c_int;

native_resource! {
    /// [`RendererKind`] marks 2D renderers (`SDL_Renderer`).
    ///
    RendererKind => SDL_Renderer, "renderer", SDL_DestroyRenderer;
    /// [`Renderer`] owns a renderer and destroys it (together with its textures) when dropped.
    ///
    /// Lifetime `'p` is the borrow of the window or surface that the renderer draws to.
    ///
    Renderer<'p>;
    /// [`RendererHandle`] references a renderer without owning it.
    ///
    RendererHandle;
}
native_resource! {
    /// [`TextureKind`] marks textures (`SDL_Texture`).
    ///
    TextureKind => SDL_Texture, "texture", SDL_DestroyTexture;
    /// [`Texture`] owns a texture.
    ///
    /// Lifetime `'r` is the borrow of the renderer that created the texture.
    ///
    Texture<'r>;
    /// [`TextureHandle`] references a texture without owning it.
    ///
    TextureHandle;
}

bitflags! {
    /// [`RendererFlags`] bitflag struct lists native renderer creation flags.
    ///
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RendererFlags: u32 {
        /// Software fallback renderer.
        ///
        const SOFTWARE = 0x0000_0001;
        /// Hardware accelerated renderer.
        ///
        const ACCELERATED = 0x0000_0002;
        /// Presentation is synchronized with refresh rate.
        ///
        const PRESENT_VSYNC = 0x0000_0004;
        /// Renderer supports rendering to texture.
        ///
        const TARGET_TEXTURE = 0x0000_0008;
    }
}
const _: () = {
    assert!(RendererFlags::SOFTWARE.bits() == SDL_RendererFlags::SDL_RENDERER_SOFTWARE as u32);
    assert!(
        RendererFlags::ACCELERATED.bits() == SDL_RendererFlags::SDL_RENDERER_ACCELERATED as u32
    );
    assert!(
        RendererFlags::PRESENT_VSYNC.bits() == SDL_RendererFlags::SDL_RENDERER_PRESENTVSYNC as u32
    );
    assert!(
        RendererFlags::TARGET_TEXTURE.bits()
            == SDL_RendererFlags::SDL_RENDERER_TARGETTEXTURE as u32
    );
};

/// [`RendererSettings`] struct carries data that is needed for renderer configuration.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererSettings {
    /// Index of render driver (`None` picks the first one that supports requested flags).
    ///
    pub driver_index: Option<u32>,
    /// Requests hardware acceleration (software renderer is used otherwise).
    ///
    pub accelerated: bool,
    /// Synchronizes presentation with refresh rate.
    ///
    pub vsync: bool,
    /// Requests support of rendering to textures.
    ///
    pub target_texture: bool,
}
impl RendererSettings {
    /// Returns native flags that correspond to these settings.
    ///
    pub fn flags(&self) -> RendererFlags {
        let mut flags: RendererFlags = if self.accelerated {
            RendererFlags::ACCELERATED
        } else {
            RendererFlags::SOFTWARE
        };
        flags.set(RendererFlags::PRESENT_VSYNC, self.vsync);
        flags.set(RendererFlags::TARGET_TEXTURE, self.target_texture);
        flags
    }
}
impl Default for RendererSettings {
    fn default() -> Self {
        RendererSettings {
            driver_index: None,
            accelerated: true,
            vsync: true,
            target_texture: false,
        }
    }
}

/// [`TextureInfo`] struct is the result of texture query.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    /// Pixel format (`None` if it is not listed in [`PixelFormat`]).
    ///
    pub format: Option<PixelFormat>,
    /// Access mode.
    ///
    pub access: TextureAccess,
    /// Width in pixels.
    ///
    pub width: u32,
    /// Height in pixels.
    ///
    pub height: u32,
}

impl<O: Ownership> BasicResource<SurfaceKind, O> {
    /// Creates software renderer that draws to this surface.
    ///
    /// Works without video subsystem.
    ///
    pub fn create_renderer(&self) -> Result<Renderer<'_>> {
        unsafe { Owner::acquire(SDL_CreateSoftwareRenderer(self.get()?)) }
    }
}

impl<O: Ownership> BasicResource<RendererKind, O> {
    /// Returns handle of the window that this renderer draws to
    /// (empty handle for renderers that draw to surfaces).
    ///
    /// # Safety
    /// The window is not owned by the renderer:
    /// it must not be destroyed while the returned handle is alive.
    ///
    pub unsafe fn window(&self) -> Result<WindowHandle<'_>> {
        Ok(unsafe { WindowHandle::from_raw(SDL_RenderGetWindow(self.get()?)) })
    }
    /// Returns size of the rendering target in pixels.
    ///
    pub fn output_size(&self) -> Result<(u32, u32)> {
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        let _ = check("SDL_GetRendererOutputSize", unsafe {
            SDL_GetRendererOutputSize(self.get()?, &mut width, &mut height)
        })?;
        Ok((width.unsigned_abs(), height.unsigned_abs()))
    }

    /// Returns color that is used for drawing operations.
    ///
    pub fn draw_color(&self) -> Result<Color> {
        let mut color: Color = Color::BLACK;
        let _ = check("SDL_GetRenderDrawColor", unsafe {
            SDL_GetRenderDrawColor(
                self.get()?,
                &mut color.r,
                &mut color.g,
                &mut color.b,
                &mut color.a,
            )
        })?;
        Ok(color)
    }
    /// Sets color that is used for drawing operations (clear, rectangles, lines and points).
    ///
    pub fn set_draw_color(&self, color: Color) -> Result<()> {
        let _ = check("SDL_SetRenderDrawColor", unsafe {
            SDL_SetRenderDrawColor(self.get()?, color.r, color.g, color.b, color.a)
        })?;
        Ok(())
    }
    /// Returns blend mode that is used for drawing operations.
    ///
    pub fn blend_mode(&self) -> Result<Option<BlendMode>> {
        let mut mode: SDL_BlendMode = SDL_BlendMode::SDL_BLENDMODE_NONE;
        let _ = check("SDL_GetRenderDrawBlendMode", unsafe {
            SDL_GetRenderDrawBlendMode(self.get()?, &mut mode)
        })?;
        Ok(BlendMode::from_sys(mode))
    }
    /// Sets blend mode that is used for drawing operations.
    ///
    pub fn set_blend_mode(&self, mode: BlendMode) -> Result<()> {
        let _ = check("SDL_SetRenderDrawBlendMode", unsafe {
            SDL_SetRenderDrawBlendMode(self.get()?, mode.to_sys())
        })?;
        Ok(())
    }

    /// Clears the whole target with draw color.
    ///
    pub fn clear(&self) -> Result<()> {
        let _ = check("SDL_RenderClear", unsafe { SDL_RenderClear(self.get()?) })?;
        Ok(())
    }
    /// Presents everything that was drawn since the previous call.
    ///
    pub fn present(&self) -> Result<()> {
        unsafe { SDL_RenderPresent(self.get()?) };
        Ok(())
    }
    /// Fills rectangle (`None` is the whole target) with draw color.
    ///
    pub fn fill_rect(&self, rect: Option<Rect>) -> Result<()> {
        let rect: Option<SDL_Rect> = sys_rect(rect)?;
        let _ = check("SDL_RenderFillRect", unsafe {
            SDL_RenderFillRect(self.get()?, rect_ptr(&rect))
        })?;
        Ok(())
    }
    /// Draws outline of rectangle (`None` is the whole target) with draw color.
    ///
    pub fn draw_rect(&self, rect: Option<Rect>) -> Result<()> {
        let rect: Option<SDL_Rect> = sys_rect(rect)?;
        let _ = check("SDL_RenderDrawRect", unsafe {
            SDL_RenderDrawRect(self.get()?, rect_ptr(&rect))
        })?;
        Ok(())
    }
    /// Draws line between two points with draw color.
    ///
    pub fn draw_line(&self, start: (i32, i32), end: (i32, i32)) -> Result<()> {
        let _ = check("SDL_RenderDrawLine", unsafe {
            SDL_RenderDrawLine(self.get()?, start.0, start.1, end.0, end.1)
        })?;
        Ok(())
    }
    /// Draws one point with draw color.
    ///
    pub fn draw_point(&self, x: i32, y: i32) -> Result<()> {
        let _ = check("SDL_RenderDrawPoint", unsafe {
            SDL_RenderDrawPoint(self.get()?, x, y)
        })?;
        Ok(())
    }
    /// Copies `source` part of texture (`None` is the whole texture) into `destination`
    /// part of the target (`None` is the whole target), scaling it if needed.
    ///
    pub fn copy<P: Ownership>(
        &self,
        texture: &BasicResource<TextureKind, P>,
        source: Option<Rect>,
        destination: Option<Rect>,
    ) -> Result<()> {
        let source: Option<SDL_Rect> = sys_rect(source)?;
        let destination: Option<SDL_Rect> = sys_rect(destination)?;
        let _ = check("SDL_RenderCopy", unsafe {
            SDL_RenderCopy(
                self.get()?,
                texture.get()?,
                rect_ptr(&source),
                rect_ptr(&destination),
            )
        })?;
        Ok(())
    }

    /// Creates texture with given format, access mode and size.
    ///
    pub fn create_texture(
        &self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Result<Texture<'_>> {
        let (width, height) = (
            to_c_int(width, "texture width")?,
            to_c_int(height, "texture height")?,
        );
        unsafe {
            Owner::acquire(SDL_CreateTexture(
                self.get()?,
                format.to_raw(),
                access.to_raw(),
                width,
                height,
            ))
        }
    }
    /// Creates static texture with contents of the surface.
    ///
    pub fn create_texture_from_surface<P: Ownership>(
        &self,
        surface: &BasicResource<SurfaceKind, P>,
    ) -> Result<Texture<'_>> {
        unsafe {
            Owner::acquire(SDL_CreateTextureFromSurface(
                self.get()?,
                surface.get()?,
            ))
        }
    }
}

impl<O: Ownership> BasicResource<TextureKind, O> {
    /// Returns format, access mode and size of the texture.
    ///
    pub fn query(&self) -> Result<TextureInfo> {
        let (mut format, mut access, mut width, mut height): (u32, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let _ = check("SDL_QueryTexture", unsafe {
            SDL_QueryTexture(
                self.get()?,
                &mut format,
                &mut access,
                &mut width,
                &mut height,
            )
        })?;
        Ok(TextureInfo {
            format: PixelFormat::from_raw(format),
            access: TextureAccess::from_raw(access).ok_or_else(|| Error::Native {
                operation: "SDL_QueryTexture",
                message: format!("unknown texture access {access}"),
            })?,
            width: width.unsigned_abs(),
            height: height.unsigned_abs(),
        })
    }

    /// Returns color modulation of the texture (alpha is taken from alpha modulation).
    ///
    pub fn color_mod(&self) -> Result<Color> {
        let mut color: Color = Color::WHITE;
        let texture: *mut SDL_Texture = self.get()?;
        let _ = check("SDL_GetTextureColorMod", unsafe {
            SDL_GetTextureColorMod(texture, &mut color.r, &mut color.g, &mut color.b)
        })?;
        let _ = check("SDL_GetTextureAlphaMod", unsafe {
            SDL_GetTextureAlphaMod(texture, &mut color.a)
        })?;
        Ok(color)
    }
    /// Sets color modulation of the texture (alpha is ignored).
    ///
    pub fn set_color_mod(&self, color: Color) -> Result<()> {
        let _ = check("SDL_SetTextureColorMod", unsafe {
            SDL_SetTextureColorMod(self.get()?, color.r, color.g, color.b)
        })?;
        Ok(())
    }
    /// Returns alpha modulation of the texture.
    ///
    pub fn alpha_mod(&self) -> Result<u8> {
        let mut alpha: u8 = 0;
        let _ = check("SDL_GetTextureAlphaMod", unsafe {
            SDL_GetTextureAlphaMod(self.get()?, &mut alpha)
        })?;
        Ok(alpha)
    }
    /// Sets alpha modulation of the texture.
    ///
    pub fn set_alpha_mod(&self, alpha: u8) -> Result<()> {
        let _ = check("SDL_SetTextureAlphaMod", unsafe {
            SDL_SetTextureAlphaMod(self.get()?, alpha)
        })?;
        Ok(())
    }
    /// Returns blend mode of the texture.
    ///
    pub fn blend_mode(&self) -> Result<Option<BlendMode>> {
        let mut mode: SDL_BlendMode = SDL_BlendMode::SDL_BLENDMODE_NONE;
        let _ = check("SDL_GetTextureBlendMode", unsafe {
            SDL_GetTextureBlendMode(self.get()?, &mut mode)
        })?;
        Ok(BlendMode::from_sys(mode))
    }
    /// Sets blend mode of the texture.
    ///
    pub fn set_blend_mode(&self, mode: BlendMode) -> Result<()> {
        let _ = check("SDL_SetTextureBlendMode", unsafe {
            SDL_SetTextureBlendMode(self.get()?, mode.to_sys())
        })?;
        Ok(())
    }

    /// Replaces pixels of `rect` (`None` is the whole texture) with `pixels`,
    /// which are rows of `pitch` bytes in texture's format.
    ///
    /// Fails if `pixels` are shorter than the rectangle needs.
    ///
    pub fn update(&self, rect: Option<Rect>, pixels: &[u8], pitch: usize) -> Result<()> {
        let info: TextureInfo = self.query()?;
        let (width, height): (u32, u32) = rect.map_or((info.width, info.height), |rect| {
            (rect.width, rect.height)
        });
        let uncovered = || {
            Error::InvalidArgument(format!(
                "{length} bytes with pitch {pitch} do not cover {width}x{height} pixels",
                length = pixels.len(),
            ))
        };
        let row: usize = (width as usize)
            .checked_mul(info.format.map_or(4, PixelFormat::bytes_per_pixel))
            .ok_or_else(uncovered)?;
        let needed: usize = match height as usize {
            0 => 0,
            rows => pitch
                .checked_mul(rows - 1)
                .and_then(|rows| rows.checked_add(row))
                .ok_or_else(uncovered)?,
        };
        if pitch < row || pixels.len() < needed {
            return Err(uncovered());
        }
        let pitch: c_int = c_int::try_from(pitch)
            .map_err(|_| Error::InvalidArgument(format!("pitch {pitch} exceeds `c_int::MAX`")))?;
        let rect: Option<SDL_Rect> = sys_rect(rect)?;
        let _ = check("SDL_UpdateTexture", unsafe {
            SDL_UpdateTexture(self.get()?, rect_ptr(&rect), pixels.as_ptr().cast(), pitch)
        })?;
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::{Renderer, RendererFlags, RendererHandle, RendererSettings, Texture, TextureInfo};
    use crate::{
        error::Error,
        resourcecore::{
            pixels::{BlendMode, Color, PixelFormat, Rect, TextureAccess},
            surfaces::Surface,
        },
    };

    #[test]
    fn settings() {
        assert_eq!(
            RendererSettings::default().flags(),
            RendererFlags::ACCELERATED | RendererFlags::PRESENT_VSYNC
        );
        let software: RendererSettings = RendererSettings {
            accelerated: false,
            vsync: false,
            target_texture: true,
            ..RendererSettings::default()
        };
        assert_eq!(
            software.flags(),
            RendererFlags::SOFTWARE | RendererFlags::TARGET_TEXTURE
        );
    }

    #[test]
    fn software_rendering() {
        let surface: Surface =
            Surface::new(4, 4, PixelFormat::RGBA32).expect("Memory should be available");
        let renderer: Renderer = surface
            .create_renderer()
            .expect("Software renderer is always available");
        assert!(unsafe { renderer.window() }
            .expect("Renderer is valid")
            .is_null());
        assert_eq!(renderer.output_size().expect("Renderer is valid"), (4, 4));

        renderer
            .set_draw_color(Color::rgb(0, 0, 255))
            .expect("Renderer is valid");
        assert_eq!(
            renderer.draw_color().expect("Renderer is valid"),
            Color::rgb(0, 0, 255)
        );
        renderer.clear().expect("Renderer is valid");
        renderer
            .set_draw_color(Color::rgb(255, 0, 0))
            .expect("Renderer is valid");
        renderer
            .fill_rect(Some(Rect::new(0, 0, 1, 1)))
            .expect("Renderer is valid");
        renderer.present().expect("Renderer is valid");
        drop(renderer);

        let pixels: Vec<u8> = surface.read_pixels().expect("Surface is valid");
        assert_eq!(&pixels[0..4], &[255, 0, 0, 255]);
        assert_eq!(&pixels[4..8], &[0, 0, 255, 255]);
    }

    #[test]
    fn textures() {
        let surface: Surface =
            Surface::new(2, 2, PixelFormat::RGBA32).expect("Memory should be available");
        let renderer: Renderer = surface
            .create_renderer()
            .expect("Software renderer is always available");
        let texture: Texture = renderer
            .create_texture(PixelFormat::RGBA32, TextureAccess::Static, 2, 2)
            .expect("Software renderer supports RGBA32");
        assert_eq!(
            texture.query().expect("Texture is valid"),
            TextureInfo {
                format: Some(PixelFormat::RGBA32),
                access: TextureAccess::Static,
                width: 2,
                height: 2,
            }
        );
        texture
            .set_blend_mode(BlendMode::Add)
            .expect("Texture is valid");
        assert_eq!(
            texture.blend_mode().expect("Texture is valid"),
            Some(BlendMode::Add)
        );
        texture.set_alpha_mod(128).expect("Texture is valid");
        assert_eq!(texture.alpha_mod().expect("Texture is valid"), 128);

        assert!(matches!(
            texture.update(None, &[0; 8], 8),
            Err(Error::InvalidArgument(_))
        ));
        texture
            .update(Some(Rect::new(0, 0, 2, 1)), &[7; 8], 8)
            .expect("Pixels cover the rectangle");
        assert!(matches!(
            texture.update(None, &[0; 16], usize::MAX),
            Err(Error::InvalidArgument(_))
        ));

        let from_surface: Texture = renderer
            .create_texture_from_surface(&surface)
            .expect("Surface format is supported");
        assert_ne!(from_surface, texture);
    }

    #[test]
    fn empty_handle_is_rejected() {
        let handle: RendererHandle = RendererHandle::null();
        assert!(matches!(
            handle.clear(),
            Err(Error::NullResource { kind: "renderer" })
        ));
    }
}
