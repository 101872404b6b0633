//! `resourcecore::surfaces` submodule implements software pixel buffers: [`Surface`] owner and [`SurfaceHandle`].
//!
//! Surfaces live in main memory, so (unlike textures) they can be created, drawn on
//! and read without any window or video subsystem.
//!

use super::pixels::{rect_ptr, sys_rect, Color, PixelFormat, Rect};
use crate::{
    error::{Error, Result},
    ffi::{c_path, check, to_c_int},
    ownership::{native_resource, BasicResource, Owner, Ownership},
    Context,
};
use sdl2::sys::{
    image::{IMG_Load, IMG_SavePNG},
    SDL_ConvertSurfaceFormat, SDL_CreateRGBSurfaceWithFormat, SDL_DuplicateSurface, SDL_FillRect,
    SDL_FreeSurface, SDL_LockSurface, SDL_MapRGBA, SDL_RWFromFile, SDL_Rect, SDL_SaveBMP_RW,
    SDL_Surface, SDL_UnlockSurface, SDL_UpperBlit,
};
use std::{os::raw::c_int, path::Path, ptr, slice};

native_resource! {
    /// [`SurfaceKind`] marks software surfaces (`SDL_Surface`).
    ///
    SurfaceKind => SDL_Surface, "surface", SDL_FreeSurface;
    /// [`Surface`] owns a software pixel buffer.
    ///
    Surface;
    /// [`SurfaceHandle`] references a surface without owning it
    /// (window surfaces and surfaces owned by other libraries are handed out as handles).
    ///
    SurfaceHandle;
}

impl Surface {
    /// Creates surface of given size and format filled with zeroes.
    ///
    /// # Example
    /// ```rust
    /// # use ggsdl::resourcecore::{pixels::{Color, PixelFormat, Rect}, surfaces::Surface};
    /// let surface: Surface = Surface::new(4, 2, PixelFormat::RGBA32).expect("Memory should be available");
    /// surface.fill_rect(Some(Rect::new(0, 0, 2, 2)), Color::WHITE).expect("Surface is valid");
    /// let pixels: Vec<u8> = surface.read_pixels().expect("Surface is valid");
    /// assert_eq!(&pixels[0..4], &[255, 255, 255, 255]);
    /// assert_eq!(&pixels[8..12], &[0, 0, 0, 0]);
    /// ```
    ///
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Surface> {
        let (width, height) = (
            to_c_int(width, "surface width")?,
            to_c_int(height, "surface height")?,
        );
        unsafe {
            Owner::acquire(SDL_CreateRGBSurfaceWithFormat(
                0,
                width,
                height,
                format.bits_per_pixel() as c_int,
                format.to_raw(),
            ))
        }
    }
    /// Loads surface from image file (BMP, and every format SDL_image was initialized with).
    ///
    pub fn load(context: &Context, path: impl AsRef<Path>) -> Result<Surface> {
        if !context.has_images() {
            return Err(Error::Uninitialized("image"));
        }
        let path = c_path(path.as_ref())?;
        unsafe { Owner::acquire(IMG_Load(path.as_ptr())) }
    }
}
impl<O: Ownership> BasicResource<SurfaceKind, O> {
    /// Returns width of the surface in pixels.
    ///
    pub fn width(&self) -> Result<u32> {
        Ok(unsafe { (*self.get()?).w }.unsigned_abs())
    }
    /// Returns height of the surface in pixels.
    ///
    pub fn height(&self) -> Result<u32> {
        Ok(unsafe { (*self.get()?).h }.unsigned_abs())
    }
    /// Returns length of one row of pixels in bytes (might be bigger than `width * bytes_per_pixel`).
    ///
    pub fn pitch(&self) -> Result<usize> {
        Ok(unsafe { (*self.get()?).pitch }.unsigned_abs() as usize)
    }
    /// Returns pixel format of the surface (`None` if it is not listed in [`PixelFormat`]).
    ///
    pub fn format(&self) -> Result<Option<PixelFormat>> {
        let format = unsafe { (*self.get()?).format };
        if format.is_null() {
            return Ok(None);
        }
        Ok(PixelFormat::from_raw(unsafe { (*format).format }))
    }

    /// Fills rectangle (`None` is the whole surface) with given color.
    ///
    pub fn fill_rect(&self, rect: Option<Rect>, color: Color) -> Result<()> {
        let surface: *mut SDL_Surface = self.unlocked()?;
        let rect: Option<SDL_Rect> = sys_rect(rect)?;
        let _ = check("SDL_FillRect", unsafe {
            let pixel: u32 = SDL_MapRGBA((*surface).format, color.r, color.g, color.b, color.a);
            SDL_FillRect(surface, rect_ptr(&rect), pixel)
        })?;
        Ok(())
    }
    /// Copies `source` rectangle of this surface onto `target` surface at `destination` position.
    ///
    /// `None` source is the whole surface; `None` destination is the upper left corner of `target`.
    /// Only position of `destination` is used (blit does not scale).
    ///
    pub fn blit<P: Ownership>(
        &self,
        source: Option<Rect>,
        target: &BasicResource<SurfaceKind, P>,
        destination: Option<Rect>,
    ) -> Result<()> {
        let source: Option<SDL_Rect> = sys_rect(source)?;
        let mut destination: Option<SDL_Rect> = sys_rect(destination)?;
        let destination_ptr: *mut SDL_Rect = destination
            .as_mut()
            .map_or(ptr::null_mut(), ptr::from_mut);
        let _ = check("SDL_BlitSurface", unsafe {
            SDL_UpperBlit(self.unlocked()?, rect_ptr(&source), target.unlocked()?, destination_ptr)
        })?;
        Ok(())
    }

    /// Returns wrapped pointer or [`Error::Locked`] if pixel data of the surface is being accessed.
    ///
    fn unlocked(&self) -> Result<*mut SDL_Surface> {
        let surface: *mut SDL_Surface = self.get()?;
        if unsafe { (*surface).locked } != 0 {
            return Err(Error::Locked { kind: "surface" });
        }
        Ok(surface)
    }
    /// Locks the surface and returns its pixel data (null for surfaces without pixels) and its length.
    ///
    fn lock(&self) -> Result<(*mut SDL_Surface, *mut u8, usize)> {
        let surface: *mut SDL_Surface = self.unlocked()?;
        let _ = check("SDL_LockSurface", unsafe { SDL_LockSurface(surface) })?;
        let (pixels, length) = unsafe {
            (
                (*surface).pixels.cast::<u8>(),
                (*surface).pitch.unsigned_abs() as usize * (*surface).h.unsigned_abs() as usize,
            )
        };
        Ok((surface, pixels, length))
    }

    /// Applies function to raw pixel data of the surface and returns its result.
    ///
    /// Surface is locked while `f` runs; rows are `pitch` bytes long.
    /// Surface that is already locked (accessing it from inside of `f`) returns [`Error::Locked`].
    ///
    /// # Example
    /// ```rust
    /// # use ggsdl::{error::Error, resourcecore::{pixels::PixelFormat, surfaces::Surface}};
    /// let surface: Surface = Surface::new(2, 2, PixelFormat::RGBA32).expect("Memory should be available");
    /// let nested = surface
    ///     .with_pixels(|_| surface.handle().with_pixels(|pixels| pixels.len()))
    ///     .expect("Surface is valid");
    /// assert!(matches!(nested, Err(Error::Locked { kind: "surface" })));
    /// ```
    ///
    pub fn with_pixels<T>(&self, f: impl FnOnce(&[u8]) -> T) -> Result<T> {
        let (surface, pixels, length) = self.lock()?;
        let result: T = if pixels.is_null() {
            f(&[])
        } else {
            f(unsafe { slice::from_raw_parts(pixels, length) })
        };
        unsafe { SDL_UnlockSurface(surface) };
        Ok(result)
    }
    /// Applies function to mutable raw pixel data of the surface and returns its result.
    ///
    /// Surface is locked while `f` runs; rows are `pitch` bytes long.
    /// Surface that is already locked returns [`Error::Locked`].
    ///
    pub fn with_pixels_mut<T>(&mut self, f: impl FnOnce(&mut [u8]) -> T) -> Result<T> {
        let (surface, pixels, length) = self.lock()?;
        let result: T = if pixels.is_null() {
            f(&mut [])
        } else {
            f(unsafe { slice::from_raw_parts_mut(pixels, length) })
        };
        unsafe { SDL_UnlockSurface(surface) };
        Ok(result)
    }
    /// Copies pixel data of the surface row by row (without row padding).
    ///
    pub fn read_pixels(&self) -> Result<Vec<u8>> {
        let row: usize = self.width()? as usize
            * self
                .format()?
                .map_or(4, PixelFormat::bytes_per_pixel);
        let pitch: usize = self.pitch()?;
        self.with_pixels(|pixels| {
            pixels
                .chunks(pitch.max(1))
                .flat_map(|line| &line[..row.min(line.len())])
                .copied()
                .collect()
        })
    }

    /// Copies the surface into a new owner.
    ///
    /// Result is always an owner, whether this surface is an owner or a handle.
    ///
    pub fn duplicate(&self) -> Result<Surface> {
        unsafe { Owner::acquire(SDL_DuplicateSurface(self.get()?)) }
    }
    /// Copies the surface into a new owner with different pixel format.
    ///
    pub fn convert(&self, format: PixelFormat) -> Result<Surface> {
        unsafe {
            Owner::acquire(SDL_ConvertSurfaceFormat(
                self.get()?,
                format.to_raw(),
                0,
            ))
        }
    }

    /// Saves the surface as BMP image.
    ///
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<()> {
        let surface: *mut SDL_Surface = self.get()?;
        let path = c_path(path.as_ref())?;
        let stream = unsafe { SDL_RWFromFile(path.as_ptr(), b"wb\0".as_ptr().cast()) };
        if stream.is_null() {
            return Err(Error::native("SDL_RWFromFile"));
        }
        let _ = check("SDL_SaveBMP", unsafe { SDL_SaveBMP_RW(surface, stream, 1) })?;
        Ok(())
    }
    /// Saves the surface as PNG image.
    ///
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let surface: *mut SDL_Surface = self.get()?;
        let path = c_path(path.as_ref())?;
        let _ = check("IMG_SavePNG", unsafe {
            IMG_SavePNG(surface.cast(), path.as_ptr())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Surface, SurfaceHandle};
    use crate::{
        error::Error,
        resourcecore::pixels::{Color, PixelFormat, Rect},
    };

    #[test]
    fn create_and_fill() {
        let surface: Surface =
            Surface::new(3, 2, PixelFormat::RGBA32).expect("Memory should be available");
        assert_eq!(surface.width().expect("Surface is valid"), 3);
        assert_eq!(surface.height().expect("Surface is valid"), 2);
        assert!(surface.pitch().expect("Surface is valid") >= 12);
        assert_eq!(
            surface.format().expect("Surface is valid"),
            Some(PixelFormat::RGBA32)
        );

        surface
            .fill_rect(None, Color::rgba(1, 2, 3, 4))
            .expect("Surface is valid");
        surface
            .fill_rect(Some(Rect::new(2, 1, 1, 1)), Color::rgb(9, 8, 7))
            .expect("Surface is valid");
        let pixels: Vec<u8> = surface.read_pixels().expect("Surface is valid");
        assert_eq!(pixels.len(), 3 * 2 * 4);
        assert_eq!(&pixels[0..4], &[1, 2, 3, 4]);
        assert_eq!(&pixels[20..24], &[9, 8, 7, 255]);
    }

    #[test]
    fn pixel_access_is_exclusive() {
        let mut surface: Surface =
            Surface::new(2, 1, PixelFormat::RGBA32).expect("Memory should be available");
        surface
            .with_pixels_mut(|pixels| pixels[0..4].copy_from_slice(&[5, 6, 7, 8]))
            .expect("Surface is valid");
        assert_eq!(
            surface
                .with_pixels(|pixels| pixels[0..4].to_vec())
                .expect("Surface is valid"),
            vec![5, 6, 7, 8]
        );

        let handle: SurfaceHandle = surface.handle();
        let mut alias: SurfaceHandle = handle.clone();
        let nested = handle
            .with_pixels(|_| alias.with_pixels_mut(|pixels| pixels.len()))
            .expect("Surface is valid");
        assert!(matches!(nested, Err(Error::Locked { kind: "surface" })));
        let filled = handle
            .with_pixels(|_| handle.fill_rect(None, Color::WHITE))
            .expect("Surface is valid");
        assert!(matches!(filled, Err(Error::Locked { kind: "surface" })));

        assert_eq!(
            handle.read_pixels().expect("Lock was released"),
            vec![5, 6, 7, 8, 0, 0, 0, 0]
        );
    }

    #[test]
    fn duplicate_is_owner() {
        let surface: Surface =
            Surface::new(2, 2, PixelFormat::RGBA32).expect("Memory should be available");
        surface
            .fill_rect(None, Color::WHITE)
            .expect("Surface is valid");
        let handle: SurfaceHandle = surface.handle();
        let copy: Surface = handle.duplicate().expect("Memory should be available");
        assert!(copy.is_owning());
        assert_ne!(copy, surface);
        drop(handle);
        drop(surface);
        assert_eq!(
            copy.read_pixels().expect("Copy outlives original"),
            vec![255; 16]
        );
    }

    #[test]
    fn blit_and_convert() {
        let source: Surface =
            Surface::new(2, 2, PixelFormat::RGBA32).expect("Memory should be available");
        source
            .fill_rect(None, Color::rgb(10, 20, 30))
            .expect("Surface is valid");
        let target: Surface =
            Surface::new(4, 4, PixelFormat::RGBA32).expect("Memory should be available");
        source
            .blit(None, &target.handle(), Some(Rect::new(2, 2, 0, 0)))
            .expect("Both surfaces are valid");
        let pixels: Vec<u8> = target.read_pixels().expect("Surface is valid");
        assert_eq!(&pixels[0..4], &[0, 0, 0, 0]);
        assert_eq!(&pixels[(2 * 4 + 2) * 4..(2 * 4 + 3) * 4], &[10, 20, 30, 255]);

        let converted: Surface = target
            .convert(PixelFormat::RGB24)
            .expect("Conversion is supported");
        assert_eq!(
            converted.format().expect("Surface is valid"),
            Some(PixelFormat::RGB24)
        );
        assert_eq!(converted.read_pixels().expect("Surface is valid").len(), 4 * 4 * 3);
    }

    #[test]
    fn empty_handle_is_rejected() {
        let handle: SurfaceHandle = SurfaceHandle::null();
        assert!(matches!(
            handle.duplicate(),
            Err(Error::NullResource { kind: "surface" })
        ));
        assert!(matches!(
            Surface::new(u32::MAX, 1, PixelFormat::RGB24),
            Err(Error::InvalidArgument(_))
        ));
    }
}
