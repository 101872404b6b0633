//! `resourcecore::pixels` submodule supplies value types that describe pixel data:
//! [`Color`], [`Rect`], [`PixelFormat`], [`BlendMode`] and [`TextureAccess`].
//!
//! Enums of this submodule mirror native constants, so their discriminants are exactly
//! the values that SDL expects; those values are checked against `sdl2::sys` at compile time.
//!

use crate::{error::Result, ffi::to_c_int};
use sdl2::sys::{SDL_BlendMode, SDL_Color, SDL_PixelFormatEnum, SDL_Rect, SDL_TextureAccess};
use serde::{Deserialize, Serialize};
use std::os::raw::c_int;

/// [`Color`] struct represents RGBA color with 8 bits per channel.
///
/// # Example
/// ```rust
/// # use ggsdl::resourcecore::pixels::Color;
/// let color: Color = Color::rgb(255, 128, 0);
/// assert_eq!(color.a, 255);
/// assert_eq!(Color::from((255, 128, 0, 255)), color);
/// ```
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    ///
    pub r: u8,
    /// Green channel.
    ///
    pub g: u8,
    /// Blue channel.
    ///
    pub b: u8,
    /// Alpha channel.
    ///
    pub a: u8,
}
impl Color {
    /// Opaque black color.
    ///
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white color.
    ///
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Fully transparent color.
    ///
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Constructs opaque [`Color`].
    ///
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }
    /// Constructs [`Color`] with given alpha channel.
    ///
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns native representation of this color.
    ///
    pub(crate) fn to_sys(self) -> SDL_Color {
        SDL_Color {
            r: self.r,
            g: self.g,
            b: self.b,
            a: self.a,
        }
    }
}
impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Color { r, g, b, a }
    }
}
impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

/// [`Rect`] struct represents rectangle with integer coordinates.
///
/// `(x, y)` is the upper left corner.
///
/// # Example
/// ```rust
/// # use ggsdl::resourcecore::pixels::Rect;
/// let rect: Rect = Rect::new(10, 20, 30, 40);
/// assert_eq!(rect.right(), 40);
/// assert_eq!(rect.bottom(), 60);
/// assert!(rect.contains_point(10, 20));
/// assert!(!rect.contains_point(40, 20));
/// ```
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of upper left corner.
    ///
    pub x: i32,
    /// Vertical position of upper left corner.
    ///
    pub y: i32,
    /// Width of rectangle.
    ///
    pub width: u32,
    /// Height of rectangle.
    ///
    pub height: u32,
}
impl Rect {
    /// Constructs [`Rect`].
    ///
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns horizontal coordinate of right edge (exclusive).
    ///
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }
    /// Returns vertical coordinate of bottom edge (exclusive).
    ///
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
    /// Returns whether rectangle has zero area.
    ///
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
    /// Returns whether point lies inside of rectangle.
    ///
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < self.right()
            && i64::from(y) < self.bottom()
    }

    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns native representation of this rectangle.
    ///
    /// Fails if width or height do not fit into `c_int`.
    ///
    pub(crate) fn to_sys(self) -> Result<SDL_Rect> {
        Ok(SDL_Rect {
            x: self.x,
            y: self.y,
            w: to_c_int(self.width, "rectangle width")?,
            h: to_c_int(self.height, "rectangle height")?,
        })
    }
}

// All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
/// Converts optional rectangle into native one (`None` stays `None`).
///
pub(crate) fn sys_rect(rect: Option<Rect>) -> Result<Option<SDL_Rect>> {
    rect.map(Rect::to_sys).transpose()
}
// All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
/// Returns pointer to optional native rectangle (null for `None`).
///
pub(crate) fn rect_ptr(rect: &Option<SDL_Rect>) -> *const SDL_Rect {
    rect.as_ref().map_or(std::ptr::null(), std::ptr::from_ref)
}

/// `pixel_formats` macro declares [`PixelFormat`] enum together with conversion from native values.
///
macro_rules! pixel_formats {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        /// [`PixelFormat`] enum lists formats of pixel data that `ggsdl` works with.
        ///
        /// Discriminants are values of native `SDL_PixelFormatEnum`.
        ///
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u32)]
        pub enum PixelFormat {
            $($(#[$meta])* $name = $value,)*
        }
        impl PixelFormat {
            /// Converts native value into [`PixelFormat`].
            ///
            /// Formats that are not listed in [`PixelFormat`] (indexed, YUV, ...) produce `None`.
            ///
            pub fn from_raw(value: u32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$name),)*
                    _ => None,
                }
            }
        }
    };
}
pixel_formats! {
    /// RGB332 format.
    ///
    RGB332 = 336_660_481,
    /// RGB444 format.
    ///
    RGB444 = 353_504_258,
    /// RGB555 format.
    ///
    RGB555 = 353_570_562,
    /// BGR555 format.
    ///
    BGR555 = 357_764_866,
    /// RGB565 format.
    ///
    RGB565 = 353_701_890,
    /// BGR565 format.
    ///
    BGR565 = 357_896_194,
    /// ARGB4444 format.
    ///
    ARGB4444 = 355_602_434,
    /// RGBA4444 format.
    ///
    RGBA4444 = 356_651_010,
    /// ABGR4444 format.
    ///
    ABGR4444 = 359_796_738,
    /// BGRA4444 format.
    ///
    BGRA4444 = 360_845_314,
    /// ARGB1555 format.
    ///
    ARGB1555 = 355_667_970,
    /// RGBA5551 format.
    ///
    RGBA5551 = 356_782_082,
    /// ABGR1555 format.
    ///
    ABGR1555 = 359_862_274,
    /// BGRA5551 format.
    ///
    BGRA5551 = 360_976_386,
    /// RGB24 format.
    ///
    RGB24 = 386_930_691,
    /// BGR24 format.
    ///
    BGR24 = 390_076_419,
    /// RGB888 format.
    ///
    RGB888 = 370_546_692,
    /// BGR888 format.
    ///
    BGR888 = 374_740_996,
    /// RGBX8888 format.
    ///
    RGBX8888 = 371_595_268,
    /// BGRX8888 format.
    ///
    BGRX8888 = 375_789_572,
    /// ARGB8888 format.
    ///
    ARGB8888 = 372_645_892,
    /// RGBA8888 format.
    ///
    RGBA8888 = 373_694_468,
    /// ABGR8888 format.
    ///
    ABGR8888 = 376_840_196,
    /// BGRA8888 format.
    ///
    BGRA8888 = 377_888_772,
    /// ARGB2101010 format.
    ///
    ARGB2101010 = 372_711_428,
}
const _: () = {
    assert!(PixelFormat::RGB565 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGB565 as u32);
    assert!(PixelFormat::RGB24 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGB24 as u32);
    assert!(PixelFormat::BGR24 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_BGR24 as u32);
    assert!(PixelFormat::ARGB8888 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_ARGB8888 as u32);
    assert!(PixelFormat::RGBA8888 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGBA8888 as u32);
    assert!(PixelFormat::ABGR8888 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_ABGR8888 as u32);
    assert!(PixelFormat::BGRA8888 as u32 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_BGRA8888 as u32);
};
#[cfg(target_endian = "little")]
impl PixelFormat {
    /// 32 bit format with R, G, B, A bytes in memory order.
    ///
    pub const RGBA32: Self = Self::ABGR8888;
    /// 32 bit format with A, R, G, B bytes in memory order.
    ///
    pub const ARGB32: Self = Self::BGRA8888;
}
#[cfg(target_endian = "big")]
impl PixelFormat {
    /// 32 bit format with R, G, B, A bytes in memory order.
    ///
    pub const RGBA32: Self = Self::RGBA8888;
    /// 32 bit format with A, R, G, B bytes in memory order.
    ///
    pub const ARGB32: Self = Self::ARGB8888;
}
impl PixelFormat {
    /// Returns native value of this format.
    ///
    pub fn to_raw(self) -> u32 {
        self as u32
    }
    /// Returns how many bytes one pixel takes.
    ///
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::RGB332 => 1,
            Self::RGB24 | Self::BGR24 => 3,
            Self::RGB888
            | Self::BGR888
            | Self::RGBX8888
            | Self::BGRX8888
            | Self::ARGB8888
            | Self::RGBA8888
            | Self::ABGR8888
            | Self::BGRA8888
            | Self::ARGB2101010 => 4,
            _ => 2,
        }
    }
    /// Returns how many bits one pixel takes (excluding padding).
    ///
    pub fn bits_per_pixel(self) -> u32 {
        (self.to_raw() >> 8) & 0xFF
    }
    /// Returns whether format has alpha channel.
    ///
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::ARGB4444
                | Self::RGBA4444
                | Self::ABGR4444
                | Self::BGRA4444
                | Self::ARGB1555
                | Self::RGBA5551
                | Self::ABGR1555
                | Self::BGRA5551
                | Self::ARGB8888
                | Self::RGBA8888
                | Self::ABGR8888
                | Self::BGRA8888
                | Self::ARGB2101010
        )
    }
}

/// [`BlendMode`] enum lists how colors are combined when drawing.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum BlendMode {
    /// No blending: `dst = src`.
    ///
    #[default]
    None = 0x0000_0000,
    /// Alpha blending.
    ///
    Blend = 0x0000_0001,
    /// Additive blending.
    ///
    Add = 0x0000_0002,
    /// Color modulation.
    ///
    Mod = 0x0000_0004,
    /// Color multiplication.
    ///
    Mul = 0x0000_0008,
}
const _: () = {
    assert!(BlendMode::None as u32 == SDL_BlendMode::SDL_BLENDMODE_NONE as u32);
    assert!(BlendMode::Blend as u32 == SDL_BlendMode::SDL_BLENDMODE_BLEND as u32);
    assert!(BlendMode::Add as u32 == SDL_BlendMode::SDL_BLENDMODE_ADD as u32);
    assert!(BlendMode::Mod as u32 == SDL_BlendMode::SDL_BLENDMODE_MOD as u32);
    assert!(BlendMode::Mul as u32 == SDL_BlendMode::SDL_BLENDMODE_MUL as u32);
};
impl BlendMode {
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns native representation of this mode.
    ///
    pub(crate) fn to_sys(self) -> SDL_BlendMode {
        match self {
            BlendMode::None => SDL_BlendMode::SDL_BLENDMODE_NONE,
            BlendMode::Blend => SDL_BlendMode::SDL_BLENDMODE_BLEND,
            BlendMode::Add => SDL_BlendMode::SDL_BLENDMODE_ADD,
            BlendMode::Mod => SDL_BlendMode::SDL_BLENDMODE_MOD,
            BlendMode::Mul => SDL_BlendMode::SDL_BLENDMODE_MUL,
        }
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Converts native mode into [`BlendMode`] (custom modes produce `None`).
    ///
    pub(crate) fn from_sys(mode: SDL_BlendMode) -> Option<Self> {
        Some(match mode {
            SDL_BlendMode::SDL_BLENDMODE_NONE => BlendMode::None,
            SDL_BlendMode::SDL_BLENDMODE_BLEND => BlendMode::Blend,
            SDL_BlendMode::SDL_BLENDMODE_ADD => BlendMode::Add,
            SDL_BlendMode::SDL_BLENDMODE_MOD => BlendMode::Mod,
            SDL_BlendMode::SDL_BLENDMODE_MUL => BlendMode::Mul,
            _ => return None,
        })
    }
}

/// [`TextureAccess`] enum lists how texture's pixels can be changed.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TextureAccess {
    /// Changes rarely, not lockable.
    ///
    #[default]
    Static = 0,
    /// Changes frequently, lockable.
    ///
    Streaming = 1,
    /// Can be used as a render target.
    ///
    Target = 2,
}
const _: () = {
    assert!(TextureAccess::Static as i32 == SDL_TextureAccess::SDL_TEXTUREACCESS_STATIC as i32);
    assert!(
        TextureAccess::Streaming as i32 == SDL_TextureAccess::SDL_TEXTUREACCESS_STREAMING as i32
    );
    assert!(TextureAccess::Target as i32 == SDL_TextureAccess::SDL_TEXTUREACCESS_TARGET as i32);
};
impl TextureAccess {
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns native value of this access mode.
    ///
    pub(crate) fn to_raw(self) -> c_int {
        self as c_int
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Converts native value into [`TextureAccess`].
    ///
    pub(crate) fn from_raw(value: c_int) -> Option<Self> {
        match value {
            0 => Some(TextureAccess::Static),
            1 => Some(TextureAccess::Streaming),
            2 => Some(TextureAccess::Target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sys_rect, BlendMode, Color, PixelFormat, Rect, TextureAccess};
    use crate::error::Error;

    #[test]
    fn pixel_formats() {
        for format in [
            PixelFormat::RGB332,
            PixelFormat::RGB565,
            PixelFormat::RGB24,
            PixelFormat::ARGB8888,
            PixelFormat::ARGB2101010,
        ] {
            assert_eq!(PixelFormat::from_raw(format.to_raw()), Some(format));
        }
        assert_eq!(PixelFormat::from_raw(0), None);

        assert_eq!(PixelFormat::RGB332.bits_per_pixel(), 8);
        assert_eq!(PixelFormat::RGB565.bits_per_pixel(), 16);
        assert_eq!(PixelFormat::RGB24.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::RGB888.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::RGB888.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::RGBA32.bytes_per_pixel(), 4);
        assert!(PixelFormat::RGBA32.has_alpha());
        assert!(!PixelFormat::BGR24.has_alpha());
    }

    #[test]
    fn modes() {
        for mode in [
            BlendMode::None,
            BlendMode::Blend,
            BlendMode::Add,
            BlendMode::Mod,
            BlendMode::Mul,
        ] {
            assert_eq!(BlendMode::from_sys(mode.to_sys()), Some(mode));
        }
        assert_eq!(TextureAccess::from_raw(TextureAccess::Target.to_raw()), Some(TextureAccess::Target));
        assert_eq!(TextureAccess::from_raw(3), None);
    }

    #[test]
    fn rects() {
        let rect: Rect = Rect::new(-5, 5, 10, 10);
        assert!(rect.contains_point(-5, 14));
        assert!(!rect.contains_point(5, 5));
        assert!(!rect.is_empty());
        assert!(Rect::default().is_empty());

        let native = rect.to_sys().expect("Rectangle fits into `c_int`");
        assert_eq!((native.x, native.y, native.w, native.h), (-5, 5, 10, 10));
        assert!(sys_rect(None).expect("Nothing to convert").is_none());
        assert!(matches!(
            Rect::new(0, 0, u32::MAX, 1).to_sys(),
            Err(Error::InvalidArgument(_))
        ));

        let color = Color::rgba(1, 2, 3, 4).to_sys();
        assert_eq!((color.r, color.g, color.b, color.a), (1, 2, 3, 4));
    }
}
