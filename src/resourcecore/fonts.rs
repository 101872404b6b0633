//! `resourcecore::fonts` submodule implements truetype fonts (SDL_ttf): [`Font`] owner and [`FontHandle`].
//!
//! Text is rendered into [`Surface`]s in one of [`TextRendering`] modes;
//! [`TextCache`] keeps rendered surfaces around so that text that is drawn every frame
//! is rendered only once.
//!
//! ## Important
//! This module works **ONLY** with truetype fonts.
//!

use super::{
    pixels::Color,
    surfaces::{Surface, SurfaceHandle},
};
use crate::{
    error::{Error, Result},
    ffi::{c_path, c_string, check, string_from, to_c_int},
    ownership::{native_resource, BasicResource, Owner, Ownership, Owning},
    Context,
};
use bitflags::bitflags;
use log::trace;
use sdl2::sys::ttf::{
    TTF_CloseFont, TTF_Font, TTF_FontAscent, TTF_FontDescent, TTF_FontFaceFamilyName,
    TTF_FontFaceIsFixedWidth, TTF_FontFaceStyleName, TTF_FontFaces, TTF_FontHeight,
    TTF_FontLineSkip, TTF_GetFontHinting, TTF_GetFontKerning, TTF_GetFontOutline,
    TTF_GetFontStyle, TTF_GlyphIsProvided, TTF_GlyphMetrics, TTF_OpenFont,
    TTF_RenderUTF8_Blended, TTF_RenderUTF8_Blended_Wrapped, TTF_RenderUTF8_Shaded,
    TTF_RenderUTF8_Solid, TTF_SetFontHinting, TTF_SetFontKerning, TTF_SetFontOutline,
    TTF_SetFontStyle, TTF_SizeUTF8,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, os::raw::c_int, path::Path};

native_resource! {
    /// [`FontKind`] marks truetype fonts (`TTF_Font`).
    ///
    FontKind => TTF_Font, "font", TTF_CloseFont;
    /// [`Font`] owns an opened font.
    ///
    /// # Drop order
    /// Font borrows [`Context`] that initialized SDL_ttf, so it cannot outlive it:
    /// ```rust, compile_fail
    /// # use ggsdl::{Context, ContextSettings, resourcecore::fonts::Font};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let font: Font = Font::open(&context, "font.ttf", 14).expect("Filename should be correct");
    /// drop(context);
    /// drop(font);
    /// ```
    ///
    Font<'ctx>;
    /// [`FontHandle`] references a font without owning it.
    ///
    FontHandle;
}

bitflags! {
    /// [`FontStyle`] bitflag struct lists truetype font styles.
    ///
    /// Empty set is the normal style.
    ///
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontStyle: u32 {
        /// Bold font.
        ///
        const BOLD = 1 << 0;
        /// Italic font.
        ///
        const ITALIC = 1 << 1;
        /// Underline font.
        ///
        const UNDERLINE = 1 << 2;
        /// Strikethrough font.
        ///
        const STRIKETHROUGH = 1 << 3;
    }
}
/// [`FontHinting`] enum lists possible hintings for truetype fonts.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontHinting {
    /// Normal hinting.
    ///
    #[default]
    Normal = 0,
    /// Light hinting.
    ///
    Light = 1,
    /// Monochrome hinting.
    ///
    Mono = 2,
    /// No hinting.
    ///
    Nothing = 3,
}
impl FontHinting {
    /// Converts native value into [`FontHinting`] (unknown values fall back to `Normal`).
    ///
    fn from_raw(value: c_int) -> Self {
        match value {
            1 => FontHinting::Light,
            2 => FontHinting::Mono,
            3 => FontHinting::Nothing,
            _ => FontHinting::Normal,
        }
    }
}

/// [`TextRendering`] enum lists possible modes for rendering text.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRendering {
    /// Single line with given color.
    ///
    /// Text is not anti-aliased and is rendered into 8-bit surface.
    ///
    Solid {
        /// Color of the text.
        ///
        color: Color,
    },
    /// Single line on a background with given colors.
    ///
    /// Text is anti-aliased and is rendered into 8-bit surface.
    ///
    Shaded {
        /// Color of the text.
        ///
        color: Color,
        /// Color of the background.
        ///
        background: Color,
    },
    /// Single line that is alpha blended with given color.
    ///
    /// Text is anti-aliased and is rendered into 32-bit surface.
    ///
    Blended {
        /// Color of the text.
        ///
        color: Color,
    },
    /// Multiple lines that are alpha blended with given color.
    ///
    /// Lines that are wider than `wrap_width` pixels are wrapped.
    ///
    BlendedWrapped {
        /// Color of the text.
        ///
        color: Color,
        /// Maximal width of a line in pixels.
        ///
        wrap_width: u32,
    },
}

/// [`GlyphMetrics`] struct stores information about one glyph of a font.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphMetrics {
    /// Minimal horizontal coordinate.
    ///
    pub min_x: i32,
    /// Maximal horizontal coordinate.
    ///
    pub max_x: i32,
    /// Minimal vertical coordinate.
    ///
    pub min_y: i32,
    /// Maximal vertical coordinate.
    ///
    pub max_y: i32,
    /// Advance of the glyph.
    ///
    pub advance: i32,
}

/// Returns UCS-2 code of the character (SDL_ttf glyph functions do not support characters outside of BMP).
///
fn glyph_code(character: char) -> Result<u16> {
    u16::try_from(u32::from(character)).map_err(|_| {
        Error::InvalidArgument(format!("character {character:?} is outside of the basic plane"))
    })
}

impl<'ctx> Font<'ctx> {
    /// Opens font file with given point size.
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, resourcecore::{fonts::{Font, TextRendering}, pixels::Color, surfaces::Surface}};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let font: Font = Font::open(&context, "font.ttf", 14).expect("Filename should be correct");
    /// let text: Surface = font
    ///     .render("ggsdl", TextRendering::Solid { color: Color::BLACK })
    ///     .expect("Rendering should not fail");
    /// ```
    ///
    pub fn open(
        context: &'ctx Context,
        path: impl AsRef<Path>,
        point_size: u32,
    ) -> Result<Font<'ctx>> {
        context.require_fonts()?;
        let path = c_path(path.as_ref())?;
        let point_size: c_int = to_c_int(point_size, "point size")?;
        unsafe { Owner::acquire(TTF_OpenFont(path.as_ptr(), point_size)) }
    }
}
impl<O: Ownership> BasicResource<FontKind, O> {
    /// Returns maximal height of the font's glyphs.
    ///
    pub fn height(&self) -> Result<u32> {
        Ok(unsafe { TTF_FontHeight(self.get()?) }.unsigned_abs())
    }
    /// Returns highest ascent (height above base).
    ///
    pub fn ascent(&self) -> Result<i32> {
        Ok(unsafe { TTF_FontAscent(self.get()?) })
    }
    /// Returns lowest descent (height below base, usually negative).
    ///
    pub fn descent(&self) -> Result<i32> {
        Ok(unsafe { TTF_FontDescent(self.get()?) })
    }
    /// Returns recommended spacing between lines.
    ///
    pub fn line_skip(&self) -> Result<i32> {
        Ok(unsafe { TTF_FontLineSkip(self.get()?) })
    }
    /// Returns number of faces in the font file.
    ///
    pub fn face_count(&self) -> Result<u32> {
        Ok(u32::try_from(unsafe { TTF_FontFaces(self.get()?) }).unwrap_or(0))
    }
    /// Returns whether current face is monospaced.
    ///
    pub fn is_fixed_width(&self) -> Result<bool> {
        Ok(unsafe { TTF_FontFaceIsFixedWidth(self.get()?) } > 0)
    }
    /// Returns family name of current face.
    ///
    pub fn family_name(&self) -> Result<Option<String>> {
        Ok(unsafe { string_from(TTF_FontFaceFamilyName(self.get()?)) })
    }
    /// Returns style name of current face.
    ///
    pub fn style_name(&self) -> Result<Option<String>> {
        Ok(unsafe { string_from(TTF_FontFaceStyleName(self.get()?)) })
    }

    /// Returns current style of the font.
    ///
    pub fn style(&self) -> Result<FontStyle> {
        let style: c_int = unsafe { TTF_GetFontStyle(self.get()?) };
        Ok(FontStyle::from_bits_truncate(style.unsigned_abs()))
    }
    /// Sets style of the font (this flushes SDL_ttf's internal glyph cache).
    ///
    pub fn set_style(&self, style: FontStyle) -> Result<()> {
        unsafe { TTF_SetFontStyle(self.get()?, style.bits() as c_int) };
        Ok(())
    }
    /// Returns current hinting of the font.
    ///
    pub fn hinting(&self) -> Result<FontHinting> {
        Ok(FontHinting::from_raw(unsafe {
            TTF_GetFontHinting(self.get()?)
        }))
    }
    /// Sets hinting of the font.
    ///
    pub fn set_hinting(&self, hinting: FontHinting) -> Result<()> {
        unsafe { TTF_SetFontHinting(self.get()?, hinting as c_int) };
        Ok(())
    }
    /// Returns whether kerning is enabled.
    ///
    pub fn kerning(&self) -> Result<bool> {
        Ok(unsafe { TTF_GetFontKerning(self.get()?) } != 0)
    }
    /// Enables or disables kerning.
    ///
    pub fn set_kerning(&self, kerning: bool) -> Result<()> {
        unsafe { TTF_SetFontKerning(self.get()?, c_int::from(kerning)) };
        Ok(())
    }
    /// Returns outline width in pixels (0 is no outline).
    ///
    pub fn outline(&self) -> Result<u32> {
        Ok(unsafe { TTF_GetFontOutline(self.get()?) }.unsigned_abs())
    }
    /// Sets outline width in pixels.
    ///
    pub fn set_outline(&self, outline: u32) -> Result<()> {
        let outline: c_int = to_c_int(outline, "outline width")?;
        unsafe { TTF_SetFontOutline(self.get()?, outline) };
        Ok(())
    }

    /// Returns whether the font has a glyph for the character.
    ///
    pub fn has_glyph(&self, character: char) -> Result<bool> {
        let code: u16 = glyph_code(character)?;
        Ok(unsafe { TTF_GlyphIsProvided(self.get()?, code) } != 0)
    }
    /// Returns metrics of the character's glyph.
    ///
    pub fn glyph_metrics(&self, character: char) -> Result<GlyphMetrics> {
        let code: u16 = glyph_code(character)?;
        let mut metrics: GlyphMetrics = GlyphMetrics::default();
        let _ = check("TTF_GlyphMetrics", unsafe {
            TTF_GlyphMetrics(
                self.get()?,
                code,
                &mut metrics.min_x,
                &mut metrics.max_x,
                &mut metrics.min_y,
                &mut metrics.max_y,
                &mut metrics.advance,
            )
        })?;
        Ok(metrics)
    }
    /// Returns size of the UTF-8 text rendered in a single line.
    ///
    pub fn text_size(&self, text: &str) -> Result<(u32, u32)> {
        let text = c_string(text)?;
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        let _ = check("TTF_SizeUTF8", unsafe {
            TTF_SizeUTF8(self.get()?, text.as_ptr(), &mut width, &mut height)
        })?;
        Ok((width.unsigned_abs(), height.unsigned_abs()))
    }

    /// Renders UTF-8 text into new surface.
    ///
    /// Empty text cannot be rendered; SDL_ttf reports it as an error.
    ///
    pub fn render(&self, text: &str, mode: TextRendering) -> Result<Surface> {
        let font: *mut TTF_Font = self.get()?;
        let text = c_string(text)?;
        let surface = unsafe {
            match mode {
                TextRendering::Solid { color } => {
                    TTF_RenderUTF8_Solid(font, text.as_ptr(), color.to_sys())
                }
                TextRendering::Shaded { color, background } => TTF_RenderUTF8_Shaded(
                    font,
                    text.as_ptr(),
                    color.to_sys(),
                    background.to_sys(),
                ),
                TextRendering::Blended { color } => {
                    TTF_RenderUTF8_Blended(font, text.as_ptr(), color.to_sys())
                }
                TextRendering::BlendedWrapped { color, wrap_width } => {
                    TTF_RenderUTF8_Blended_Wrapped(font, text.as_ptr(), color.to_sys(), wrap_width)
                }
            }
        };
        unsafe { Owner::acquire(surface.cast()) }
    }
}
impl<'ctx> BasicResource<FontKind, Owning<'ctx>> {
    /// Creates cache of rendered text that references this font.
    ///
    /// Cache borrows the font, so the font outlives every surface it hands out.
    /// Only owners create caches:
    /// ```rust, compile_fail
    /// # use ggsdl::resourcecore::fonts::FontHandle;
    /// let handle: FontHandle = FontHandle::null();
    /// let _ = handle.text_cache();
    /// ```
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, resourcecore::{fonts::{Font, TextCache, TextRendering}, pixels::Color}};
    /// let context: Context = Context::init(&ContextSettings::default()).expect("SDL should be available");
    /// let font: Font = Font::open(&context, "font.ttf", 14).expect("Filename should be correct");
    /// let mut cache: TextCache = font.text_cache();
    /// let mode: TextRendering = TextRendering::Blended { color: Color::WHITE };
    /// let width: u32 = cache.get("score", mode).and_then(|text| text.width()).expect("Rendering should not fail");
    /// assert_eq!(cache.len(), 1);
    /// ```
    ///
    pub fn text_cache(&self) -> TextCache<'_> {
        TextCache::new(self.handle())
    }
}

/// [`TextCache`] struct stores surfaces with rendered text, keyed by text and rendering mode.
///
/// Surfaces are owned by the cache and handed out as handles that borrow it.
///
pub struct TextCache<'a> {
    /// Font that renders text.
    ///
    font: FontHandle<'a>,
    /// Rendered surfaces.
    ///
    surfaces: HashMap<(String, TextRendering), Surface>,
}
impl<'a> TextCache<'a> {
    /// Creates empty cache that renders with given font.
    ///
    pub fn new(font: FontHandle<'a>) -> Self {
        TextCache {
            font,
            surfaces: HashMap::new(),
        }
    }

    /// Returns handle of the font that renders text.
    ///
    pub fn font(&self) -> FontHandle<'a> {
        self.font.clone()
    }
    /// Returns surface with rendered text, rendering it first if it is not cached.
    ///
    pub fn get(&mut self, text: &str, mode: TextRendering) -> Result<SurfaceHandle<'_>> {
        let key: (String, TextRendering) = (String::from(text), mode);
        if !self.surfaces.contains_key(&key) {
            trace!("rendering {text:?} for text cache");
            let surface: Surface = self.font.render(text, mode)?;
            let _ = self.surfaces.insert(key.clone(), surface);
        }
        Ok(self
            .surfaces
            .get(&key)
            .map(Surface::handle)
            .unwrap_or_default())
    }
    /// Returns whether text is cached in given mode.
    ///
    pub fn contains(&self, text: &str, mode: TextRendering) -> bool {
        self.surfaces.contains_key(&(String::from(text), mode))
    }
    /// Drops cached surface of the text, returning whether it was cached.
    ///
    pub fn evict(&mut self, text: &str, mode: TextRendering) -> bool {
        self.surfaces.remove(&(String::from(text), mode)).is_some()
    }
    /// Returns number of cached surfaces.
    ///
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }
    /// Returns whether cache is empty.
    ///
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
    /// Drops all cached surfaces.
    ///
    pub fn clear(&mut self) {
        self.surfaces.clear();
    }
}
impl fmt::Debug for TextCache<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCache")
            .field("font", &self.font)
            .field("len", &self.surfaces.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{glyph_code, FontHandle, FontHinting, FontStyle, TextCache, TextRendering};
    use crate::{error::Error, resourcecore::pixels::Color};

    #[test]
    fn values() {
        assert_eq!(FontStyle::default(), FontStyle::empty());
        assert_eq!((FontStyle::BOLD | FontStyle::UNDERLINE).bits(), 0b101);
        assert_eq!(FontHinting::from_raw(2), FontHinting::Mono);
        assert_eq!(FontHinting::from_raw(42), FontHinting::Normal);
        assert_eq!(FontHinting::Nothing as i32, 3);
        assert_eq!(glyph_code('A').expect("ASCII is in BMP"), 65);
        assert!(matches!(glyph_code('🦀'), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn cache_over_empty_handle() {
        let mut cache: TextCache = TextCache::new(FontHandle::null());
        assert!(cache.is_empty());
        let mode: TextRendering = TextRendering::Solid {
            color: Color::BLACK,
        };
        assert!(matches!(
            cache.get("text", mode),
            Err(Error::NullResource { kind: "font" })
        ));
        assert!(!cache.contains("text", mode));
        assert!(!cache.evict("text", mode));
        assert_eq!(cache.len(), 0);
        assert!(cache.font().is_null());
    }
}
