//! `ggsdl::hints` module implements typed access to SDL hints.
//!
//! SDL configures many of its behaviours through string key-value pairs that are called hints.
//! `ggsdl` declares every hint it knows about as a marker type implementing [`Hint`] trait,
//! which binds the hint's name to the type of its value, so values are encoded and decoded
//! in one place.
//!
//! Hints are process-wide; most of them should be set before [`Context`](crate::Context)
//! is initialized (see [`ContextSettings::hints`](crate::ContextSettings::hints)).
//!
//! # Example
//! ```rust
//! # use ggsdl::hints::{self, RenderScaleQuality, ScaleQuality};
//! assert!(hints::set::<RenderScaleQuality>(&ScaleQuality::Linear));
//! assert_eq!(hints::get::<RenderScaleQuality>(), Some(ScaleQuality::Linear));
//! ```
//!

use crate::{error::Result, ffi::c_string};
use sdl2::hint::{
    get as sdl_get_hint, set_with_priority as sdl_set_hint_with_priority, Hint as SdlHintPriority,
};
use serde::{Deserialize, Serialize};

/// [`HintPriority`] enum lists priorities with which hints can be set.
///
/// Hint that was set with higher priority cannot be overwritten with lower one;
/// environment variables count as [`HintPriority::Normal`].
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintPriority {
    /// Lowest priority (used for defaults).
    ///
    Default,
    /// Medium priority.
    ///
    #[default]
    Normal,
    /// Highest priority.
    ///
    Override,
}
impl HintPriority {
    /// Returns `sdl2` representation of this enum.
    ///
    fn to_sdl(self) -> SdlHintPriority {
        match self {
            HintPriority::Default => SdlHintPriority::Default,
            HintPriority::Normal => SdlHintPriority::Normal,
            HintPriority::Override => SdlHintPriority::Override,
        }
    }
}

/// [`HintValue`] trait is implemented by types that hints can hold.
///
pub trait HintValue: Sized {
    /// Encodes value in the form SDL expects.
    ///
    fn encode(&self) -> String;
    /// Decodes value that SDL holds (`None` if it cannot be understood).
    ///
    fn decode(raw: &str) -> Option<Self>;
}
impl HintValue for bool {
    fn encode(&self) -> String {
        String::from(if *self { "1" } else { "0" })
    }
    fn decode(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(true),
            "0" => Some(false),
            other if other.eq_ignore_ascii_case("true") => Some(true),
            other if other.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}
impl HintValue for i32 {
    fn encode(&self) -> String {
        self.to_string()
    }
    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}
impl HintValue for String {
    fn encode(&self) -> String {
        self.clone()
    }
    fn decode(raw: &str) -> Option<Self> {
        Some(String::from(raw))
    }
}

/// [`ScaleQuality`] enum lists filtering modes of scaled textures.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleQuality {
    /// Nearest pixel sampling.
    ///
    #[default]
    Nearest,
    /// Linear filtering.
    ///
    Linear,
    /// Anisotropic filtering (only supported by Direct3D).
    ///
    Best,
}
impl HintValue for ScaleQuality {
    fn encode(&self) -> String {
        String::from(match self {
            ScaleQuality::Nearest => "nearest",
            ScaleQuality::Linear => "linear",
            ScaleQuality::Best => "best",
        })
    }
    fn decode(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" | "nearest" => Some(ScaleQuality::Nearest),
            "1" | "linear" => Some(ScaleQuality::Linear),
            "2" | "best" => Some(ScaleQuality::Best),
            _ => None,
        }
    }
}

/// [`Hint`] trait binds name of SDL hint to the type of its value.
///
pub trait Hint {
    /// Name of the hint.
    ///
    const NAME: &'static str;
    /// Type of hint's value.
    ///
    type Value: HintValue;
}
/// `hints` macro declares marker types of SDL hints.
///
macro_rules! hints {
    ($($(#[$meta:meta])* $marker:ident => $name:literal: $value:ty;)*) => {$(
        $(#[$meta])*
        #[derive(Copy, Clone, Debug)]
        pub enum $marker {}
        impl Hint for $marker {
            const NAME: &'static str = $name;
            type Value = $value;
        }
    )*};
}
hints! {
    /// Name of the application (shown by some desktop environments).
    ///
    AppName => "SDL_APP_NAME": String;
    /// Whether framebuffer of windows without renderers is accelerated.
    ///
    FramebufferAcceleration => "SDL_FRAMEBUFFER_ACCELERATION": bool;
    /// Whether joystick events are delivered while the application is in background.
    ///
    JoystickAllowBackgroundEvents => "SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS": bool;
    /// Whether relative mouse mode is implemented by warping the cursor.
    ///
    MouseRelativeModeWarp => "SDL_MOUSE_RELATIVE_MODE_WARP": bool;
    /// Preferred render driver (`"opengl"`, `"direct3d"`, `"software"`, ...).
    ///
    RenderDriver => "SDL_RENDER_DRIVER": String;
    /// Filtering of scaled textures.
    ///
    RenderScaleQuality => "SDL_RENDER_SCALE_QUALITY": ScaleQuality;
    /// Whether renderers synchronize presentation with vertical refresh.
    ///
    RenderVsync => "SDL_RENDER_VSYNC": bool;
    /// Resolution of the system timer (in milliseconds).
    ///
    TimerResolution => "SDL_TIMER_RESOLUTION": i32;
    /// Whether the screensaver is allowed while SDL video is running.
    ///
    VideoAllowScreensaver => "SDL_VIDEO_ALLOW_SCREENSAVER": bool;
    /// Whether fullscreen windows minimize when they lose focus.
    ///
    VideoMinimizeOnFocusLoss => "SDL_VIDEO_MINIMIZE_ON_FOCUS_LOSS": bool;
}

/// [`HintSetting`] struct is a hint that is stored in settings and applied later.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintSetting {
    /// Name of the hint.
    ///
    pub name: String,
    /// Encoded value of the hint.
    ///
    pub value: String,
    /// Priority with which the hint is set.
    ///
    pub priority: HintPriority,
}
impl HintSetting {
    /// Constructs [`HintSetting`] from raw name and value.
    ///
    pub fn new(name: &str, value: &str, priority: HintPriority) -> Self {
        HintSetting {
            name: String::from(name),
            value: String::from(value),
            priority,
        }
    }
    /// Constructs [`HintSetting`] for typed hint.
    ///
    pub fn of<H: Hint>(value: &H::Value, priority: HintPriority) -> Self {
        HintSetting {
            name: String::from(H::NAME),
            value: value.encode(),
            priority,
        }
    }
    /// Applies this setting, returning whether SDL accepted it.
    ///
    pub fn apply(&self) -> Result<bool> {
        set_raw(&self.name, &self.value, self.priority)
    }
}

// All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
/// Sets hint by name, returning whether SDL accepted it.
///
/// Fails if name or value contain interior nul bytes.
///
pub(crate) fn set_raw(name: &str, value: &str, priority: HintPriority) -> Result<bool> {
    let _ = c_string(name)?;
    let _ = c_string(value)?;
    Ok(sdl_set_hint_with_priority(name, value, &priority.to_sdl()))
}

/// Sets hint with [`HintPriority::Normal`], returning whether SDL accepted it.
///
pub fn set<H: Hint>(value: &H::Value) -> bool {
    set_with_priority::<H>(value, HintPriority::Normal)
}
/// Sets hint with given priority, returning whether SDL accepted it.
///
/// Hints that were set with higher priority are not overwritten.
///
pub fn set_with_priority<H: Hint>(value: &H::Value, priority: HintPriority) -> bool {
    let encoded: String = value.encode();
    set_raw(H::NAME, &encoded, priority).unwrap_or(false)
}
/// Returns current value of the hint (`None` if it is unset or cannot be decoded).
///
pub fn get<H: Hint>() -> Option<H::Value> {
    sdl_get_hint(H::NAME).and_then(|raw| H::Value::decode(&raw))
}

#[cfg(test)]
mod tests {
    use super::{
        get, set, set_raw, set_with_priority, HintPriority, HintSetting, HintValue, RenderScaleQuality,
        ScaleQuality, TimerResolution, VideoMinimizeOnFocusLoss,
    };
    use crate::error::Error;

    #[test]
    fn values() {
        assert_eq!(true.encode(), "1");
        assert_eq!(bool::decode("false"), Some(false));
        assert_eq!(bool::decode("maybe"), None);
        assert_eq!(i32::decode(" 15 "), Some(15));
        assert_eq!(ScaleQuality::decode("1"), Some(ScaleQuality::Linear));
        assert_eq!(ScaleQuality::Best.encode(), "best");
    }

    #[test]
    fn scale_quality() {
        assert!(set::<RenderScaleQuality>(&ScaleQuality::Best));
        assert_eq!(get::<RenderScaleQuality>(), Some(ScaleQuality::Best));
        assert!(set::<RenderScaleQuality>(&ScaleQuality::Nearest));
        assert_eq!(get::<RenderScaleQuality>(), Some(ScaleQuality::Nearest));
    }

    #[test]
    fn override_priority_wins() {
        assert!(set_with_priority::<TimerResolution>(&4, HintPriority::Override));
        assert!(!set_with_priority::<TimerResolution>(&1, HintPriority::Normal));
        assert_eq!(get::<TimerResolution>(), Some(4));
        assert!(set_with_priority::<TimerResolution>(&2, HintPriority::Override));
        assert_eq!(get::<TimerResolution>(), Some(2));
    }

    #[test]
    fn settings() {
        let setting: HintSetting =
            HintSetting::of::<VideoMinimizeOnFocusLoss>(&false, HintPriority::Normal);
        assert_eq!(setting.name, "SDL_VIDEO_MINIMIZE_ON_FOCUS_LOSS");
        assert_eq!(setting.value, "0");
        assert!(setting.apply().expect("Setting has no nul bytes"));
        assert_eq!(get::<VideoMinimizeOnFocusLoss>(), Some(false));

        assert!(matches!(
            set_raw("SDL_\0BROKEN", "1", HintPriority::Normal),
            Err(Error::InvalidArgument(_))
        ));
    }
}
