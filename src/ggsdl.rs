//! `ggsdl` hidden submodule implements [`Context`] struct that handles
//! all process-wide state of native libraries that `ggsdl` wraps.
//!

use crate::{
    config::flags_as_bits,
    error::{Error, Result},
    ffi::to_c_int,
    hints::{self, HintSetting},
    resourcecore::audio::{AudioChannels, AudioFormat, SampleFormat},
};
use bitflags::bitflags;
use log::{debug, warn};
use sdl2::{
    image::{init as image_init, InitFlag as ImageInitFlag, Sdl2ImageContext as ImageContext},
    init as sdl_initialization,
    mixer::{
        allocate_channels as mixer_allocate_channels, close_audio as mixer_close_audio,
        init as mixer_init, open_audio as mixer_open_audio, InitFlag as MixerInitFlag,
        Sdl2MixerContext as MixerContext, DEFAULT_FREQUENCY as MixerDEFAULT_FREQUENCY,
    },
    ttf::{init as ttf_init, Sdl2TtfContext as TtfContext},
    AudioSubsystem as SdlAudioSubsystem, EventPump, EventSubsystem as SdlEventSubsystem,
    GameControllerSubsystem as SdlGameControllerSubsystem,
    JoystickSubsystem as SdlJoystickSubsystem, SensorSubsystem as SdlSensorSubsystem, Sdl,
    TimerSubsystem as SdlTimerSubsystem, VideoSubsystem as SdlVideoSubsystem,
};
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// [`Subsystems`] bitflag struct lists SDL subsystems that [`Context`] initializes.
    ///
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Subsystems: u32 {
        /// Video subsystem (windows, renderers, textures, cursors).
        ///
        const VIDEO = 1 << 0;
        /// Audio subsystem (required by the mixer).
        ///
        const AUDIO = 1 << 1;
        /// Joystick subsystem.
        ///
        const JOYSTICK = 1 << 2;
        /// Game controller subsystem (implies joysticks).
        ///
        const GAME_CONTROLLER = 1 << 3;
        /// Events subsystem.
        ///
        const EVENTS = 1 << 4;
        /// Timer subsystem.
        ///
        const TIMER = 1 << 5;
        /// Sensor subsystem.
        ///
        const SENSOR = 1 << 6;
    }
}
impl Default for Subsystems {
    fn default() -> Self {
        Subsystems::VIDEO | Subsystems::EVENTS
    }
}

bitflags! {
    /// [`ImageFormats`] bitflag struct lists image formats that SDL_image loads dynamically.
    ///
    /// BMP is always supported and does not need a flag.
    ///
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ImageFormats: u32 {
        /// JPG image format.
        ///
        const JPG = 1 << 0;
        /// PNG image format.
        ///
        const PNG = 1 << 1;
        /// TIF image format.
        ///
        const TIF = 1 << 2;
        /// WEBP image format.
        ///
        const WEBP = 1 << 3;
    }
}

/// [`MixerSettings`] struct carries parameters of the audio device that SDL_mixer opens.
///
/// # Example
/// ```rust
/// # use ggsdl::{MixerSettings, resourcecore::audio::{AudioChannels, AudioFormat}};
/// let mixer: MixerSettings = MixerSettings {
///     formats: AudioFormat::OGG | AudioFormat::MP3,
///     channels: AudioChannels::Mono,
///     ..MixerSettings::default()
/// };
/// assert_eq!(mixer.frequency, MixerSettings::DEFAULT_FREQUENCY);
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixerSettings {
    /// Audio formats that are going to be loaded dynamically.
    ///
    #[serde(with = "flags_as_bits")]
    pub formats: AudioFormat,
    /// Playback frequency (in Hz).
    ///
    pub frequency: u32,
    /// Sample format of the device.
    ///
    pub sample_format: SampleFormat,
    /// Number of output channels.
    ///
    pub channels: AudioChannels,
    /// Audio buffer size in sample frames.
    ///
    /// Values between 256 and 1024 are recommended: small values reduce latency,
    /// but may not work on older systems.
    ///
    pub chunk_size: u32,
    /// Number of mixing channels to allocate (SDL_mixer allocates 8 by default).
    ///
    pub sound_channels: Option<u32>,
}
impl MixerSettings {
    /// Default frequency at which audio is played (Hz).
    ///
    pub const DEFAULT_FREQUENCY: u32 = MixerDEFAULT_FREQUENCY as u32;
    /// Default chunk size (middle ground between latency and compatibility).
    ///
    pub const DEFAULT_CHUNK_SIZE: u32 = 512;

    /// Converts settings into native parameters of the audio device.
    ///
    /// Every setting is checked here, before the device is opened.
    ///
    fn device_parameters(&self) -> Result<DeviceParameters> {
        Ok(DeviceParameters {
            frequency: to_c_int(self.frequency, "frequency")?,
            format: self.sample_format.to_raw(),
            channels: self.channels as i32,
            chunk_size: to_c_int(self.chunk_size, "chunk size")?,
            sound_channels: self
                .sound_channels
                .map(|count| to_c_int(count, "sound channels"))
                .transpose()?,
        })
    }
}
/// [`DeviceParameters`] struct holds validated native parameters of the audio device.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct DeviceParameters {
    /// Playback frequency.
    ///
    frequency: i32,
    /// Native sample format.
    ///
    format: u16,
    /// Number of output channels.
    ///
    channels: i32,
    /// Audio buffer size.
    ///
    chunk_size: i32,
    /// Number of mixing channels to allocate.
    ///
    sound_channels: Option<i32>,
}
impl Default for MixerSettings {
    fn default() -> Self {
        MixerSettings {
            formats: AudioFormat::empty(),
            frequency: Self::DEFAULT_FREQUENCY,
            sample_format: SampleFormat::default(),
            channels: AudioChannels::default(),
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            sound_channels: None,
        }
    }
}

/// [`ContextSettings`] struct carries everything that is needed to initialize [`Context`].
///
/// Settings can be persisted with [`ToFile`](crate::config::ToFile) and [`FromFile`](crate::config::FromFile).
///
/// # Example
/// ```rust
/// # use ggsdl::{ContextSettings, ImageFormats, MixerSettings, Subsystems};
/// let settings: ContextSettings = ContextSettings {
///     subsystems: Subsystems::VIDEO | Subsystems::EVENTS | Subsystems::AUDIO,
///     image_formats: ImageFormats::PNG,
///     fonts: true,
///     mixer: Some(MixerSettings::default()),
///     ..ContextSettings::default()
/// };
/// assert!(settings.hints.is_empty());
/// ```
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextSettings {
    /// SDL subsystems to initialize.
    ///
    #[serde(with = "flags_as_bits")]
    pub subsystems: Subsystems,
    /// Image formats to initialize SDL_image with (empty set skips SDL_image).
    ///
    #[serde(with = "flags_as_bits")]
    pub image_formats: ImageFormats,
    /// Whether SDL_ttf should be initialized.
    ///
    pub fonts: bool,
    /// SDL_mixer settings (`None` skips SDL_mixer). Requires [`Subsystems::AUDIO`].
    ///
    pub mixer: Option<MixerSettings>,
    /// Hints that are set before anything is initialized.
    ///
    pub hints: Vec<HintSetting>,
}
impl Default for ContextSettings {
    fn default() -> Self {
        ContextSettings {
            subsystems: Subsystems::default(),
            image_formats: ImageFormats::PNG | ImageFormats::JPG,
            fonts: true,
            mixer: None,
            hints: Vec::new(),
        }
    }
}

/// Wraps `Result<T, String>` that `sdl2` returns into [`Error::Native`].
///
fn native<T>(operation: &'static str, result: std::result::Result<T, String>) -> Result<T> {
    result.map_err(|message| Error::Native { operation, message })
}

/// [`Context`] struct is the session object of `ggsdl`.
///
/// It initializes SDL, requested subsystems and satellite libraries (SDL_image, SDL_ttf, SDL_mixer),
/// and tears all of them down in reverse order when dropped.
/// Native libraries are process-wide, so there should be only one [`Context`] at a time
/// (`sdl2` enforces that it is created on the main thread).
///
/// # Drop order
/// Resources that are created while [`Context`] is alive (windows, textures, fonts, ...) are
/// not bound to its lifetime; they should be dropped before it.
///
/// # Example
/// ```rust, no_run
/// # use ggsdl::{Context, ContextSettings};
/// let context: Context = Context::init(&ContextSettings::default())
///     .expect("SDL should be available");
/// let mut pump = context.event_pump().expect("Events subsystem is initialized");
/// ```
///
pub struct Context {
    /// SDL_mixer context.
    ///
    mixer: Option<MixerContext>,
    /// SDL_ttf context.
    ///
    ttf: Option<TtfContext>,
    /// SDL_image context.
    ///
    image: Option<ImageContext>,
    /// Mixer settings that were used to open audio device.
    ///
    mixer_settings: Option<MixerSettings>,

    /// Sensor subsystem.
    ///
    sensor: Option<SdlSensorSubsystem>,
    /// Game controller subsystem.
    ///
    game_controller: Option<SdlGameControllerSubsystem>,
    /// Joystick subsystem.
    ///
    joystick: Option<SdlJoystickSubsystem>,
    /// Audio subsystem.
    ///
    audio: Option<SdlAudioSubsystem>,
    /// Timer subsystem.
    ///
    timer: Option<SdlTimerSubsystem>,
    /// Video subsystem.
    ///
    video: Option<SdlVideoSubsystem>,
    /// Events subsystem.
    ///
    events: Option<SdlEventSubsystem>,

    /// Initialized subsystems.
    ///
    subsystems: Subsystems,
    /// Underlying `sdl2` context handler (dropped last).
    ///
    sdl: Sdl,
}
impl Context {
    /// Initializes native libraries with given settings.
    ///
    /// Hints are applied first; rejected hints are logged and skipped.
    ///
    pub fn init(settings: &ContextSettings) -> Result<Context> {
        for hint in &settings.hints {
            if !hints::set_raw(&hint.name, &hint.value, hint.priority)? {
                warn!("hint `{name}` was rejected", name = hint.name);
            }
        }

        let sdl: Sdl = native("SDL_Init", sdl_initialization())?;
        let subsystems: Subsystems = settings.subsystems;
        let video = subsystems
            .contains(Subsystems::VIDEO)
            .then(|| native("SDL_InitSubSystem(VIDEO)", sdl.video()))
            .transpose()?;
        let events = subsystems
            .contains(Subsystems::EVENTS)
            .then(|| native("SDL_InitSubSystem(EVENTS)", sdl.event()))
            .transpose()?;
        let timer = subsystems
            .contains(Subsystems::TIMER)
            .then(|| native("SDL_InitSubSystem(TIMER)", sdl.timer()))
            .transpose()?;
        let audio = subsystems
            .contains(Subsystems::AUDIO)
            .then(|| native("SDL_InitSubSystem(AUDIO)", sdl.audio()))
            .transpose()?;
        let joystick = subsystems
            .intersects(Subsystems::JOYSTICK | Subsystems::GAME_CONTROLLER)
            .then(|| native("SDL_InitSubSystem(JOYSTICK)", sdl.joystick()))
            .transpose()?;
        let game_controller = subsystems
            .contains(Subsystems::GAME_CONTROLLER)
            .then(|| native("SDL_InitSubSystem(GAMECONTROLLER)", sdl.game_controller()))
            .transpose()?;
        let sensor = subsystems
            .contains(Subsystems::SENSOR)
            .then(|| native("SDL_InitSubSystem(SENSOR)", sdl.sensor()))
            .transpose()?;
        debug!("initialized SDL subsystems {subsystems:?}");

        let image = (!settings.image_formats.is_empty())
            .then(|| {
                native(
                    "IMG_Init",
                    image_init(ImageInitFlag::from_bits_truncate(
                        settings.image_formats.bits(),
                    )),
                )
            })
            .transpose()?;
        let ttf = settings
            .fonts
            .then(|| ttf_init().map_err(|error| Error::Native {
                operation: "TTF_Init",
                message: error.to_string(),
            }))
            .transpose()?;

        let mixer = match settings.mixer {
            Some(mixer) => {
                if audio.is_none() {
                    return Err(Error::Uninitialized("audio"));
                }
                let parameters: DeviceParameters = mixer.device_parameters()?;
                let context: MixerContext = native(
                    "Mix_Init",
                    mixer_init(MixerInitFlag::from_bits_truncate(mixer.formats.bits())),
                )?;
                native(
                    "Mix_OpenAudio",
                    mixer_open_audio(
                        parameters.frequency,
                        parameters.format,
                        parameters.channels,
                        parameters.chunk_size,
                    ),
                )?;
                if let Some(requested) = parameters.sound_channels {
                    let allocated: i32 = mixer_allocate_channels(requested);
                    if allocated != requested {
                        mixer_close_audio();
                        return Err(Error::Native {
                            operation: "Mix_AllocateChannels",
                            message: format!("allocated {allocated} of {requested} channels"),
                        });
                    }
                }
                debug!("opened audio device with {mixer:?}");
                Some(context)
            }
            None => None,
        };

        Ok(Context {
            mixer,
            ttf,
            image,
            mixer_settings: settings.mixer,

            sensor,
            game_controller,
            joystick,
            audio,
            timer,
            video,
            events,

            subsystems,
            sdl,
        })
    }

    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Fails with [`Error::Uninitialized`] if `subsystem` was not initialized.
    ///
    pub(crate) fn require(&self, subsystem: Subsystems, name: &'static str) -> Result<()> {
        if self.subsystems.contains(subsystem) {
            Ok(())
        } else {
            Err(Error::Uninitialized(name))
        }
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Fails with [`Error::Uninitialized`] if SDL_ttf was not initialized.
    ///
    pub(crate) fn require_fonts(&self) -> Result<()> {
        self.ttf.as_ref().map(|_| ()).ok_or(Error::Uninitialized("ttf"))
    }
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Fails with [`Error::Uninitialized`] if SDL_mixer was not initialized.
    ///
    pub(crate) fn require_mixer(&self) -> Result<()> {
        self.mixer.as_ref().map(|_| ()).ok_or(Error::Uninitialized("mixer"))
    }

    /// Returns underlying `sdl2` context.
    ///
    pub fn sdl(&self) -> &Sdl {
        &self.sdl
    }
    /// Returns initialized subsystems.
    ///
    pub fn subsystems(&self) -> Subsystems {
        self.subsystems
    }
    /// Returns whether SDL_image was initialized.
    ///
    pub fn has_images(&self) -> bool {
        self.image.is_some()
    }
    /// Returns whether SDL_ttf was initialized.
    ///
    pub fn has_fonts(&self) -> bool {
        self.ttf.is_some()
    }
    /// Returns settings of the opened audio device (`None` if SDL_mixer was not initialized).
    ///
    pub fn mixer_settings(&self) -> Option<MixerSettings> {
        self.mixer.as_ref().and(self.mixer_settings)
    }

    /// Returns underlying video subsystem.
    ///
    pub fn video(&self) -> Result<&SdlVideoSubsystem> {
        self.video.as_ref().ok_or(Error::Uninitialized("video"))
    }
    /// Returns underlying audio subsystem.
    ///
    pub fn audio(&self) -> Result<&SdlAudioSubsystem> {
        self.audio.as_ref().ok_or(Error::Uninitialized("audio"))
    }
    /// Returns underlying timer subsystem.
    ///
    pub fn timer(&self) -> Result<&SdlTimerSubsystem> {
        self.timer.as_ref().ok_or(Error::Uninitialized("timer"))
    }
    /// Returns underlying joystick subsystem.
    ///
    pub fn joystick(&self) -> Result<&SdlJoystickSubsystem> {
        self.joystick.as_ref().ok_or(Error::Uninitialized("joystick"))
    }
    /// Returns underlying game controller subsystem.
    ///
    pub fn game_controller(&self) -> Result<&SdlGameControllerSubsystem> {
        self.game_controller
            .as_ref()
            .ok_or(Error::Uninitialized("game controller"))
    }
    /// Returns underlying sensor subsystem.
    ///
    pub fn sensor(&self) -> Result<&SdlSensorSubsystem> {
        self.sensor.as_ref().ok_or(Error::Uninitialized("sensor"))
    }
    /// Returns underlying events subsystem.
    ///
    pub fn events(&self) -> Result<&SdlEventSubsystem> {
        self.events.as_ref().ok_or(Error::Uninitialized("events"))
    }
    /// Obtains SDL event pump.
    ///
    /// Only one event pump might exist at a time.
    ///
    pub fn event_pump(&self) -> Result<EventPump> {
        self.require(Subsystems::EVENTS, "events")?;
        native("SDL_PumpEvents", self.sdl.event_pump())
    }
}
impl Drop for Context {
    fn drop(&mut self) {
        if self.mixer.is_some() {
            debug!("closing audio device");
            mixer_close_audio();
        }
        debug!("shutting down SDL");
    }
}
impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("subsystems", &self.subsystems)
            .field("images", &self.image.is_some())
            .field("fonts", &self.ttf.is_some())
            .field("mixer", &self.mixer_settings())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextSettings, DeviceParameters, ImageFormats, MixerSettings, Subsystems};
    use crate::{
        error::Error,
        hints::{HintPriority, HintSetting},
        resourcecore::audio::{AudioChannels, SampleFormat},
    };

    #[test]
    fn settings() {
        let settings: ContextSettings = ContextSettings::default();
        assert!(settings.subsystems.contains(Subsystems::VIDEO));
        assert!(settings.subsystems.contains(Subsystems::EVENTS));
        assert!(!settings.subsystems.contains(Subsystems::AUDIO));
        assert!(settings.image_formats.contains(ImageFormats::PNG));
        assert!(settings.mixer.is_none());

        let mixer: MixerSettings = MixerSettings::default();
        assert_eq!(mixer.frequency, MixerSettings::DEFAULT_FREQUENCY);
        assert_eq!(mixer.chunk_size, 512);

        let with_hint: ContextSettings = ContextSettings {
            hints: vec![HintSetting::new("SDL_RENDER_VSYNC", "1", HintPriority::Override)],
            ..ContextSettings::default()
        };
        assert_ne!(with_hint, settings);
    }

    #[test]
    fn mixer_settings_are_checked_before_opening() {
        let parameters: DeviceParameters = MixerSettings {
            channels: AudioChannels::Mono,
            sound_channels: Some(16),
            ..MixerSettings::default()
        }
        .device_parameters()
        .expect("Settings are in range");
        assert_eq!(
            parameters,
            DeviceParameters {
                frequency: MixerSettings::DEFAULT_FREQUENCY as i32,
                format: SampleFormat::default().to_raw(),
                channels: 1,
                chunk_size: 512,
                sound_channels: Some(16),
            }
        );

        for settings in [
            MixerSettings {
                sound_channels: Some(u32::MAX),
                ..MixerSettings::default()
            },
            MixerSettings {
                frequency: u32::MAX,
                ..MixerSettings::default()
            },
        ] {
            assert!(matches!(
                settings.device_parameters(),
                Err(Error::InvalidArgument(_))
            ));
        }
    }
}
