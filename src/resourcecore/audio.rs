//! `resourcecore::audio` submodule implements SDL_mixer resources: [`Sound`] and [`Music`].
//!
//! # Model
//! This submodule consists of:
//! 1. Audio data ([`Sound`] and [`Music`] owners with their handles, and [`Volume`] newtype which encapsulates volume setting).
//! 2. Audio device settings ([`SampleFormat`], [`AudioChannels`] and [`AudioFormat`] bitflags),
//!    which are used by [`MixerSettings`](crate::MixerSettings).
//!
//! Samples (chunks) are files that are completely decoded into memory up front and then played repeatedly
//! on one of the mixing channels. Music is decoded on the fly and only one piece of music plays at a time.
//!
//! SDL_mixer has to be initialized by [`Context`](crate::Context) before anything here is loaded.
//!

use crate::{
    error::{Error, Result},
    ffi::{c_path, check, to_c_int},
    ownership::{native_resource, BasicResource, Ownership, Owner, Owning},
    Context,
};
use bitflags::bitflags;
use sdl2::{
    mixer::{
        AUDIO_F32LSB as MixerAUDIO_F32LSB, AUDIO_F32MSB as MixerAUDIO_F32MSB,
        AUDIO_S16LSB as MixerAUDIO_S16LSB, AUDIO_S16MSB as MixerAUDIO_S16MSB,
        AUDIO_S32LSB as MixerAUDIO_S32LSB, AUDIO_S32MSB as MixerAUDIO_S32MSB,
        AUDIO_U16LSB as MixerAUDIO_U16LSB, AUDIO_U16MSB as MixerAUDIO_U16MSB,
        MAX_VOLUME as MixerMAX_VOLUME,
    },
    sys::{
        mixer::{
            Mix_AllocateChannels, Mix_Chunk, Mix_FadeInMusic, Mix_FadeOutMusic, Mix_FreeChunk,
            Mix_FreeMusic, Mix_HaltChannel, Mix_HaltMusic, Mix_LoadMUS, Mix_LoadWAV_RW, Mix_Music,
            Mix_PauseMusic, Mix_PausedMusic, Mix_PlayChannelTimed, Mix_PlayMusic,
            Mix_PlayingMusic, Mix_ResumeMusic, Mix_Volume, Mix_VolumeChunk, Mix_VolumeMusic,
        },
        SDL_RWFromFile,
    },
};
use serde::{Deserialize, Serialize};
use std::{os::raw::c_int, path::Path};

native_resource! {
    /// [`SoundKind`] marks SDL_mixer samples (`Mix_Chunk`).
    ///
    SoundKind => Mix_Chunk, "sound", Mix_FreeChunk;
    /// [`Sound`] owns a decoded sample.
    ///
    /// # Drop order
    /// Sample must not be dropped while it is playing; halt its channel first.
    /// Sample borrows [`Context`] that initialized SDL_mixer.
    ///
    Sound<'ctx>;
    /// [`SoundHandle`] references a sample without owning it.
    ///
    SoundHandle;
}
native_resource! {
    /// [`MusicKind`] marks SDL_mixer music (`Mix_Music`).
    ///
    MusicKind => Mix_Music, "music", Mix_FreeMusic;
    /// [`Music`] owns a piece of music.
    ///
    /// Dropping music that is playing halts it.
    /// Music borrows [`Context`] that initialized SDL_mixer.
    ///
    Music<'ctx>;
    /// [`MusicHandle`] references music without owning it.
    ///
    MusicHandle;
}

/// [`Volume`] is a newtype that restricts volume values to [0; 128].
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Volume(u8);
impl Volume {
    /// Minimal volume (silence).
    ///
    pub const SILENCE: Self = Volume(0);
    /// Maximal volume.
    ///
    pub const MAX: Self = Volume(MixerMAX_VOLUME as u8);

    /// Returns corresponding `u8` value.
    ///
    pub fn get(self) -> u8 {
        self.0
    }

    /// Builds volume from value that SDL_mixer reports.
    ///
    fn from_raw(raw: c_int) -> Self {
        Volume(raw.clamp(0, Self::MAX.0 as c_int) as u8)
    }
}
impl From<u8> for Volume {
    fn from(value: u8) -> Self {
        Volume(value.clamp(u8::MIN, Self::MAX.0))
    }
}

/// [`Loops`] enum describes how many times audio is repeated.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Loops {
    /// Audio is played once.
    ///
    #[default]
    Once,
    /// Audio is played once and then repeated given number of times.
    ///
    Repeat(u32),
    /// Audio is repeated until it is halted.
    ///
    Forever,
}
impl Loops {
    /// Returns native loop count (`-1` is infinite).
    ///
    fn to_raw(self) -> Result<c_int> {
        match self {
            Loops::Once => Ok(0),
            Loops::Repeat(times) => to_c_int(times, "loop count"),
            Loops::Forever => Ok(-1),
        }
    }
}

impl<'ctx> BasicResource<SoundKind, Owning<'ctx>> {
    /// Decodes sample from file (WAVE, and every format SDL_mixer was initialized with).
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, MixerSettings, Subsystems, resourcecore::audio::{Sound, Loops, Volume}};
    /// let context: Context = Context::init(&ContextSettings {
    ///     subsystems: Subsystems::AUDIO,
    ///     mixer: Some(MixerSettings::default()),
    ///     ..ContextSettings::default()
    /// }).expect("Audio device should be available");
    /// let sound: Sound = Sound::load(&context, "click.wav").expect("File should exist");
    /// let _ = sound.set_volume(Volume::from(64));
    /// let _ = sound.play(None, Loops::Once);
    /// ```
    ///
    pub fn load(context: &'ctx Context, path: impl AsRef<Path>) -> Result<Self> {
        context.require_mixer()?;
        let path = c_path(path.as_ref())?;
        let stream = unsafe { SDL_RWFromFile(path.as_ptr(), b"rb\0".as_ptr().cast()) };
        if stream.is_null() {
            return Err(Error::native("SDL_RWFromFile"));
        }
        // Stream is freed by SDL_mixer regardless of the outcome.
        unsafe { Owner::acquire(Mix_LoadWAV_RW(stream.cast(), 1)) }
    }
}
impl<O: Ownership> BasicResource<SoundKind, O> {
    /// Returns volume of the sample.
    ///
    pub fn volume(&self) -> Result<Volume> {
        Ok(Volume::from_raw(unsafe { Mix_VolumeChunk(self.get()?, -1) }))
    }
    /// Sets volume of the sample, returning the previous one.
    ///
    pub fn set_volume(&self, volume: Volume) -> Result<Volume> {
        Ok(Volume::from_raw(unsafe {
            Mix_VolumeChunk(self.get()?, c_int::from(volume.get()))
        }))
    }
    /// Plays the sample on given mixing channel (`None` picks the first free one).
    ///
    /// Returns the channel that plays the sample.
    ///
    pub fn play(&self, channel: Option<u32>, loops: Loops) -> Result<u32> {
        let channel: c_int = match channel {
            Some(channel) => to_c_int(channel, "channel")?,
            None => -1,
        };
        let loops: c_int = loops.to_raw()?;
        let played: c_int = check("Mix_PlayChannel", unsafe {
            Mix_PlayChannelTimed(channel, self.get()?, loops, -1)
        })?;
        Ok(played.unsigned_abs())
    }
}

impl<'ctx> BasicResource<MusicKind, Owning<'ctx>> {
    /// Opens music file (WAVE, MOD, MIDI, OGG, MP3, FLAC, OPUS - depending on initialized formats).
    ///
    pub fn load(context: &'ctx Context, path: impl AsRef<Path>) -> Result<Self> {
        context.require_mixer()?;
        let path = c_path(path.as_ref())?;
        unsafe { Owner::acquire(Mix_LoadMUS(path.as_ptr())) }
    }
}
impl<O: Ownership> BasicResource<MusicKind, O> {
    /// Starts playing the music, replacing any music that plays at the moment.
    ///
    pub fn play(&self, loops: Loops) -> Result<()> {
        let loops: c_int = loops.to_raw()?;
        let _ = check("Mix_PlayMusic", unsafe { Mix_PlayMusic(self.get()?, loops) })?;
        Ok(())
    }
    /// Starts playing the music, fading it in over `fade_ms` milliseconds.
    ///
    pub fn fade_in(&self, loops: Loops, fade_ms: u32) -> Result<()> {
        let loops: c_int = loops.to_raw()?;
        let fade_ms: c_int = to_c_int(fade_ms, "fading time")?;
        let _ = check("Mix_FadeInMusic", unsafe {
            Mix_FadeInMusic(self.get()?, loops, fade_ms)
        })?;
        Ok(())
    }
}

impl Music<'_> {
    /// Returns volume of the music.
    ///
    pub fn volume() -> Volume {
        Volume::from_raw(unsafe { Mix_VolumeMusic(-1) })
    }
    /// Sets volume of the music, returning the previous one.
    ///
    pub fn set_volume(volume: Volume) -> Volume {
        Volume::from_raw(unsafe { Mix_VolumeMusic(c_int::from(volume.get())) })
    }
    /// Returns whether any music is playing (paused music counts).
    ///
    pub fn is_playing() -> bool {
        unsafe { Mix_PlayingMusic() != 0 }
    }
    /// Returns whether music is paused.
    ///
    pub fn is_paused() -> bool {
        unsafe { Mix_PausedMusic() != 0 }
    }
    /// Pauses the music.
    ///
    pub fn pause() {
        unsafe { Mix_PauseMusic() }
    }
    /// Resumes paused music.
    ///
    pub fn resume() {
        unsafe { Mix_ResumeMusic() }
    }
    /// Halts the music.
    ///
    pub fn halt() {
        let _ = unsafe { Mix_HaltMusic() };
    }
    /// Fades the music out over `fade_ms` milliseconds.
    ///
    pub fn fade_out(fade_ms: u32) -> Result<()> {
        let fade_ms: c_int = to_c_int(fade_ms, "fading time")?;
        if unsafe { Mix_FadeOutMusic(fade_ms) } == 0 {
            Err(Error::native("Mix_FadeOutMusic"))
        } else {
            Ok(())
        }
    }
}
impl Sound<'_> {
    /// Returns average volume of all mixing channels.
    ///
    pub fn channels_volume() -> Volume {
        Volume::from_raw(unsafe { Mix_Volume(-1, -1) })
    }
    /// Halts mixing channel (`None` halts all of them).
    ///
    pub fn halt(channel: Option<u32>) -> Result<()> {
        let channel: c_int = match channel {
            Some(channel) => to_c_int(channel, "channel")?,
            None => -1,
        };
        let _ = unsafe { Mix_HaltChannel(channel) };
        Ok(())
    }
}

impl Context {
    /// Sets number of mixing channels that samples are played on, returning the new number.
    ///
    /// Channels above the new number are halted.
    ///
    pub fn allocate_sound_channels(&self, count: u32) -> Result<u32> {
        self.require_mixer()?;
        let count: c_int = to_c_int(count, "channel count")?;
        Ok(unsafe { Mix_AllocateChannels(count) }.unsigned_abs())
    }
    /// Returns number of mixing channels.
    ///
    pub fn sound_channels(&self) -> Result<u32> {
        self.require_mixer()?;
        Ok(unsafe { Mix_AllocateChannels(-1) }.unsigned_abs())
    }
}

bitflags! {
    /// [`AudioFormat`] bitflag struct lists audio formats that SDL_mixer loads dynamically.
    ///
    /// WAVE is always supported and does not need a flag.
    ///
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct AudioFormat: u32 {
        /// FLAC format flag.
        ///
        const FLAC = 1 << 0;
        /// MOD format flag.
        ///
        const MOD = 1 << 1;
        /// MP3 format flag.
        ///
        const MP3 = 1 << 3;
        /// OGG format flag.
        ///
        const OGG = 1 << 4;
        /// MID format flag.
        ///
        const MID = 1 << 5;
        /// OPUS format flag.
        ///
        const OPUS = 1 << 6;
    }
}

/// [`SampleFormat`] enum lists possible audio formats that are used for decoding samples.
///
/// Abbreviations:
/// 1. `F` stands for float, `S` for signed and `U` for unsigned.
/// 2. `16`/`32` - how many bits are used in sample size.
/// 3. `LSB` stands for least significant byte (little-endian order),
///    `MSB` for most significant byte (big-endian order),
///    `SYS` for native byte order (those are constants that depend on target platform).
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    /// 32-bit floating point samples in little-endian byte order.
    ///
    F32LSB,
    /// 32-bit floating point samples in big-endian byte order.
    ///
    F32MSB,

    /// Signed 16-bit samples in little-endian byte order.
    ///
    S16LSB,
    /// Signed 16-bit samples in big-endian byte order.
    ///
    S16MSB,
    /// Signed 32-bit samples in little-endian byte order.
    ///
    S32LSB,
    /// Signed 32-bit samples in big-endian byte order.
    ///
    S32MSB,

    /// Unsigned 16-bit samples in little-endian byte order.
    ///
    U16LSB,
    /// Unsigned 16-bit samples in big-endian byte order.
    ///
    U16MSB,
}
#[cfg(target_endian = "little")]
impl SampleFormat {
    /// 32-bit floating point samples in native byte order.
    ///
    pub const F32SYS: Self = Self::F32LSB;
    /// Signed 16-bit samples in native byte order.
    ///
    pub const S16SYS: Self = Self::S16LSB;
    /// Signed 32-bit samples in native byte order.
    ///
    pub const S32SYS: Self = Self::S32LSB;
    /// Unsigned 16-bit samples in native byte order.
    ///
    pub const U16SYS: Self = Self::U16LSB;
}
#[cfg(target_endian = "big")]
impl SampleFormat {
    /// 32-bit floating point samples in native byte order.
    ///
    pub const F32SYS: Self = Self::F32MSB;
    /// Signed 16-bit samples in native byte order.
    ///
    pub const S16SYS: Self = Self::S16MSB;
    /// Signed 32-bit samples in native byte order.
    ///
    pub const S32SYS: Self = Self::S32MSB;
    /// Unsigned 16-bit samples in native byte order.
    ///
    pub const U16SYS: Self = Self::U16MSB;
}
impl SampleFormat {
    // All functions that are providing gate between `ggsdl` and native libraries extend their API to `crate` visibility.
    /// Returns native representation of [`SampleFormat`] enum.
    ///
    pub(crate) fn to_raw(self) -> u16 {
        match self {
            SampleFormat::F32LSB => MixerAUDIO_F32LSB,
            SampleFormat::F32MSB => MixerAUDIO_F32MSB,

            SampleFormat::S16LSB => MixerAUDIO_S16LSB,
            SampleFormat::S16MSB => MixerAUDIO_S16MSB,
            SampleFormat::S32LSB => MixerAUDIO_S32LSB,
            SampleFormat::S32MSB => MixerAUDIO_S32MSB,

            SampleFormat::U16LSB => MixerAUDIO_U16LSB,
            SampleFormat::U16MSB => MixerAUDIO_U16MSB,
        }
    }
}
impl Default for SampleFormat {
    fn default() -> Self {
        Self::S32SYS
    }
}
/// [`AudioChannels`] enum lists number of output channels (1 is mono, 2 is stereo, etc.).
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioChannels {
    /// Mono (only 1 channel).
    ///
    Mono = 1,
    /// Stereo (2 channels).
    ///
    #[default]
    Stereo = 2,
    /// Quad (4 channels).
    ///
    Quad = 4,
    /// 5.1 (6 channels).
    ///
    FiveOne = 6,
    /// 6.1 (7 channels).
    ///
    SixOne = 7,
    /// 7.1 (8 channels).
    ///
    SevenOne = 8,
}

#[cfg(test)]
mod tests {
    use super::{AudioChannels, Loops, MusicHandle, SampleFormat, SoundHandle, Volume};
    use crate::error::Error;

    #[test]
    fn volume() {
        assert_eq!(Volume::from(200), Volume::MAX);
        assert_eq!(Volume::MAX.get(), 128);
        assert_eq!(Volume::from(64).get(), 64);
        assert_eq!(Volume::from_raw(-5), Volume::SILENCE);
        assert_eq!(Volume::from_raw(1000), Volume::MAX);
        assert!(Volume::SILENCE < Volume::MAX);
    }

    #[test]
    fn settings() {
        assert_eq!(AudioChannels::default() as i32, 2);
        assert_eq!(AudioChannels::SevenOne as i32, 8);
        assert_eq!(SampleFormat::default(), SampleFormat::S32SYS);
        assert_eq!(SampleFormat::S16LSB.to_raw(), 0x8010);
        assert_eq!(SampleFormat::F32MSB.to_raw(), 0x9120);
        assert_eq!(Loops::Once.to_raw().expect("In range"), 0);
        assert_eq!(Loops::Forever.to_raw().expect("In range"), -1);
        assert!(matches!(
            Loops::Repeat(u32::MAX).to_raw(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_handles_are_rejected() {
        assert!(matches!(
            SoundHandle::null().play(None, Loops::Once),
            Err(Error::NullResource { kind: "sound" })
        ));
        assert!(matches!(
            MusicHandle::null().play(Loops::Forever),
            Err(Error::NullResource { kind: "music" })
        ));
    }
}
