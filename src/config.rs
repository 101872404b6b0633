//! `ggsdl::config` module provides traits that persist settings to files.
//!
//! [`FromFile`] and [`ToFile`] are implemented for every type that implements
//! `serde::Deserialize`/`serde::Serialize` - that includes [`ContextSettings`](crate::ContextSettings),
//! [`WindowSettings`](crate::resourcecore::windows::WindowSettings) and
//! [`RendererSettings`](crate::resourcecore::rendering::RendererSettings).
//!
//! `ggsdl` serializes data by using Concise Binary Object Representation format.
//!

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// [`FromFile`] trait is implemented on objects that can be restored from file data (deserialized).
///
pub trait FromFile: Sized {
    /// Deserializes object from file.
    ///
    fn from_file(filename: impl AsRef<Path>) -> Result<Self>;
}
impl<T: for<'a> Deserialize<'a>> FromFile for T {
    /// Restores data from given file.
    ///
    /// This function returns an error if file does not exist or if data is not recoverable.
    ///
    fn from_file(filename: impl AsRef<Path>) -> Result<Self> {
        let file: File = File::open(filename)?;
        Ok(serde_cbor::from_reader(BufReader::new(file))?)
    }
}
/// [`ToFile`] trait is implemented on objects that can be saved to file (serialized).
///
pub trait ToFile {
    /// Serializes object to file.
    ///
    fn to_file(&self, filename: impl AsRef<Path>) -> Result<()>;
}
impl<T: Serialize> ToFile for T {
    /// Saves data to file.
    ///
    /// File is created if it does not exist, and truncated if it does.
    ///
    fn to_file(&self, filename: impl AsRef<Path>) -> Result<()> {
        let file: File = File::create(filename)?;
        Ok(serde_cbor::to_writer(file, self)?)
    }
}

/// `flags_as_bits` submodule (de)serializes `bitflags` structs as their raw bits.
///
/// Unknown bits are dropped on deserialization.
///
pub(crate) mod flags_as_bits {
    use bitflags::Flags;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serializes flags as `u32`.
    ///
    pub(crate) fn serialize<F: Flags<Bits = u32>, S: Serializer>(
        flags: &F,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        flags.bits().serialize(serializer)
    }
    /// Deserializes flags from `u32`.
    ///
    pub(crate) fn deserialize<'de, F: Flags<Bits = u32>, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<F, D::Error> {
        u32::deserialize(deserializer).map(F::from_bits_truncate)
    }
}

#[cfg(test)]
mod tests {
    use super::{FromFile, ToFile};
    use crate::{
        error::Error,
        hints::{HintPriority, HintSetting, RenderVsync},
        resourcecore::{
            audio::{AudioChannels, AudioFormat},
            windows::{WindowPosition, WindowSettings},
        },
        ContextSettings, ImageFormats, MixerSettings, Subsystems,
    };
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ggsdl-{}-{name}", std::process::id()))
    }

    #[test]
    fn context_settings_survive_file() {
        let settings: ContextSettings = ContextSettings {
            subsystems: Subsystems::VIDEO | Subsystems::AUDIO | Subsystems::GAME_CONTROLLER,
            image_formats: ImageFormats::PNG | ImageFormats::WEBP,
            fonts: false,
            mixer: Some(MixerSettings {
                formats: AudioFormat::OGG,
                channels: AudioChannels::Mono,
                sound_channels: Some(16),
                ..MixerSettings::default()
            }),
            hints: vec![HintSetting::of::<RenderVsync>(&true, HintPriority::Override)],
        };
        let path: PathBuf = temp_file("context.cbor");
        settings.to_file(&path).expect("Temporary directory is writable");
        let restored: ContextSettings =
            ContextSettings::from_file(&path).expect("File was just written");
        assert_eq!(restored, settings);

        let window: WindowSettings = WindowSettings {
            position: Some(WindowPosition::Exact(10, -20)),
            resizable: false,
            ..WindowSettings::default()
        };
        window.to_file(&path).expect("Temporary directory is writable");
        assert_eq!(
            WindowSettings::from_file(&path).expect("File was just written"),
            window
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_and_corrupted_files() {
        assert!(matches!(
            ContextSettings::from_file(temp_file("missing.cbor")),
            Err(Error::Io(_))
        ));

        let path: PathBuf = temp_file("corrupted.cbor");
        std::fs::write(&path, [0xFF, 0x00, 0x13]).expect("Temporary directory is writable");
        assert!(matches!(
            ContextSettings::from_file(&path),
            Err(Error::Serialization(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
