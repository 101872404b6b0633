//! `dispatchcore::events` submodule defines [`EventType`] trait,
//! which describes how typed events are recognised in runtime event sources,
//! and implements it for the most common SDL events.
//!

use sdl2::{
    controller::Button,
    event::Event as SdlEvent,
    keyboard::{Keycode, Mod, Scancode},
    mouse::{MouseButton, MouseWheelDirection},
};

/// [`EventType`] trait is implemented by types that can be recognised in runtime events of type `S`.
///
/// Runtime events usually are tagged unions (`sdl2::event::Event` is one),
/// and [`EventType::extract`] inspects that tag and copies the fields out when it matches.
///
/// # Example
/// ```rust
/// # use ggsdl::dispatchcore::EventType;
/// enum Input {
///     Tap(u32),
///     Swipe,
/// }
/// struct Tap(u32);
/// impl EventType<Input> for Tap {
///     fn extract(source: &Input) -> Option<Self> {
///         match source {
///             Input::Tap(finger) => Some(Tap(*finger)),
///             _ => None,
///         }
///     }
/// }
///
/// assert!(Tap::extract(&Input::Swipe).is_none());
/// assert_eq!(Tap::extract(&Input::Tap(2)).map(|tap| tap.0), Some(2));
/// ```
///
pub trait EventType<S>: Sized + 'static {
    /// Returns typed event if `source` is of this type.
    ///
    fn extract(source: &S) -> Option<Self>;
}
/// Every SDL event matches `sdl2::event::Event` itself, which makes it usable as a catch-all
/// at the end of a type list.
///
impl EventType<SdlEvent> for SdlEvent {
    fn extract(source: &SdlEvent) -> Option<Self> {
        Some(source.clone())
    }
}

/// `sdl_event` macro declares typed events that copy fields out of one `sdl2::event::Event` variant.
///
/// Field names must match the names of variant's fields.
///
macro_rules! sdl_event {
    ($(
        $(#[$meta:meta])*
        $name:ident <= $variant:ident {
            $($(#[$field_meta:meta])* $field:ident: $field_type:ty),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $($(#[$field_meta])* pub $field: $field_type,)*
        }
        impl EventType<SdlEvent> for $name {
            fn extract(source: &SdlEvent) -> Option<Self> {
                match source {
                    SdlEvent::$variant { $($field,)* .. } => Some($name {
                        $($field: $field.clone(),)*
                    }),
                    _ => None,
                }
            }
        }
    )*};
}
sdl_event! {
    /// User requested the application to quit.
    ///
    Quit <= Quit {
        /// Timestamp of the event.
        ///
        timestamp: u32,
    }

    /// Key was pressed.
    ///
    KeyDown <= KeyDown {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with keyboard focus.
        ///
        window_id: u32,
        /// Virtual key.
        ///
        keycode: Option<Keycode>,
        /// Physical key.
        ///
        scancode: Option<Scancode>,
        /// Active modifiers.
        ///
        keymod: Mod,
        /// Whether this is a key repeat.
        ///
        repeat: bool,
    }
    /// Key was released.
    ///
    KeyUp <= KeyUp {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with keyboard focus.
        ///
        window_id: u32,
        /// Virtual key.
        ///
        keycode: Option<Keycode>,
        /// Physical key.
        ///
        scancode: Option<Scancode>,
        /// Active modifiers.
        ///
        keymod: Mod,
        /// Whether this is a key repeat.
        ///
        repeat: bool,
    }
    /// Text was entered.
    ///
    TextInput <= TextInput {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with keyboard focus.
        ///
        window_id: u32,
        /// UTF-8 text.
        ///
        text: String,
    }

    /// Mouse was moved.
    ///
    MouseMotion <= MouseMotion {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with mouse focus.
        ///
        window_id: u32,
        /// Mouse instance id.
        ///
        which: u32,
        /// Horizontal position relative to the window.
        ///
        x: i32,
        /// Vertical position relative to the window.
        ///
        y: i32,
        /// Horizontal motion.
        ///
        xrel: i32,
        /// Vertical motion.
        ///
        yrel: i32,
    }
    /// Mouse button was pressed.
    ///
    MouseButtonDown <= MouseButtonDown {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with mouse focus.
        ///
        window_id: u32,
        /// Mouse instance id.
        ///
        which: u32,
        /// Button that was pressed.
        ///
        mouse_btn: MouseButton,
        /// Number of consecutive clicks.
        ///
        clicks: u8,
        /// Horizontal position relative to the window.
        ///
        x: i32,
        /// Vertical position relative to the window.
        ///
        y: i32,
    }
    /// Mouse button was released.
    ///
    MouseButtonUp <= MouseButtonUp {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with mouse focus.
        ///
        window_id: u32,
        /// Mouse instance id.
        ///
        which: u32,
        /// Button that was released.
        ///
        mouse_btn: MouseButton,
        /// Number of consecutive clicks.
        ///
        clicks: u8,
        /// Horizontal position relative to the window.
        ///
        x: i32,
        /// Vertical position relative to the window.
        ///
        y: i32,
    }
    /// Mouse wheel was scrolled.
    ///
    MouseWheel <= MouseWheel {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window with mouse focus.
        ///
        window_id: u32,
        /// Mouse instance id.
        ///
        which: u32,
        /// Horizontal scroll.
        ///
        x: i32,
        /// Vertical scroll.
        ///
        y: i32,
        /// Whether scroll values are flipped.
        ///
        direction: MouseWheelDirection,
    }

    /// Window state has changed (it was shown, resized, focused, closed, ...).
    ///
    WindowEvent <= Window {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Window that has changed.
        ///
        window_id: u32,
        /// What has happened.
        ///
        win_event: sdl2::event::WindowEvent,
    }

    /// Joystick was connected.
    ///
    JoyDeviceAdded <= JoyDeviceAdded {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Device index of the joystick.
        ///
        which: u32,
    }
    /// Joystick was disconnected.
    ///
    JoyDeviceRemoved <= JoyDeviceRemoved {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Instance id of the joystick.
        ///
        which: u32,
    }
    /// Game controller was connected.
    ///
    ControllerDeviceAdded <= ControllerDeviceAdded {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Device index of the controller.
        ///
        which: u32,
    }
    /// Game controller was disconnected.
    ///
    ControllerDeviceRemoved <= ControllerDeviceRemoved {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Instance id of the controller.
        ///
        which: u32,
    }
    /// Game controller button was pressed.
    ///
    ControllerButtonDown <= ControllerButtonDown {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Instance id of the controller.
        ///
        which: u32,
        /// Button that was pressed.
        ///
        button: Button,
    }
    /// Game controller button was released.
    ///
    ControllerButtonUp <= ControllerButtonUp {
        /// Timestamp of the event.
        ///
        timestamp: u32,
        /// Instance id of the controller.
        ///
        which: u32,
        /// Button that was released.
        ///
        button: Button,
    }
}

#[cfg(test)]
mod tests {
    use super::{EventType, KeyDown, Quit, WindowEvent};
    use sdl2::{
        event::{Event as SdlEvent, WindowEvent as SdlWindowEvent},
        keyboard::{Keycode, Mod, Scancode},
    };

    #[test]
    fn extraction() {
        let quit: SdlEvent = SdlEvent::Quit { timestamp: 7 };
        assert_eq!(Quit::extract(&quit), Some(Quit { timestamp: 7 }));
        assert!(KeyDown::extract(&quit).is_none());
        assert_eq!(SdlEvent::extract(&quit), Some(quit.clone()));

        let key: SdlEvent = SdlEvent::KeyDown {
            timestamp: 1,
            window_id: 2,
            keycode: Some(Keycode::Escape),
            scancode: Some(Scancode::Escape),
            keymod: Mod::LSHIFTMOD,
            repeat: false,
        };
        let extracted: KeyDown = KeyDown::extract(&key).expect("Event is a key press");
        assert_eq!(extracted.keycode, Some(Keycode::Escape));
        assert_eq!(extracted.keymod, Mod::LSHIFTMOD);
        assert!(Quit::extract(&key).is_none());

        let window: SdlEvent = SdlEvent::Window {
            timestamp: 3,
            window_id: 1,
            win_event: SdlWindowEvent::Resized(640, 480),
        };
        assert_eq!(
            WindowEvent::extract(&window).map(|event| event.win_event),
            Some(SdlWindowEvent::Resized(640, 480))
        );
    }
}
