//! `resourcecore::input` submodule implements input devices:
//! [`Joystick`], [`GameController`] and [`Sensor`] together with their handles.
//!
//! Devices are opened by device index (`0..count`, see [`Context::joystick_count`] and
//! [`Context::sensor_count`]); events that devices produce carry instance ids, which are stable
//! for as long as the device stays connected.
//!
//! Opened devices are closed when their subsystem quits, so owners borrow the [`Context`] that opened them.
//!

use crate::{
    error::{Error, Result},
    ffi::{check, string_from, to_c_int},
    ownership::{native_resource, BasicResource, Borrowing, Owner, Ownership},
    Context, Subsystems,
};
use sdl2::sys::{
    SDL_GameController, SDL_GameControllerAxis, SDL_GameControllerButton,
    SDL_GameControllerClose, SDL_GameControllerGetAttached, SDL_GameControllerGetAxis,
    SDL_GameControllerGetButton, SDL_GameControllerGetJoystick, SDL_GameControllerName,
    SDL_GameControllerOpen, SDL_GameControllerRumble, SDL_IsGameController, SDL_Joystick,
    SDL_JoystickClose, SDL_JoystickFromInstanceID, SDL_JoystickGetAttached, SDL_JoystickGetAxis,
    SDL_JoystickGetButton, SDL_JoystickInstanceID, SDL_JoystickName, SDL_JoystickNumAxes,
    SDL_JoystickNumButtons, SDL_JoystickNumHats, SDL_JoystickOpen, SDL_JoystickRumble,
    SDL_NumJoysticks, SDL_NumSensors, SDL_Sensor, SDL_SensorClose, SDL_SensorGetData,
    SDL_SensorGetInstanceID, SDL_SensorGetName, SDL_SensorGetType, SDL_SensorOpen, SDL_SensorType,
    SDL_bool,
};
use std::os::raw::c_int;

native_resource! {
    /// [`JoystickKind`] marks opened joysticks (`SDL_Joystick`).
    ///
    JoystickKind => SDL_Joystick, "joystick", SDL_JoystickClose;
    /// [`Joystick`] owns an opened joystick.
    ///
    Joystick<'ctx>;
    /// [`JoystickHandle`] references a joystick without owning it.
    ///
    JoystickHandle;
}
native_resource! {
    /// [`GameControllerKind`] marks opened game controllers (`SDL_GameController`).
    ///
    GameControllerKind => SDL_GameController, "game controller", SDL_GameControllerClose;
    /// [`GameController`] owns an opened game controller.
    ///
    GameController<'ctx>;
    /// [`GameControllerHandle`] references a game controller without owning it.
    ///
    GameControllerHandle;
}
native_resource! {
    /// [`SensorKind`] marks opened sensors (`SDL_Sensor`).
    ///
    SensorKind => SDL_Sensor, "sensor", SDL_SensorClose;
    /// [`Sensor`] owns an opened sensor.
    ///
    Sensor<'ctx>;
    /// [`SensorHandle`] references a sensor without owning it.
    ///
    SensorHandle;
}

/// Converts native boolean into `bool`.
///
fn is_true(value: SDL_bool) -> bool {
    value == SDL_bool::SDL_TRUE
}
/// Converts device index into `c_int`.
///
fn device_index(index: u32) -> Result<c_int> {
    to_c_int(index, "device index")
}

impl Context {
    /// Returns number of connected joysticks (game controllers included).
    ///
    pub fn joystick_count(&self) -> Result<u32> {
        if !self
            .subsystems()
            .intersects(Subsystems::JOYSTICK | Subsystems::GAME_CONTROLLER)
        {
            return Err(Error::Uninitialized("joystick"));
        }
        let count: c_int = check("SDL_NumJoysticks", unsafe { SDL_NumJoysticks() })?;
        Ok(count.unsigned_abs())
    }
    /// Returns whether joystick with given device index is supported by the game controller interface.
    ///
    pub fn is_game_controller(&self, index: u32) -> Result<bool> {
        self.require(Subsystems::GAME_CONTROLLER, "game controller")?;
        let index: c_int = device_index(index)?;
        Ok(is_true(unsafe { SDL_IsGameController(index) }))
    }
    /// Returns number of available sensors.
    ///
    pub fn sensor_count(&self) -> Result<u32> {
        self.require(Subsystems::SENSOR, "sensor")?;
        let count: c_int = check("SDL_NumSensors", unsafe { SDL_NumSensors() })?;
        Ok(count.unsigned_abs())
    }
}

impl<'ctx> Joystick<'ctx> {
    /// Opens joystick with given device index.
    ///
    pub fn open(context: &'ctx Context, index: u32) -> Result<Joystick<'ctx>> {
        let _ = context.joystick_count()?;
        let index: c_int = device_index(index)?;
        unsafe { Owner::acquire(SDL_JoystickOpen(index)) }
    }
}
impl<'a> BasicResource<JoystickKind, Borrowing<'a>> {
    /// Returns handle of opened joystick with given instance id (empty handle if there is none).
    ///
    /// # Safety
    /// The joystick must stay opened for `'a`.
    ///
    pub unsafe fn from_instance_id(id: i32) -> Self {
        unsafe { Self::from_raw(SDL_JoystickFromInstanceID(id)) }
    }
}
impl<O: Ownership> BasicResource<JoystickKind, O> {
    /// Returns name of the joystick.
    ///
    pub fn name(&self) -> Result<Option<String>> {
        Ok(unsafe { string_from(SDL_JoystickName(self.get()?)) })
    }
    /// Returns instance id of the joystick (the one that events carry).
    ///
    pub fn instance_id(&self) -> Result<i32> {
        let id: i32 = unsafe { SDL_JoystickInstanceID(self.get()?) };
        if id < 0 {
            Err(Error::native("SDL_JoystickInstanceID"))
        } else {
            Ok(id)
        }
    }
    /// Returns whether the joystick is still connected.
    ///
    pub fn is_attached(&self) -> Result<bool> {
        Ok(is_true(unsafe { SDL_JoystickGetAttached(self.get()?) }))
    }
    /// Returns number of axes.
    ///
    pub fn axis_count(&self) -> Result<u32> {
        let count: c_int = check("SDL_JoystickNumAxes", unsafe {
            SDL_JoystickNumAxes(self.get()?)
        })?;
        Ok(count.unsigned_abs())
    }
    /// Returns number of buttons.
    ///
    pub fn button_count(&self) -> Result<u32> {
        let count: c_int = check("SDL_JoystickNumButtons", unsafe {
            SDL_JoystickNumButtons(self.get()?)
        })?;
        Ok(count.unsigned_abs())
    }
    /// Returns number of hats.
    ///
    pub fn hat_count(&self) -> Result<u32> {
        let count: c_int = check("SDL_JoystickNumHats", unsafe {
            SDL_JoystickNumHats(self.get()?)
        })?;
        Ok(count.unsigned_abs())
    }
    /// Returns position of the axis.
    ///
    pub fn axis(&self, axis: u32) -> Result<i16> {
        let joystick: *mut SDL_Joystick = self.get()?;
        if axis >= self.axis_count()? {
            return Err(Error::InvalidArgument(format!("joystick has no axis {axis}")));
        }
        Ok(unsafe { SDL_JoystickGetAxis(joystick, axis as c_int) })
    }
    /// Returns whether the button is pressed.
    ///
    pub fn button(&self, button: u32) -> Result<bool> {
        let joystick: *mut SDL_Joystick = self.get()?;
        if button >= self.button_count()? {
            return Err(Error::InvalidArgument(format!(
                "joystick has no button {button}"
            )));
        }
        Ok(unsafe { SDL_JoystickGetButton(joystick, button as c_int) } != 0)
    }
    /// Starts rumble effect for `duration_ms` milliseconds.
    ///
    pub fn rumble(&self, low_frequency: u16, high_frequency: u16, duration_ms: u32) -> Result<()> {
        let _ = check("SDL_JoystickRumble", unsafe {
            SDL_JoystickRumble(self.get()?, low_frequency, high_frequency, duration_ms)
        })?;
        Ok(())
    }
}

/// [`ControllerAxis`] enum lists axes of game controllers.
///
/// Discriminants are values of native `SDL_GameControllerAxis`.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ControllerAxis {
    /// Horizontal axis of the left stick.
    ///
    LeftX = 0,
    /// Vertical axis of the left stick.
    ///
    LeftY = 1,
    /// Horizontal axis of the right stick.
    ///
    RightX = 2,
    /// Vertical axis of the right stick.
    ///
    RightY = 3,
    /// Left trigger.
    ///
    TriggerLeft = 4,
    /// Right trigger.
    ///
    TriggerRight = 5,
}
const _: () = {
    assert!(ControllerAxis::LeftX as i32 == SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_LEFTX as i32);
    assert!(
        ControllerAxis::TriggerRight as i32
            == SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_TRIGGERRIGHT as i32
    );
};
impl ControllerAxis {
    /// Returns native representation of this axis.
    ///
    fn to_sys(self) -> SDL_GameControllerAxis {
        match self {
            ControllerAxis::LeftX => SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_LEFTX,
            ControllerAxis::LeftY => SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_LEFTY,
            ControllerAxis::RightX => SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_RIGHTX,
            ControllerAxis::RightY => SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_RIGHTY,
            ControllerAxis::TriggerLeft => SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_TRIGGERLEFT,
            ControllerAxis::TriggerRight => {
                SDL_GameControllerAxis::SDL_CONTROLLER_AXIS_TRIGGERRIGHT
            }
        }
    }
}
/// [`ControllerButton`] enum lists buttons of game controllers.
///
/// Discriminants are values of native `SDL_GameControllerButton`.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ControllerButton {
    /// Bottom face button (A on Xbox layout).
    ///
    A = 0,
    /// Right face button.
    ///
    B = 1,
    /// Left face button.
    ///
    X = 2,
    /// Top face button.
    ///
    Y = 3,
    /// Back button.
    ///
    Back = 4,
    /// Guide button.
    ///
    Guide = 5,
    /// Start button.
    ///
    Start = 6,
    /// Left stick press.
    ///
    LeftStick = 7,
    /// Right stick press.
    ///
    RightStick = 8,
    /// Left shoulder.
    ///
    LeftShoulder = 9,
    /// Right shoulder.
    ///
    RightShoulder = 10,
    /// D-pad up.
    ///
    DPadUp = 11,
    /// D-pad down.
    ///
    DPadDown = 12,
    /// D-pad left.
    ///
    DPadLeft = 13,
    /// D-pad right.
    ///
    DPadRight = 14,
}
const _: () = {
    assert!(ControllerButton::A as i32 == SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_A as i32);
    assert!(
        ControllerButton::LeftShoulder as i32
            == SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_LEFTSHOULDER as i32
    );
    assert!(
        ControllerButton::DPadRight as i32
            == SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_DPAD_RIGHT as i32
    );
};
impl ControllerButton {
    /// Returns native representation of this button.
    ///
    fn to_sys(self) -> SDL_GameControllerButton {
        use SDL_GameControllerButton as B;
        match self {
            ControllerButton::A => B::SDL_CONTROLLER_BUTTON_A,
            ControllerButton::B => B::SDL_CONTROLLER_BUTTON_B,
            ControllerButton::X => B::SDL_CONTROLLER_BUTTON_X,
            ControllerButton::Y => B::SDL_CONTROLLER_BUTTON_Y,
            ControllerButton::Back => B::SDL_CONTROLLER_BUTTON_BACK,
            ControllerButton::Guide => B::SDL_CONTROLLER_BUTTON_GUIDE,
            ControllerButton::Start => B::SDL_CONTROLLER_BUTTON_START,
            ControllerButton::LeftStick => B::SDL_CONTROLLER_BUTTON_LEFTSTICK,
            ControllerButton::RightStick => B::SDL_CONTROLLER_BUTTON_RIGHTSTICK,
            ControllerButton::LeftShoulder => B::SDL_CONTROLLER_BUTTON_LEFTSHOULDER,
            ControllerButton::RightShoulder => B::SDL_CONTROLLER_BUTTON_RIGHTSHOULDER,
            ControllerButton::DPadUp => B::SDL_CONTROLLER_BUTTON_DPAD_UP,
            ControllerButton::DPadDown => B::SDL_CONTROLLER_BUTTON_DPAD_DOWN,
            ControllerButton::DPadLeft => B::SDL_CONTROLLER_BUTTON_DPAD_LEFT,
            ControllerButton::DPadRight => B::SDL_CONTROLLER_BUTTON_DPAD_RIGHT,
        }
    }
}

impl<'ctx> GameController<'ctx> {
    /// Opens game controller with given device index.
    ///
    /// Fails with [`Error::InvalidArgument`] if the joystick at this index is not a game controller.
    ///
    /// # Example
    /// ```rust, no_run
    /// # use ggsdl::{Context, ContextSettings, Subsystems, resourcecore::input::{GameController, JoystickHandle}};
    /// let context: Context = Context::init(&ContextSettings {
    ///     subsystems: Subsystems::GAME_CONTROLLER | Subsystems::EVENTS,
    ///     ..ContextSettings::default()
    /// }).expect("SDL should be available");
    /// let controller: GameController = GameController::open(&context, 0).expect("Controller should be connected");
    /// let joystick: JoystickHandle = controller.joystick().expect("Controller is valid");
    /// println!("{:?} has {} axes", controller.name(), joystick.axis_count().expect("Joystick is valid"));
    /// ```
    ///
    pub fn open(context: &'ctx Context, index: u32) -> Result<GameController<'ctx>> {
        if !context.is_game_controller(index)? {
            return Err(Error::InvalidArgument(format!(
                "joystick {index} is not a game controller"
            )));
        }
        let index: c_int = device_index(index)?;
        unsafe { Owner::acquire(SDL_GameControllerOpen(index)) }
    }
}
impl<O: Ownership> BasicResource<GameControllerKind, O> {
    /// Returns name of the game controller.
    ///
    pub fn name(&self) -> Result<Option<String>> {
        Ok(unsafe { string_from(SDL_GameControllerName(self.get()?)) })
    }
    /// Returns whether the game controller is still connected.
    ///
    pub fn is_attached(&self) -> Result<bool> {
        Ok(is_true(unsafe {
            SDL_GameControllerGetAttached(self.get()?)
        }))
    }
    /// Returns position of the axis.
    ///
    pub fn axis(&self, axis: ControllerAxis) -> Result<i16> {
        Ok(unsafe { SDL_GameControllerGetAxis(self.get()?, axis.to_sys()) })
    }
    /// Returns whether the button is pressed.
    ///
    pub fn button(&self, button: ControllerButton) -> Result<bool> {
        Ok(unsafe { SDL_GameControllerGetButton(self.get()?, button.to_sys()) } != 0)
    }
    /// Starts rumble effect for `duration_ms` milliseconds.
    ///
    pub fn rumble(&self, low_frequency: u16, high_frequency: u16, duration_ms: u32) -> Result<()> {
        let _ = check("SDL_GameControllerRumble", unsafe {
            SDL_GameControllerRumble(self.get()?, low_frequency, high_frequency, duration_ms)
        })?;
        Ok(())
    }
    /// Returns handle of the joystick that underlies the game controller.
    ///
    /// Joystick is owned by the controller; the handle borrows it.
    ///
    pub fn joystick(&self) -> Result<JoystickHandle<'_>> {
        Ok(unsafe { JoystickHandle::from_raw(SDL_GameControllerGetJoystick(self.get()?)) })
    }
}

/// [`SensorType`] enum lists kinds of sensors.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SensorType {
    /// Accelerometer (m/s² on three axes).
    ///
    Accelerometer,
    /// Gyroscope (rad/s on three axes).
    ///
    Gyroscope,
    /// Sensor that SDL does not describe.
    ///
    Unknown,
}

impl<'ctx> Sensor<'ctx> {
    /// Opens sensor with given device index.
    ///
    pub fn open(context: &'ctx Context, index: u32) -> Result<Sensor<'ctx>> {
        context.require(Subsystems::SENSOR, "sensor")?;
        let index: c_int = device_index(index)?;
        unsafe { Owner::acquire(SDL_SensorOpen(index)) }
    }
}
impl<O: Ownership> BasicResource<SensorKind, O> {
    /// Returns name of the sensor.
    ///
    pub fn name(&self) -> Result<Option<String>> {
        Ok(unsafe { string_from(SDL_SensorGetName(self.get()?)) })
    }
    /// Returns instance id of the sensor.
    ///
    pub fn instance_id(&self) -> Result<i32> {
        Ok(unsafe { SDL_SensorGetInstanceID(self.get()?) })
    }
    /// Returns kind of the sensor.
    ///
    pub fn sensor_type(&self) -> Result<SensorType> {
        Ok(match unsafe { SDL_SensorGetType(self.get()?) } {
            SDL_SensorType::SDL_SENSOR_ACCEL => SensorType::Accelerometer,
            SDL_SensorType::SDL_SENSOR_GYRO => SensorType::Gyroscope,
            _ => SensorType::Unknown,
        })
    }
    /// Returns current readings of the sensor (accelerometers and gyroscopes have three values).
    ///
    pub fn data(&self, count: usize) -> Result<Vec<f32>> {
        let mut data: Vec<f32> = vec![0.0; count];
        let length: c_int = c_int::try_from(count)
            .map_err(|_| Error::InvalidArgument(format!("{count} readings exceed `c_int::MAX`")))?;
        let _ = check("SDL_SensorGetData", unsafe {
            SDL_SensorGetData(self.get()?, data.as_mut_ptr(), length)
        })?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        device_index, ControllerAxis, ControllerButton, GameControllerHandle, JoystickHandle,
        SensorHandle,
    };
    use crate::error::Error;

    #[test]
    fn values() {
        assert_eq!(ControllerAxis::TriggerLeft as i32, 4);
        assert_eq!(ControllerButton::Start as i32, 6);
        assert_eq!(
            ControllerButton::DPadLeft.to_sys() as i32,
            ControllerButton::DPadLeft as i32
        );
        assert_eq!(ControllerAxis::RightY.to_sys() as i32, 3);
        assert!(matches!(device_index(u32::MAX), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_handles_are_rejected() {
        assert!(matches!(
            JoystickHandle::null().axis(0),
            Err(Error::NullResource { kind: "joystick" })
        ));
        assert!(matches!(
            GameControllerHandle::null().joystick(),
            Err(Error::NullResource {
                kind: "game controller"
            })
        ));
        assert!(matches!(
            SensorHandle::null().data(3),
            Err(Error::NullResource { kind: "sensor" })
        ));
    }
}
