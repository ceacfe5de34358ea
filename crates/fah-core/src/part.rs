//! Part types that make up a SysAP project

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a part, used for logging and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartType {
    String,
    Function,
    Floor,
    Room,
    Device,
    Channel,
}

impl PartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::String => "string",
            PartType::Function => "function",
            PartType::Floor => "floor",
            PartType::Room => "room",
            PartType::Device => "device",
            PartType::Channel => "channel",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display string, referenced by its name id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FahString {
    pub name_id: u32,
    pub text: String,
}

impl FahString {
    pub fn new(name_id: u32, text: impl Into<String>) -> Self {
        Self {
            name_id,
            text: text.into(),
        }
    }
}

/// A functional role descriptor (switch actuator, dimmer, blind, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FahFunction {
    pub function_id: u32,

    /// Name id of the display string describing this function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_id: Option<u32>,
}

impl FahFunction {
    pub fn new(function_id: u32) -> Self {
        Self {
            function_id,
            name_id: None,
        }
    }

    pub fn with_name_id(mut self, name_id: u32) -> Self {
        self.name_id = Some(name_id);
        self
    }
}

/// A building floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor uid (e.g. "01"); an empty uid leaves the floor unindexed
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Floor {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A room located on a floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Uid of the floor this room is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_uid: Option<String>,
}

impl Room {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
            floor_uid: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_floor(mut self, floor_uid: impl Into<String>) -> Self {
        self.floor_uid = Some(floor_uid.into());
        self
    }
}

/// A physical device (actuator, sensor, panel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Serial number (e.g. "ABB7F500E1D1"); an empty serial leaves the device unindexed
    pub serial_number: String,

    /// Hardware type id as reported by the SysAP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_uid: Option<String>,
}

impl Device {
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            device_id: None,
            display_name: None,
            floor_uid: None,
            room_uid: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn located(mut self, floor_uid: impl Into<String>, room_uid: impl Into<String>) -> Self {
        self.floor_uid = Some(floor_uid.into());
        self.room_uid = Some(room_uid.into());
        self
    }
}

/// A controllable or observable point on a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name (e.g. "ch0000"); unnamed channels are not indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Serial number of the device this channel belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_serial: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<u32>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A channel without a name; it is a project member but cannot be looked up by name
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn on_device(mut self, serial_number: impl Into<String>) -> Self {
        self.device_serial = Some(serial_number.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_function(mut self, function_id: u32) -> Self {
        self.function_id = Some(function_id);
        self
    }

    pub fn located(mut self, floor_uid: impl Into<String>, room_uid: impl Into<String>) -> Self {
        self.floor_uid = Some(floor_uid.into());
        self.room_uid = Some(room_uid.into());
        self
    }
}

/// Parts that reference a floor and a room by uid
pub trait Located {
    fn floor_uid(&self) -> Option<&str>;
    fn room_uid(&self) -> Option<&str>;
}

impl Located for Room {
    fn floor_uid(&self) -> Option<&str> {
        self.floor_uid.as_deref()
    }

    fn room_uid(&self) -> Option<&str> {
        Some(&self.uid)
    }
}

impl Located for Device {
    fn floor_uid(&self) -> Option<&str> {
        self.floor_uid.as_deref()
    }

    fn room_uid(&self) -> Option<&str> {
        self.room_uid.as_deref()
    }
}

impl Located for Channel {
    fn floor_uid(&self) -> Option<&str> {
        self.floor_uid.as_deref()
    }

    fn room_uid(&self) -> Option<&str> {
        self.room_uid.as_deref()
    }
}

/// Any entity that can be registered into a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    String(FahString),
    Function(FahFunction),
    Floor(Floor),
    Room(Room),
    Device(Device),
    Channel(Channel),
}

impl Part {
    pub fn part_type(&self) -> PartType {
        match self {
            Part::String(_) => PartType::String,
            Part::Function(_) => PartType::Function,
            Part::Floor(_) => PartType::Floor,
            Part::Room(_) => PartType::Room,
            Part::Device(_) => PartType::Device,
            Part::Channel(_) => PartType::Channel,
        }
    }
}

/// A concrete part type that can be recovered from a [`Part`]
pub trait PartKind: Into<Part> {
    fn from_part(part: &Part) -> Option<&Self>;
}

impl PartKind for Part {
    fn from_part(part: &Part) -> Option<&Self> {
        Some(part)
    }
}

macro_rules! part_kind {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Part {
            fn from(value: $ty) -> Self {
                Part::$variant(value)
            }
        }

        impl PartKind for $ty {
            fn from_part(part: &Part) -> Option<&Self> {
                match part {
                    Part::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

part_kind!(String, FahString);
part_kind!(Function, FahFunction);
part_kind!(Floor, Floor);
part_kind!(Room, Room);
part_kind!(Device, Device);
part_kind!(Channel, Channel);
