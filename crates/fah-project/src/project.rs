//! The project entity graph
//!
//! A [`Project`] owns every registered part in an arena and keeps one
//! lookup index per identity attribute. Indices map a key to an arena slot;
//! parts without a key (empty uid, unnamed channel, ...) are members of the
//! arena but absent from that index.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use fah_core::{Channel, Device, FahFunction, FahString, Floor, Located, Part, PartKind, Room};
use tracing::{trace, warn};

use crate::error::{ProjectError, ProjectResult};
use crate::handle::{Handle, PartHandle, ProjectId};

/// The parts of one loaded SysAP installation
#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    loaded_at: DateTime<Utc>,

    /// Arena: all registered parts in registration order
    parts: Vec<Part>,

    /// Scalar settings of the SysAP itself
    sysap: BTreeMap<String, String>,

    /// Scalar project configuration
    config: BTreeMap<String, String>,

    /// Index: name id -> slot
    string_by_name_id: BTreeMap<u32, usize>,

    /// Index: function id -> slot
    function_by_function_id: BTreeMap<u32, usize>,

    /// Index: floor uid -> slot
    floor_by_uid: BTreeMap<String, usize>,

    /// Index: floor name -> slot
    floor_by_name: BTreeMap<String, usize>,

    /// Index: room uid -> slot
    room_by_uid: BTreeMap<String, usize>,

    /// Index: serial number -> slot
    device_by_serial_number: BTreeMap<String, usize>,

    /// Index: channel name -> slot
    channel_by_name: BTreeMap<String, usize>,
}

impl Project {
    /// Create an empty project
    pub fn new() -> Self {
        Self {
            id: ProjectId::next(),
            loaded_at: Utc::now(),
            parts: Vec::new(),
            sysap: BTreeMap::new(),
            config: BTreeMap::new(),
            string_by_name_id: BTreeMap::new(),
            function_by_function_id: BTreeMap::new(),
            floor_by_uid: BTreeMap::new(),
            floor_by_name: BTreeMap::new(),
            room_by_uid: BTreeMap::new(),
            device_by_serial_number: BTreeMap::new(),
            channel_by_name: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// When this project was created
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of registered parts, indexed or not
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Register a part, taking ownership of it
    ///
    /// The returned handle is owned by this project. A key that is already
    /// indexed is overwritten: the new part wins the index entry and the
    /// previous part stays a member, reachable only through its handle.
    pub fn register(&mut self, part: impl Into<Part>) -> PartHandle {
        let part = part.into();
        let slot = self.parts.len();

        self.index_part(slot, &part);
        trace!("Registered {} #{} in {}", part.part_type(), slot, self.id);
        self.parts.push(part);

        Handle::new(self.id, slot)
    }

    /// Register a part and get a handle typed by its kind
    pub fn create<T: PartKind>(&mut self, part: T) -> Handle<T> {
        let handle = self.register(part);
        Handle::new(handle.owner(), handle.slot())
    }

    pub fn create_string(&mut self, name_id: u32, text: impl Into<String>) -> Handle<FahString> {
        self.create(FahString::new(name_id, text))
    }

    pub fn create_function(&mut self, function_id: u32) -> Handle<FahFunction> {
        self.create(FahFunction::new(function_id))
    }

    pub fn create_floor(&mut self, uid: impl Into<String>) -> Handle<Floor> {
        self.create(Floor::new(uid))
    }

    pub fn create_room(&mut self, uid: impl Into<String>) -> Handle<Room> {
        self.create(Room::new(uid))
    }

    pub fn create_device(&mut self, serial_number: impl Into<String>) -> Handle<Device> {
        self.create(Device::new(serial_number))
    }

    /// Register a channel of a device
    pub fn create_channel(
        &mut self,
        serial_number: impl Into<String>,
        name: impl Into<String>,
    ) -> Handle<Channel> {
        self.create(Channel::new(name).on_device(serial_number))
    }

    /// Re-attach an already registered part
    ///
    /// A handle this project issued is returned unchanged and nothing is
    /// re-indexed. A handle owned by another project is rejected.
    pub fn attach<T>(&self, handle: Handle<T>) -> ProjectResult<Handle<T>> {
        if self.contains(handle) {
            Ok(handle)
        } else {
            Err(ProjectError::ForeignPart {
                owner: handle.owner(),
                project: self.id,
                slot: handle.slot(),
            })
        }
    }

    /// Check whether a handle was issued by this project
    pub fn contains<T>(&self, handle: Handle<T>) -> bool {
        handle.owner() == self.id && handle.slot() < self.parts.len()
    }

    /// Resolve a handle; handles of other projects resolve to `None`
    pub fn get<T: PartKind>(&self, handle: Handle<T>) -> Option<&T> {
        if handle.owner() != self.id {
            return None;
        }
        self.part_at(handle.slot())
    }

    /// Iterate over all members in registration order
    pub fn parts(&self) -> impl Iterator<Item = (PartHandle, &Part)> + '_ {
        self.parts
            .iter()
            .enumerate()
            .map(move |(slot, part)| (Handle::new(self.id, slot), part))
    }

    fn index_part(&mut self, slot: usize, part: &Part) {
        match part {
            Part::String(string) => {
                index_key(&mut self.string_by_name_id, "name id", string.name_id, slot);
            }
            Part::Function(function) => {
                index_key(
                    &mut self.function_by_function_id,
                    "function id",
                    function.function_id,
                    slot,
                );
            }
            Part::Floor(floor) => {
                index_text(&mut self.floor_by_uid, "floor uid", Some(&floor.uid), slot);
                index_text(
                    &mut self.floor_by_name,
                    "floor name",
                    floor.name.as_deref(),
                    slot,
                );
            }
            Part::Room(room) => {
                index_text(&mut self.room_by_uid, "room uid", Some(&room.uid), slot);
            }
            Part::Device(device) => {
                index_text(
                    &mut self.device_by_serial_number,
                    "serial number",
                    Some(&device.serial_number),
                    slot,
                );
            }
            Part::Channel(channel) => {
                index_text(
                    &mut self.channel_by_name,
                    "channel name",
                    channel.name.as_deref(),
                    slot,
                );
            }
        }
    }

    // Settings

    pub fn set_config_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.config.insert(name.into(), value.into());
    }

    pub fn set_sysap_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.sysap.insert(name.into(), value.into());
    }

    pub fn config_value(&self, name: &str) -> Option<&str> {
        self.config.get(name).map(String::as_str)
    }

    pub fn sysap_value(&self, name: &str) -> Option<&str> {
        self.sysap.get(name).map(String::as_str)
    }

    /// Project configuration, ordered by name
    pub fn config(&self) -> &BTreeMap<String, String> {
        &self.config
    }

    /// SysAP settings, ordered by name
    pub fn sysap(&self) -> &BTreeMap<String, String> {
        &self.sysap
    }

    // Enumeration

    /// All indexed channels, ordered by name
    pub fn all_channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.indexed::<_, Channel>(&self.channel_by_name)
    }

    /// All indexed floors, ordered by uid
    pub fn all_floors(&self) -> impl Iterator<Item = &Floor> + '_ {
        self.indexed::<_, Floor>(&self.floor_by_uid)
    }

    /// All indexed rooms, ordered by uid
    pub fn all_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.indexed::<_, Room>(&self.room_by_uid)
    }

    /// All indexed devices, ordered by serial number
    pub fn all_devices(&self) -> impl Iterator<Item = &Device> + '_ {
        self.indexed::<_, Device>(&self.device_by_serial_number)
    }

    /// All functions, ordered by function id
    pub fn all_functions(&self) -> impl Iterator<Item = &FahFunction> + '_ {
        self.indexed::<_, FahFunction>(&self.function_by_function_id)
    }

    /// All strings, ordered by name id
    pub fn all_strings(&self) -> impl Iterator<Item = &FahString> + '_ {
        self.indexed::<_, FahString>(&self.string_by_name_id)
    }

    // Point lookups. Absent or empty keys are "not found".

    pub fn channel_by_name<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&Channel> {
        self.by_text(&self.channel_by_name, name.into())
    }

    pub fn floor_by_uid<'a>(&self, uid: impl Into<Option<&'a str>>) -> Option<&Floor> {
        self.by_text(&self.floor_by_uid, uid.into())
    }

    pub fn floor_by_name<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&Floor> {
        self.by_text(&self.floor_by_name, name.into())
    }

    pub fn room_by_uid<'a>(&self, uid: impl Into<Option<&'a str>>) -> Option<&Room> {
        self.by_text(&self.room_by_uid, uid.into())
    }

    pub fn device_by_serial_number<'a>(
        &self,
        serial_number: impl Into<Option<&'a str>>,
    ) -> Option<&Device> {
        self.by_text(&self.device_by_serial_number, serial_number.into())
    }

    pub fn function_by_function_id(
        &self,
        function_id: impl Into<Option<u32>>,
    ) -> Option<&FahFunction> {
        let slot = *self.function_by_function_id.get(&function_id.into()?)?;
        self.part_at(slot)
    }

    pub fn string_by_name_id(&self, name_id: impl Into<Option<u32>>) -> Option<&FahString> {
        let slot = *self.string_by_name_id.get(&name_id.into()?)?;
        self.part_at(slot)
    }

    // Relationships, resolved on demand. Dangling references are `None`.

    /// The floor a room, device or channel is on
    pub fn floor_of(&self, part: &impl Located) -> Option<&Floor> {
        self.floor_by_uid(part.floor_uid())
    }

    /// The room a device or channel is in (a room resolves to itself)
    pub fn room_of(&self, part: &impl Located) -> Option<&Room> {
        self.room_by_uid(part.room_uid())
    }

    pub fn function_of(&self, channel: &Channel) -> Option<&FahFunction> {
        self.function_by_function_id(channel.function_id)
    }

    pub fn device_of(&self, channel: &Channel) -> Option<&Device> {
        self.device_by_serial_number(channel.device_serial.as_deref())
    }

    /// Display text of a function, if its name id resolves
    pub fn function_name(&self, function: &FahFunction) -> Option<&str> {
        self.string_by_name_id(function.name_id)
            .map(|string| string.text.as_str())
    }

    /// Name to show for a channel: its own display name, else its function's
    pub fn display_name_of<'a>(&'a self, channel: &'a Channel) -> Option<&'a str> {
        channel.display_name.as_deref().or_else(|| {
            self.function_of(channel)
                .and_then(|function| self.function_name(function))
        })
    }

    /// Indexed rooms on a floor, ordered by uid
    pub fn rooms_on<'a>(&'a self, floor: &'a Floor) -> impl Iterator<Item = &'a Room> + 'a {
        self.all_rooms()
            .filter(move |room| room.floor_uid.as_deref() == Some(floor.uid.as_str()))
    }

    /// Channels of a device (named or not), in registration order
    pub fn channels_of<'a>(
        &'a self,
        device: &'a Device,
    ) -> impl Iterator<Item = &'a Channel> + 'a {
        self.parts
            .iter()
            .filter_map(Channel::from_part)
            .filter(move |channel| {
                !device.serial_number.is_empty()
                    && channel.device_serial.as_deref() == Some(device.serial_number.as_str())
            })
    }

    fn part_at<T: PartKind>(&self, slot: usize) -> Option<&T> {
        self.parts.get(slot).and_then(T::from_part)
    }

    fn by_text<T: PartKind>(
        &self,
        index: &BTreeMap<String, usize>,
        key: Option<&str>,
    ) -> Option<&T> {
        let key = key.filter(|key| !key.is_empty())?;
        let slot = *index.get(key)?;
        self.part_at(slot)
    }

    fn indexed<'a, K, T>(
        &'a self,
        index: &'a BTreeMap<K, usize>,
    ) -> impl Iterator<Item = &'a T> + 'a
    where
        K: 'a,
        T: PartKind + 'a,
    {
        index.values().filter_map(move |&slot| self.part_at(slot))
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert into an index, overwriting (and logging) an existing entry
fn index_key<K: Ord + fmt::Debug>(
    index: &mut BTreeMap<K, usize>,
    label: &str,
    key: K,
    slot: usize,
) {
    match index.entry(key) {
        Entry::Occupied(mut entry) => {
            warn!(
                "Duplicate {} {:?}: part #{} replaces #{} in the index",
                label,
                entry.key(),
                slot,
                entry.get()
            );
            entry.insert(slot);
        }
        Entry::Vacant(entry) => {
            entry.insert(slot);
        }
    }
}

/// Index by a text key, skipping absent and empty keys
fn index_text(index: &mut BTreeMap<String, usize>, label: &str, key: Option<&str>, slot: usize) {
    match key {
        Some(key) if !key.is_empty() => index_key(index, label, key.to_string(), slot),
        _ => trace!("Part #{} has no {}, not indexed", slot, label),
    }
}
