//! SysAP project description loader
//!
//! Parses the XML returned by `RemoteInterface.getAll` and registers every
//! part it describes into a [`Project`]:
//!
//! - `<sysap>` / `<config>`: `<attribute name="...">` scalar settings
//! - `<strings>`: `<string nameId="...">text</string>`
//! - `<functions>`: `<function functionId="..." nameId="..."/>`
//! - `<floorplan>`: `<floor uid name>` with nested `<room uid name>`
//! - `<devices>`: `<device serialNumber>` with nested `<channels><channel i>`
//!
//! Name ids and function ids are hexadecimal. Unknown sections are ignored.

mod xml;

use fah_core::{parse_sysap_id, Channel, Device, FahFunction, FahString, Floor, Room};
use tracing::{debug, info, trace};

use crate::error::{ProjectError, ProjectResult};
use crate::project::Project;
use xml::Element;

/// Registers the parts of a project description into a target project
pub struct ProjectLoader<'p> {
    project: &'p mut Project,
}

impl<'p> ProjectLoader<'p> {
    pub fn new(project: &'p mut Project) -> Self {
        Self { project }
    }

    /// Parse a project description and register everything in it
    ///
    /// On error the target may be partially populated and should be
    /// discarded.
    pub fn load(&mut self, xml: &str) -> ProjectResult<()> {
        let root = xml::parse(xml)?;
        if root.name != "project" {
            return Err(ProjectError::UnexpectedRoot {
                found: format!("<{}>", root.name),
            });
        }

        for section in &root.children {
            match section.name.as_str() {
                "sysap" => {
                    for (name, value) in section.properties() {
                        self.project.set_sysap_value(name, value);
                    }
                }
                "config" => {
                    for (name, value) in section.properties() {
                        self.project.set_config_value(name, value);
                    }
                }
                "strings" => self.load_strings(section)?,
                "functions" => self.load_functions(section)?,
                "floorplan" => self.load_floorplan(section),
                "devices" => self.load_devices(section)?,
                other => trace!("Ignoring <{}> section", other),
            }
        }

        Ok(())
    }

    fn load_strings(&mut self, section: &Element) -> ProjectResult<()> {
        let mut count = 0;
        for element in section.children_named("string") {
            let name_id = required_id(element, "nameId")?;
            self.project
                .register(FahString::new(name_id, element.text.as_str()));
            count += 1;
        }
        debug!("Registered {} strings", count);
        Ok(())
    }

    fn load_functions(&mut self, section: &Element) -> ProjectResult<()> {
        let mut count = 0;
        for element in section.children_named("function") {
            let function = FahFunction {
                function_id: required_id(element, "functionId")?,
                name_id: optional_id(element, "nameId", element.attr("nameId"))?,
            };
            self.project.register(function);
            count += 1;
        }
        debug!("Registered {} functions", count);
        Ok(())
    }

    fn load_floorplan(&mut self, section: &Element) {
        let mut rooms = 0;
        for floor_element in section.children_named("floor") {
            let floor = Floor {
                uid: key(floor_element.attr("uid")),
                name: non_empty(floor_element.attr("name")),
            };
            let floor_uid = floor.uid.clone();
            self.project.register(floor);

            for room_element in floor_element.children_named("room") {
                let room = Room {
                    uid: key(room_element.attr("uid")),
                    name: non_empty(room_element.attr("name")),
                    floor_uid: non_empty(Some(floor_uid.as_str())),
                };
                self.project.register(room);
                rooms += 1;
            }
        }
        debug!(
            "Registered {} floors with {} rooms",
            section.children_named("floor").count(),
            rooms
        );
    }

    fn load_devices(&mut self, section: &Element) -> ProjectResult<()> {
        let mut devices = 0;
        let mut channels = 0;
        for device_element in section.children_named("device") {
            let device = Device {
                serial_number: key(device_element.attr("serialNumber")),
                device_id: non_empty(device_element.attr("deviceId")),
                display_name: non_empty(device_element.property("displayName")),
                floor_uid: non_empty(device_element.property("floor")),
                room_uid: non_empty(device_element.property("room")),
            };
            let serial_number = non_empty(Some(device.serial_number.as_str()));
            self.project.register(device);
            devices += 1;

            for channel_element in device_element
                .children_named("channels")
                .flat_map(|channels| channels.children_named("channel"))
            {
                let channel = Channel {
                    name: non_empty(channel_element.attr("i")),
                    device_serial: serial_number.clone(),
                    display_name: non_empty(channel_element.property("displayName")),
                    floor_uid: non_empty(channel_element.property("floor")),
                    room_uid: non_empty(channel_element.property("room")),
                    function_id: optional_id(
                        channel_element,
                        "functionId",
                        channel_element.property("functionId"),
                    )?,
                };
                self.project.register(channel);
                channels += 1;
            }
        }
        debug!("Registered {} devices with {} channels", devices, channels);
        Ok(())
    }
}

/// Load a project description into a new project
///
/// A failed load yields no project at all.
pub fn load_project(xml: &str) -> ProjectResult<Project> {
    let mut project = Project::new();
    ProjectLoader::new(&mut project).load(xml)?;

    info!(
        "Loaded project {}: {} parts ({} floors, {} rooms, {} devices, {} channels)",
        project.id(),
        project.len(),
        project.all_floors().count(),
        project.all_rooms().count(),
        project.all_devices().count(),
        project.all_channels().count()
    );

    Ok(project)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// An identity key; absent keys become empty and stay unindexed
fn key(value: Option<&str>) -> String {
    non_empty(value).unwrap_or_default()
}

fn required_id(element: &Element, attribute: &str) -> ProjectResult<u32> {
    let value = element
        .attr(attribute)
        .ok_or_else(|| ProjectError::MissingAttribute {
            element: element.name.clone(),
            attribute: attribute.to_string(),
        })?;
    parse_id(element, attribute, value)
}

fn optional_id(element: &Element, field: &str, value: Option<&str>) -> ProjectResult<Option<u32>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| parse_id(element, field, value))
        .transpose()
}

fn parse_id(element: &Element, field: &str, value: &str) -> ProjectResult<u32> {
    parse_sysap_id(value).map_err(|source| ProjectError::InvalidId {
        element: element.name.clone(),
        field: field.to_string(),
        source,
    })
}
