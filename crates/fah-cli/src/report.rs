//! Topology report of a loaded project

use std::collections::BTreeMap;
use std::fmt;

use fah_project::{format_sysap_id, Channel, Project};
use serde::Serialize;

/// Floors with their rooms, then channels with resolved names
pub struct TextReport<'a>(pub &'a Project);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = self.0;
        let title = project.sysap_value("sysapName").unwrap_or("SysAP");
        writeln!(
            f,
            "{} (project {}, loaded {})",
            title,
            project.id(),
            project.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        writeln!(f, "\nFloors")?;
        for floor in project.all_floors() {
            writeln!(f, "  {} {}", floor.uid, floor.name.as_deref().unwrap_or("-"))?;
            for room in project.rooms_on(floor) {
                writeln!(f, "    {} {}", room.uid, room.name.as_deref().unwrap_or("-"))?;
            }
        }

        writeln!(f, "\nChannels")?;
        for channel in project.all_channels() {
            let entry = ChannelEntry::new(project, channel);
            write!(
                f,
                "  {}/{}  {}",
                entry.device.unwrap_or("?"),
                entry.name,
                entry.display_name.unwrap_or("-")
            )?;
            if let Some(room) = entry.room {
                write!(f, "  [{}]", room)?;
            }
            match (entry.function, entry.function_id) {
                (Some(function), Some(id)) => write!(f, "  {} ({})", function, id)?,
                (None, Some(id)) => write!(f, "  ({})", id)?,
                _ => {}
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct FloorEntry<'a> {
    uid: &'a str,
    name: Option<&'a str>,
    rooms: Vec<RoomEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct RoomEntry<'a> {
    uid: &'a str,
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ChannelEntry<'a> {
    name: &'a str,
    device: Option<&'a str>,
    display_name: Option<&'a str>,
    room: Option<&'a str>,
    floor: Option<&'a str>,
    function_id: Option<String>,
    function: Option<&'a str>,
}

impl<'a> ChannelEntry<'a> {
    fn new(project: &'a Project, channel: &'a Channel) -> Self {
        let function = project
            .function_of(channel)
            .and_then(|function| project.function_name(function));
        Self {
            name: channel.name.as_deref().unwrap_or_default(),
            device: channel.device_serial.as_deref(),
            display_name: project.display_name_of(channel),
            room: project.room_of(channel).and_then(|room| room.name.as_deref()),
            floor: project
                .floor_of(channel)
                .and_then(|floor| floor.name.as_deref()),
            function_id: channel.function_id.map(format_sysap_id),
            function,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    project: String,
    loaded_at: String,
    sysap: &'a BTreeMap<String, String>,
    floors: Vec<FloorEntry<'a>>,
    channels: Vec<ChannelEntry<'a>>,
}

pub fn render_text(project: &Project) -> String {
    TextReport(project).to_string()
}

pub fn render_json(project: &Project) -> serde_json::Result<String> {
    let report = JsonReport {
        project: project.id().to_string(),
        loaded_at: project.loaded_at().to_rfc3339(),
        sysap: project.sysap(),
        floors: project
            .all_floors()
            .map(|floor| FloorEntry {
                uid: &floor.uid,
                name: floor.name.as_deref(),
                rooms: project
                    .rooms_on(floor)
                    .map(|room| RoomEntry {
                        uid: &room.uid,
                        name: room.name.as_deref(),
                    })
                    .collect(),
            })
            .collect(),
        channels: project
            .all_channels()
            .map(|channel| ChannelEntry::new(project, channel))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fah_project::load_project;

    const PROJECT_XML: &str = include_str!("../../fah-project/tests/fixtures/project.xml");

    #[test]
    fn test_text_report() {
        let project = load_project(PROJECT_XML).unwrap();
        let text = render_text(&project);

        assert!(text.starts_with("SysAP Musterhaus (project P"));
        assert!(text.contains("  01 Erdgeschoss\n    01 Küche\n    02 Wohnzimmer\n"));
        assert!(text.contains("  02 Obergeschoss\n    03 Schlafzimmer\n"));
        assert!(text.contains("  ABB7F500E1D1/ch0000  Deckenlicht  [Küche]  Schaltaktor (0007)\n"));
        assert!(text.contains("  ABB2E0A1B2C3/ch0003  Rollo  [Schlafzimmer]  (0009)\n"));
        assert!(text.contains("  ABB700000001/ch0010  -  (00FF)\n"));
        assert!(!text.contains("Statusmeldung"));
    }

    #[test]
    fn test_json_report() {
        let project = load_project(PROJECT_XML).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&project).unwrap()).unwrap();

        assert_eq!(json["sysap"]["sysapName"], "SysAP Musterhaus");
        assert_eq!(json["floors"][0]["uid"], "01");
        assert_eq!(json["floors"][0]["rooms"][1]["name"], "Wohnzimmer");
        assert_eq!(json["channels"].as_array().unwrap().len(), 4);
        assert_eq!(json["channels"][1]["function"], "Dimmaktor");
        assert_eq!(json["channels"][1]["function_id"], "0012");
        assert_eq!(json["channels"][1]["floor"], "Erdgeschoss");
    }

    #[test]
    fn test_empty_project() {
        let project = Project::new();
        let text = render_text(&project);
        assert!(text.starts_with("SysAP (project"));
        assert!(text.ends_with("Floors\n\nChannels\n"));
    }
}
