//! Loading a full SysAP project description
//!
//! The fixture mirrors the shape of a `RemoteInterface.getAll` response:
//! settings, strings, functions, a floorplan and devices with channels.

use fah_project::{load_project, Project, ProjectError};

const PROJECT_XML: &str = include_str!("fixtures/project.xml");

fn project() -> Project {
    load_project(PROJECT_XML).unwrap()
}

#[test]
fn test_settings_tables() {
    let project = project();

    assert_eq!(project.sysap_value("sysapName"), Some("SysAP Musterhaus"));
    assert_eq!(project.config_value("language"), Some("de"));

    let keys: Vec<_> = project.config().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["language", "timezone"]);
}

#[test]
fn test_member_counts() {
    let project = project();

    // 3 strings, 3 functions, 2 floors, 3 rooms, 3 devices, 5 channels
    assert_eq!(project.len(), 19);
    assert_eq!(project.all_strings().count(), 3);
    assert_eq!(project.all_functions().count(), 3);
    assert_eq!(project.all_rooms().count(), 3);
    assert_eq!(project.all_devices().count(), 3);
    // the unnamed channel is a member but not indexed
    assert_eq!(project.all_channels().count(), 4);
}

#[test]
fn test_floors_are_ordered_by_uid() {
    let project = project();

    let floors: Vec<_> = project
        .all_floors()
        .map(|floor| (floor.uid.as_str(), floor.name.as_deref()))
        .collect();
    assert_eq!(
        floors,
        vec![("01", Some("Erdgeschoss")), ("02", Some("Obergeschoss"))]
    );

    let ground = project.floor_by_name("Erdgeschoss").unwrap();
    let rooms: Vec<_> = project
        .rooms_on(ground)
        .filter_map(|room| room.name.as_deref())
        .collect();
    assert_eq!(rooms, vec!["Küche", "Wohnzimmer"]);
}

#[test]
fn test_device_and_channels() {
    let project = project();

    let device = project.device_by_serial_number("ABB7F500E1D1").unwrap();
    assert_eq!(device.device_id.as_deref(), Some("B002"));
    assert_eq!(device.display_name.as_deref(), Some("Aktor Küche"));
    assert_eq!(
        project.room_of(device).and_then(|room| room.name.as_deref()),
        Some("Küche")
    );

    let names: Vec<_> = project
        .channels_of(device)
        .filter_map(|channel| channel.display_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Deckenlicht", "Arbeitslicht"]);

    let channel = project.channel_by_name("ch0001").unwrap();
    assert_eq!(project.device_of(channel), Some(device));
    let function = project.function_of(channel).unwrap();
    assert_eq!(function.function_id, 0x12);
    assert_eq!(project.function_name(function), Some("Dimmaktor"));
}

#[test]
fn test_unnamed_channel_is_still_a_member() {
    let project = project();

    let device = project.device_by_serial_number("ABB2E0A1B2C3").unwrap();
    assert_eq!(project.channels_of(device).count(), 2);
    assert!(project.room_of(device).is_none());
}

#[test]
fn test_dangling_references_resolve_to_none() {
    let project = project();

    let channel = project.channel_by_name("ch0010").unwrap();
    assert_eq!(channel.function_id, Some(0xff));
    assert!(project.function_of(channel).is_none());
    assert!(project.room_of(channel).is_none());
    assert!(project.floor_of(channel).is_none());

    // function 0x09 exists but has no name id
    let rollo = project.channel_by_name("ch0003").unwrap();
    let function = project.function_of(rollo).unwrap();
    assert!(project.function_name(function).is_none());
}

#[test]
fn test_string_ids_are_hex() {
    let project = project();

    assert_eq!(
        project.string_by_name_id(42u32).map(|s| s.text.as_str()),
        Some("Jalousieaktor")
    );
    assert!(project.string_by_name_id(0x2bu32).is_none());
}

#[test]
fn test_repeated_channel_names_overwrite() {
    let project = load_project(
        r#"<project><devices>
             <device serialNumber="A"><channels><channel i="ch0000"/></channels></device>
             <device serialNumber="B"><channels><channel i="ch0000"/></channels></device>
           </devices></project>"#,
    )
    .unwrap();

    let channel = project.channel_by_name("ch0000").unwrap();
    assert_eq!(channel.device_serial.as_deref(), Some("B"));
    assert_eq!(project.all_channels().count(), 1);

    let first = project.device_by_serial_number("A").unwrap();
    assert_eq!(project.channels_of(first).count(), 1);
}

#[test]
fn test_truncated_description_fails() {
    let cut = PROJECT_XML.find("<devices>").unwrap();
    let err = load_project(&PROJECT_XML[..cut]).unwrap_err();
    assert!(matches!(err, ProjectError::UnexpectedEof { ref element } if element == "project"));
}

#[test]
fn test_each_load_is_a_new_project() {
    let first = project();
    let second = project();
    assert_ne!(first.id(), second.id());
}
