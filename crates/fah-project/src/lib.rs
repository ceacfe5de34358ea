//! free@home project graph
//!
//! This crate turns the parts of a SysAP project into a consistent,
//! multiply-indexed graph:
//! - [`Project`] owns every part in an arena and keeps lookup indices by
//!   name id, function id, floor uid/name, room uid, serial number and
//!   channel name
//! - [`Handle`] names a registered part and remembers which project owns it
//! - [`loader`] parses the SysAP's XML project description and registers
//!   everything it finds
//!
//! Registration overwrites on duplicate keys: the later part wins the index
//! entry while the earlier one stays a (now unindexed) project member.

mod error;
mod handle;
pub mod loader;
mod project;

pub use error::{ProjectError, ProjectResult};
pub use handle::{Handle, PartHandle, ProjectId};
pub use loader::{load_project, ProjectLoader};
pub use project::Project;

pub use fah_core::{
    format_sysap_id, Channel, Device, FahFunction, FahString, Floor, Located, Part, PartKind,
    PartType, Room,
};
