//! Core types for free@home projects
//!
//! This crate provides the part types a SysAP project is made of: display
//! strings, functions, floors, rooms, devices and channels. Every kind is a
//! variant of the closed [`Part`] sum type so registries can dispatch on it
//! with an exhaustive `match`.

mod id;
mod part;

pub use id::{format_sysap_id, parse_sysap_id, SysapIdError};
pub use part::{
    Channel, Device, FahFunction, FahString, Floor, Located, Part, PartKind, PartType, Room,
};
