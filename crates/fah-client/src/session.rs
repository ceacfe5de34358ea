//! Published project of one SysAP

use std::sync::Arc;

use fah_project::{
    load_project, Channel, Device, FahFunction, FahString, Floor, Project, Room,
};
use tracing::info;

use crate::error::ClientResult;
use crate::source::ProjectSource;

/// A loaded project, shared with readers
///
/// The project is built completely before it is published, so readers never
/// see a partially loaded graph. A failed load leaves nothing behind.
#[derive(Debug, Clone)]
pub struct Session {
    project: Arc<Project>,
}

impl Session {
    /// Fetch and load a project
    pub async fn load(source: &dyn ProjectSource) -> ClientResult<Self> {
        let project = Self::fetch(source).await?;
        Ok(Self {
            project: Arc::new(project),
        })
    }

    /// Replace the published project; on error the current one is kept
    pub async fn reload(&mut self, source: &dyn ProjectSource) -> ClientResult<()> {
        let project = Self::fetch(source).await?;
        info!("Replacing project {} with {}", self.project.id(), project.id());
        self.project = Arc::new(project);
        Ok(())
    }

    async fn fetch(source: &dyn ProjectSource) -> ClientResult<Project> {
        let xml = source.fetch_project_description().await?;
        Ok(load_project(&xml)?)
    }

    /// The published project; cheap to clone and safe to share across tasks
    pub fn project(&self) -> Arc<Project> {
        Arc::clone(&self.project)
    }

    pub fn all_channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.project.all_channels()
    }

    pub fn all_floors(&self) -> impl Iterator<Item = &Floor> + '_ {
        self.project.all_floors()
    }

    pub fn channel_by_name<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&Channel> {
        self.project.channel_by_name(name)
    }

    pub fn floor_by_uid<'a>(&self, uid: impl Into<Option<&'a str>>) -> Option<&Floor> {
        self.project.floor_by_uid(uid)
    }

    pub fn floor_by_name<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&Floor> {
        self.project.floor_by_name(name)
    }

    pub fn room_by_uid<'a>(&self, uid: impl Into<Option<&'a str>>) -> Option<&Room> {
        self.project.room_by_uid(uid)
    }

    pub fn device_by_serial_number<'a>(
        &self,
        serial_number: impl Into<Option<&'a str>>,
    ) -> Option<&Device> {
        self.project.device_by_serial_number(serial_number)
    }

    pub fn function_by_function_id(
        &self,
        function_id: impl Into<Option<u32>>,
    ) -> Option<&FahFunction> {
        self.project.function_by_function_id(function_id)
    }

    pub fn string_by_name_id(&self, name_id: impl Into<Option<u32>>) -> Option<&FahString> {
        self.project.string_by_name_id(name_id)
    }
}
