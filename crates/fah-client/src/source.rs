//! Where project descriptions come from

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Something that can produce a raw SysAP project description
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_project_description(&self) -> ClientResult<String>;
}

/// A project description saved to a file
#[derive(Debug, Clone)]
pub struct DumpSource {
    path: PathBuf,
}

impl DumpSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProjectSource for DumpSource {
    async fn fetch_project_description(&self) -> ClientResult<String> {
        debug!("Reading project description from {:?}", self.path);
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ClientError::ReadDump {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dump() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.xml");
        std::fs::write(&path, "<project/>").unwrap();

        let source = DumpSource::new(&path);
        let xml = tokio_test::block_on(source.fetch_project_description()).unwrap();
        assert_eq!(xml, "<project/>");
    }

    #[test]
    fn test_missing_dump() {
        let dir = TempDir::new().unwrap();
        let source = DumpSource::new(dir.path().join("missing.xml"));

        let err = tokio_test::block_on(source.fetch_project_description()).unwrap_err();
        assert!(matches!(err, ClientError::ReadDump { .. }));
    }
}
