//! Error types for project building and loading

use fah_core::SysapIdError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

use crate::handle::ProjectId;

/// Result type for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors that can occur while building or loading a project
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A handle owned by another project was attached to this one
    #[error("part #{slot} belongs to project {owner}, cannot attach it to project {project}")]
    ForeignPart {
        owner: ProjectId,
        project: ProjectId,
        slot: usize,
    },

    /// The project description is not well-formed XML
    #[error("malformed project XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An XML attribute could not be read
    #[error("malformed attribute in project XML: {0}")]
    Attribute(#[from] AttrError),

    /// The document ended before all elements were closed
    #[error("project XML ended inside <{element}>")]
    UnexpectedEof { element: String },

    /// The document has no root element or the wrong one
    #[error("expected <project> root element, found {found}")]
    UnexpectedRoot { found: String },

    /// A required attribute is missing
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// An id attribute could not be parsed
    #[error("invalid {field} on <{element}>: {source}")]
    InvalidId {
        element: String,
        field: String,
        #[source]
        source: SysapIdError,
    },
}
