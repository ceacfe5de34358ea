//! free@home SysAP client
//!
//! Loading a project from a SysAP takes three steps:
//!
//! 1. [`IdentityResolver`] maps the configured user name to its XMPP
//!    identity via the SysAP's `settings.json`
//! 2. [`GatewayClient`] logs in through an [`RpcTransport`] and calls
//!    `RemoteInterface.getAll`, which returns the project description
//! 3. [`Session`] parses the description into a [`Project`] and publishes
//!    it for readers
//!
//! The XMPP session and the XML-RPC encoding live behind [`RpcTransport`];
//! no network transport ships in this crate. [`DumpSource`] loads a saved
//! project description instead.

mod error;
mod gateway;
mod identity;
mod jid;
mod rpc;
mod session;
mod source;

pub use error::{ClientError, ClientResult};
pub use gateway::{GatewayClient, GET_ALL_METHOD};
pub use identity::{parse_settings, IdentityResolver};
pub use jid::Jid;
pub use rpc::{LoginParams, RpcTransport, RpcValue};
pub use session::Session;
pub use source::{DumpSource, ProjectSource};

pub use fah_project::Project;
