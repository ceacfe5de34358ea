//! RPC seam between the client and the SysAP
//!
//! The SysAP speaks XML-RPC over an authenticated XMPP session. Both live
//! behind [`RpcTransport`] so applications can plug in their own XMPP stack.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::jid::Jid;

/// An XML-RPC value
#[derive(Debug, Clone, PartialEq)]
pub enum RpcValue {
    String(String),
    Int(i32),
    Boolean(bool),
    Double(f64),
    Array(Vec<RpcValue>),
    Struct(BTreeMap<String, RpcValue>),
}

impl RpcValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RpcValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// XML-RPC type name, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RpcValue::String(_) => "string",
            RpcValue::Int(_) => "int",
            RpcValue::Boolean(_) => "boolean",
            RpcValue::Double(_) => "double",
            RpcValue::Array(_) => "array",
            RpcValue::Struct(_) => "struct",
        }
    }
}

impl From<&str> for RpcValue {
    fn from(value: &str) -> Self {
        RpcValue::String(value.to_string())
    }
}

impl From<String> for RpcValue {
    fn from(value: String) -> Self {
        RpcValue::String(value)
    }
}

impl From<i32> for RpcValue {
    fn from(value: i32) -> Self {
        RpcValue::Int(value)
    }
}

impl From<bool> for RpcValue {
    fn from(value: bool) -> Self {
        RpcValue::Boolean(value)
    }
}

/// Everything a transport needs to open an authenticated session
#[derive(Clone)]
pub struct LoginParams {
    pub host: String,
    pub port: u16,
    pub domain: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("domain", &self.domain)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Authenticated RPC channel to a SysAP
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Open the session and authenticate
    async fn login(&self, params: &LoginParams) -> ClientResult<()>;

    /// Invoke a remote method on `target` and wait for its result
    async fn call(&self, target: &Jid, method: &str, params: &[RpcValue])
        -> ClientResult<RpcValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(RpcValue::from("de").as_str(), Some("de"));
        assert_eq!(RpcValue::from(4).type_name(), "int");
        assert!(RpcValue::from(true).as_str().is_none());
        assert_eq!(RpcValue::Array(vec![]).type_name(), "array");
    }

    #[test]
    fn test_login_params_debug_hides_password() {
        let params = LoginParams {
            host: "sysap".to_string(),
            port: 5222,
            domain: "busch-jaeger.de".to_string(),
            username: "installer".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", params).contains("hunter2"));
    }
}
