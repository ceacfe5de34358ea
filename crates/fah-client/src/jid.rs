//! XMPP addresses (`local@domain/resource`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// An XMPP address as used by the SysAP
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// The SysAP's RPC endpoint in a domain (`mrha@<domain>/rpc`)
    pub fn rpc_endpoint(domain: &str) -> Self {
        Self {
            local: Some("mrha".to_string()),
            domain: domain.to_string(),
            resource: Some("rpc".to_string()),
        }
    }

    /// The part before `@`, used as XMPP login name
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl FromStr for Jid {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClientError::InvalidJid(s.to_string());

        let (bare, resource) = match s.split_once('/') {
            Some((bare, resource)) if !resource.is_empty() => (bare, Some(resource.to_string())),
            Some(_) => return Err(invalid()),
            None => (s, None),
        };

        let (local, domain) = match bare.split_once('@') {
            Some((local, domain)) if !local.is_empty() => (Some(local.to_string()), domain),
            Some(_) => return Err(invalid()),
            None => (None, bare),
        };

        if domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }

        Ok(Self {
            local,
            domain: domain.to_string(),
            resource,
        })
    }
}

impl TryFrom<String> for Jid {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Jid> for String {
    fn from(jid: Jid) -> Self {
        jid.to_string()
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(local) = &self.local {
            write!(f, "{}@", local)?;
        }
        f.write_str(&self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{}", resource)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_jid() {
        let jid: Jid = "6b2f0e7c-a9e1@busch-jaeger.de/rpc".parse().unwrap();
        assert_eq!(jid.local(), Some("6b2f0e7c-a9e1"));
        assert_eq!(jid.domain(), "busch-jaeger.de");
        assert_eq!(jid.resource(), Some("rpc"));
        assert_eq!(jid.to_string(), "6b2f0e7c-a9e1@busch-jaeger.de/rpc");
    }

    #[test]
    fn test_parse_bare_and_domain_only() {
        let bare: Jid = "installer@busch-jaeger.de".parse().unwrap();
        assert_eq!(bare.local(), Some("installer"));
        assert!(bare.resource().is_none());

        let domain: Jid = "busch-jaeger.de".parse().unwrap();
        assert!(domain.local().is_none());
        assert_eq!(domain.to_string(), "busch-jaeger.de");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "@busch-jaeger.de", "user@", "user@a@b", "user@domain/"] {
            assert!(
                matches!(input.parse::<Jid>(), Err(ClientError::InvalidJid(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_rpc_endpoint() {
        assert_eq!(
            Jid::rpc_endpoint("busch-jaeger.de").to_string(),
            "mrha@busch-jaeger.de/rpc"
        );
    }
}
