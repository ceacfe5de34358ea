//! Login identity lookup
//!
//! The SysAP publishes its user list at `http://<host>/settings.json`:
//!
//! ```json
//! { "users": [ { "name": "installer", "jid": "6b2f...@busch-jaeger.de" } ] }
//! ```
//!
//! The XMPP login name is the local part of the user's JID.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::jid::Jid;

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default)]
    users: Vec<SettingsUser>,
}

#[derive(Debug, Deserialize)]
struct SettingsUser {
    name: String,
    jid: String,
}

/// Parse a settings.json document into user name -> JID
pub fn parse_settings(json: &str) -> ClientResult<BTreeMap<String, Jid>> {
    let settings: Settings = serde_json::from_str(json)?;
    settings
        .users
        .into_iter()
        .map(|user| {
            let jid: Jid = user.jid.parse()?;
            Ok::<_, ClientError>((user.name, jid))
        })
        .collect()
}

/// Resolves free@home user names to XMPP identities
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityResolver {
    /// Resolver for a SysAP host name or IP address
    pub fn new(host: &str, timeout: Duration) -> ClientResult<Self> {
        Self::with_base_url(format!("http://{}", host), timeout)
    }

    /// Resolver for an explicit base URL (scheme, host and optional port)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        // The SysAP sits on the local network
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn settings_url(&self) -> String {
        format!("{}/settings.json", self.base_url)
    }

    /// Fetch all users known to the SysAP
    pub async fn users(&self) -> ClientResult<BTreeMap<String, Jid>> {
        let url = self.settings_url();
        debug!("Fetching user list from {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let users = parse_settings(&body)?;
        debug!("SysAP knows {} users", users.len());
        Ok(users)
    }

    /// Resolve one user name to its JID
    pub async fn resolve(&self, username: &str) -> ClientResult<Jid> {
        let mut users = self.users().await?;
        users
            .remove(username)
            .ok_or_else(|| ClientError::UnknownUser {
                username: username.to_string(),
                known: users.into_keys().collect(),
            })
    }
}
