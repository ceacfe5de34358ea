//! SysAP gateway client

use std::time::Duration;

use async_trait::async_trait;
use fah_config::FahConfig;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::identity::IdentityResolver;
use crate::jid::Jid;
use crate::rpc::{LoginParams, RpcTransport, RpcValue};
use crate::source::ProjectSource;

/// Remote method returning the whole project description
pub const GET_ALL_METHOD: &str = "RemoteInterface.getAll";

/// Talks to one SysAP through an [`RpcTransport`]
pub struct GatewayClient<T> {
    config: FahConfig,
    resolver: IdentityResolver,
    transport: T,
    rpc_endpoint: Jid,
    identity: Option<Jid>,
}

impl<T: RpcTransport> GatewayClient<T> {
    /// Create a client for the configured SysAP; nothing is sent yet
    pub fn new(config: FahConfig, transport: T) -> ClientResult<Self> {
        let resolver = IdentityResolver::new(
            &config.host,
            Duration::from_secs(config.http_timeout_secs),
        )?;
        Ok(Self::with_resolver(config, resolver, transport))
    }

    pub fn with_resolver(config: FahConfig, resolver: IdentityResolver, transport: T) -> Self {
        let rpc_endpoint = Jid::rpc_endpoint(&config.xmpp_domain);
        Self {
            config,
            resolver,
            transport,
            rpc_endpoint,
            identity: None,
        }
    }

    /// Resolve the configured user and log in
    pub async fn connect(&mut self) -> ClientResult<()> {
        let identity = self.resolver.resolve(&self.config.username).await?;
        self.connect_as(identity).await
    }

    /// Log in with an already resolved identity
    pub async fn connect_as(&mut self, identity: Jid) -> ClientResult<()> {
        let username = identity
            .local()
            .ok_or_else(|| ClientError::InvalidJid(identity.to_string()))?;
        info!("Login using {}...", username);

        let params = LoginParams {
            host: self.config.host.clone(),
            port: self.config.rpc_port,
            domain: self.config.xmpp_domain.clone(),
            username: username.to_string(),
            password: self.config.password.clone(),
        };
        self.transport.login(&params).await?;

        info!("Connected to SysAP {}", self.config.host);
        self.identity = Some(identity);
        Ok(())
    }

    /// Identity used for the current session
    pub fn identity(&self) -> Option<&Jid> {
        self.identity.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.identity.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke a remote method on the SysAP
    pub async fn call(&self, method: &str, params: &[RpcValue]) -> ClientResult<RpcValue> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        debug!("Calling {} with {} params", method, params.len());
        self.transport.call(&self.rpc_endpoint, method, params).await
    }
}

#[async_trait]
impl<T: RpcTransport> ProjectSource for GatewayClient<T> {
    async fn fetch_project_description(&self) -> ClientResult<String> {
        let params = [
            RpcValue::from(self.config.language.as_str()),
            RpcValue::from("4"),
            RpcValue::from("0"),
            RpcValue::from("0"),
        ];

        match self.call(GET_ALL_METHOD, &params).await? {
            RpcValue::String(xml) => {
                debug!("Received project description ({} bytes)", xml.len());
                Ok(xml)
            }
            other => Err(ClientError::UnexpectedResponse {
                method: GET_ALL_METHOD.to_string(),
                found: other.type_name(),
            }),
        }
    }
}
