//! AxAPI client
//!
//! Owns one device session: the base URL, the credentials and, once
//! `authenticate` has succeeded, the signature sent as
//! `Authorization: A10 <signature>` on every later call.
//! Based on the AxAPI v3 layout: /axapi/v3/auth, /axapi/v3/clideploy, /axapi/v3/logoff

use crate::catalog::{self, Accessor};
use crate::common::HttpTransport;
use crate::config::ClientConfig;
use crate::error::AxapiError;
use crate::health::{self, HEALTH_STAT_COMMAND};
use crate::models::*;
use crate::partition;
use crate::transport::{Transport, TransportRequest};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, error, info, Instrument, Span};

const AUTH_PATH: &str = "auth";
const LOGOFF_PATH: &str = "logoff";
const CLIDEPLOY_PATH: &str = "clideploy";
const PARTITION_PATH: &str = "partition";
const RUNNING_CONFIG_PATH: &str = "running-config";

/// AxAPI v3.0 client for one ACOS device
#[derive(Debug)]
pub struct AxapiClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
    base_url: String,
    token: Option<String>,
    span: Span,
}

impl AxapiClient<HttpTransport> {
    /// Create a client backed by reqwest
    ///
    /// # Arguments
    /// * `config` - Device host, credentials, timeout and TLS settings
    pub fn new(config: ClientConfig) -> Result<Self, AxapiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> AxapiClient<T> {
    /// Create a client on top of any transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let span = tracing::info_span!("acos", device = %config.host);
        Self {
            transport,
            base_url: config.base_url(),
            config,
            token: None,
            span,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Device host this client talks to
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Current auth signature, if authenticated
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build a full URL from a resource path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Result<String, AxapiError> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(format!("A10 {}", token)),
            _ => Err(AxapiError::NotAuthenticated),
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<AxapiResponse, AxapiError> {
        let url = self.build_url(path);
        async {
            debug!("{} {}", method, url);
            let raw = self
                .transport
                .send(TransportRequest {
                    method,
                    url: &url,
                    authorization,
                    body,
                })
                .await
                .inspect_err(|e| error!("{} {} failed: {}", method, url, e))?;

            let status = raw.status;
            let response = AxapiResponse::decode(raw);
            info!(status, "{} {} returned {}", method, path, describe(&response));
            debug!("response: {:?}", response);
            Ok::<_, AxapiError>(response)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Log in and store the signature for later calls.
    ///
    /// # Returns
    /// * `Ok(String)` - The signature returned by the device
    /// * `Err(AxapiError::Authentication)` - Carrying `response.err.msg` when the device sent one
    pub async fn authenticate(&mut self) -> Result<String, AxapiError> {
        let payload = serde_json::to_value(AuthRequest {
            credentials: Credentials {
                username: self.config.username.clone(),
                password: self.config.password.clone(),
            },
        })?;

        let response = self.dispatch(Method::Post, AUTH_PATH, None, Some(&payload)).await?;

        let signature = response
            .as_json()
            .and_then(|value| value.pointer("/authresponse/signature"))
            .and_then(Value::as_str)
            .filter(|signature| !signature.is_empty());

        match signature {
            Some(signature) => {
                debug!(parent: &self.span, "Authenticated as {}", self.config.username);
                self.token = Some(signature.to_string());
                Ok(signature.to_string())
            }
            None => {
                let message = response
                    .api_error()
                    .unwrap_or("auth response did not contain a signature")
                    .to_string();
                error!(
                    parent: &self.span,
                    "The following error was received while authenticating: {}", message
                );
                Err(AxapiError::Authentication(message))
            }
        }
    }

    /// Log off and forget the signature.
    ///
    /// Best effort: failures are logged and never returned.
    pub async fn deauthenticate(&mut self) {
        let Some(token) = self.token.take() else {
            debug!(parent: &self.span, "No session to log off");
            return;
        };

        let authorization = format!("A10 {}", token);
        let payload = Value::String(String::new());
        match self
            .dispatch(Method::Post, LOGOFF_PATH, Some(&authorization), Some(&payload))
            .await
        {
            Ok(_) => debug!(parent: &self.span, "Logoff successful"),
            Err(e) => error!(parent: &self.span, "Error logging off of session: {}", e),
        }
    }

    /// Generic authenticated call.
    ///
    /// # Arguments
    /// * `path` - Resource path under `/axapi/v3/`
    /// * `method` - GET or POST
    /// * `body` - JSON body, sent for POST
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<AxapiResponse, AxapiError> {
        let authorization = self.auth_header()?;
        self.dispatch(method, path, Some(&authorization), body).await
    }

    /// Run raw CLI commands through `clideploy`.
    ///
    /// For endpoints with no structured form or a broken schema.
    pub async fn run_commands<I, S>(&self, commands: I) -> Result<AxapiResponse, AxapiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let payload = serde_json::to_value(CliDeployRequest {
            command_list: commands.into_iter().map(Into::into).collect(),
        })?;
        self.request(CLIDEPLOY_PATH, Method::Post, Some(&payload)).await
    }

    /// Call a catalog accessor by name
    pub async fn call(&self, name: &str, argument: Option<&str>) -> Result<AxapiResponse, AxapiError> {
        let accessor = catalog::lookup(name)
            .ok_or_else(|| AxapiError::InvalidRequest(format!("unknown accessor: {}", name)))?;
        self.invoke(accessor, argument).await
    }

    /// Call a catalog accessor
    pub async fn invoke(
        &self,
        accessor: &Accessor,
        argument: Option<&str>,
    ) -> Result<AxapiResponse, AxapiError> {
        let target = accessor.render(argument)?;
        if accessor.raw_command {
            self.run_commands([target]).await
        } else {
            self.request(&target, accessor.method, None).await
        }
    }

    /// List partitions, `shared` first
    pub async fn partitions(&self) -> Result<Vec<String>, AxapiError> {
        let response = self.request(PARTITION_PATH, Method::Get, None).await?;
        Ok(partition::partition_names(&response))
    }

    /// Switch the session's active partition
    ///
    /// # Returns
    /// * `Err(AxapiError::Api)` - The device refused the switch; the session stays where it was
    pub async fn change_partition(&self, name: &str) -> Result<AxapiResponse, AxapiError> {
        let payload = serde_json::to_value(ActivePartitionRequest {
            active_partition: ActivePartition {
                curr_part_name: name.to_string(),
            },
        })?;
        let path = format!("active-partition/{}", urlencoding::encode(name));
        debug!(parent: &self.span, "Changing active partition to {}", name);
        let response = self.request(&path, Method::Post, Some(&payload)).await?;
        if let Some(message) = response.api_error() {
            error!(parent: &self.span, "Issue changing partition to {}: {}", name, message);
            return Err(AxapiError::Api(format!(
                "could not change to partition {}: {}",
                name, message
            )));
        }
        Ok(response)
    }

    /// Running configuration of one partition.
    ///
    /// Leaves the session in that partition.
    pub async fn partition_config(&self, name: &str) -> Result<AxapiResponse, AxapiError> {
        self.change_partition(name).await?;
        self.request(RUNNING_CONFIG_PATH, Method::Get, None).await
    }

    /// Down-reason codes currently reported by `show health stat`
    pub async fn hm_down_reasons(&self) -> Result<HashSet<String>, AxapiError> {
        let response = self.run_commands([HEALTH_STAT_COMMAND]).await?;
        let text = response.command_output().ok_or_else(|| {
            AxapiError::Decode(format!(
                "expected command output from '{}', got {}",
                HEALTH_STAT_COMMAND,
                describe(&response)
            ))
        })?;
        Ok(health::parse_down_reasons(text))
    }

    /// `show health down-reason <N>` for every code in `hm_down_reasons`
    pub async fn down_reason_details(&self) -> Result<BTreeMap<String, AxapiResponse>, AxapiError> {
        let mut details = BTreeMap::new();
        for code in self.hm_down_reasons().await? {
            let detail = self.call("health_down_reason", Some(&code)).await?;
            details.insert(code, detail);
        }
        Ok(details)
    }
}

fn describe(response: &AxapiResponse) -> &'static str {
    match response {
        AxapiResponse::Json(_) => "json",
        AxapiResponse::Empty => "an empty body",
        AxapiResponse::NoContent => "no content",
        AxapiResponse::CommandOutput(_) => "command output",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    fn client(mock: &MockTransport) -> AxapiClient<MockTransport> {
        AxapiClient::with_transport(ClientConfig::new("10.0.0.1", "admin", "a10"), mock.clone())
    }

    async fn authenticated(mock: &MockTransport) -> AxapiClient<MockTransport> {
        mock.push_json(json!({"authresponse": {"signature": "f0c3b1e2", "description": "the signature should be set in Authorization header for following request."}}));
        let mut client = client(mock);
        client.authenticate().await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_authenticate_stores_signature() {
        let mock = MockTransport::new();
        let mut client = client(&mock);
        mock.push_json(json!({"authresponse": {"signature": "f0c3b1e2"}}));

        let token = client.authenticate().await.unwrap();
        assert_eq!(token, "f0c3b1e2");
        assert_eq!(client.token(), Some("f0c3b1e2"));

        let auth = mock.last_request().unwrap();
        assert_eq!(auth.method, Method::Post);
        assert_eq!(auth.url, "https://10.0.0.1/axapi/v3/auth");
        assert_eq!(auth.authorization, None);
        assert_eq!(
            auth.body,
            Some(json!({"credentials": {"username": "admin", "password": "a10"}}))
        );

        mock.push_json(json!({"version": {"oper": {"sw-version": "4.1.4"}}}));
        client.call("version", None).await.unwrap();
        let call = mock.last_request().unwrap();
        assert_eq!(call.url, "https://10.0.0.1/axapi/v3/version/oper");
        assert_eq!(call.authorization.as_deref(), Some("A10 f0c3b1e2"));
    }

    #[tokio::test]
    async fn test_authenticate_surfaces_device_error() {
        let mock = MockTransport::new();
        let mut client = client(&mock);
        mock.push_response(
            403,
            r#"{"response": {"status": "fail", "err": {"code": 520749062, "from": "CM", "msg": "Invalid username/password."}}}"#,
        );

        let err = client.authenticate().await.unwrap_err();
        match err {
            AxapiError::Authentication(message) => assert_eq!(message, "Invalid username/password."),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_authenticate_without_signature_or_message() {
        let mock = MockTransport::new();
        let mut client = client(&mock);
        mock.push_response(200, "");

        assert!(matches!(
            client.authenticate().await,
            Err(AxapiError::Authentication(_))
        ));
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_request_requires_authentication() {
        let mock = MockTransport::new();
        let client = client(&mock);

        assert!(matches!(
            client.request("version/oper", Method::Get, None).await,
            Err(AxapiError::NotAuthenticated)
        ));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_request_decoding_policy() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;

        mock.push_response(204, "");
        assert_eq!(
            client.request("slb/server", Method::Get, None).await.unwrap(),
            AxapiResponse::NoContent
        );

        mock.push_response(200, "");
        assert_eq!(
            client.request("slb/server", Method::Get, None).await.unwrap(),
            AxapiResponse::Empty
        );

        mock.push_response(200, "Total memory: 8GB");
        assert_eq!(
            client.request("system/memory/oper", Method::Get, None).await.unwrap(),
            AxapiResponse::CommandOutput("Total memory: 8GB".to_string())
        );
    }

    #[tokio::test]
    async fn test_request_posts_json_body() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_json(json!({"server": {"name": "web1"}}));

        let body = json!({"server": {"name": "web1", "host": "10.1.1.10"}});
        client.request("slb/server", Method::Post, Some(&body)).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.body, Some(body));
    }

    #[tokio::test]
    async fn test_leading_slash_is_ignored() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_json(json!({}));

        client.request("/system/bandwidth/stats", Method::Get, None).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://10.0.0.1/axapi/v3/system/bandwidth/stats"
        );
    }

    #[tokio::test]
    async fn test_connection_error_is_returned() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_error(AxapiError::Connection("connection refused".to_string()));

        assert!(matches!(
            client.call("memory", None).await,
            Err(AxapiError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_run_commands_payload() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(200, "CPU history\r\n");

        let response = client.run_commands(["show cpu history"]).await.unwrap();
        assert_eq!(response.command_output(), Some("CPU history\r\n"));

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.url, "https://10.0.0.1/axapi/v3/clideploy");
        assert_eq!(sent.body, Some(json!({"CommandList": ["show cpu history"]})));
    }

    #[tokio::test]
    async fn test_call_cli_accessor_with_argument() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(200, "Reason 3: connection refused");

        client.call("health_down_reason", Some("3")).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(json!({"CommandList": ["show health down-reason 3"]}))
        );
    }

    #[tokio::test]
    async fn test_call_path_accessor_with_argument() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_json(json!({"server": {"name": "web1", "stats": {}}}));

        client.call("slb_server_stats", Some("web1")).await.unwrap();
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://10.0.0.1/axapi/v3/slb/server/web1/stats");
    }

    #[tokio::test]
    async fn test_call_unknown_accessor() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;

        assert!(matches!(
            client.call("show_me_everything", None).await,
            Err(AxapiError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_partitions() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;

        mock.push_response(200, "");
        assert_eq!(client.partitions().await.unwrap(), vec!["shared"]);

        mock.push_json(json!({"partition-list": [
            {"partition-name": "P1", "id": 1},
            {"partition-name": "P2", "id": 2}
        ]}));
        assert_eq!(client.partitions().await.unwrap(), vec!["shared", "P1", "P2"]);
        assert_eq!(mock.last_request().unwrap().url, "https://10.0.0.1/axapi/v3/partition");
    }

    #[tokio::test]
    async fn test_partition_config_switches_first() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(204, "");
        mock.push_response(200, "!Current configuration: 1024 bytes");

        let config = client.partition_config("P1").await.unwrap();
        assert!(config.command_output().is_some());

        let requests = mock.requests();
        let switch = &requests[requests.len() - 2];
        assert_eq!(switch.url, "https://10.0.0.1/axapi/v3/active-partition/P1");
        assert_eq!(
            switch.body,
            Some(json!({"active-partition": {"curr_part_name": "P1"}}))
        );
        assert_eq!(
            requests[requests.len() - 1].url,
            "https://10.0.0.1/axapi/v3/running-config"
        );
    }

    #[tokio::test]
    async fn test_partition_config_stops_when_switch_refused() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(
            404,
            r#"{"response": {"status": "fail", "err": {"msg": "Partition P9 does not exist"}}}"#,
        );
        mock.push_response(200, "!shared partition running config");

        let err = client.partition_config("P9").await.unwrap_err();
        match err {
            AxapiError::Api(message) => assert!(message.contains("Partition P9 does not exist")),
            other => panic!("unexpected error: {:?}", other),
        }

        // running-config was never requested from the wrong partition
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://10.0.0.1/axapi/v3/active-partition/P9"
        );
        assert_eq!(mock.pending(), 1);
    }

    #[tokio::test]
    async fn test_hm_down_reasons() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(200, "1/3  DOWN\n2/7  UP\n");

        let reasons = client.hm_down_reasons().await.unwrap();
        assert_eq!(reasons, HashSet::from(["3".to_string()]));
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(json!({"CommandList": ["show health stat"]}))
        );
    }

    #[tokio::test]
    async fn test_hm_down_reasons_rejects_json() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_json(json!({"response": {"status": "fail"}}));

        assert!(matches!(
            client.hm_down_reasons().await,
            Err(AxapiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_down_reason_details() {
        let mock = MockTransport::new();
        let client = authenticated(&mock).await;
        mock.push_response(200, "1/3  DOWN\n");
        mock.push_response(200, "3: TCP connection refused");

        let details = client.down_reason_details().await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(
            details["3"],
            AxapiResponse::CommandOutput("3: TCP connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_deauthenticate_swallows_transport_error() {
        let mock = MockTransport::new();
        let mut client = authenticated(&mock).await;
        mock.push_error(AxapiError::Connection("connection reset".to_string()));

        client.deauthenticate().await;

        let logoff = mock.last_request().unwrap();
        assert_eq!(logoff.url, "https://10.0.0.1/axapi/v3/logoff");
        assert_eq!(logoff.authorization.as_deref(), Some("A10 f0c3b1e2"));
        assert_eq!(logoff.body, Some(json!("")));
        assert!(!client.is_authenticated());

        // Still usable: the next call fails cleanly instead of reusing the old token.
        assert!(matches!(
            client.call("version", None).await,
            Err(AxapiError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_deauthenticate_without_session_sends_nothing() {
        let mock = MockTransport::new();
        let mut client = client(&mock);

        client.deauthenticate().await;
        assert!(mock.requests().is_empty());
    }
}
