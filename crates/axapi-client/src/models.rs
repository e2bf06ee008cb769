//! AxAPI wire models
//!
//! Request payloads are typed. Responses are kept as untyped JSON because the
//! device schemas vary between ACOS releases and the client returns them as-is.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Key the device (and this client) uses for raw CLI text
pub const COMMAND_OUTPUT_KEY: &str = "command output";

/// Key of the no-content sentinel
pub const NO_CONTENT_KEY: &str = "HTTP RESPONSE CODE";

/// HTTP method of an AxAPI call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of an HTTP exchange, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Decoded device response
#[derive(Debug, Clone, PartialEq)]
pub enum AxapiResponse {
    /// Body parsed as JSON
    Json(Value),
    /// HTTP 200 with an empty body
    Empty,
    /// HTTP 204
    NoContent,
    /// Any other non-JSON body, usually clideploy text
    CommandOutput(String),
}

impl AxapiResponse {
    /// Decode a raw response.
    ///
    /// JSON wins regardless of status code; the device reports API failures
    /// as JSON bodies and those are returned to the caller untouched.
    pub fn decode(raw: RawResponse) -> Self {
        match serde_json::from_str::<Value>(&raw.body) {
            Ok(value) => AxapiResponse::Json(value),
            Err(_) if raw.status == 200 && raw.body.is_empty() => AxapiResponse::Empty,
            Err(_) if raw.status == 204 => AxapiResponse::NoContent,
            Err(_) => AxapiResponse::CommandOutput(raw.body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            AxapiResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Raw CLI text, if this is a command output response
    pub fn command_output(&self) -> Option<&str> {
        match self {
            AxapiResponse::CommandOutput(text) => Some(text),
            _ => None,
        }
    }

    /// Error message reported by the device at `response.err.msg`
    pub fn api_error(&self) -> Option<&str> {
        self.as_json()?.pointer("/response/err/msg")?.as_str()
    }

    /// Convert to a plain JSON value using the legacy wire shapes
    pub fn into_value(self) -> Value {
        match self {
            AxapiResponse::Json(value) => value,
            AxapiResponse::Empty => Value::String(String::new()),
            AxapiResponse::NoContent => serde_json::json!({ NO_CONTENT_KEY: "HTTP 204" }),
            AxapiResponse::CommandOutput(text) => serde_json::json!({ COMMAND_OUTPUT_KEY: text }),
        }
    }
}

impl Serialize for AxapiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AxapiResponse::Json(value) => value.serialize(serializer),
            AxapiResponse::Empty => serializer.serialize_str(""),
            AxapiResponse::NoContent => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NO_CONTENT_KEY, "HTTP 204")?;
                map.end()
            }
            AxapiResponse::CommandOutput(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(COMMAND_OUTPUT_KEY, text)?;
                map.end()
            }
        }
    }
}

/// Body of `POST auth`
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub credentials: Credentials,
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST clideploy`
#[derive(Debug, Clone, Serialize)]
pub struct CliDeployRequest {
    #[serde(rename = "CommandList")]
    pub command_list: Vec<String>,
}

/// Body of `POST active-partition/<name>`
#[derive(Debug, Clone, Serialize)]
pub struct ActivePartitionRequest {
    #[serde(rename = "active-partition")]
    pub active_partition: ActivePartition,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivePartition {
    pub curr_part_name: String,
}
