//! ACOS AxAPI v3.0 Client
//!
//! A Rust client library for the REST management API of ACOS load-balancing
//! appliances. It owns one authenticated device session and exposes a
//! declarative catalog of read-only "show" accessors.
//!
//! # Example
//!
//! ```no_run
//! use axapi_client::{AxapiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("10.0.0.1", "admin", "a10")
//!     .with_accept_invalid_certs(true);
//! let mut client = AxapiClient::new(config)?;
//!
//! client.authenticate().await?;
//!
//! // Structured endpoint
//! let version = client.call("version", None).await?;
//!
//! // CLI passthrough for endpoints without a usable schema
//! let history = client.run_commands(["show cpu history"]).await?;
//!
//! // Partitions, `shared` first
//! let partitions = client.partitions().await?;
//!
//! client.deauthenticate().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Session handling**: `authenticate` / `deauthenticate` with the `A10` signature header
//! - **Generic dispatch**: `request` for any resource path, `run_commands` for `clideploy`
//! - **Accessor catalog**: one table entry per show command, see [`catalog::CATALOG`]
//! - **Typed errors**: nothing in this crate exits the process

pub mod catalog;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod partition;
#[path = "trait.rs"]
pub mod transport;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use catalog::{Accessor, CATALOG};
pub use client::AxapiClient;
pub use common::HttpTransport;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::AxapiError;
pub use models::*;
pub use transport::{Transport, TransportRequest};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
