//! Common settings fixtures shared by the integration tests
#![allow(dead_code)]

use settings_snapshot::{Scanner, Settings, SettingsBase, SnapshotConfig, RecordingSink};
use std::sync::Arc;

/// The two-member service from the registry walkthrough
#[derive(Debug, Clone, PartialEq, Settings)]
pub struct ServiceSettings {
    pub timeout: i32,
    pub name: String,
}

impl ServiceSettings {
    pub fn new() -> Self {
        Self {
            timeout: 30,
            name: "svc".to_string(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings type exercising every field attribute
#[derive(Debug, Settings)]
pub struct NetworkSettings {
    #[setting(flatten)]
    pub base: SettingsBase,
    #[setting(setter = Self::set_port)]
    pub port: u32,
    #[setting(rename = "host_name")]
    pub host: String,
    pub ratio: f32,
    pub backoff: f64,
    pub proxy: Option<String>,
    #[setting(readonly)]
    pub revision: u64,
    #[setting(skip)]
    pub cache: Vec<String>,
    pub(crate) token: String,
    secret: String,
    pub verbose: bool,
}

impl NetworkSettings {
    pub fn new() -> Self {
        Self {
            base: SettingsBase::new("network"),
            port: 8080,
            host: "localhost".to_string(),
            ratio: 1.0,
            backoff: 0.5,
            proxy: None,
            revision: 7,
            cache: Vec::new(),
            token: "t0k3n".to_string(),
            secret: "hunter2".to_string(),
            verbose: false,
        }
    }

    /// Target-owned write path with its own validation
    pub fn set_port(&mut self, port: u32) -> anyhow::Result<()> {
        anyhow::ensure!((1..=65535).contains(&port), "port {port} out of range");
        self.port = port;
        Ok(())
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Settings)]
pub struct Limits {
    pub max_connections: u32,
}

/// Flattens a user type (not the marker base), whose members stay eligible
#[derive(Debug, Settings)]
pub struct ServerSettings {
    pub name: String,
    #[setting(flatten)]
    pub limits: Limits,
}

/// Nothing but registry scaffolding and ineligible members
#[derive(Debug, Settings)]
pub struct EmptySettings {
    #[setting(flatten)]
    pub base: SettingsBase,
    #[setting(readonly)]
    pub version: u32,
}

/// Scanner reporting failed writes into a fresh recording sink
pub fn recording_scanner(config: SnapshotConfig) -> (Scanner, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let scanner = Scanner::new(config).with_sink(sink.clone());
    (scanner, sink)
}
