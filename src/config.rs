use crate::client::Provider;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub agent: AgentConfig,
    pub vapi: VapiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Voice backend to connect through
    pub provider: Provider,

    /// Voice id from the catalog
    pub voice_id: String,
}

/// Provider credentials, sourced from the environment in deployment
/// (VOXMETER_VAPI__PUBLIC_KEY, VOXMETER_VAPI__ASSISTANT_ID)
#[derive(Debug, Default, Deserialize)]
pub struct VapiConfig {
    #[serde(default)]
    pub public_key: String,

    #[serde(default)]
    pub assistant_id: String,
}

impl Config {
    /// Load configuration from an optional file plus environment overrides
    ///
    /// Missing credentials do not fail the load; they fail session start
    /// with a descriptive message, so the daemon can run unconfigured.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("VOXMETER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("service.name", "voxmeter")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8787)?
            .set_default("agent.provider", "scripted")?
            .set_default("agent.voice_id", crate::voices::default_voice().id)?
            .set_default("vapi.public_key", "")?
            .set_default("vapi.assistant_id", "")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
