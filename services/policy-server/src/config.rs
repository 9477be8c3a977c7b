use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use warden_authz::PolicySource;

pub const DEFAULT_BIND: &str = "0.0.0.0:5001";
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";

// Policy server configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // HTTP API listener.
    pub bind_addr: SocketAddr,
    // Prometheus `/metrics` listener.
    pub metrics_bind: SocketAddr,
    pub policy_source: PolicySource,
    // Save the policy file after every successful change.
    pub persist_policy: bool,
}

#[derive(Debug, Deserialize)]
struct ServerConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    model_path: Option<PathBuf>,
    policy_path: Option<PathBuf>,
    persist_policy: Option<bool>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("WARDEN_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .with_context(|| "parse WARDEN_BIND")?;
        let metrics_bind = std::env::var("WARDEN_METRICS_BIND")
            .unwrap_or_else(|_| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse WARDEN_METRICS_BIND")?;
        let policy_source = policy_source(
            std::env::var("WARDEN_MODEL_PATH").ok().map(PathBuf::from),
            std::env::var("WARDEN_POLICY_PATH").ok().map(PathBuf::from),
        )?;
        let persist_policy = std::env::var("WARDEN_PERSIST_POLICY")
            .ok()
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            bind_addr,
            metrics_bind,
            policy_source,
            persist_policy,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("WARDEN_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read WARDEN_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: ServerConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse server config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if override_cfg.model_path.is_some() || override_cfg.policy_path.is_some() {
            self.policy_source = policy_source(override_cfg.model_path, override_cfg.policy_path)?;
        }
        if let Some(value) = override_cfg.persist_policy {
            self.persist_policy = value;
        }
        Ok(())
    }
}

fn policy_source(model: Option<PathBuf>, policy: Option<PathBuf>) -> Result<PolicySource> {
    match (model, policy) {
        (None, None) => Ok(PolicySource::Embedded),
        (Some(model), Some(policy)) => Ok(PolicySource::Files { model, policy }),
        _ => bail!("model and policy paths must be configured together"),
    }
}
