//! Application configuration.
//!
//! Layered: defaults -> YAML file (if provided) -> env (`APP__*`) -> CLI overrides.

use std::path::Path;

use anyhow::Context;
use calculations::CalculationsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// DSN used by `--mock`.
pub const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Absent: records are kept in memory.
    pub database: Option<DatabaseConfig>,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub calculations: CalculationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub body_limit_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            body_limit_bytes: 64 * 1024,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "POST", "PATCH", "DELETE", "OPTIONS"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Load the layered configuration. `path`, when given, must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("APP__").split("__"));

        let config: AppConfig = figment
            .extract()
            .with_context(|| match path {
                Some(p) => format!("invalid configuration in {}", p.display()),
                None => "invalid configuration".to_owned(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.bind_addr = with_port(&self.server.bind_addr, port);
        }

        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }

        if cli.mock {
            let max_connections = self
                .database
                .as_ref()
                .map_or_else(default_max_connections, |db| db.max_connections);
            self.database = Some(DatabaseConfig {
                dsn: MOCK_DSN.to_owned(),
                max_connections,
            });
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.body_limit_bytes == 0 {
            anyhow::bail!("server.body_limit_bytes must be greater than zero");
        }
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be greater than zero");
        }
        if let Some(db) = &self.database
            && db.dsn.trim().is_empty()
        {
            anyhow::bail!("database.dsn must not be empty");
        }
        self.calculations.validate()?;
        if self.cors.allow_credentials {
            let wildcard = |values: &[String]| values.iter().any(|v| v == "*");
            if wildcard(&self.cors.allowed_origins)
                || wildcard(&self.cors.allowed_methods)
                || wildcard(&self.cors.allowed_headers)
            {
                anyhow::bail!(
                    "cors wildcards ('*') cannot be combined with cors.allow_credentials=true"
                );
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Replace the port of `host:port`, keeping the host.
fn with_port(bind_addr: &str, port: u16) -> String {
    let host = bind_addr
        .rsplit_once(':')
        .map_or(bind_addr, |(host, _)| host);
    format!("{host}:{port}")
}
