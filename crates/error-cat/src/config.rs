use anyhow::Result;
use error_cat_core::constants::{
    DEFAULT_ENV_VAR, DEFAULT_KEY_VAR, DEFAULT_ROLLBAR_ENDPOINT, DEFAULT_ROLLBAR_TIMEOUT_SECS,
    DEFAULT_TEST_DESIGNATION,
};
use error_cat_core::{ConfigError, Environment, ProcessEnv};
use error_cat_reporter::RollbarConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gate: GateSettings,
    pub rollbar: RollbarSettings,
    pub logging: LoggingSettings,
}

/// Names of the environment variables the reporting gate reads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    pub env_var: String,
    pub key_var: String,
    pub test_designation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RollbarSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Falls back to the runtime designation, then "production"
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
            key_var: DEFAULT_KEY_VAR.to_string(),
            test_designation: DEFAULT_TEST_DESIGNATION.to_string(),
        }
    }
}

impl Default for RollbarSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ROLLBAR_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_ROLLBAR_TIMEOUT_SECS,
            environment: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&ProcessEnv)
    }

    /// Defaults, overridden by `ERROR_CAT_*` variables from `env`
    pub fn load_from(env: &dyn Environment) -> Result<Self> {
        let mut config = Config::default();
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::parse(e).into())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()).into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn apply_env(&mut self, env: &dyn Environment) -> Result<()> {
        // Gate settings
        if let Some(env_var) = env.var("ERROR_CAT_ENV_VAR") {
            self.gate.env_var = env_var;
        }
        if let Some(key_var) = env.var("ERROR_CAT_KEY_VAR") {
            self.gate.key_var = key_var;
        }
        if let Some(designation) = env.var("ERROR_CAT_TEST_DESIGNATION") {
            self.gate.test_designation = designation;
        }

        // Rollbar settings
        if let Some(endpoint) = env.var("ERROR_CAT_ROLLBAR_ENDPOINT") {
            self.rollbar.endpoint = endpoint;
        }
        if let Some(timeout) = env.var("ERROR_CAT_ROLLBAR_TIMEOUT") {
            self.rollbar.timeout_secs = timeout.parse()?;
        }
        if let Some(environment) = env.var("ERROR_CAT_ROLLBAR_ENVIRONMENT") {
            self.rollbar.environment = Some(environment);
        }

        // Logging settings
        if let Some(level) = env.var("ERROR_CAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env.var("ERROR_CAT_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.gate.env_var.is_empty() {
            return Err(ConfigError::invalid_field("gate.env_var", "cannot be empty").into());
        }
        if self.gate.key_var.is_empty() {
            return Err(ConfigError::invalid_field("gate.key_var", "cannot be empty").into());
        }

        if self.rollbar.endpoint.is_empty() {
            return Err(ConfigError::missing_field("rollbar.endpoint").into());
        }
        if self.rollbar.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Rollbar timeout must be greater than 0"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }
        match self.logging.format.as_str() {
            "full" | "compact" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format)),
        }

        Ok(())
    }

    /// Transport configuration, resolving the environment name against `env`
    pub fn rollbar_config(&self, env: &dyn Environment) -> RollbarConfig {
        let environment = self
            .rollbar
            .environment
            .clone()
            .or_else(|| env.var(&self.gate.env_var).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "production".to_string());

        RollbarConfig {
            endpoint: self.rollbar.endpoint.clone(),
            environment,
            timeout_secs: self.rollbar.timeout_secs,
            ..RollbarConfig::default()
        }
    }
}
