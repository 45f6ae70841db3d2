use std::{
    env::{self, VarError},
    fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Names the configuration file. If not set, `signup.toml` is used when it exists.
pub const CONFIG_FILE_VAR: &str = "SIGNUP_CONFIG";
pub const HOST_VAR: &str = "SIGNUP_HOST";
pub const PORT_VAR: &str = "SIGNUP_PORT";

const DEFAULT_CONFIG_FILE: &str = "signup.toml";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// The optional TOML file. Every key can be overridden by the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<IpAddr>,
    port: Option<u16>,
}

impl Config {
    /// Loads the configuration file (if any), then applies the environment overrides.
    pub fn load() -> Result<Self> {
        let file = match env_var(CONFIG_FILE_VAR)? {
            Some(path) => read_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };

        Self::resolve(file, env_var)
    }

    fn resolve(file: FileConfig, var: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = file.host {
            config.host = host;
        }
        if let Some(port) = file.port {
            config.port = port;
        }

        if let Some(host) = var(HOST_VAR)? {
            config.host = host
                .parse()
                .with_context(|| format!("{HOST_VAR} is not an IP address: {host:?}"))?;
        }
        if let Some(port) = var(PORT_VAR)? {
            config.port = port
                .parse()
                .with_context(|| format!("{PORT_VAR} is not a port number: {port:?}"))?;
        }

        Ok(config)
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_var(key: &str) -> Result<Option<String>> {
    optional(key, env::var(key))
}

/// An unset variable is `None`, a set but non-Unicode one is an error.
fn optional(key: &str, value: Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(value)) => {
            Err(anyhow!("{key} is not valid Unicode: {value:?}"))
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let toml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file from {:?}", path))?;
    toml::from_str(&toml).with_context(|| format!("Failed to parse configuration file {:?}", path))
}
