use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    pub server: ServerConf,
    pub logging: LoggingConf,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConf {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConf {
    pub level: String, // ex: "info", "ohm_kernel=debug,tower_http=info"
}

impl Default for ServerConf {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl Default for LoggingConf {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

impl ServerConf {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse le YAML ; un texte vide donne la config par défaut.
pub fn parse_config(txt: &str) -> Result<KernelConfig, serde_yaml::Error> {
    if txt.trim().is_empty() {
        return Ok(KernelConfig::default());
    }
    serde_yaml::from_str(txt)
}

/// Raison d'un repli sur la config par défaut, à logger une fois le
/// subscriber installé.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNotice {
    Missing(PathBuf),
    Unreadable(PathBuf, String),
    Invalid(PathBuf, String),
}

impl ConfigNotice {
    pub fn log(&self) {
        match self {
            ConfigNotice::Missing(path) => {
                tracing::info!("[kernel] pas de {}, usage config par défaut", path.display())
            }
            ConfigNotice::Unreadable(path, e) => {
                tracing::warn!("[kernel] lecture {} impossible: {e}", path.display())
            }
            ConfigNotice::Invalid(path, e) => {
                tracing::warn!("[kernel] config invalide ({}): {e}", path.display())
            }
        }
    }
}

pub async fn load_config() -> (KernelConfig, Option<ConfigNotice>) {
    let path = std::env::var("OHM_KERNEL_CONFIG").unwrap_or_else(|_| "kernel.yaml".into());
    load_config_from(&path).await
}

pub async fn load_config_from(path: impl AsRef<Path>) -> (KernelConfig, Option<ConfigNotice>) {
    let path = path.as_ref();
    if !path.exists() {
        return (KernelConfig::default(), Some(ConfigNotice::Missing(path.to_path_buf())));
    }

    let txt = match fs::read_to_string(path).await {
        Ok(txt) => txt,
        Err(e) => {
            let notice = ConfigNotice::Unreadable(path.to_path_buf(), e.to_string());
            return (KernelConfig::default(), Some(notice));
        }
    };

    match parse_config(&txt) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let notice = ConfigNotice::Invalid(path.to_path_buf(), e.to_string());
            (KernelConfig::default(), Some(notice))
        }
    }
}
