use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use axum::http::HeaderValue;
use roi_engine::InHouseModel;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5174";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind: IpAddr,
    /// Origin allowed by the CORS layer.
    pub frontend_url: HeaderValue,
    pub in_house: InHouseModel,
    /// Projections are archived here when set.
    pub archive_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            frontend_url: HeaderValue::from_static(DEFAULT_FRONTEND_URL),
            in_house: InHouseModel::default(),
            archive_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` reads the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "ROI_PORT", &DEFAULT_PORT.to_string())?,
            bind: try_load(&lookup, "ROI_BIND", "0.0.0.0")?,
            frontend_url: try_load(&lookup, "FRONTEND_URL", DEFAULT_FRONTEND_URL)?,
            in_house: try_load(&lookup, "ROI_IN_HOUSE_MODEL", "build")?,
            archive_dir: lookup("ROI_ARCHIVE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.clone(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.address().to_string(), "0.0.0.0:5000");
        assert_eq!(config.frontend_url, "http://localhost:5174");
        assert_eq!(config.in_house, InHouseModel::default());
        assert!(config.archive_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ROI_PORT", "8080"),
            ("ROI_BIND", "127.0.0.1"),
            ("ROI_IN_HOUSE_MODEL", "none"),
            ("ROI_ARCHIVE_DIR", "/tmp/roi"),
        ]))
        .unwrap();
        assert_eq!(config.address().to_string(), "127.0.0.1:8080");
        assert_eq!(config.in_house, InHouseModel::None);
        assert_eq!(config.archive_dir, Some(PathBuf::from("/tmp/roi")));
    }

    #[test]
    fn unparsable_value_is_an_error() {
        let err = Config::from_lookup(lookup(&[("ROI_PORT", "fivethousand")])).unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, "ROI_PORT"),
        }

        assert!(Config::from_lookup(lookup(&[("ROI_IN_HOUSE_MODEL", "lease")])).is_err());
    }
}
