// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crypto: Crypto,
    pub features: Features,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Crypto {
    /// Algorithm identifier — must name a supported algorithm
    pub algorithm: String,
    /// Hex characters in synthesized key identifiers
    pub id_length_hex: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    /// Permit exporting cleartext key material from the inventory
    pub allow_insecure_export: bool,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var("SKV_CONFIG").unwrap_or_else(|_| "skv-config.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content =
                std::fs::read_to_string(&config_path).expect("Failed to read skv-config.toml");
            toml::from_str(&content).expect("Invalid TOML in skv-config.toml")
        } else {
            log::debug!("{config_path} not found — using built-in defaults");
            Config {
                crypto: default_crypto(),
                features: default_features(),
            }
        }
    })
}
