// src/config/defaults.rs
use crate::config::app::{Crypto, Features};
use crate::consts::{DEFAULT_ENCRYPTION_ALGO, DEFAULT_ID_LENGTH_HEX};

pub fn default_crypto() -> Crypto {
    Crypto {
        algorithm: DEFAULT_ENCRYPTION_ALGO.into(),
        id_length_hex: DEFAULT_ID_LENGTH_HEX,
    }
}

pub fn default_features() -> Features {
    Features {
        allow_insecure_export: false,
    }
}
