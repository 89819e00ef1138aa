// src/config/mod.rs
//! Configuration system for secure-key-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config};

mod app;
mod defaults;
