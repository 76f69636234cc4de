// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Error types for hall and kitchen configuration

use thiserror::Error;

/// Configuration-time failures. Surfaced synchronously; fatal to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hall capacity must be positive")]
    InvalidCapacity,

    #[error("allocation width must be positive")]
    InvalidWidth,

    #[error("owner name must not be empty")]
    EmptyOwnerName,

    #[error("duplicate appliance name: {0}")]
    DuplicateAppliance(String),

    #[error("duplicate worker name: {0}")]
    DuplicateWorker(String),

    #[error("worker {worker} requires unknown appliance: {appliance}")]
    UnknownAppliance { worker: String, appliance: String },

    #[error("worker {0} base duration must be positive")]
    ZeroDuration(String),

    #[error("kitchen config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures while building or starting a kitchen crew.
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn worker thread for {worker}: {source}")]
    Spawn {
        worker: String,
        #[source]
        source: std::io::Error,
    },
}
