// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Kitchen configuration: appliances and the worker roster as data

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One worker and the appliance subset it must hold to cook.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerSpec {
    pub name: String,
    /// Appliances this worker needs, all at once.
    pub appliances: Vec<String>,
    /// Base cook duration; the actual pause is jittered upward from this.
    #[serde(with = "humantime_serde")]
    pub base_duration: Duration,
}

impl WorkerSpec {
    pub fn new(name: impl Into<String>, appliances: &[&str], base_duration: Duration) -> Self {
        Self {
            name: name.into(),
            appliances: appliances.iter().map(|s| s.to_string()).collect(),
            base_duration,
        }
    }
}

/// Closed set of appliances plus the worker roster sharing them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KitchenConfig {
    pub appliances: Vec<String>,
    pub workers: Vec<WorkerSpec>,
    /// Pause between dishes, jittered like the cook duration.
    #[serde(with = "humantime_serde", default = "default_rest")]
    pub rest_duration: Duration,
}

fn default_rest() -> Duration {
    Duration::from_millis(25)
}

impl KitchenConfig {
    pub fn new(appliances: &[&str]) -> Self {
        Self {
            appliances: appliances.iter().map(|s| s.to_string()).collect(),
            workers: Vec::new(),
            rest_duration: default_rest(),
        }
    }

    pub fn with_worker(mut self, worker: WorkerSpec) -> Self {
        self.workers.push(worker);
        self
    }

    pub fn with_rest_duration(mut self, rest: Duration) -> Self {
        self.rest_duration = rest;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject rosters that reuse names, reference unknown appliances, or
    /// declare a zero cook duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut appliances = HashSet::new();
        for appliance in &self.appliances {
            if !appliances.insert(appliance.as_str()) {
                return Err(ConfigError::DuplicateAppliance(appliance.clone()));
            }
        }
        let mut workers = HashSet::new();
        for worker in &self.workers {
            if !workers.insert(worker.name.as_str()) {
                return Err(ConfigError::DuplicateWorker(worker.name.clone()));
            }
            if worker.base_duration.is_zero() {
                return Err(ConfigError::ZeroDuration(worker.name.clone()));
            }
            for appliance in &worker.appliances {
                if !appliances.contains(appliance.as_str()) {
                    return Err(ConfigError::UnknownAppliance {
                        worker: worker.name.clone(),
                        appliance: appliance.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Board index of an appliance by name.
    pub fn appliance_index(&self, name: &str) -> Option<usize> {
        self.appliances.iter().position(|a| a == name)
    }

    /// The classic roster: eight shared appliances, ten workers with
    /// pairwise-overlapping requirements.
    pub fn sample() -> Self {
        let ms = Duration::from_millis;
        Self::new(&[
            "griddle",
            "mixer",
            "oven",
            "blender",
            "grill",
            "fryer",
            "microwave",
            "coffee-maker",
        ])
        .with_worker(WorkerSpec::new(
            "Mandy",
            &["microwave", "coffee-maker"],
            ms(105),
        ))
        .with_worker(WorkerSpec::new(
            "Edmund",
            &["blender", "oven", "mixer"],
            ms(30),
        ))
        .with_worker(WorkerSpec::new("Napoleon", &["blender", "grill"], ms(60)))
        .with_worker(WorkerSpec::new(
            "Prudence",
            &["coffee-maker", "microwave", "griddle"],
            ms(15),
        ))
        .with_worker(WorkerSpec::new("Kyle", &["fryer", "oven"], ms(45)))
        .with_worker(WorkerSpec::new("Claire", &["grill", "griddle"], ms(15)))
        .with_worker(WorkerSpec::new("Lucia", &["griddle", "mixer"], ms(15)))
        .with_worker(WorkerSpec::new(
            "Marcos",
            &["microwave", "fryer", "blender"],
            ms(60),
        ))
        .with_worker(WorkerSpec::new("Roslyn", &["fryer", "grill"], ms(75)))
        .with_worker(WorkerSpec::new(
            "Stephenie",
            &["mixer", "coffee-maker", "oven"],
            ms(30),
        ))
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
