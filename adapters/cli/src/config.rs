//! TOML configuration for headless simulation runs.
//!
//! Every field is optional; missing sections fall back to their defaults.

use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_SEED: u64 = 0x4e42_0001;
const DEFAULT_TICK_MS: u64 = 100;
const DEFAULT_PRESENTATION_DELAY_MS: u64 = 2_000;
const DEFAULT_MAX_TICKS: u64 = 36_000;
const DEFAULT_KILL_CHANCE: f64 = 0.35;
/// Longest tick accepted.
const MAX_TICK_MS: u64 = 60_000;

/// Errors raised while loading a simulation configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file contents were not valid TOML for the expected schema.
    #[error("failed to parse {path}")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying parser failure.
        #[source]
        source: toml::de::Error,
    },
    /// Ticks must advance time.
    #[error("session.tick_ms must be greater than zero")]
    ZeroTick,
    /// Ticks longer than a minute are rejected.
    #[error("session.tick_ms must not exceed {max}, got {0}", max = MAX_TICK_MS)]
    TickTooLong(u64),
    /// Kill chance is a probability.
    #[error("simulation.kill_chance must lie within [0, 1], got {0}")]
    KillChanceOutOfRange(f64),
}

/// Parameters of a headless simulation run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    /// Session clock and seeding.
    pub(crate) session: SessionSection,
    /// Behaviour of the simulated player.
    pub(crate) simulation: PlayerSection,
}

/// `[session]` table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionSection {
    /// Seed shared by the spawner and the simulated player.
    pub(crate) seed: u64,
    /// Length of one simulation tick in milliseconds.
    pub(crate) tick_ms: u64,
    /// Pause between a cleared level and the next one in milliseconds.
    pub(crate) presentation_delay_ms: u64,
    /// Upper bound on simulated ticks.
    pub(crate) max_ticks: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_ms: DEFAULT_TICK_MS,
            presentation_delay_ms: DEFAULT_PRESENTATION_DELAY_MS,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// `[simulation]` table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayerSection {
    /// Probability that a live enemy is destroyed during one tick.
    pub(crate) kill_chance: f64,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            kill_chance: DEFAULT_KILL_CHANCE,
        }
    }
}

impl SimulationConfig {
    /// Loads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents).map_err(|error| match error {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses and validates configuration text.
    pub(crate) fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: String::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that serde cannot express.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.session.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.session.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickTooLong(self.session.tick_ms));
        }
        let chance = self.simulation.kill_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::KillChanceOutOfRange(chance));
        }
        Ok(())
    }

    pub(crate) fn tick(&self) -> Duration {
        Duration::from_millis(self.session.tick_ms)
    }

    pub(crate) fn presentation_delay(&self) -> Duration {
        Duration::from_millis(self.session.presentation_delay_ms)
    }
}
