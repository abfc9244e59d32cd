#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use log::debug;
use neural_break_core::{Command, EnemyKind, Event, PerEnemy, SpawnControl, SpawnRates};
use sha2::{Digest, Sha256};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;
const RNG_STREAM_LABEL: &str = "neural-break/spawn-stream";

/// Shortest jittered interval as a fraction of the configured mean.
const JITTER_MIN: f64 = 0.5;
/// Width of the jitter window; `JITTER_MIN + JITTER_SPAN / 2` must equal 1 to preserve the mean.
const JITTER_SPAN: f64 = 1.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that deterministically emits spawn commands for every enabled enemy kind.
///
/// Each kind keeps its own accumulator. Intervals are drawn uniformly from
/// half to one and a half times the configured mean, so the long-run cadence
/// matches the configured rate.
#[derive(Debug)]
pub struct Spawning {
    rng_seed: u64,
    rates: SpawnRates,
    active: bool,
    accumulators: PerEnemy<Duration>,
    next_due: PerEnemy<Option<Duration>>,
    generation: u64,
    rng_state: u64,
}

impl Spawning {
    /// Creates an inactive spawning system with every kind disabled.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rates: SpawnRates::DISABLED,
            active: false,
            accumulators: PerEnemy::splat(Duration::ZERO),
            next_due: PerEnemy::splat(None),
            generation: 0,
            rng_state: derive_stream_seed(config.rng_seed, 0),
        }
    }

    /// Reports whether the system currently emits spawn commands.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Spawn rates most recently applied.
    #[must_use]
    pub const fn rates(&self) -> &SpawnRates {
        &self.rates
    }

    /// Consumes events to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if !self.active {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        for kind in EnemyKind::ALL {
            let Some(mut due) = self.next_due[kind] else {
                continue;
            };

            let mut accumulator = self.accumulators[kind].saturating_add(accumulated);
            while accumulator >= due {
                accumulator -= due;
                out.push(Command::SpawnEnemy { kind });
                due = self.sample_interval(self.rates.interval(kind));
            }
            self.accumulators[kind] = accumulator;
            self.next_due[kind] = Some(due);
        }
    }

    fn reset_schedule(&mut self) {
        self.accumulators = PerEnemy::splat(Duration::ZERO);
        for kind in EnemyKind::ALL {
            let interval = self.rates.interval(kind);
            self.next_due[kind] = if interval.is_finite() && interval > 0.0 {
                Some(self.sample_interval(interval))
            } else {
                None
            };
        }
    }

    fn sample_interval(&mut self, mean_seconds: f32) -> Duration {
        let factor = JITTER_MIN + JITTER_SPAN * self.next_unit();
        let seconds = f64::from(mean_seconds) * factor;
        // Zero-length intervals would never let the accumulator drain.
        Duration::from_secs_f64(seconds).max(Duration::from_millis(1))
    }

    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        (self.rng_state >> 11) as f64 * SCALE
    }
}

impl SpawnControl for Spawning {
    fn set_spawn_rates(&mut self, rates: &SpawnRates) {
        self.rates = *rates;
        self.generation = self.generation.wrapping_add(1);
        self.rng_state = derive_stream_seed(self.rng_seed, self.generation);
        self.reset_schedule();
        debug!("spawn rates updated: {:?}", rates.as_array());
    }

    fn start_spawning(&mut self) {
        self.active = true;
    }

    fn stop_spawning(&mut self) {
        self.active = false;
        self.accumulators = PerEnemy::splat(Duration::ZERO);
    }
}

/// Each applied rate table gets an independent stream so replays do not depend on earlier levels' draws.
fn derive_stream_seed(seed: u64, generation: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(RNG_STREAM_LABEL.as_bytes());
    hasher.update(generation.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
