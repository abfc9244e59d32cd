#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Neural Break level progression engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level session, and pure systems. Adapters submit [`Command`]
//! values describing gameplay notifications, the session executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical title shown when the experience boots.
pub const GAME_TITLE: &str = "NEURAL BREAK";

/// Number of levels that make up the arcade campaign.
pub const TOTAL_LEVELS: u32 = 99;

/// Number of distinct enemy categories tracked by objectives and spawners.
pub const ENEMY_KIND_COUNT: usize = 8;

/// Enemy categories that can be spawned, killed and required by objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Swarming fodder present in every campaign level.
    DataMite,
    /// Ranged drone unlocked from level 2.
    ScanDrone,
    /// Segmented worm unlocked from level 3.
    ChaosWorm,
    /// Heavy sphere unlocked from level 3.
    VoidSphere,
    /// Splitting crystal unlocked from level 4.
    CrystalShard,
    /// Erratic fizzer unlocked from level 6.
    Fizzer,
    /// Rare saucer unlocked from level 6.
    Ufo,
    /// Boss encounter unlocked from level 5.
    Boss,
}

impl EnemyKind {
    /// Every enemy kind in canonical table order.
    pub const ALL: [EnemyKind; ENEMY_KIND_COUNT] = [
        EnemyKind::DataMite,
        EnemyKind::ScanDrone,
        EnemyKind::ChaosWorm,
        EnemyKind::VoidSphere,
        EnemyKind::CrystalShard,
        EnemyKind::Fizzer,
        EnemyKind::Ufo,
        EnemyKind::Boss,
    ];

    /// Position of the kind within [`EnemyKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::DataMite => 0,
            Self::ScanDrone => 1,
            Self::ChaosWorm => 2,
            Self::VoidSphere => 3,
            Self::CrystalShard => 4,
            Self::Fizzer => 5,
            Self::Ufo => 6,
            Self::Boss => 7,
        }
    }

    /// Tag used when the kind travels through text interfaces.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::DataMite => "data-mite",
            Self::ScanDrone => "scan-drone",
            Self::ChaosWorm => "chaos-worm",
            Self::VoidSphere => "void-sphere",
            Self::CrystalShard => "crystal-shard",
            Self::Fizzer => "fizzer",
            Self::Ufo => "ufo",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a textual enemy tag does not name a known kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown enemy tag `{0}`")]
pub struct ParseEnemyKindError(String);

impl FromStr for EnemyKind {
    type Err = ParseEnemyKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == normalized)
            .ok_or_else(|| ParseEnemyKindError(value.to_owned()))
    }
}

/// Fixed-size table storing one value per [`EnemyKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerEnemy<T> {
    values: [T; ENEMY_KIND_COUNT],
}

impl<T> PerEnemy<T> {
    /// Builds a table by evaluating `f` once per kind in canonical order.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(EnemyKind) -> T) -> Self {
        Self {
            values: EnemyKind::ALL.map(&mut f),
        }
    }

    /// Iterates over `(kind, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyKind, &T)> {
        EnemyKind::ALL.into_iter().zip(self.values.iter())
    }

    /// Produces a new table by transforming every value.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(EnemyKind, &T) -> U) -> PerEnemy<U> {
        PerEnemy::from_fn(|kind| f(kind, &self.values[kind.index()]))
    }

    /// Borrows the values in canonical order.
    #[must_use]
    pub const fn as_array(&self) -> &[T; ENEMY_KIND_COUNT] {
        &self.values
    }
}

impl<T: Copy> PerEnemy<T> {
    /// Creates a table where every kind holds the same value.
    #[must_use]
    pub const fn splat(value: T) -> Self {
        Self {
            values: [value; ENEMY_KIND_COUNT],
        }
    }
}

impl<T: Default> Default for PerEnemy<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<EnemyKind> for PerEnemy<T> {
    type Output = T;

    fn index(&self, kind: EnemyKind) -> &T {
        &self.values[kind.index()]
    }
}

impl<T> IndexMut<EnemyKind> for PerEnemy<T> {
    fn index_mut(&mut self, kind: EnemyKind) -> &mut T {
        &mut self.values[kind.index()]
    }
}

/// Kill quota and spawn cadence for an enemy kind that is enabled in a level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyQuota {
    kills: u32,
    spawn_interval: f32,
}

impl EnemyQuota {
    /// Creates a quota requiring `kills` kills with the provided mean spawn interval in seconds.
    #[must_use]
    pub fn new(kills: u32, spawn_interval: f32) -> Self {
        debug_assert!(
            spawn_interval.is_finite() && spawn_interval > 0.0,
            "enabled enemies require a finite positive spawn interval"
        );
        Self {
            kills,
            spawn_interval,
        }
    }

    /// Number of kills required to satisfy the objective.
    #[must_use]
    pub const fn kills(&self) -> u32 {
        self.kills
    }

    /// Mean number of seconds between spawn attempts.
    #[must_use]
    pub const fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }
}

/// Per-kind enablement of a level. `None` marks a kind that neither spawns nor is required.
pub type EnemyBudget = PerEnemy<Option<EnemyQuota>>;

/// Required kill counts per enemy kind. Zero means the kind is not required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelObjectives {
    kills: PerEnemy<u32>,
}

impl LevelObjectives {
    /// Wraps a table of required kill counts.
    #[must_use]
    pub const fn new(kills: PerEnemy<u32>) -> Self {
        Self { kills }
    }

    /// Kills required for the provided kind.
    #[must_use]
    pub fn required(&self, kind: EnemyKind) -> u32 {
        self.kills[kind]
    }

    /// Sum of every required kill count.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.kills
            .iter()
            .map(|(_, kills)| u64::from(*kills))
            .sum()
    }

    /// Iterates over `(kind, required)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyKind, u32)> + '_ {
        self.kills.iter().map(|(kind, kills)| (kind, *kills))
    }
}

/// Mean seconds between spawn attempts per kind. `f32::INFINITY` disables a kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRates {
    intervals: PerEnemy<f32>,
}

impl SpawnRates {
    /// Rates with every kind disabled.
    pub const DISABLED: SpawnRates = SpawnRates {
        intervals: PerEnemy::splat(f32::INFINITY),
    };

    /// Wraps a table of spawn intervals expressed in seconds.
    #[must_use]
    pub const fn new(intervals: PerEnemy<f32>) -> Self {
        Self { intervals }
    }

    /// Mean interval for the provided kind, or infinity when disabled.
    #[must_use]
    pub fn interval(&self, kind: EnemyKind) -> f32 {
        self.intervals[kind]
    }

    /// Reports whether the provided kind spawns at all.
    #[must_use]
    pub fn is_enabled(&self, kind: EnemyKind) -> bool {
        self.intervals[kind].is_finite()
    }

    /// The eight raw intervals in canonical order.
    #[must_use]
    pub const fn as_array(&self) -> &[f32; ENEMY_KIND_COUNT] {
        self.intervals.as_array()
    }
}

/// Identifies the level a [`LevelConfig`] was produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    /// Arcade campaign level in `1..=TOTAL_LEVELS`.
    Campaign(u32),
    /// Endless test arena with every enemy kind enabled.
    Test,
    /// Rogue mode layer, counted from 1 without an upper bound.
    Rogue {
        /// Layer number within the rogue run.
        layer: u32,
    },
}

impl LevelId {
    /// Numeric level shown to players: campaign level, rogue layer, or zero in test mode.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Campaign(level) => level,
            Self::Test => 0,
            Self::Rogue { layer } => layer,
        }
    }

    /// Game mode the level belongs to.
    #[must_use]
    pub const fn mode(self) -> GameMode {
        match self {
            Self::Campaign(_) => GameMode::Arcade,
            Self::Test => GameMode::Test,
            Self::Rogue { .. } => GameMode::Rogue,
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campaign(level) => write!(f, "level {level}"),
            Self::Test => f.write_str("test arena"),
            Self::Rogue { layer } => write!(f, "rogue layer {layer}"),
        }
    }
}

/// Request for a level configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelSelector {
    /// Campaign level; values outside `1..=TOTAL_LEVELS` are clamped.
    Campaign(i64),
    /// The constant test arena.
    Test,
    /// The first rogue layer.
    Rogue,
}

/// Game modes that can be started by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Ninety-nine level campaign.
    Arcade,
    /// Endless test arena.
    Test,
    /// Open-ended layered rogue run.
    Rogue,
}

/// Error returned when a textual mode tag does not name a known mode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown game mode `{0}` (expected arcade, test or rogue)")]
pub struct ParseGameModeError(String);

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "arcade" | "campaign" => Ok(Self::Arcade),
            "test" => Ok(Self::Test),
            "rogue" => Ok(Self::Rogue),
            _ => Err(ParseGameModeError(value.to_owned())),
        }
    }
}

/// Immutable description of a single level produced by the level generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    level: LevelId,
    name: String,
    budget: EnemyBudget,
}

impl LevelConfig {
    /// Creates a level configuration from its identity, display name and enemy budget.
    #[must_use]
    pub fn new(level: LevelId, name: impl Into<String>, budget: EnemyBudget) -> Self {
        Self {
            level,
            name: name.into(),
            budget,
        }
    }

    /// Level the configuration was produced for.
    #[must_use]
    pub const fn level(&self) -> LevelId {
        self.level
    }

    /// Display name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-kind enablement table backing the objectives and spawn rates.
    #[must_use]
    pub const fn budget(&self) -> &EnemyBudget {
        &self.budget
    }

    /// Quota for the provided kind, or `None` when the kind is disabled.
    #[must_use]
    pub fn quota(&self, kind: EnemyKind) -> Option<EnemyQuota> {
        self.budget[kind]
    }

    /// Required kill counts derived from the budget.
    #[must_use]
    pub fn objectives(&self) -> LevelObjectives {
        LevelObjectives::new(
            self.budget
                .map(|_, quota| quota.map_or(0, |quota| quota.kills())),
        )
    }

    /// Spawn intervals derived from the budget.
    #[must_use]
    pub fn spawn_rates(&self) -> SpawnRates {
        SpawnRates::new(
            self.budget
                .map(|_, quota| quota.map_or(f32::INFINITY, |quota| quota.spawn_interval())),
        )
    }

    /// Kinds enabled in this level in canonical order.
    pub fn enabled_kinds(&self) -> impl Iterator<Item = EnemyKind> + '_ {
        self.budget
            .iter()
            .filter_map(|(kind, quota)| quota.map(|_| kind))
    }
}

/// Collaborator that turns spawn rates into spawned enemies.
pub trait SpawnControl {
    /// Replaces the active spawn intervals.
    fn set_spawn_rates(&mut self, rates: &SpawnRates);

    /// Resumes spawning using the active intervals.
    fn start_spawning(&mut self);

    /// Halts spawning until [`SpawnControl::start_spawning`] is invoked.
    fn stop_spawning(&mut self);
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a new game in the provided mode from its first level.
    StartGame {
        /// Mode that selects the entry point.
        mode: GameMode,
    },
    /// Starts the campaign at an explicit level; out-of-range values are clamped.
    StartAtLevel {
        /// Requested campaign level.
        level: i64,
    },
    /// Notifies the session that an enemy was destroyed.
    RegisterKill {
        /// Kind of the destroyed enemy.
        kind: EnemyKind,
    },
    /// Advances to the next campaign level, or completes the game after the last one.
    AdvanceLevel,
    /// Advances to the next rogue layer.
    AdvanceRogueLayer,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the adapter owning enemy entities spawn an enemy.
    SpawnEnemy {
        /// Kind of enemy to spawn.
        kind: EnemyKind,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a level was loaded and spawning began.
    LevelStarted {
        /// Level that became active.
        level: LevelId,
        /// Display name of the level.
        name: String,
    },
    /// Announces that every objective of the active level was met.
    LevelCompleted {
        /// Level whose objectives were met.
        level: LevelId,
        /// Display name of the level.
        name: String,
        /// Time spent in the level before completion.
        elapsed: Duration,
    },
    /// Announces that the final campaign level was cleared.
    GameCompleted {
        /// Last level that was played.
        final_level: LevelId,
        /// Total time spent across the whole game.
        total_elapsed: Duration,
    },
}
