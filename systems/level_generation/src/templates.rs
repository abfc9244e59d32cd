//! Hand-tuned level tables. The numbers are balance values and are pinned by golden tests.

use neural_break_core::EnemyKind::{
    self, Boss, ChaosWorm, CrystalShard, DataMite, Fizzer, ScanDrone, Ufo, VoidSphere,
};

/// Base kill quota and spawn interval for one enemy kind within a themed template.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TemplateEntry {
    pub(crate) kind: EnemyKind,
    pub(crate) kills: f64,
    pub(crate) interval: f64,
}

const fn entry(kind: EnemyKind, kills: f64, interval: f64) -> TemplateEntry {
    TemplateEntry {
        kind,
        kills,
        interval,
    }
}

/// Themed surprise level occurring on every fifth campaign level.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SurpriseTemplate {
    pub(crate) title: &'static str,
    pub(crate) roster: &'static [TemplateEntry],
}

pub(crate) const SURPRISE_TEMPLATES: [SurpriseTemplate; 10] = [
    SurpriseTemplate {
        title: "NEURAL MELTDOWN",
        roster: &[
            entry(DataMite, 40.0, 0.8),
            entry(ScanDrone, 8.0, 4.0),
            entry(ChaosWorm, 3.0, 10.0),
            entry(VoidSphere, 3.0, 12.0),
            entry(CrystalShard, 3.0, 12.0),
            entry(Fizzer, 4.0, 8.0),
            entry(Ufo, 2.0, 15.0),
            entry(Boss, 1.0, 60.0),
        ],
    },
    SurpriseTemplate {
        title: "WORM INVASION",
        roster: &[entry(DataMite, 15.0, 1.5), entry(ChaosWorm, 8.0, 4.0)],
    },
    SurpriseTemplate {
        title: "FIZZER FRENZY",
        roster: &[entry(DataMite, 10.0, 2.0), entry(Fizzer, 12.0, 2.5)],
    },
    SurpriseTemplate {
        title: "SPHERE STORM",
        roster: &[entry(ScanDrone, 6.0, 5.0), entry(VoidSphere, 8.0, 4.0)],
    },
    SurpriseTemplate {
        title: "CRYSTAL CAVERN",
        roster: &[entry(DataMite, 20.0, 1.5), entry(CrystalShard, 10.0, 3.5)],
    },
    SurpriseTemplate {
        title: "BOSS RUSH",
        roster: &[entry(DataMite, 10.0, 2.5), entry(Boss, 3.0, 20.0)],
    },
    SurpriseTemplate {
        title: "DRONE SWARM",
        roster: &[entry(DataMite, 15.0, 1.5), entry(ScanDrone, 15.0, 2.0)],
    },
    SurpriseTemplate {
        title: "UFO ARMADA",
        roster: &[entry(ScanDrone, 8.0, 4.0), entry(Ufo, 8.0, 5.0)],
    },
    SurpriseTemplate {
        title: "MITE PLAGUE",
        roster: &[entry(DataMite, 80.0, 0.4)],
    },
    SurpriseTemplate {
        title: "CHAOS THEORY",
        roster: &[
            entry(ChaosWorm, 5.0, 6.0),
            entry(VoidSphere, 5.0, 7.0),
            entry(Fizzer, 6.0, 5.0),
        ],
    },
];

/// Which half of a rogue template grows with the layer difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RogueScaling {
    /// Quotas are multiplied by the layer scale.
    Quotas,
    /// Intervals are divided by the layer scale.
    Intervals,
    /// Both quotas and intervals scale.
    Both,
}

impl RogueScaling {
    pub(crate) const fn scales_quotas(self) -> bool {
        matches!(self, Self::Quotas | Self::Both)
    }

    pub(crate) const fn scales_intervals(self) -> bool {
        matches!(self, Self::Intervals | Self::Both)
    }
}

/// Themed rogue layer template.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RogueTemplate {
    pub(crate) title: &'static str,
    pub(crate) scaling: RogueScaling,
    pub(crate) roster: &'static [TemplateEntry],
}

pub(crate) const ROGUE_TEMPLATES: [RogueTemplate; 6] = [
    RogueTemplate {
        title: "DATA STREAM",
        scaling: RogueScaling::Quotas,
        roster: &[entry(DataMite, 30.0, 1.0), entry(ScanDrone, 4.0, 5.0)],
    },
    RogueTemplate {
        title: "WORM NEST",
        scaling: RogueScaling::Intervals,
        roster: &[entry(DataMite, 15.0, 2.0), entry(ChaosWorm, 6.0, 5.0)],
    },
    RogueTemplate {
        title: "DRONE HIVE",
        scaling: RogueScaling::Both,
        roster: &[entry(ScanDrone, 12.0, 2.5), entry(Ufo, 3.0, 12.0)],
    },
    RogueTemplate {
        title: "CRYSTAL CORE",
        scaling: RogueScaling::Quotas,
        roster: &[entry(DataMite, 20.0, 1.5), entry(CrystalShard, 8.0, 4.0)],
    },
    RogueTemplate {
        title: "VOID RIFT",
        scaling: RogueScaling::Intervals,
        roster: &[entry(VoidSphere, 8.0, 4.0), entry(Fizzer, 6.0, 5.0)],
    },
    RogueTemplate {
        title: "SYSTEM GUARDIAN",
        scaling: RogueScaling::Both,
        roster: &[entry(DataMite, 20.0, 2.0), entry(Boss, 1.0, 45.0)],
    },
];

/// Linear quota and interval curve for one enemy kind on normal campaign levels.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RampCurve {
    pub(crate) kind: EnemyKind,
    pub(crate) unlock_level: u32,
    pub(crate) kills_base: f64,
    pub(crate) kills_per_level: f64,
    pub(crate) interval_base: f64,
    pub(crate) interval_per_level: f64,
    pub(crate) interval_floor: f64,
}

const fn ramp(
    kind: EnemyKind,
    unlock_level: u32,
    kills: (f64, f64),
    interval: (f64, f64, f64),
) -> RampCurve {
    RampCurve {
        kind,
        unlock_level,
        kills_base: kills.0,
        kills_per_level: kills.1,
        interval_base: interval.0,
        interval_per_level: interval.1,
        interval_floor: interval.2,
    }
}

pub(crate) const RAMP_CURVES: [RampCurve; 8] = [
    ramp(DataMite, 1, (20.0, 3.0), (1.2, 0.01, 0.4)),
    ramp(ScanDrone, 2, (2.0, 0.6), (6.0, 0.05, 2.0)),
    ramp(ChaosWorm, 3, (1.0, 0.25), (14.0, 0.1, 5.0)),
    ramp(VoidSphere, 3, (1.0, 0.2), (18.0, 0.12, 6.0)),
    ramp(CrystalShard, 4, (1.0, 0.2), (16.0, 0.1, 6.0)),
    ramp(Fizzer, 6, (1.0, 0.3), (12.0, 0.08, 4.0)),
    ramp(Ufo, 6, (1.0, 0.15), (20.0, 0.12, 8.0)),
    ramp(Boss, 5, (1.0, 0.04), (90.0, 0.5, 40.0)),
];

pub(crate) const RAMP_NAMES: [&str; 20] = [
    "BOOT SEQUENCE",
    "FIRST CONTACT",
    "PACKET STORM",
    "SIGNAL NOISE",
    "DEEP SCAN",
    "FIREWALL BREACH",
    "NULL POINTER",
    "DATA BLEED",
    "KERNEL PANIC",
    "STACK OVERFLOW",
    "GHOST PROTOCOL",
    "SYNAPSE FIRE",
    "BUFFER FLOOD",
    "CIPHER DRIFT",
    "ROOT ACCESS",
    "MEMORY LEAK",
    "LOGIC BOMB",
    "DARK NODE",
    "PHASE SHIFT",
    "CORE DUMP",
];

pub(crate) const TEST_QUOTA: u32 = 999_999;

pub(crate) const TEST_INTERVALS: [(EnemyKind, f32); 8] = [
    (DataMite, 0.5),
    (ScanDrone, 2.0),
    (ChaosWorm, 4.0),
    (VoidSphere, 4.0),
    (CrystalShard, 4.0),
    (Fizzer, 3.0),
    (Ufo, 5.0),
    (Boss, 20.0),
];
