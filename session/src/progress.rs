//! Kill counters accumulated while a level is active.

use neural_break_core::{EnemyKind, LevelObjectives, PerEnemy};

/// Per-kind kill counters for the active level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelProgress {
    kills: PerEnemy<u32>,
}

impl LevelProgress {
    /// Creates progress with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one kill of the provided kind.
    pub fn register_kill(&mut self, kind: EnemyKind) {
        let counter = &mut self.kills[kind];
        *counter = counter.saturating_add(1);
    }

    /// Kills counted for the provided kind.
    #[must_use]
    pub fn kills(&self, kind: EnemyKind) -> u32 {
        self.kills[kind]
    }

    /// Reports whether every counter reached its objective.
    #[must_use]
    pub fn meets_objectives(&self, objectives: &LevelObjectives) -> bool {
        objectives
            .iter()
            .all(|(kind, required)| self.kills[kind] >= required)
    }

    /// Share of the required kills already achieved, in percent.
    ///
    /// Surplus kills of one kind do not compensate for another. Objectives
    /// without any required kill report 100.
    #[must_use]
    pub fn completion_percent(&self, objectives: &LevelObjectives) -> f32 {
        let required = objectives.total();
        if required == 0 {
            return 100.0;
        }

        let achieved: u64 = objectives
            .iter()
            .map(|(kind, required)| u64::from(self.kills[kind].min(required)))
            .sum();
        (achieved as f64 / required as f64 * 100.0) as f32
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        self.kills = PerEnemy::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_mite_objectives(kills: u32) -> LevelObjectives {
        let mut table = PerEnemy::default();
        table[EnemyKind::DataMite] = kills;
        LevelObjectives::new(table)
    }

    #[test]
    fn completes_exactly_at_quota() {
        let objectives = data_mite_objectives(10);
        let mut progress = LevelProgress::new();

        for _ in 0..9 {
            progress.register_kill(EnemyKind::DataMite);
        }
        assert!(!progress.meets_objectives(&objectives));

        progress.register_kill(EnemyKind::DataMite);
        assert!(progress.meets_objectives(&objectives));
    }

    #[test]
    fn unrelated_kills_do_not_count_toward_objectives() {
        let objectives = data_mite_objectives(2);
        let mut progress = LevelProgress::new();
        progress.register_kill(EnemyKind::Boss);
        progress.register_kill(EnemyKind::Boss);

        assert_eq!(progress.kills(EnemyKind::Boss), 2);
        assert!(!progress.meets_objectives(&objectives));
        assert_eq!(progress.completion_percent(&objectives), 0.0);
    }

    #[test]
    fn completion_percent_caps_surplus_kills() {
        let mut table = PerEnemy::default();
        table[EnemyKind::DataMite] = 2;
        table[EnemyKind::ScanDrone] = 2;
        let objectives = LevelObjectives::new(table);
        let mut progress = LevelProgress::new();
        for _ in 0..5 {
            progress.register_kill(EnemyKind::DataMite);
        }

        assert!((progress.completion_percent(&objectives) - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_objectives_are_trivially_met() {
        let progress = LevelProgress::new();
        let objectives = LevelObjectives::default();
        assert!(progress.meets_objectives(&objectives));
        assert_eq!(progress.completion_percent(&objectives), 100.0);
    }

    #[test]
    fn reset_clears_counters() {
        let mut progress = LevelProgress::new();
        progress.register_kill(EnemyKind::Fizzer);
        progress.reset();
        assert_eq!(progress, LevelProgress::new());
    }
}
