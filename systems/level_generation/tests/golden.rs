use neural_break_core::{EnemyKind, LevelConfig, LevelId, LevelSelector, TOTAL_LEVELS};
use neural_break_system_level_generation::{
    surprise_roster, surprise_template_index, surprise_title, unlock_level, LevelGenerator,
};

fn assert_quota(config: &LevelConfig, kind: EnemyKind, kills: u32, interval: f32) {
    let quota = config
        .quota(kind)
        .unwrap_or_else(|| panic!("{kind} should be enabled in {}", config.name()));
    assert_eq!(quota.kills(), kills, "{kind} kills in {}", config.name());
    assert!(
        (quota.spawn_interval() - interval).abs() < 1e-4,
        "{kind} interval in {}: {} != {interval}",
        config.name(),
        quota.spawn_interval(),
    );
}

fn assert_disabled(config: &LevelConfig, kinds: &[EnemyKind]) {
    for kind in kinds {
        assert!(
            config.quota(*kind).is_none(),
            "{kind} should be disabled in {}",
            config.name()
        );
        assert_eq!(config.objectives().required(*kind), 0);
        assert!(config.spawn_rates().interval(*kind).is_infinite());
    }
}

#[test]
fn first_level_only_requires_data_mites() {
    let config = LevelGenerator::new().campaign_level_config(1);
    assert_eq!(config.level(), LevelId::Campaign(1));
    assert_eq!(config.name(), "BOOT SEQUENCE 1");
    assert_quota(&config, EnemyKind::DataMite, 20, 1.2);
    assert_eq!(config.enabled_kinds().count(), 1);
}

#[test]
fn second_level_unlocks_scan_drones() {
    let config = LevelGenerator::new().campaign_level_config(2);
    assert_eq!(config.name(), "FIRST CONTACT 2");
    assert_quota(&config, EnemyKind::DataMite, 23, 1.180_48);
    assert_quota(&config, EnemyKind::ScanDrone, 2, 5.902_4);
    assert_disabled(
        &config,
        &[
            EnemyKind::ChaosWorm,
            EnemyKind::VoidSphere,
            EnemyKind::CrystalShard,
            EnemyKind::Fizzer,
            EnemyKind::Ufo,
            EnemyKind::Boss,
        ],
    );
}

#[test]
fn newly_unlocked_kinds_require_a_single_kill() {
    let config = LevelGenerator::new().campaign_level_config(3);
    assert_eq!(config.objectives().required(EnemyKind::ChaosWorm), 1);
    assert_eq!(config.objectives().required(EnemyKind::VoidSphere), 1);
}

#[test]
fn sixth_level_enables_every_kind() {
    let config = LevelGenerator::new().campaign_level_config(6);
    assert_eq!(config.name(), "FIREWALL BREACH 6");
    assert_eq!(config.enabled_kinds().count(), EnemyKind::ALL.len());
    assert_quota(&config, EnemyKind::DataMite, 40, 1.104);
    assert_quota(&config, EnemyKind::Fizzer, 2, 11.136);
    assert_quota(&config, EnemyKind::Ufo, 2, 18.624);
    assert_quota(&config, EnemyKind::Boss, 1, 84.0);
}

#[test]
fn final_level_hits_interval_floors() {
    let config = LevelGenerator::new().campaign_level_config(99);
    assert_eq!(config.name(), "PHASE SHIFT 99");
    assert_quota(&config, EnemyKind::DataMite, 1_237, 0.12);
    assert_quota(&config, EnemyKind::Boss, 19, 12.3);
}

#[test]
fn worm_invasion_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(5);
    assert_eq!(config.name(), "LEVEL 5 - WORM INVASION");
    assert_quota(&config, EnemyKind::DataMite, 16, 1.452);
    assert_quota(&config, EnemyKind::ChaosWorm, 8, 3.872);
    assert_eq!(config.enabled_kinds().count(), 2);
}

#[test]
fn fizzer_frenzy_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(10);
    assert_eq!(config.name(), "LEVEL 10 - FIZZER FRENZY");
    assert_quota(&config, EnemyKind::DataMite, 12, 1.856);
    assert_quota(&config, EnemyKind::Fizzer, 15, 2.32);
}

#[test]
fn boss_rush_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(25);
    assert_eq!(config.name(), "LEVEL 25 - BOSS RUSH");
    assert_quota(&config, EnemyKind::DataMite, 17, 2.02);
    assert_quota(&config, EnemyKind::Boss, 5, 16.16);
}

#[test]
fn neural_meltdown_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(50);
    assert_eq!(config.name(), "LEVEL 50 - NEURAL MELTDOWN");
    assert_quota(&config, EnemyKind::DataMite, 98, 0.486_4);
    assert_quota(&config, EnemyKind::ScanDrone, 19, 2.432);
    assert_quota(&config, EnemyKind::ChaosWorm, 7, 6.08);
    assert_quota(&config, EnemyKind::VoidSphere, 7, 7.296);
    assert_quota(&config, EnemyKind::CrystalShard, 7, 7.296);
    assert_quota(&config, EnemyKind::Fizzer, 9, 4.864);
    assert_quota(&config, EnemyKind::Ufo, 4, 9.12);
    assert_quota(&config, EnemyKind::Boss, 2, 36.48);
}

#[test]
fn chaos_theory_uses_floored_spawn_scale() {
    let config = LevelGenerator::new().campaign_level_config(95);
    assert_eq!(config.name(), "LEVEL 95 - CHAOS THEORY");
    assert_quota(&config, EnemyKind::ChaosWorm, 19, 1.8);
    assert_quota(&config, EnemyKind::VoidSphere, 19, 2.1);
    assert_quota(&config, EnemyKind::Fizzer, 22, 1.5);
}

#[test]
fn sphere_storm_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(15);
    assert_eq!(config.name(), "LEVEL 15 - SPHERE STORM");
    assert_quota(&config, EnemyKind::ScanDrone, 8, 4.44);
    assert_quota(&config, EnemyKind::VoidSphere, 11, 3.552);
    assert_eq!(config.enabled_kinds().count(), 2);
}

#[test]
fn crystal_cavern_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(20);
    assert_eq!(config.name(), "LEVEL 20 - CRYSTAL CAVERN");
    assert_quota(&config, EnemyKind::DataMite, 31, 1.272);
    assert_quota(&config, EnemyKind::CrystalShard, 15, 2.968);
    assert_eq!(config.enabled_kinds().count(), 2);
}

#[test]
fn drone_swarm_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(30);
    assert_eq!(config.name(), "LEVEL 30 - DRONE SWARM");
    assert_quota(&config, EnemyKind::DataMite, 28, 1.152);
    assert_quota(&config, EnemyKind::ScanDrone, 28, 1.536);
    assert_eq!(config.enabled_kinds().count(), 2);
}

#[test]
fn ufo_armada_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(35);
    assert_eq!(config.name(), "LEVEL 35 - UFO ARMADA");
    assert_quota(&config, EnemyKind::ScanDrone, 16, 2.912);
    assert_quota(&config, EnemyKind::Ufo, 16, 3.64);
    assert_eq!(config.enabled_kinds().count(), 2);
}

#[test]
fn mite_plague_golden_values() {
    let config = LevelGenerator::new().campaign_level_config(40);
    assert_eq!(config.name(), "LEVEL 40 - MITE PLAGUE");
    assert_quota(&config, EnemyKind::DataMite, 173, 0.275_2);
    assert_eq!(config.enabled_kinds().count(), 1);
}

#[test]
fn surprise_levels_cycle_through_templates() {
    let generator = LevelGenerator::new();
    for level in (5..=50).step_by(5) {
        let index = surprise_template_index(level).expect("surprise level");
        assert_eq!(index, (level / 5) as usize % 10);

        let config = generator.campaign_level_config(i64::from(level));
        assert!(
            config.name().ends_with(surprise_title(index)),
            "{} should end with {}",
            config.name(),
            surprise_title(index)
        );

        let mut expected = surprise_roster(index);
        expected.sort();
        let required: Vec<EnemyKind> = config
            .objectives()
            .iter()
            .filter(|(_, kills)| *kills > 0)
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(required, expected, "roster of {}", config.name());
    }
}

#[test]
fn unlock_gating_matches_thresholds() {
    let generator = LevelGenerator::new();
    for kind in EnemyKind::ALL {
        let threshold = unlock_level(kind);
        for level in 1..=7_u32 {
            if level % 5 == 0 {
                continue;
            }
            let config = generator.campaign_level_config(i64::from(level));
            let unlocked = config.quota(kind).is_some();
            assert_eq!(
                unlocked,
                level >= threshold,
                "{kind} at level {level} (threshold {threshold})"
            );
            if !unlocked {
                assert_eq!(config.objectives().required(kind), 0);
                assert!(!config.spawn_rates().is_enabled(kind));
            }
        }
    }
}

#[test]
fn rogue_layers_follow_theme_scaling() {
    let generator = LevelGenerator::new();

    let first = generator.rogue_level_config(1);
    assert_eq!(first.level(), LevelId::Rogue { layer: 1 });
    assert_eq!(first.name(), "LAYER 1 - DATA STREAM");
    assert_quota(&first, EnemyKind::DataMite, 30, 1.0);
    assert_quota(&first, EnemyKind::ScanDrone, 4, 5.0);

    let nest = generator.rogue_level_config(2);
    assert_eq!(nest.name(), "LAYER 2 - WORM NEST");
    assert_quota(&nest, EnemyKind::DataMite, 15, 1.739_13);
    assert_quota(&nest, EnemyKind::ChaosWorm, 6, 4.347_826);

    let hive = generator.rogue_level_config(3);
    assert_eq!(hive.name(), "LAYER 3 - DRONE HIVE");
    assert_quota(&hive, EnemyKind::ScanDrone, 15, 1.923_077);
    assert_quota(&hive, EnemyKind::Ufo, 3, 9.230_769);

    let stream = generator.rogue_level_config(7);
    assert_eq!(stream.name(), "LAYER 7 - DATA STREAM");
    assert_quota(&stream, EnemyKind::DataMite, 57, 1.0);
    assert_quota(&stream, EnemyKind::ScanDrone, 7, 5.0);

    let guardian = generator.rogue_level_config(12);
    assert_eq!(guardian.name(), "LAYER 12 - SYSTEM GUARDIAN");
    assert_quota(&guardian, EnemyKind::DataMite, 53, 0.754_717);
    assert_quota(&guardian, EnemyKind::Boss, 2, 16.981_13);
}

#[test]
fn crystal_core_scales_quotas_only() {
    let generator = LevelGenerator::new();

    let core = generator.rogue_level_config(4);
    assert_eq!(core.name(), "LAYER 4 - CRYSTAL CORE");
    assert_quota(&core, EnemyKind::DataMite, 29, 1.5);
    assert_quota(&core, EnemyKind::CrystalShard, 11, 4.0);
    assert_eq!(core.enabled_kinds().count(), 2);

    let deeper = generator.rogue_level_config(10);
    assert_eq!(deeper.name(), "LAYER 10 - CRYSTAL CORE");
    assert_quota(&deeper, EnemyKind::DataMite, 47, 1.5);
    assert_quota(&deeper, EnemyKind::CrystalShard, 18, 4.0);
}

#[test]
fn void_rift_scales_intervals_only() {
    let generator = LevelGenerator::new();

    let rift = generator.rogue_level_config(5);
    assert_eq!(rift.name(), "LAYER 5 - VOID RIFT");
    assert_quota(&rift, EnemyKind::VoidSphere, 8, 2.5);
    assert_quota(&rift, EnemyKind::Fizzer, 6, 3.125);
    assert_eq!(rift.enabled_kinds().count(), 2);

    let deeper = generator.rogue_level_config(11);
    assert_eq!(deeper.name(), "LAYER 11 - VOID RIFT");
    assert_quota(&deeper, EnemyKind::VoidSphere, 8, 1.6);
    assert_quota(&deeper, EnemyKind::Fizzer, 6, 2.0);
}

#[test]
fn rogue_selector_yields_first_layer() {
    let generator = LevelGenerator::new();
    assert_eq!(
        generator.level_config(LevelSelector::Rogue),
        generator.rogue_level_config(1)
    );
    assert_eq!(generator.rogue_level_config(0), generator.rogue_level_config(1));
}

#[test]
fn test_arena_enables_everything_with_unbounded_quotas() {
    let config = LevelGenerator::new().level_config(LevelSelector::Test);
    assert_eq!(config.level(), LevelId::Test);
    assert_eq!(config.name(), "TEST MODE");
    for kind in EnemyKind::ALL {
        let quota = config.quota(kind).expect("test arena enables every kind");
        assert_eq!(quota.kills(), 999_999);
        assert!(quota.spawn_interval() <= 20.0);
    }
    assert_quota(&config, EnemyKind::DataMite, 999_999, 0.5);
}

#[test]
fn level_table_lists_every_campaign_level() {
    let table = LevelGenerator::new().level_table();
    assert_eq!(table.len(), TOTAL_LEVELS as usize);
    for (index, config) in table.iter().enumerate() {
        assert_eq!(config.level(), LevelId::Campaign(index as u32 + 1));
    }
}
