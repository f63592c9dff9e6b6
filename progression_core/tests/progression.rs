use progression_core::attribute::effects::{CRIT_CAP, DODGE_CAP};
use progression_core::prelude::*;
use proptest::prelude::*;

fn facade() -> ProgressionFacade {
    ProgressionFacade::with_builtin_content(ProgressionConstants::default()).unwrap()
}

#[test]
fn strength_allocation_scales_attack() {
    let mut facade = facade();
    facade.select_class("hero", "warrior").unwrap();
    facade.allocate_attribute("hero", Attribute::Strength, 5).unwrap();

    let store = facade.character("hero").unwrap().attributes();
    assert_eq!(store.get(Attribute::Strength), 15);
    assert_eq!(store.available_points(), 0);
    assert_eq!(store.total_invested(), 5);

    let effects = store.effects();
    assert_eq!(effects.attack_bonus, 12.0);
    assert!((effects.weapon_damage_multiplier - 1.10).abs() < 1e-9);
}

#[test]
fn counter_damage_between_unit_types() {
    let matrix = CounterMatrix::standard();
    assert_eq!(matrix.damage(UnitType::Spearman, UnitType::LightCavalry, 100.0), 130.0);
    assert_eq!(matrix.damage(UnitType::LightCavalry, UnitType::Spearman, 100.0), 80.0);
}

#[test]
fn ranger_damage_uses_horse_archer_counters() {
    let mut facade = facade();
    facade.select_class("hero", "archer").unwrap();
    let before = facade.damage_against("hero", UnitType::Spearman, 100.0).unwrap();

    facade.select_specialization("hero", "ranger", 10).unwrap();
    assert_eq!(facade.unit_type("hero").unwrap(), UnitType::HorseArcher);
    assert_eq!(before, 130.0);
    assert_eq!(facade.damage_against("hero", UnitType::HeavyInfantry, 100.0).unwrap(), 130.0);
    assert_eq!(facade.damage_against("hero", UnitType::Pikeman, 100.0).unwrap(), 80.0);
}

#[test]
fn heavy_infantry_specialization_scales_defense() {
    let classes = ClassCatalog::builtin().unwrap();
    let warrior = classes.get("warrior").unwrap();
    let heavy = warrior.specialization("heavy_infantry").unwrap();

    let mut core = warrior.base_stats;
    let mut magic = 0.0;
    heavy.bonuses.apply(&mut core, &mut magic);
    assert_eq!(warrior.base_stats.defense, 10.0);
    assert_eq!(core.defense, 13.0);
}

#[test]
fn heavy_infantry_through_facade() {
    let mut facade = facade();
    let hero = Character::new("hero").with_level(10);
    facade.select_class("hero", "warrior").unwrap();
    let before = facade.calculate_final_stats("hero", &hero).unwrap();

    facade.select_specialization("hero", "heavy_infantry", hero.level).unwrap();
    let after = facade.calculate_final_stats("hero", &hero).unwrap();

    assert_eq!(after.defense, (before.defense * 1.3).floor());
    assert_eq!(after.unit_type, UnitType::HeavyInfantry);
    assert_eq!(before.unit_type, UnitType::Swordsman);
}

#[test]
fn agility_caps_dodge_and_crit() {
    let mut store = AttributeStore::new(90);
    assert!(store.allocate(Attribute::Agility, 90));
    assert_eq!(store.get(Attribute::Agility), 100);

    let effects = store.effects();
    assert_eq!(effects.dodge_chance, DODGE_CAP);
    assert_eq!(effects.crit_chance, CRIT_CAP);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut facade = facade();
    let mut hero = Character::new("hero").with_level(12).with_skill_points(10);
    facade.select_class("hero", "mage").unwrap();
    facade.on_level_up("hero", 2).unwrap();
    facade.allocate_attribute("hero", Attribute::Intelligence, 6).unwrap();
    facade.allocate_attribute("hero", Attribute::Spirit, 2).unwrap();
    facade.learn_skill("hero", &mut hero, "firebolt").unwrap();
    facade.learn_skill("hero", &mut hero, "firebolt").unwrap();
    facade.learn_skill("hero", &mut hero, "arcane_mind").unwrap();
    facade.select_specialization("hero", "battle_mage", hero.level).unwrap();

    let snapshot = facade.snapshot("hero").unwrap();
    let stats = facade.calculate_final_stats("hero", &hero).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut restored = self::facade();
    let decoded: CharacterSnapshot = serde_json::from_str(&json).unwrap();
    restored.restore("hero", decoded).unwrap();

    assert_eq!(restored.snapshot("hero").unwrap(), snapshot);
    assert_eq!(restored.calculate_final_stats("hero", &hero).unwrap(), stats);
    assert_eq!(restored.unit_type("hero").unwrap(), UnitType::BattleMage);

    let progress = restored.character("hero").unwrap();
    assert_eq!(progress.attributes().available_points(), 2);
    assert_eq!(progress.attributes().total_invested(), 8);
    assert_eq!(progress.skills().level("firebolt"), 2);
    assert!(progress.skills().is_unlocked("frost_nova"));
}

#[test]
fn passive_skills_summed_separately_from_core_stats() {
    let mut facade = facade();
    let mut hero = Character::new("hero").with_level(5).with_skill_points(5);
    facade.select_class("hero", "warrior").unwrap();
    let base = facade.calculate_final_stats("hero", &hero).unwrap();

    facade.learn_skill("hero", &mut hero, "toughness").unwrap();
    facade.learn_skill("hero", &mut hero, "toughness").unwrap();
    facade.learn_skill("hero", &mut hero, "iron_skin").unwrap();

    let passives = facade.get_passive_effects("hero").unwrap();
    assert_eq!(passives.value(EffectKind::HpFlat), 30.0);
    assert_eq!(passives.value(EffectKind::DefenseFlat), 3.0);

    let stats = facade.calculate_final_stats("hero", &hero).unwrap();
    assert_eq!(stats.hp, base.hp);
    assert_eq!(stats.passive_effects, passives);
}

#[test]
fn node_views_and_layout_cover_the_tree() {
    let mut facade = facade();
    let hero = Character::new("hero").with_level(1).with_skill_points(1);
    facade.select_class("hero", "archer").unwrap();

    let views = facade.get_all_nodes("hero", &hero).unwrap();
    let layout = facade.get_layout_info("hero").unwrap();
    assert_eq!(views.len(), layout.nodes.len());

    let quick_shot = views.iter().find(|v| v.id == "quick_shot").unwrap();
    assert!(quick_shot.is_unlocked);
    assert!(quick_shot.can_learn);
    let snipe = views.iter().find(|v| v.id == "snipe").unwrap();
    assert!(!snipe.is_unlocked);
    assert!(!snipe.can_learn);

    let depth = |id: &str| layout.nodes.iter().find(|n| n.id == id).unwrap().depth;
    assert_eq!(depth("quick_shot"), 0);
    assert_eq!(depth("piercing_arrow"), 1);
    assert_eq!(depth("snipe"), 2);
}

#[test]
fn attribute_descriptions_follow_allocation() {
    let mut facade = facade();
    facade.select_class("hero", "archer").unwrap();
    facade.allocate_attribute("hero", Attribute::Agility, 3).unwrap();

    let descriptions = facade.get_all_attribute_descriptions("hero").unwrap();
    assert_eq!(descriptions.len(), Attribute::all().len());
    let agility = descriptions.iter().find(|d| d.attribute == Attribute::Agility).unwrap();
    assert_eq!(agility.value, 13);
}

proptest! {
    #[test]
    fn final_stats_never_drop_with_level(
        class_idx in 0usize..3,
        level in 1u32..99,
        points in 0u32..5,
        specialize in any::<bool>(),
    ) {
        let mut facade = facade();
        let class_id = ["warrior", "archer", "mage"][class_idx];
        facade.select_class("hero", class_id).unwrap();
        facade.allocate_attribute("hero", Attribute::all()[class_idx], points.max(1)).unwrap();
        if specialize {
            let spec = facade.get_available_specializations("hero", 100).unwrap()[0].id.clone();
            facade.select_specialization("hero", &spec, 100).unwrap();
        }

        let lower = facade.calculate_final_stats("hero", &Character::new("hero").with_level(level)).unwrap();
        let higher = facade.calculate_final_stats("hero", &Character::new("hero").with_level(level + 1)).unwrap();
        prop_assert!(higher.hp >= lower.hp);
        prop_assert!(higher.mana >= lower.mana);
        prop_assert!(higher.attack >= lower.attack);
        prop_assert!(higher.defense >= lower.defense);
        prop_assert!(higher.speed >= lower.speed);
    }
}
