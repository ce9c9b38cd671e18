use behavior_tree::Status;
use combat_content::ConfigLoader;
use combat_core::{
    AbilityId, Actor, ActorId, Combatant, OrchestratorConfig, Roster, StatKind, Team,
};
use combat_runtime::{
    AiOrchestrator, CombatRules, DifficultyLevel, DifficultyScaler, RegistrationOptions,
    RuntimeError, presets,
};

const HERO: ActorId = ActorId(1);
const MAGE: ActorId = ActorId(2);
const RECRUIT: ActorId = ActorId(3);

fn roster() -> Roster<Actor> {
    let mut roster = Roster::new();
    roster.insert(
        Actor::builder(HERO, "Hero")
            .team(Team::Player)
            .health(500.0)
            .stat(StatKind::Attack, 12.0)
            .build(),
    );
    roster.insert(
        Actor::builder(MAGE, "Mage")
            .health(80.0)
            .mana(60.0)
            .stat(StatKind::Magic, 12.0)
            .offensive("fireball")
            .build(),
    );
    roster.insert(Actor::builder(RECRUIT, "Recruit").health(50.0).build());
    roster
}

fn orchestrator() -> AiOrchestrator<Actor> {
    AiOrchestrator::new(
        CombatRules::builtin(),
        DifficultyScaler::default(),
        OrchestratorConfig::default(),
        2024,
    )
}

#[test]
fn actor_without_abilities_is_armed_on_registration() {
    let mut roster = roster();
    let mut ai = orchestrator();
    assert!(roster.get(RECRUIT).unwrap().abilities().is_empty());

    ai.register(&mut roster, RECRUIT, presets::standard(), RegistrationOptions::default())
        .unwrap();

    let recruit = roster.get(RECRUIT).unwrap();
    assert!(recruit.abilities().contains(&AbilityId::from("strike")));
}

#[test]
fn unaffordable_offense_still_gets_starter() {
    let mut roster = roster();
    roster.insert(
        Actor::builder(ActorId(4), "Apprentice")
            .health(40.0)
            .mana(10.0)
            .offensive("fireball")
            .build(),
    );
    let mut ai = orchestrator();

    ai.register(&mut roster, ActorId(4), presets::caster(), RegistrationOptions::default())
        .unwrap();
    ai.register(&mut roster, MAGE, presets::caster(), RegistrationOptions::default())
        .unwrap();

    let apprentice = roster.get(ActorId(4)).unwrap();
    assert!(apprentice.abilities().contains(&AbilityId::from("strike")));
    assert!(apprentice.abilities().contains(&AbilityId::from("fireball")));
    assert!(!roster.get(MAGE).unwrap().abilities().contains(&AbilityId::from("strike")));
}

#[test]
fn registration_applies_current_difficulty() {
    let mut roster = roster();
    let mut ai = orchestrator();
    ai.scaler_mut().force_level(DifficultyLevel::VeryHard);

    ai.register(&mut roster, RECRUIT, presets::standard(), RegistrationOptions::default())
        .unwrap();
    ai.register(&mut roster, HERO, presets::standard(), RegistrationOptions::default())
        .unwrap();

    assert_eq!(roster.get(RECRUIT).unwrap().health().maximum(), 75.0);
    assert_eq!(roster.get(HERO).unwrap().health().maximum(), 500.0);
}

#[test]
fn wind_up_resolves_on_a_later_tick() {
    let mut roster = roster();
    let mut ai = orchestrator();
    ai.register(&mut roster, MAGE, presets::caster(), RegistrationOptions::default())
        .unwrap();

    let report = ai.tick(&mut roster, 0.0);
    assert_eq!(report.evaluated, vec![(MAGE, Status::Running)]);
    assert_eq!(report.outcomes[0].message, "Mage begins casting Fireball");
    assert!(ai.registration(MAGE).unwrap().pending().is_some());

    let report = ai.tick(&mut roster, 0.5);
    assert_eq!(report.evaluated, vec![(MAGE, Status::Running)]);
    assert_eq!(roster.get(HERO).unwrap().health().current(), 500.0);

    let report = ai.tick(&mut roster, 1.0);
    assert_eq!(report.evaluated.len(), 1);
    assert!(ai.registration(MAGE).unwrap().pending().is_none());
    assert_eq!(roster.get(MAGE).unwrap().mana().current(), 45.0);
}

#[test]
fn interrupt_discards_wind_up_without_cost() {
    let mut roster = roster();
    let mut ai = orchestrator();
    ai.register(&mut roster, MAGE, presets::caster(), RegistrationOptions::default())
        .unwrap();
    ai.tick(&mut roster, 0.0);

    let cancelled = ai.interrupt(MAGE).unwrap().unwrap();
    assert_eq!(cancelled.ability, AbilityId::from("fireball"));
    assert_eq!(cancelled.ready_at, 1.0);
    assert!(ai.registration(MAGE).unwrap().pending().is_none());

    assert_eq!(roster.get(MAGE).unwrap().mana().current(), 60.0);
    assert_eq!(roster.get(HERO).unwrap().health().current(), 500.0);
    assert_eq!(ai.interrupt(MAGE), Ok(None));
}

#[test]
fn force_action_acts_immediately_and_keeps_target() {
    let mut roster = roster();
    let mut ai = orchestrator();
    ai.register(&mut roster, RECRUIT, presets::standard(), RegistrationOptions::default())
        .unwrap();
    ai.register(&mut roster, MAGE, presets::caster(), RegistrationOptions::default())
        .unwrap();

    let outcome = ai.force_action(&mut roster, RECRUIT, HERO).unwrap();
    assert_eq!(outcome.actor, RECRUIT);
    assert!(roster.contains(RECRUIT));
    assert!(roster.contains(HERO));
    assert_eq!(ai.registration(RECRUIT).unwrap().target(), Some(HERO));
    assert_eq!(ai.registration(RECRUIT).unwrap().last_action(), None);

    assert_eq!(
        ai.force_action(&mut roster, HERO, RECRUIT),
        Err(RuntimeError::NotRegistered(HERO))
    );
    assert_eq!(
        ai.force_action(&mut roster, RECRUIT, ActorId(99)),
        Err(RuntimeError::UnknownActor(ActorId(99)))
    );

    roster.get_mut(MAGE).unwrap().take_damage(1_000.0);
    assert_eq!(
        ai.force_action(&mut roster, MAGE, HERO),
        Err(RuntimeError::Defeated(MAGE))
    );
}

#[test]
fn dead_target_is_replaced() {
    let mut roster = roster();
    roster.insert(
        Actor::builder(ActorId(4), "Squire")
            .team(Team::Player)
            .health(40.0)
            .build(),
    );
    let mut ai = orchestrator();
    ai.register(
        &mut roster,
        RECRUIT,
        presets::berserker(),
        RegistrationOptions::default().with_target(ActorId(4)),
    )
    .unwrap();

    roster.get_mut(ActorId(4)).unwrap().take_damage(1_000.0);
    ai.tick(&mut roster, 0.0);

    assert_eq!(ai.registration(RECRUIT).unwrap().target(), Some(HERO));
}

#[test]
fn unregistered_actor_is_no_longer_ticked() {
    let mut roster = roster();
    let mut ai = orchestrator();
    ai.register(&mut roster, RECRUIT, presets::berserker(), RegistrationOptions::default())
        .unwrap();
    assert!(ai.unregister(RECRUIT).is_some());
    assert!(ai.unregister(RECRUIT).is_none());

    let report = ai.tick(&mut roster, 0.0);
    assert!(report.is_idle());
    assert!(ai.is_empty());
}

#[test]
fn same_seed_replays_same_fight() {
    let run = || {
        let mut roster = roster();
        let mut ai = orchestrator();
        for id in [HERO, MAGE, RECRUIT] {
            ai.register(&mut roster, id, presets::skirmisher(), RegistrationOptions::default())
                .unwrap();
        }
        let mut messages = Vec::new();
        for step in 0..40 {
            let report = ai.tick(&mut roster, f64::from(step) * 0.25);
            messages.extend(report.outcomes.into_iter().map(|outcome| outcome.message));
        }
        messages
    };

    assert_eq!(run(), run());
}

#[test]
fn balance_file_sets_default_cooldown() {
    let balance = ConfigLoader::parse("[orchestrator]\ncooldown = 0.25\n").unwrap();
    let mut roster = roster();
    let mut ai = AiOrchestrator::from_balance(CombatRules::builtin(), &balance, 1);
    ai.register(&mut roster, RECRUIT, presets::standard(), RegistrationOptions::default())
        .unwrap();

    assert_eq!(ai.registration(RECRUIT).unwrap().cooldown(), 0.25);
}
