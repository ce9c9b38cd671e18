//! Player party and enemy waves.
use combat_core::combat::DamageCategory;
use combat_core::{Actor, ActorId, Combatant, Roster, StatKind, Team};
use rand::Rng;

pub const HERO: ActorId = ActorId(1);

/// First id handed to enemies.
const FIRST_ENEMY: u32 = 100;

/// Enemy template paired with the preset tree that drives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Archetype {
    Goblin,
    Shaman,
    Brute,
    Rogue,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [Self::Goblin, Self::Shaman, Self::Brute, Self::Rogue];

    pub fn tree(self) -> &'static str {
        match self {
            Self::Goblin => "berserker",
            Self::Shaman => "caster",
            Self::Brute => "sentinel",
            Self::Rogue => "skirmisher",
        }
    }

    fn build(self, id: ActorId) -> Actor {
        let builder = match self {
            Self::Goblin => Actor::builder(id, "Goblin")
                .health(45.0)
                .stat(StatKind::Attack, 9.0)
                .stat(StatKind::Defense, 2.0)
                .weapon(DamageCategory::Physical, 4.0),
            Self::Shaman => Actor::builder(id, "Shaman")
                .health(40.0)
                .mana(60.0)
                .stat(StatKind::Magic, 11.0)
                .stat(StatKind::MagicDefense, 6.0)
                .affinity(DamageCategory::Fire, 0.5)
                .offensive("fireball")
                .offensive("frost_bolt")
                .healing("mend"),
            Self::Brute => Actor::builder(id, "Brute")
                .health(90.0)
                .mana(20.0)
                .stat(StatKind::Attack, 12.0)
                .stat(StatKind::Defense, 8.0)
                .weapon(DamageCategory::Physical, 6.0)
                .offensive("heavy_blow")
                .defensive("war_cry"),
            Self::Rogue => Actor::builder(id, "Rogue")
                .health(50.0)
                .mana(20.0)
                .stat(StatKind::Attack, 8.0)
                .stat(StatKind::Evasion, 8.0)
                .stat(StatKind::CritChance, 0.2)
                .weapon(DamageCategory::Physical, 3.0)
                .offensive("poison_dart"),
        };
        builder.build()
    }
}

/// The player-side champion, rebuilt at full strength for every battle.
pub fn hero() -> Actor {
    Actor::builder(HERO, "Hero")
        .team(Team::Player)
        .health(160.0)
        .mana(50.0)
        .stat(StatKind::Attack, 13.0)
        .stat(StatKind::Magic, 8.0)
        .stat(StatKind::Defense, 6.0)
        .stat(StatKind::MagicDefense, 4.0)
        .weapon(DamageCategory::Physical, 5.0)
        .offensive("heavy_blow")
        .defensive("barrier")
        .healing("mend")
        .build()
}

/// Rolls a wave of one to three enemies.
pub fn enemy_wave(rng: &mut impl Rng) -> Vec<(Actor, Archetype)> {
    let size = rng.gen_range(1..=3);
    (0..size)
        .map(|slot| {
            let archetype = Archetype::ALL[rng.gen_range(0..Archetype::ALL.len())];
            let id = ActorId(FIRST_ENEMY + slot);
            (archetype.build(id), archetype)
        })
        .collect()
}

/// A roster holding the hero and a freshly rolled wave.
pub fn encounter(rng: &mut impl Rng) -> (Roster<Actor>, Vec<(ActorId, Archetype)>) {
    let mut roster = Roster::new();
    roster.insert(hero());

    let mut enemies = Vec::new();
    for (actor, archetype) in enemy_wave(rng) {
        enemies.push((actor.id(), archetype));
        roster.insert(actor);
    }
    (roster, enemies)
}
