//! Complete decision trees for common combat archetypes.
//!
//! Every function builds a fresh tree, so each registered actor owns its own
//! node progress. Trees are composed from the nodes in [`super::nodes`]:
//!
//! ```text
//! standard()
//!   └─ Selector
//!       ├─ Sequence [IsCasting, ContinueCast]
//!       ├─ Sequence [HasTarget, ExecuteDecision]
//!       └─ Guard
//! ```

use behavior_tree::builder::{inverter, parallel, random_choice, selector, sequence, wait};
use behavior_tree::{Behavior, DecisionTree};
use combat_core::Combatant;

use super::ThreatLevel;
use super::context::AiContext;
use super::nodes::*;

/// Boxed node over the combat context.
pub type Node<A> = Box<dyn Behavior<AiContext<A>>>;

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 5] = ["standard", "berserker", "caster", "skirmisher", "sentinel"];

/// Builds a preset by name.
pub fn by_name<A: Combatant + 'static>(name: &str) -> Option<DecisionTree<AiContext<A>>> {
    let tree = match name {
        "standard" => standard(),
        "berserker" => berserker(),
        "caster" => caster(),
        "skirmisher" => skirmisher(),
        "sentinel" => sentinel(),
        _ => return None,
    };
    Some(tree)
}

fn resume_cast<A: Combatant + 'static>() -> Node<A> {
    sequence(vec![Box::new(IsCasting), Box::new(ContinueCast)])
}

/// Decision-layer driven fighter; guards when it has nothing to hit.
pub fn standard<A: Combatant + 'static>() -> DecisionTree<AiContext<A>> {
    DecisionTree::new(
        "standard",
        selector(vec![
            resume_cast(),
            sequence(vec![Box::new(HasTarget), Box::new(ExecuteDecision)]),
            Box::new(Guard),
        ]),
    )
}

/// Never defends: strongest spell if possible, otherwise the weapon.
pub fn berserker<A: Combatant + 'static>() -> DecisionTree<AiContext<A>> {
    DecisionTree::new(
        "berserker",
        selector(vec![
            resume_cast(),
            sequence(vec![
                Box::new(HasTarget),
                selector(vec![Box::new(CastStrongestSpell), Box::new(BasicAttack)]),
            ]),
        ]),
    )
}

/// Spellcaster that heals early and saves a little mana for it.
///
/// # Behavior
///
/// 1. Finish any wind-up
/// 2. Heal below 35% health
/// 3. Cast while mana is above 20%
/// 4. Fall back to the decision layer
pub fn caster<A: Combatant + 'static>() -> DecisionTree<AiContext<A>> {
    DecisionTree::new(
        "caster",
        selector(vec![
            resume_cast(),
            sequence(vec![
                Box::new(HealthBelow { threshold: 0.35 }),
                Box::new(HealSelf),
            ]),
            sequence(vec![
                Box::new(HasTarget),
                Box::new(ManaAbove { threshold: 0.2 }),
                Box::new(CastStrongestSpell),
            ]),
            sequence(vec![Box::new(HasTarget), Box::new(ExecuteDecision)]),
            Box::new(Guard),
        ]),
    )
}

/// Unpredictable fighter mixing attacks with guarded pauses.
pub fn skirmisher<A: Combatant + 'static>() -> DecisionTree<AiContext<A>> {
    DecisionTree::new(
        "skirmisher",
        selector(vec![
            resume_cast(),
            sequence(vec![
                Box::new(HasTarget),
                random_choice(vec![
                    Box::new(BasicAttack),
                    Box::new(ExecuteDecision),
                    sequence(vec![Box::new(Guard), wait(1.0)]),
                ]),
            ]),
            Box::new(Guard),
        ]),
    )
}

/// Cautious defender.
///
/// Engages only while at least two of {has target, healthy, mana above 30%}
/// hold; otherwise heals under pressure or guards.
pub fn sentinel<A: Combatant + 'static>() -> DecisionTree<AiContext<A>> {
    DecisionTree::new(
        "sentinel",
        selector(vec![
            resume_cast(),
            sequence(vec![
                Box::new(HasTarget),
                parallel(
                    vec![
                        Box::new(HasTarget),
                        inverter(Box::new(HealthBelow { threshold: 0.5 })),
                        Box::new(ManaAbove { threshold: 0.3 }),
                    ],
                    2,
                ),
                Box::new(ExecuteDecision),
            ]),
            sequence(vec![
                Box::new(ThreatAtLeast {
                    level: ThreatLevel::High,
                }),
                Box::new(HealSelf),
            ]),
            Box::new(Guard),
        ]),
    )
}
