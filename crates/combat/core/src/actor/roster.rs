//! Caller-owned collection of actors keyed by id.

use std::collections::BTreeMap;

use super::{Actor, ActorId, Combatant, Team};

/// Actors participating in an encounter.
///
/// Iteration order is by [`ActorId`], which keeps every per-tick loop over
/// the roster deterministic.
#[derive(Clone, Debug)]
pub struct Roster<A = Actor> {
    actors: BTreeMap<ActorId, A>,
}

impl<A> Default for Roster<A> {
    fn default() -> Self {
        Self {
            actors: BTreeMap::new(),
        }
    }
}

impl<A: Combatant> Roster<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an actor, returning any actor previously stored under its id.
    pub fn insert(&mut self, actor: A) -> Option<A> {
        self.actors.insert(actor.id(), actor)
    }

    pub fn get(&self, id: ActorId) -> Option<&A> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut A> {
        self.actors.get_mut(&id)
    }

    /// Removes an actor from the roster.
    pub fn remove(&mut self, id: ActorId) -> Option<A> {
        self.actors.remove(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.actors.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.actors.values_mut()
    }

    /// Living actors of a team.
    pub fn living(&self, team: Team) -> impl Iterator<Item = &A> {
        self.actors
            .values()
            .filter(move |actor| actor.team() == team && actor.is_alive())
    }

    /// Returns true if at least one actor of the team is alive.
    pub fn team_alive(&self, team: Team) -> bool {
        self.living(team).next().is_some()
    }

    /// The living hostile actor with the lowest health fraction.
    pub fn weakest_enemy_of(&self, id: ActorId) -> Option<ActorId> {
        let team = self.get(id)?.team();
        self.actors
            .values()
            .filter(|actor| actor.is_alive() && team.is_hostile_to(actor.team()))
            .min_by(|a, b| a.health_fraction().total_cmp(&b.health_fraction()))
            .map(Combatant::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weakest_enemy_prefers_low_health() {
        let mut roster = Roster::new();
        roster.insert(Actor::builder(ActorId(0), "Hero").team(Team::Player).build());
        let mut hurt = Actor::builder(ActorId(1), "Hurt Orc").build();
        hurt.take_damage(60.0);
        roster.insert(hurt);
        roster.insert(Actor::builder(ActorId(2), "Fresh Orc").build());

        assert_eq!(roster.weakest_enemy_of(ActorId(0)), Some(ActorId(1)));
        assert_eq!(roster.weakest_enemy_of(ActorId(2)), Some(ActorId(0)));
        assert_eq!(roster.weakest_enemy_of(ActorId(9)), None);
    }

    #[test]
    fn team_alive_ignores_the_dead() {
        let mut roster = Roster::new();
        let mut dead = Actor::builder(ActorId(1), "Fallen").build();
        dead.take_damage(1_000.0);
        roster.insert(dead);

        assert!(!roster.team_alive(Team::Enemy));
        assert_eq!(roster.len(), 1);
    }
}
