//! Abilities, their catalog, and secondary effects.
//!
//! Catalogs and registries are plain values: construct them once at startup
//! (from [`AbilityCatalog::builtin`] or a data file), wrap them in an `Arc`,
//! and pass them to whoever resolves actions. Nothing here is global.

mod catalog;
mod effect;
mod error;

use core::fmt;

pub use catalog::{AbilityCatalog, AbilityDef};
pub use effect::{Effect, EffectRegistry, EffectSpec};
pub use error::{ActionError, CatalogError};

/// Identifier of an ability in an [`AbilityCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub String);

impl AbilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AbilityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Broad role of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityKind {
    /// Weapon technique; blocked by attack-preventing conditions.
    Attack,
    /// Offensive magic; blocked by casting-preventing conditions.
    Spell,
    /// Self-targeted protection.
    Defense,
    /// Self-targeted restoration.
    Heal,
}

impl AbilityKind {
    /// Returns true for kinds that deal damage to a target.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Attack | Self::Spell)
    }

    /// Returns true for kinds gated by [`crate::status::StatusEngine::can_cast`].
    pub const fn is_magic(self) -> bool {
        !matches!(self, Self::Attack)
    }
}

/// Abilities known by an actor, split by role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySet {
    pub offensive: Vec<AbilityId>,
    pub defensive: Vec<AbilityId>,
    pub heal: Vec<AbilityId>,
}

impl AbilitySet {
    pub fn is_empty(&self) -> bool {
        self.offensive.is_empty() && self.defensive.is_empty() && self.heal.is_empty()
    }

    /// Every known ability, offensive first.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityId> {
        self.offensive
            .iter()
            .chain(self.defensive.iter())
            .chain(self.heal.iter())
    }

    pub fn contains(&self, id: &AbilityId) -> bool {
        self.iter().any(|known| known == id)
    }

    /// Adds an ability to the list matching its kind. Duplicates are ignored.
    pub fn learn(&mut self, def: &AbilityDef) {
        if self.contains(&def.id) {
            return;
        }
        let list = match def.kind {
            AbilityKind::Attack | AbilityKind::Spell => &mut self.offensive,
            AbilityKind::Defense => &mut self.defensive,
            AbilityKind::Heal => &mut self.heal,
        };
        list.push(def.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learn_sorts_by_kind_and_skips_duplicates() {
        let catalog = AbilityCatalog::builtin();
        let mut set = AbilitySet::default();
        set.learn(catalog.get(&"fireball".into()).unwrap());
        set.learn(catalog.get(&"mend".into()).unwrap());
        set.learn(catalog.get(&"fireball".into()).unwrap());

        assert_eq!(set.offensive, vec![AbilityId::from("fireball")]);
        assert_eq!(set.heal, vec![AbilityId::from("mend")]);
        assert!(set.defensive.is_empty());
    }
}
