//! Status kinds and their static rules table.

use bitflags::bitflags;

/// Types of status conditions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Burning,
    Poisoned,
    Bleeding,

    // ========================================================================
    // Crowd control (restricts actions)
    // ========================================================================
    /// Cannot act; takes extra damage.
    Frozen,
    Stunned,
    Paralyzed,
    Sleeping,
    /// Cannot attack.
    Feared,
    /// Cannot cast.
    Silenced,
    /// Cannot move.
    Rooted,
    /// Cannot attack.
    Disarmed,

    // ========================================================================
    // Stat modifiers
    // ========================================================================
    Slowed,
    Hasted,
    Weakened,
    Strengthened,
    /// Deals and takes more damage.
    Enraged,
    /// Deals and takes much more damage.
    Berserking,

    // ========================================================================
    // Protection
    // ========================================================================
    Regenerating,
    /// Halves incoming damage.
    Shielded,
    /// Takes no damage.
    Invulnerable,

    // ========================================================================
    // Special states
    // ========================================================================
    TimeStopped,
    Banished,
}

bitflags! {
    /// Set of status kinds, one bit per [`StatusKind`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u32 {
        const BURNING      = 1 << 0;
        const POISONED     = 1 << 1;
        const BLEEDING     = 1 << 2;
        const FROZEN       = 1 << 3;
        const STUNNED      = 1 << 4;
        const PARALYZED    = 1 << 5;
        const SLEEPING     = 1 << 6;
        const FEARED       = 1 << 7;
        const SILENCED     = 1 << 8;
        const ROOTED       = 1 << 9;
        const DISARMED     = 1 << 10;
        const SLOWED       = 1 << 11;
        const HASTED       = 1 << 12;
        const WEAKENED     = 1 << 13;
        const STRENGTHENED = 1 << 14;
        const ENRAGED      = 1 << 15;
        const BERSERKING   = 1 << 16;
        const REGENERATING = 1 << 17;
        const SHIELDED     = 1 << 18;
        const INVULNERABLE = 1 << 19;
        const TIME_STOPPED = 1 << 20;
        const BANISHED     = 1 << 21;
    }
}

bitflags! {
    /// Action categories a status can block.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionMask: u8 {
        const ACT    = 1 << 0;
        const MOVE   = 1 << 1;
        const CAST   = 1 << 2;
        const ATTACK = 1 << 3;
    }
}

/// Whether a condition helps or hurts its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    Buff,
    Debuff,
}

/// Static rules for one status kind.
///
/// Multipliers describe the effect at intensity 1.0; see
/// [`StatusProfile::scaled`] for other intensities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusProfile {
    pub polarity: Polarity,
    pub blocks: ActionMask,
    pub movement: f64,
    pub outgoing: f64,
    pub incoming: f64,
}

impl StatusProfile {
    const fn debuff(blocks: ActionMask) -> Self {
        Self {
            polarity: Polarity::Debuff,
            blocks,
            movement: 1.0,
            outgoing: 1.0,
            incoming: 1.0,
        }
    }

    const fn buff() -> Self {
        Self {
            polarity: Polarity::Buff,
            blocks: ActionMask::empty(),
            movement: 1.0,
            outgoing: 1.0,
            incoming: 1.0,
        }
    }

    const fn movement(mut self, multiplier: f64) -> Self {
        self.movement = multiplier;
        self
    }

    const fn outgoing(mut self, multiplier: f64) -> Self {
        self.outgoing = multiplier;
        self
    }

    const fn incoming(mut self, multiplier: f64) -> Self {
        self.incoming = multiplier;
        self
    }

    /// Interpolates a multiplier by intensity: `1 + (m - 1) * intensity`.
    pub fn scaled(multiplier: f64, intensity: f64) -> f64 {
        1.0 + (multiplier - 1.0) * intensity
    }
}

const NONE: ActionMask = ActionMask::empty();
const ALL: ActionMask = ActionMask::all();

impl StatusKind {
    /// Bit for this kind in a [`StatusFlags`] set.
    pub const fn flag(self) -> StatusFlags {
        StatusFlags::from_bits_retain(1 << self as u32)
    }

    /// Static rules for this kind.
    pub const fn profile(self) -> StatusProfile {
        match self {
            Self::Burning | Self::Poisoned | Self::Bleeding => StatusProfile::debuff(NONE),
            Self::Frozen => StatusProfile::debuff(ALL).incoming(1.2),
            Self::Stunned
            | Self::Paralyzed
            | Self::Sleeping
            | Self::TimeStopped
            | Self::Banished => StatusProfile::debuff(ALL),
            Self::Feared | Self::Disarmed => StatusProfile::debuff(ActionMask::ATTACK),
            Self::Silenced => StatusProfile::debuff(ActionMask::CAST),
            Self::Rooted => StatusProfile::debuff(ActionMask::MOVE),
            Self::Slowed => StatusProfile::debuff(NONE).movement(0.5),
            Self::Weakened => StatusProfile::debuff(NONE).outgoing(0.7),
            Self::Hasted => StatusProfile::buff().movement(1.5),
            Self::Strengthened => StatusProfile::buff().outgoing(1.3),
            Self::Enraged => StatusProfile::buff().outgoing(1.5).incoming(1.2),
            Self::Berserking => StatusProfile::buff().outgoing(2.0).incoming(1.5),
            Self::Regenerating => StatusProfile::buff(),
            Self::Shielded => StatusProfile::buff().incoming(0.5),
            Self::Invulnerable => StatusProfile::buff().incoming(0.0),
        }
    }

    pub const fn polarity(self) -> Polarity {
        self.profile().polarity
    }

    /// Kinds removed when this kind is applied.
    pub const fn conflicts(self) -> &'static [StatusKind] {
        match self {
            Self::Slowed => &[Self::Hasted],
            Self::Hasted => &[Self::Slowed],
            Self::Burning => &[Self::Frozen],
            Self::Frozen => &[Self::Burning],
            Self::Sleeping | Self::Feared => &[Self::Enraged, Self::Berserking],
            Self::Enraged | Self::Berserking => &[Self::Sleeping, Self::Feared],
            _ => &[],
        }
    }
}

impl From<StatusKind> for StatusFlags {
    fn from(kind: StatusKind) -> Self {
        kind.flag()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn flags_match_named_constants() {
        assert_eq!(StatusKind::Burning.flag(), StatusFlags::BURNING);
        assert_eq!(StatusKind::Invulnerable.flag(), StatusFlags::INVULNERABLE);
        assert_eq!(StatusKind::Banished.flag(), StatusFlags::BANISHED);

        let union = StatusKind::iter().fold(StatusFlags::empty(), |acc, k| acc | k.flag());
        assert_eq!(union, StatusFlags::all());
    }

    #[test]
    fn conflicts_are_symmetric() {
        for kind in StatusKind::iter() {
            for other in kind.conflicts() {
                assert!(
                    other.conflicts().contains(&kind),
                    "{kind} conflicts with {other} but not the reverse"
                );
            }
        }
    }

    #[test]
    fn hard_crowd_control_blocks_everything() {
        for kind in [
            StatusKind::Stunned,
            StatusKind::Paralyzed,
            StatusKind::Frozen,
            StatusKind::Sleeping,
            StatusKind::TimeStopped,
            StatusKind::Banished,
        ] {
            assert_eq!(kind.profile().blocks, ActionMask::all(), "{kind}");
        }
        assert_eq!(StatusKind::Feared.profile().blocks, ActionMask::ATTACK);
    }

    #[test]
    fn intensity_interpolates_multiplier() {
        assert_eq!(StatusProfile::scaled(0.5, 1.0), 0.5);
        assert_eq!(StatusProfile::scaled(0.5, 0.5), 0.75);
        assert_eq!(StatusProfile::scaled(2.0, 0.0), 1.0);
    }
}
