/// Passive reaction to damage dealt or received.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Passive {
    /// Heals the owner for a fraction of the damage it deals.
    Lifesteal { fraction: f64 },
    /// Reflects a fraction of the damage the owner receives back to the attacker.
    Thorns { fraction: f64 },
}
