//! Damage Resolution Engine.
//!
//! # Core Functions
//!
//! - `calculate`: per-category damage (variance, crit, defense curve, affinity)
//! - `resolve`: `calculate` plus status multipliers, guard, one atomic
//!   health reduction and passive reactions
//! - `mitigate`: the hybrid flat/percentage defense curve
//! - `hit_chance` / `roll_hit`: accuracy vs evasion for weapon attacks

pub mod damage;
pub mod hit;
pub mod passive;
pub mod resolve;

pub use damage::{DamageCategory, DamageMap, mitigate};
pub use hit::{hit_chance, roll_hit};
pub use passive::Passive;
pub use resolve::{CategoryDamage, DamageReport, DamageRequest, calculate, resolve};
