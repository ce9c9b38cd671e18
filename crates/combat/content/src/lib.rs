//! Data-driven combat content and loaders.
//!
//! This crate reads balance tables and ability catalogs from data files:
//! - Balance configuration (data-driven via TOML)
//! - Ability catalogs (data-driven via RON)
//!
//! All loaders deserialize combat-core types directly with serde and return
//! values that are immutable after loading.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConfigLoader, ContentFactory, LoadResult};
