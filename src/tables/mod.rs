//! Mortality assumptions: per-gender life tables and their CSV loader

mod mortality;
pub mod loader;

pub use mortality::{MortalityRow, MortalityTable, MortalityTableStore};
