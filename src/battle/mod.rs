pub mod ai;
pub mod calculators;
pub mod commands;
pub mod move_effects;
pub mod phases;
pub mod resolution;
pub mod runner;
pub mod stat_stages;
pub mod state;
pub mod tags;

#[cfg(test)]
pub(crate) mod tests;
