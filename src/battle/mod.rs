pub mod ai;
pub mod calculators;
pub mod commands;
pub mod engine;
pub mod random_events;
pub mod state;

#[cfg(test)]
pub(crate) mod tests;
