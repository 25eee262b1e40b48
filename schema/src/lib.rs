// Dental Quest Schema - Shared type definitions
// This crate contains the identifier enums shared between the content files
// and the battle engine, so that RON tables deserialize straight into them.

// Re-export the main types
pub use battle_data::*;
pub use moves::*;
pub use species::*;

pub mod battle_data;
pub mod moves;
pub mod species;
