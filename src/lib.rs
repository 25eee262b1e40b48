//! Dental Quest Battle Engine
//!
//! A turn-based text battle engine: a player character and a dental monster
//! alternate attacks, with damage driven by an effectiveness table, stat
//! modifiers, random variance and random events injected between turns.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod campaign;
pub mod combatant;
pub mod content;
pub mod effect_bag;
pub mod errors;
pub mod opponent;
pub mod player;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Identifier enums shared with the content tables.
pub use schema::{
    Actor, BattleOutcome, Effectiveness, Move, RandomEvent, Species, TraitRating,
};

// --- From this crate's modules (`src/`) ---

// Battle loop, step API and move selection.
pub use battle::ai::{AutoPilot, MoveSelector};
pub use battle::engine::{run_battle, Battle, BattleReport, StepResult};
pub use battle::state::{BattleContext, BattleEvent, BattleRng, EventEffect, GameState};

// Combatants and their construction.
pub use combatant::{Combatant, HealOutcome};
pub use opponent::{spawn_boss, spawn_opponent, OpponentSpec};
pub use player::{create_player, PlayerTraits};

pub use campaign::{default_chapters, run_campaign, CampaignReport, Chapter};
pub use content::ContentTables;

// Crate-specific error and result types.
pub use errors::{BattleEngineError, BattleResult, MoveRejection};
