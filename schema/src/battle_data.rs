use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard an attack lands on its target.
///
/// For the player's attacks this comes from the opponent's weakness and
/// strength lists; for attacks against the player it comes from the player's
/// own `affected_by` table.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    High,
    Normal,
    Low,
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Effectiveness::High => "super effective",
            Effectiveness::Normal => "normal",
            Effectiveness::Low => "not very effective",
        };
        write!(f, "{}", display_name)
    }
}

/// A self-assessed character trait chosen at character creation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitRating {
    Good,
    Bad,
    Meh,
}

/// Which side of the battle is acting.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    User,
    Computer,
}

impl Actor {
    pub fn other(self) -> Actor {
        match self {
            Actor::User => Actor::Computer,
            Actor::Computer => Actor::User,
        }
    }
}

/// Named side effects that can be injected between turns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RandomEvent {
    Evolve,
    Compromise,
    FindItem,
    Gust,
    // Boss-only
    Fizz,
    PressureRelease,
    DissolveWeapon,
}

impl RandomEvent {
    /// Events that can happen in any battle.
    pub const MUNDANE: [RandomEvent; 4] = [
        RandomEvent::Evolve,
        RandomEvent::Compromise,
        RandomEvent::FindItem,
        RandomEvent::Gust,
    ];
}

impl fmt::Display for RandomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            RandomEvent::Evolve => "Evolve",
            RandomEvent::Compromise => "Compromise",
            RandomEvent::FindItem => "Find Item",
            RandomEvent::Gust => "Gust",
            RandomEvent::Fizz => "Fizz",
            RandomEvent::PressureRelease => "Pressure Release",
            RandomEvent::DissolveWeapon => "Dissolve Weapon",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}
