//! The shared shape of everything that fights: the player character, mundane
//! opponents and bosses.

use crate::battle::state::BattleRng;
use crate::errors::{BattleEngineError, BattleResult, MoveRejection};
use crate::player::PlayerTraits;
use crate::{Effectiveness, Move, RandomEvent, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of a heal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealOutcome {
    /// Health went up by this much (possibly less than asked, at the cap).
    Healed(i32),
    /// Already at max health; nothing changed.
    Capped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub traits: PlayerTraits,
    /// How hard each opponent attack hits this player. Fixed at creation.
    pub affected_by: BTreeMap<Move, Effectiveness>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossExtensions {
    pub start_events: Vec<RandomEvent>,
    pub later_events: Vec<RandomEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpponentKind {
    Mundane,
    Boss(BossExtensions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub species: Species,
    /// Player moves that are super effective against this opponent.
    pub weaknesses: Vec<Move>,
    /// Player moves this opponent shrugs off.
    pub strengths: Vec<Move>,
    pub kind: OpponentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Player(PlayerProfile),
    Opponent(OpponentProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    /// May dip below zero after a hit; anything <= 0 is defeated.
    pub health: i32,
    pub max_health: i32,
    pub moves: Vec<Move>,
    /// Moves temporarily unusable; always a subset of `moves`.
    pub disabled_moves: Vec<Move>,
    pub extra_damage: i32,
    /// Divisor applied to this combatant's next attack only.
    pub damage_adjust: i32,
    pub defence: i32,
    pub level: u8,
    pub role: Role,
}

impl Combatant {
    /// Creates a combatant with neutral modifiers and full health.
    pub fn new(
        name: impl Into<String>,
        max_health: i32,
        moves: Vec<Move>,
        level: u8,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            moves,
            disabled_moves: Vec::new(),
            extra_damage: 0,
            damage_adjust: 1,
            defence: 0,
            level,
            role,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player(_))
    }

    pub fn is_boss(&self) -> bool {
        matches!(
            self.role,
            Role::Opponent(OpponentProfile {
                kind: OpponentKind::Boss(_),
                ..
            })
        )
    }

    pub fn species(&self) -> Option<Species> {
        match &self.role {
            Role::Opponent(profile) => Some(profile.species),
            Role::Player(_) => None,
        }
    }

    pub fn boss_extensions(&self) -> Option<&BossExtensions> {
        match &self.role {
            Role::Opponent(OpponentProfile {
                kind: OpponentKind::Boss(extensions),
                ..
            }) => Some(extensions),
            _ => None,
        }
    }

    // === Health ===

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    /// Heals up to `max_health`.
    pub fn heal(&mut self, amount: i32) -> HealOutcome {
        if self.health >= self.max_health {
            return HealOutcome::Capped;
        }
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        HealOutcome::Healed(healed)
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    pub fn increase_max_health(&mut self, amount: i32) {
        self.max_health += amount;
    }

    // === Moves ===

    /// Adds a move unless it is already known. Returns whether it was added.
    pub fn add_move(&mut self, move_: Move) -> bool {
        if self.moves.contains(&move_) {
            return false;
        }
        self.moves.push(move_);
        true
    }

    pub fn knows_move(&self, move_: Move) -> bool {
        self.moves.contains(&move_)
    }

    /// Moves that can be selected right now, in menu order.
    pub fn enabled_moves(&self) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|m| !self.disabled_moves.contains(m))
            .collect()
    }

    /// Checks that `move_` may be used as this combatant's action.
    pub fn check_move_usable(&self, move_: Move) -> BattleResult<()> {
        if !self.knows_move(move_) {
            return Err(BattleEngineError::InvalidMoveSelection {
                selected: move_,
                reason: MoveRejection::NotKnown,
            });
        }
        if self.disabled_moves.contains(&move_) {
            return Err(BattleEngineError::InvalidMoveSelection {
                selected: move_,
                reason: MoveRejection::Compromised,
            });
        }
        Ok(())
    }

    /// Permanently removes a move. Refused if it is the last one.
    pub fn remove_move(&mut self, move_: Move) -> BattleResult<()> {
        if !self.knows_move(move_) {
            return Err(BattleEngineError::InvalidMoveSelection {
                selected: move_,
                reason: MoveRejection::NotKnown,
            });
        }
        if self.moves.len() <= 1 {
            return Err(BattleEngineError::EmptyMoveset {
                name: self.name.clone(),
            });
        }
        self.moves.retain(|m| *m != move_);
        self.disabled_moves.retain(|m| *m != move_);
        // Never leave the combatant with only compromised moves.
        if self.enabled_moves().is_empty() {
            self.disabled_moves.clear();
        }
        Ok(())
    }

    /// Permanently removes a uniformly chosen move. Refused if only one is left.
    pub fn remove_random_move(&mut self, rng: &mut BattleRng) -> BattleResult<Move> {
        if self.moves.len() <= 1 {
            return Err(BattleEngineError::EmptyMoveset {
                name: self.name.clone(),
            });
        }
        let index = rng.index(self.moves.len(), "move to remove");
        let move_ = self.moves[index];
        self.remove_move(move_)?;
        Ok(move_)
    }

    /// Disables one random enabled move until the next completed action.
    ///
    /// Returns `None` when that would leave nothing usable.
    pub fn compromise_random_move(&mut self, rng: &mut BattleRng) -> Option<Move> {
        let enabled = self.enabled_moves();
        if enabled.len() <= 1 {
            return None;
        }
        let move_ = enabled[rng.index(enabled.len(), "move to compromise")];
        self.disabled_moves.push(move_);
        Some(move_)
    }

    /// Re-enables every compromised move, returning the ones that were restored.
    pub fn restore_compromised_moves(&mut self) -> Vec<Move> {
        std::mem::take(&mut self.disabled_moves)
    }

    /// Uniform choice among the enabled moves.
    pub fn choose_random_move(&self, rng: &mut BattleRng) -> Option<Move> {
        let enabled = self.enabled_moves();
        if enabled.is_empty() {
            return None;
        }
        Some(enabled[rng.index(enabled.len(), "opponent move choice")])
    }

    // === Modifiers ===

    pub fn increase_extra_damage(&mut self, amount: i32) {
        self.extra_damage += amount;
    }

    /// Lowers `extra_damage`, never below zero. When the decrease does not fit,
    /// the next attack is weakened instead and `false` is returned.
    pub fn decrease_extra_damage(&mut self, amount: i32) -> bool {
        if self.extra_damage - amount < 0 {
            self.adjust_damage(1);
            false
        } else {
            self.extra_damage -= amount;
            true
        }
    }

    pub fn adjust_damage(&mut self, amount: i32) {
        self.damage_adjust += amount;
    }

    pub fn reset_damage_adjust(&mut self) {
        self.damage_adjust = 1;
    }

    pub fn increase_defence(&mut self, amount: i32) {
        self.defence += amount;
    }

    // === Effectiveness ===

    /// How hard `move_` hits this combatant.
    pub fn incoming_effectiveness(&self, move_: Move) -> BattleResult<Effectiveness> {
        match &self.role {
            Role::Player(profile) => profile
                .affected_by
                .get(&move_)
                .copied()
                .ok_or(BattleEngineError::UnknownMove(move_)),
            Role::Opponent(profile) => {
                if profile.weaknesses.contains(&move_) {
                    Ok(Effectiveness::High)
                } else if profile.strengths.contains(&move_) {
                    Ok(Effectiveness::Low)
                } else {
                    Ok(Effectiveness::Normal)
                }
            }
        }
    }
}
