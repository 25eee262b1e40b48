//! Move selection for the player side of a battle.

use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::Move;

/// Anything that can pick the player's next move.
///
/// Implementations must only return moves the player knows and that are not
/// compromised; the engine rejects anything else without advancing the turn.
/// The engine never asks a player with no enabled move.
pub trait MoveSelector {
    fn choose_move(&mut self, player: &Combatant, enemy_name: &str) -> Move;
}

impl<F> MoveSelector for F
where
    F: FnMut(&Combatant, &str) -> Move,
{
    fn choose_move(&mut self, player: &Combatant, enemy_name: &str) -> Move {
        self(player, enemy_name)
    }
}

/// Plays the player's side by picking uniformly among the enabled moves.
pub struct AutoPilot {
    rng: BattleRng,
}

impl AutoPilot {
    pub fn new(rng: BattleRng) -> Self {
        Self { rng }
    }
}

impl MoveSelector for AutoPilot {
    fn choose_move(&mut self, player: &Combatant, _enemy_name: &str) -> Move {
        let enabled = player.enabled_moves();
        match enabled.len() {
            // Only reachable by calling this directly: the engine refuses a
            // player with no enabled move, and a compromise never takes the
            // last one.
            0 => player.moves[0],
            len => enabled[self.rng.index(len, "autopilot move")],
        }
    }
}
