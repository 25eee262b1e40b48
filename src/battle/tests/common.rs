use crate::battle::state::{BattleContext, BattleRng};
use crate::combatant::{Combatant, OpponentKind, OpponentProfile, PlayerProfile, Role};
use crate::content::ContentTables;
use crate::errors::BattleResult;
use crate::player::PlayerTraits;
use crate::{Actor, Effectiveness, Move, Species};
use schema::TraitRating;
use std::collections::BTreeMap;

/// The embedded content tables, panicking with the parse error if they are broken.
pub fn test_content() -> ContentTables {
    match ContentTables::embedded() {
        Ok(content) => content,
        Err(err) => panic!("Failed to load embedded content: {}", err),
    }
}

/// A builder for test players with predictable defaults: the starting arsenal,
/// 35 max health and every opponent attack landing normally.
///
/// # Example
/// ```ignore
/// let player = TestPlayerBuilder::new()
///     .with_health(1)
///     .with_affected_by(Move::Plaque, Effectiveness::High)
///     .build();
/// ```
pub struct TestPlayerBuilder {
    max_health: i32,
    health: Option<i32>,
    moves: Option<Vec<Move>>,
    affected_by: BTreeMap<Move, Effectiveness>,
}

impl TestPlayerBuilder {
    pub fn new() -> Self {
        let content = test_content();
        let affected_by = content
            .enemy_move_catalogue()
            .map(|attack| (attack, Effectiveness::Normal))
            .collect();
        Self {
            max_health: content.rules.player_start_health,
            health: None,
            moves: None,
            affected_by,
        }
    }

    /// Sets the current health. If not set, health will be max.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Overrides how hard one opponent attack hits this player.
    pub fn with_affected_by(mut self, attack: Move, effectiveness: Effectiveness) -> Self {
        self.affected_by.insert(attack, effectiveness);
        self
    }

    pub fn build(self) -> Combatant {
        let moves = self
            .moves
            .unwrap_or_else(|| test_content().starting_player_moves());
        let mut player = Combatant::new(
            "Tester".to_string(),
            self.max_health,
            moves,
            1,
            Role::Player(PlayerProfile {
                traits: PlayerTraits::new(TraitRating::Meh, TraitRating::Meh, TraitRating::Meh),
                affected_by: self.affected_by,
            }),
        );
        if let Some(health) = self.health {
            player.health = health;
        }
        player
    }
}

/// A builder for mundane test opponents, with stats taken straight from the
/// content tables and no health variance.
pub struct TestOpponentBuilder {
    species: Species,
    health: Option<i32>,
    moves: Option<Vec<Move>>,
    defence: i32,
}

impl TestOpponentBuilder {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            health: None,
            moves: None,
            defence: 0,
        }
    }

    /// Sets both current and max health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_defence(mut self, defence: i32) -> Self {
        self.defence = defence;
        self
    }

    pub fn build(self) -> Combatant {
        let content = test_content();
        let data = match content.opponent_data(self.species) {
            Ok(data) => data.clone(),
            Err(err) => panic!("No opponent data for {:?}: {}", self.species, err),
        };
        let moves = self
            .moves
            .unwrap_or_else(|| content.moves_for_species(self.species));

        let mut opponent = Combatant::new(
            self.species.to_string(),
            self.health.unwrap_or(data.base_health),
            moves,
            data.tier,
            Role::Opponent(OpponentProfile {
                species: self.species,
                weaknesses: content.super_effective_against(self.species),
                strengths: content.not_very_effective_against(self.species),
                kind: OpponentKind::Mundane,
            }),
        );
        opponent.defence = self.defence;
        opponent
    }
}

/// Creates a battle context with the given first actor.
pub fn create_test_battle(player: Combatant, opponent: Combatant, first: Actor) -> BattleContext {
    BattleContext::new(player, opponent, first)
}

/// Creates a `BattleRng` with a long list of middling values (50).
/// Useful for tests where the specific outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
