use crate::battle::state::BattleRng;
use crate::combatant::{Combatant, PlayerProfile, Role};
use crate::content::ContentTables;
use crate::effect_bag::EffectBag;
use crate::errors::{BattleEngineError, BattleResult};
use crate::{Effectiveness, Move};
use schema::TraitRating;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three self-assessed traits from the guild application form.
///
/// In catalogue order they shape how the player is affected by the first three
/// opponent attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTraits {
    pub self_discipline: TraitRating,
    pub agility: TraitRating,
    pub teeth_strength: TraitRating,
}

impl PlayerTraits {
    pub fn new(
        self_discipline: TraitRating,
        agility: TraitRating,
        teeth_strength: TraitRating,
    ) -> Self {
        Self {
            self_discipline,
            agility,
            teeth_strength,
        }
    }

    pub fn as_array(&self) -> [TraitRating; 3] {
        [self.self_discipline, self.agility, self.teeth_strength]
    }

    /// Nobody is good (or bad) at everything: at most two traits may share
    /// a non-neutral rating.
    pub fn validate(&self) -> BattleResult<()> {
        for rating in [TraitRating::Good, TraitRating::Bad] {
            let count = self.as_array().iter().filter(|r| **r == rating).count();
            if count > 2 {
                return Err(BattleEngineError::InvalidTraits(rating));
            }
        }
        Ok(())
    }
}

/// Create a new player character.
///
/// A blank name is replaced with one of the content's fallback names.
pub fn create_player(
    name: &str,
    traits: PlayerTraits,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<Combatant> {
    traits.validate()?;

    let name = match name.trim() {
        "" if !content.fallback_names.is_empty() => {
            let index = rng.index(content.fallback_names.len(), "fallback name");
            content.fallback_names[index].clone()
        }
        trimmed => trimmed.to_string(),
    };

    let affected_by = roll_affected_by(traits, content, rng)?;
    let moves = content.starting_player_moves();
    if moves.is_empty() {
        return Err(BattleEngineError::Content(
            "no player move is effective against a tier 1 opponent".to_string(),
        ));
    }

    tracing::debug!(player = %name, ?traits, "created player");

    Ok(Combatant::new(
        name,
        content.rules.player_start_health,
        moves,
        1,
        Role::Player(PlayerProfile {
            traits,
            affected_by,
        }),
    ))
}

/// Assigns an effectiveness to every opponent attack, sampling the effect bag
/// without replacement. The first three attacks are biased by the traits.
pub fn roll_affected_by(
    traits: PlayerTraits,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<BTreeMap<Move, Effectiveness>> {
    let attacks: Vec<Move> = content.enemy_move_catalogue().collect();
    let mut bag = EffectBag::for_move_count(attacks.len());
    let ratings = traits.as_array();

    let mut affected_by = BTreeMap::new();
    for (position, attack) in attacks.into_iter().enumerate() {
        let drawn = match ratings.get(position) {
            Some(rating) => bag.draw_for_trait(*rating, rng),
            None => bag.draw_random(rng),
        };
        let effect = drawn.ok_or_else(|| {
            BattleEngineError::Content("effect bag ran out of labels".to_string())
        })?;
        affected_by.insert(attack, effect);
    }
    Ok(affected_by)
}

impl Combatant {
    /// Story progression between battles: one level up, more max health,
    /// and a full heal.
    pub fn level_up(&mut self, rules: &crate::content::BattleRules) {
        self.level = self.level.saturating_add(1);
        self.increase_max_health(rules.level_up_health);
        self.heal_full();
    }

    pub fn traits(&self) -> Option<PlayerTraits> {
        match &self.role {
            Role::Player(profile) => Some(profile.traits),
            Role::Opponent(_) => None,
        }
    }
}
