//! Construction of mundane opponents and bosses, plus the opponent-only
//! `evolve` mutator.

use crate::battle::state::BattleRng;
use crate::combatant::{BossExtensions, Combatant, OpponentKind, OpponentProfile, Role};
use crate::content::ContentTables;
use crate::errors::{BattleEngineError, BattleResult};
use crate::{Move, Species};
use serde::{Deserialize, Serialize};

/// What the player is about to fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentSpec {
    /// A random mundane opponent suitable for this stage.
    Stage(u32),
    /// A specific boss.
    Boss(Species),
}

impl OpponentSpec {
    pub fn spawn(&self, content: &ContentTables, rng: &mut BattleRng) -> BattleResult<Combatant> {
        match self {
            OpponentSpec::Stage(stage) => spawn_opponent(*stage, content, rng),
            OpponentSpec::Boss(species) => spawn_boss(*species, content, rng),
        }
    }
}

/// Spawns a random mundane opponent whose tier is allowed at `stage`.
///
/// Health is the species base ± the content's variance, plus a small random
/// bonus that grows with the stage.
pub fn spawn_opponent(
    stage: u32,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<Combatant> {
    let candidates = content.species_for_stage(stage)?;
    if candidates.is_empty() {
        return Err(BattleEngineError::UnknownStage(stage));
    }
    let species = candidates[rng.index(candidates.len(), "opponent species")];
    let data = content.opponent_data(species)?;

    let variance = content.rules.health_variance;
    let mut max_health = rng.range(
        data.base_health - variance,
        data.base_health + variance,
        "opponent health",
    );
    let stage = stage as i32;
    let stage_roll = rng.range(stage - 1, stage + 2, "opponent stage health");
    // ceil(stage_roll * 1.5)
    max_health += (stage_roll * 3 + 1).div_euclid(2);

    let moves = content.moves_for_species(species);
    if moves.is_empty() {
        return Err(BattleEngineError::UnknownSpecies(species));
    }

    let mut opponent = Combatant::new(
        species.name(),
        max_health,
        moves,
        data.tier,
        Role::Opponent(OpponentProfile {
            species,
            weaknesses: content.super_effective_against(species),
            strengths: content.not_very_effective_against(species),
            kind: OpponentKind::Mundane,
        }),
    );
    opponent.defence = data.defence;

    tracing::debug!(
        opponent = %opponent.name,
        health = opponent.max_health,
        moves = ?opponent.moves,
        "spawned opponent"
    );
    Ok(opponent)
}

/// Spawns the named boss. Bosses are not scaled by stage.
pub fn spawn_boss(
    species: Species,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<Combatant> {
    let data = content.boss_data(species)?;
    let variance = content.rules.health_variance;
    let max_health = rng.range(
        data.base_health - variance,
        data.base_health + variance,
        "boss health",
    );

    let mut boss = Combatant::new(
        species.name(),
        max_health,
        data.moves.clone(),
        data.tier,
        Role::Opponent(OpponentProfile {
            species,
            weaknesses: data.weaknesses.clone(),
            strengths: data.strengths.clone(),
            kind: OpponentKind::Boss(BossExtensions {
                start_events: data.start_events.clone(),
                later_events: data.later_events.clone(),
            }),
        }),
    );
    boss.extra_damage = data.extra_damage;
    boss.defence = data.defence;

    tracing::debug!(boss = %boss.name, health = boss.max_health, "spawned boss");
    Ok(boss)
}

impl Combatant {
    /// Teaches the opponent a new attack, or sharpens its damage once there
    /// is nothing left to learn.
    ///
    /// Returns the attack that was added, or `None` when `extra_damage` was
    /// increased instead. Boss-exclusive attacks are never learned this way.
    pub fn evolve(&mut self, content: &ContentTables, rng: &mut BattleRng) -> Option<Move> {
        let catalogue = content.species_specific_moves();
        let candidates: Vec<Move> = catalogue
            .iter()
            .copied()
            .filter(|m| !self.knows_move(*m))
            .collect();

        // Every species attack is already known.
        if candidates.is_empty() {
            self.increase_extra_damage(1);
            return None;
        }

        let move_ = candidates[rng.index(candidates.len(), "evolved move")];
        self.add_move(move_);
        Some(move_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestOpponentBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn content() -> ContentTables {
        ContentTables::embedded().unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn test_spawned_opponent_matches_stage(#[case] stage: u32) {
        let content = content();
        for seed in 0..30 {
            let mut rng = BattleRng::seeded(seed);
            let opponent = spawn_opponent(stage, &content, &mut rng).unwrap();
            let species = opponent.species().unwrap();
            let data = content.opponent_data(species).unwrap();

            assert!(content.allowed_tiers(stage).unwrap().contains(&data.tier));
            let stage = stage as i32;
            let low = data.base_health - 5 + ((stage - 1) * 3 + 1) / 2;
            let high = data.base_health + 5 + ((stage + 2) * 3 + 1) / 2;
            assert!(
                (low..=high).contains(&opponent.max_health),
                "{} health {} outside {}..={}",
                opponent.name,
                opponent.max_health,
                low,
                high
            );
            assert_eq!(opponent.health, opponent.max_health);
            assert_eq!(opponent.moves, content.moves_for_species(species));
            assert_eq!(opponent.extra_damage, 0);
            assert_eq!(opponent.damage_adjust, 1);
            assert_eq!(opponent.defence, 0);
            assert!(!opponent.is_boss());
        }
    }

    #[test]
    fn test_scripted_opponent_health() {
        let content = content();
        // species index 3 (L&P), health offset 10 (+5), stage roll offset 3 (stage + 2)
        let mut rng = BattleRng::new_for_test(vec![3, 10, 3]);
        let opponent = spawn_opponent(1, &content, &mut rng).unwrap();
        assert_eq!(opponent.species(), Some(Species::LAndP));
        // 25 + 5 + ceil(3 * 1.5)
        assert_eq!(opponent.max_health, 35);
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let content = content();
        let mut rng = BattleRng::seeded(0);
        assert_eq!(
            spawn_opponent(12, &content, &mut rng).unwrap_err(),
            BattleEngineError::UnknownStage(12)
        );
    }

    #[test]
    fn test_boss_construction() {
        let content = content();
        let mut rng = BattleRng::seeded(9);
        let boss = spawn_boss(Species::BottleOfCoke, &content, &mut rng).unwrap();
        let data = content.boss_data(Species::BottleOfCoke).unwrap();

        assert!(boss.is_boss());
        assert_eq!(boss.name, "Bottle of Coke");
        assert!((data.base_health - 5..=data.base_health + 5).contains(&boss.max_health));
        assert_eq!(boss.moves, data.moves);
        assert_eq!(boss.extra_damage, 1);
        assert_eq!(boss.defence, 1);
        assert_eq!(
            boss.boss_extensions().unwrap().start_events,
            data.start_events
        );
    }

    #[test]
    fn test_evolve_adds_unknown_species_move() {
        let content = content();
        let mut opponent = TestOpponentBuilder::new(Species::ChippedTooth).build();
        let mut rng = BattleRng::seeded(4);
        let learned = opponent.evolve(&content, &mut rng).expect("should learn a move");

        assert!(!content.is_boss_exclusive(learned));
        assert_ne!(learned, Move::Toffee);
        assert_eq!(opponent.moves, vec![Move::Toffee, learned]);
        assert_eq!(opponent.extra_damage, 0);
    }

    #[test]
    fn test_boss_keeps_learning_past_its_exclusive_move() {
        let content = content();
        let mut rng = BattleRng::seeded(2);
        let mut boss = spawn_boss(Species::BottleOfCoke, &content, &mut rng).unwrap();
        boss.moves = content
            .species_specific_moves()
            .into_iter()
            .filter(|m| *m != Move::Toffee)
            .chain([Move::Carbonation])
            .collect();
        assert_eq!(boss.moves.len(), content.species_specific_moves().len());

        assert_eq!(boss.evolve(&content, &mut rng), Some(Move::Toffee));
        assert_eq!(boss.extra_damage, 1);

        assert_eq!(boss.evolve(&content, &mut rng), None);
        assert_eq!(boss.extra_damage, 2);
    }

    #[test]
    fn test_evolve_with_full_catalogue_boosts_damage() {
        let content = content();
        let mut opponent = TestOpponentBuilder::new(Species::SugarholicTeeth)
            .with_moves(content.species_specific_moves())
            .build();
        assert_eq!(opponent.moves.len(), content.species_specific_moves().len());

        let mut rng = BattleRng::seeded(0);
        for expected in 1..=3 {
            assert_eq!(opponent.evolve(&content, &mut rng), None);
            assert_eq!(opponent.extra_damage, expected);
            assert_eq!(opponent.moves.len(), 7);
        }
    }

    #[test]
    fn test_evolve_never_teaches_boss_attacks() {
        let content = content();
        let mut rng = BattleRng::seeded(21);
        let mut opponent = TestOpponentBuilder::new(Species::LAndP).build();
        for _ in 0..10 {
            opponent.evolve(&content, &mut rng);
        }
        assert!(!opponent.knows_move(Move::Carbonation));
        assert_eq!(opponent.moves.len(), 7);
    }
}
