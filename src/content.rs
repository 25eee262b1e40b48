//! Static content tables: the effectiveness table, opponent and boss
//! definitions, stage gating and the numeric battle rules.
//!
//! Everything here is loaded once at start-up and only read afterwards.

use crate::errors::{BattleEngineError, BattleResult};
use crate::{Move, RandomEvent, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The content shipped with the crate.
pub const EMBEDDED_CONTENT: &str = include_str!("../data/content.ron");

/// Numeric constants used by the battle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRules {
    pub base_damage: i32,
    pub player_start_health: i32,
    /// Opponent health is rolled within `base ± health_variance`.
    pub health_variance: i32,
    pub item_heal_min: i32,
    pub item_heal_max: i32,
    /// A player's super effective hit is critical when a 0..=100 roll exceeds this.
    pub critical_threshold: u8,
    /// A random event fires when a 0..=100 roll exceeds this (mundane battles).
    pub mundane_event_threshold: u8,
    /// Same as above, for boss battles.
    pub boss_event_threshold: u8,
    pub level_up_health: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentData {
    pub base_health: i32,
    pub tier: u8,
    #[serde(default)]
    pub defence: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossData {
    pub base_health: i32,
    pub tier: u8,
    pub defence: i32,
    pub extra_damage: i32,
    pub moves: Vec<Move>,
    pub weaknesses: Vec<Move>,
    pub strengths: Vec<Move>,
    /// Events eligible from the first turn of the boss battle.
    pub start_events: Vec<RandomEvent>,
    /// Events that join the pool once the player has acted.
    pub later_events: Vec<RandomEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTables {
    pub rules: BattleRules,
    pub opponents: BTreeMap<Species, OpponentData>,
    pub stages: BTreeMap<u32, Vec<u8>>,
    /// Opponent attacks in their fixed order, with the species that use them.
    pub enemy_moves: Vec<(Move, Vec<Species>)>,
    /// Player moves and the species they are super effective against.
    pub weaknesses: Vec<(Move, Vec<Species>)>,
    /// Player moves and the species they are weak against.
    pub strengths: Vec<(Move, Vec<Species>)>,
    pub bosses: BTreeMap<Species, BossData>,
    #[serde(default)]
    pub fallback_names: Vec<String>,
}

impl ContentTables {
    /// Parse the tables shipped inside the crate.
    pub fn embedded() -> BattleResult<Self> {
        Self::from_ron_str(EMBEDDED_CONTENT)
    }

    /// Load content tables from a RON file on disk
    pub fn load(path: &Path) -> BattleResult<Self> {
        if !path.exists() {
            return Err(BattleEngineError::Content(format!(
                "content file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(source: &str) -> BattleResult<Self> {
        let tables: ContentTables = ron::from_str(source)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Checks the cross references between tables so that lookups during a
    /// battle cannot fail on well-formed content.
    pub fn validate(&self) -> BattleResult<()> {
        if self.enemy_moves.is_empty() {
            return Err(BattleEngineError::Content(
                "no opponent attacks defined".to_string(),
            ));
        }
        if self.rules.item_heal_min > self.rules.item_heal_max {
            return Err(BattleEngineError::Content(
                "item_heal_min is larger than item_heal_max".to_string(),
            ));
        }

        for (species, data) in &self.opponents {
            if self.moves_for_species(*species).is_empty() {
                return Err(BattleEngineError::Content(format!(
                    "{} has no attacks",
                    species
                )));
            }
            if !self.stages.values().any(|tiers| tiers.contains(&data.tier)) {
                tracing::warn!("{} (tier {}) never appears at any stage", species, data.tier);
            }
        }

        for (stage, tiers) in &self.stages {
            let reachable = self
                .opponents
                .values()
                .any(|data| tiers.contains(&data.tier));
            if !reachable {
                return Err(BattleEngineError::Content(format!(
                    "stage {} has no eligible opponents",
                    stage
                )));
            }
        }

        for (species, boss) in &self.bosses {
            if boss.moves.is_empty() {
                return Err(BattleEngineError::Content(format!(
                    "boss {} has no attacks",
                    species
                )));
            }
            for move_ in &boss.moves {
                if !self.is_enemy_move(*move_) {
                    return Err(BattleEngineError::UnknownMove(*move_));
                }
            }
        }

        Ok(())
    }

    /// All opponent attacks in table order, boss-exclusive ones included.
    pub fn enemy_move_catalogue(&self) -> impl Iterator<Item = Move> + '_ {
        self.enemy_moves.iter().map(|(move_, _)| *move_)
    }

    pub fn is_enemy_move(&self, move_: Move) -> bool {
        self.enemy_moves.iter().any(|(m, _)| *m == move_)
    }

    /// Opponent attacks that at least one mundane species uses.
    pub fn species_specific_moves(&self) -> Vec<Move> {
        self.enemy_moves
            .iter()
            .filter(|(_, users)| !users.is_empty())
            .map(|(move_, _)| *move_)
            .collect()
    }

    pub fn is_boss_exclusive(&self, move_: Move) -> bool {
        self.enemy_moves
            .iter()
            .any(|(m, users)| *m == move_ && users.is_empty())
    }

    pub fn moves_for_species(&self, species: Species) -> Vec<Move> {
        collect_matching(&self.enemy_moves, species)
    }

    /// Player moves that are super effective against `species`.
    pub fn super_effective_against(&self, species: Species) -> Vec<Move> {
        collect_matching(&self.weaknesses, species)
    }

    /// Player moves that `species` shrugs off.
    pub fn not_very_effective_against(&self, species: Species) -> Vec<Move> {
        collect_matching(&self.strengths, species)
    }

    pub fn opponent_data(&self, species: Species) -> BattleResult<&OpponentData> {
        self.opponents
            .get(&species)
            .ok_or(BattleEngineError::UnknownSpecies(species))
    }

    pub fn boss_data(&self, species: Species) -> BattleResult<&BossData> {
        self.bosses
            .get(&species)
            .ok_or(BattleEngineError::UnknownSpecies(species))
    }

    pub fn allowed_tiers(&self, stage: u32) -> BattleResult<&[u8]> {
        self.stages
            .get(&stage)
            .map(|tiers| tiers.as_slice())
            .ok_or(BattleEngineError::UnknownStage(stage))
    }

    /// Mundane species that may be encountered at `stage`, in table order.
    pub fn species_for_stage(&self, stage: u32) -> BattleResult<Vec<Species>> {
        let tiers = self.allowed_tiers(stage)?;
        Ok(self
            .opponents
            .iter()
            .filter(|(_, data)| tiers.contains(&data.tier))
            .map(|(species, _)| *species)
            .collect())
    }

    /// Every player move that is super effective against some tier 1 opponent,
    /// grouped by opponent in table order.
    pub fn starting_player_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for species in self
            .opponents
            .iter()
            .filter(|(_, data)| data.tier == 1)
            .map(|(species, _)| *species)
        {
            for move_ in collect_matching(&self.weaknesses, species) {
                if !moves.contains(&move_) {
                    moves.push(move_);
                }
            }
        }
        moves
    }
}

fn collect_matching(table: &[(Move, Vec<Species>)], species: Species) -> Vec<Move> {
    table
        .iter()
        .filter(|(_, targets)| targets.contains(&species))
        .map(|(move_, _)| *move_)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables() -> ContentTables {
        ContentTables::embedded().expect("embedded content should parse")
    }

    #[test]
    fn test_embedded_content_parses() {
        let content = tables();
        assert_eq!(content.rules.base_damage, 10);
        assert_eq!(content.rules.player_start_health, 35);
        assert_eq!(content.opponents.len(), 7);
        assert_eq!(content.enemy_moves.len(), 8);
    }

    #[test]
    fn test_species_specific_moves_exclude_boss_attacks() {
        let content = tables();
        let specific = content.species_specific_moves();
        assert_eq!(specific.len(), 7);
        assert!(!specific.contains(&Move::Carbonation));
        assert!(content.is_boss_exclusive(Move::Carbonation));
        assert!(!content.is_boss_exclusive(Move::Sugar));
    }

    #[test]
    fn test_species_lookups() {
        let content = tables();
        assert_eq!(
            content.moves_for_species(Species::ChippedTooth),
            vec![Move::Toffee]
        );
        assert_eq!(
            content.super_effective_against(Species::RottenTooth),
            vec![Move::Scaler, Move::FluoridatedWater]
        );
        assert_eq!(
            content.not_very_effective_against(Species::LAndP),
            vec![Move::Scaler, Move::Drill]
        );
    }

    #[test]
    fn test_stage_gating() {
        let content = tables();
        let stage_one = content.species_for_stage(1).unwrap();
        assert_eq!(
            stage_one,
            vec![
                Species::HoleyTooth,
                Species::ChippedTooth,
                Species::CandyCorn,
                Species::LAndP
            ]
        );
        assert_eq!(
            content.species_for_stage(3).unwrap(),
            vec![Species::PlaqueMonster, Species::RottenTooth]
        );
        assert_eq!(
            content.species_for_stage(9),
            Err(BattleEngineError::UnknownStage(9))
        );
    }

    #[test]
    fn test_starting_moves_cover_tier_one() {
        let content = tables();
        assert_eq!(
            content.starting_player_moves(),
            vec![
                Move::Drill,
                Move::DentalPamphlet,
                Move::BlendedKale,
                Move::FluoridatedWater
            ]
        );
    }

    #[test]
    fn test_unknown_boss_is_reported() {
        let content = tables();
        assert_eq!(
            content.boss_data(Species::CandyCorn).unwrap_err(),
            BattleEngineError::UnknownSpecies(Species::CandyCorn)
        );
    }

    #[test]
    fn test_validation_rejects_boss_with_unknown_attack() {
        let mut content = tables();
        content
            .bosses
            .get_mut(&Species::BottleOfCoke)
            .unwrap()
            .moves
            .push(Move::Drill);
        assert_eq!(
            content.validate(),
            Err(BattleEngineError::UnknownMove(Move::Drill))
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let result = ContentTables::load(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(BattleEngineError::Content(_))));
    }
}
