//! A thin story layer: an ordered list of battles and rewards that carries one
//! player through them, stopping at the first defeat.

use crate::battle::ai::MoveSelector;
use crate::battle::engine::{run_battle, BattleReport};
use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::content::ContentTables;
use crate::errors::BattleResult;
use crate::opponent::OpponentSpec;
use crate::{Actor, BattleOutcome, Move, Species};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Chapter {
    Battle {
        opponent: OpponentSpec,
        first_actor: Option<Actor>,
    },
    GainMove(Move),
    /// One of these, picked at random.
    GainOneOf(Vec<Move>),
    GainDefence(i32),
    LevelUp,
}

/// The guild's adventure: the town outskirts, the forest, the watchtower and
/// finally the boss in the capital.
pub fn default_chapters() -> Vec<Chapter> {
    vec![
        Chapter::Battle {
            opponent: OpponentSpec::Stage(1),
            first_actor: Some(Actor::User),
        },
        Chapter::GainDefence(2),
        Chapter::Battle {
            opponent: OpponentSpec::Stage(1),
            first_actor: None,
        },
        Chapter::GainMove(Move::Scaler),
        Chapter::LevelUp,
        Chapter::Battle {
            opponent: OpponentSpec::Stage(3),
            first_actor: None,
        },
        Chapter::GainOneOf(vec![Move::Toothpaste, Move::DentalFloss]),
        Chapter::Battle {
            opponent: OpponentSpec::Stage(4),
            first_actor: None,
        },
        Chapter::LevelUp,
        Chapter::Battle {
            opponent: OpponentSpec::Boss(Species::BottleOfCoke),
            first_actor: Some(Actor::Computer),
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub player: Combatant,
    pub battles: Vec<BattleReport>,
    /// False when the player was defeated before the last chapter.
    pub completed: bool,
}

pub fn run_campaign(
    mut player: Combatant,
    chapters: &[Chapter],
    selector: &mut dyn MoveSelector,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<CampaignReport> {
    let mut battles = Vec::new();

    for chapter in chapters {
        match chapter {
            Chapter::Battle {
                opponent,
                first_actor,
            } => {
                let report = run_battle(player, *opponent, *first_actor, selector, content, rng)?;
                player = report.player.clone();
                let defeated = report.outcome == BattleOutcome::Defeat;
                battles.push(report);
                if defeated {
                    tracing::info!(battles = battles.len(), "campaign lost");
                    return Ok(CampaignReport {
                        player,
                        battles,
                        completed: false,
                    });
                }
            }
            Chapter::GainMove(move_) => {
                player.add_move(*move_);
            }
            Chapter::GainOneOf(choices) => {
                if !choices.is_empty() {
                    let move_ = choices[rng.index(choices.len(), "reward choice")];
                    player.add_move(move_);
                }
            }
            Chapter::GainDefence(amount) => player.increase_defence(*amount),
            Chapter::LevelUp => player.level_up(&content.rules),
        }
        tracing::debug!(?chapter, level = player.level, "chapter done");
    }

    tracing::info!(battles = battles.len(), "campaign won");
    Ok(CampaignReport {
        player,
        battles,
        completed: true,
    })
}
