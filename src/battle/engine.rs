use crate::battle::ai::MoveSelector;
use crate::battle::calculators::calculate_attack_outcome;
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::random_events::{apply_random_event, roll_random_event};
use crate::battle::state::{BattleContext, BattleEvent, BattleRng, EventBus, GameState};
use crate::combatant::Combatant;
use crate::content::ContentTables;
use crate::errors::{BattleEngineError, BattleResult};
use crate::opponent::OpponentSpec;
use crate::{Actor, BattleOutcome, Move, RandomEvent};
use serde::{Deserialize, Serialize};

/// What a single call to [`Battle::step`] left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Finished(BattleOutcome),
}

/// Everything the story layer needs once a battle is over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub player: Combatant,
    pub outcome: BattleOutcome,
    /// Name of the opponent, when the player won.
    pub defeated: Option<String>,
    pub turns: u32,
    pub events: Vec<BattleEvent>,
    /// One line of text per event that has any.
    pub narration: Vec<String>,
}

/// A battle in progress, driven one turn at a time.
pub struct Battle<'a> {
    context: BattleContext,
    content: &'a ContentTables,
    bus: EventBus,
    pending_event: Option<RandomEvent>,
    turn_announced: bool,
}

impl<'a> Battle<'a> {
    /// Sets up a battle. Without an explicit first actor, a coin flip decides.
    pub fn new(
        player: Combatant,
        opponent: Combatant,
        first_actor: Option<Actor>,
        content: &'a ContentTables,
        rng: &mut BattleRng,
    ) -> Self {
        let first_actor = first_actor.unwrap_or_else(|| {
            if rng.index(2, "first actor") == 0 {
                Actor::User
            } else {
                Actor::Computer
            }
        });

        tracing::info!(
            player = %player.name,
            opponent = %opponent.name,
            boss = opponent.is_boss(),
            ?first_actor,
            "battle started"
        );

        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleStarted {
            opponent: opponent.name.clone(),
            boss: opponent.is_boss(),
            first_actor,
        });

        Self {
            context: BattleContext::new(player, opponent, first_actor),
            content,
            bus,
            pending_event: None,
            turn_announced: false,
        }
    }

    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// The random event that will fire before the next turn, if one was rolled.
    pub fn pending_event(&self) -> Option<RandomEvent> {
        self.pending_event
    }

    pub fn is_finished(&self) -> bool {
        self.context.is_finished()
    }

    /// Resolves the current actor's turn.
    ///
    /// An invalid player selection returns `InvalidMoveSelection` and leaves the
    /// turn unresolved; calling `step` again retries it.
    pub fn step(
        &mut self,
        selector: &mut dyn MoveSelector,
        rng: &mut BattleRng,
    ) -> BattleResult<StepResult> {
        if let Some(outcome) = self.context.outcome() {
            return Ok(StepResult::Finished(outcome));
        }

        let actor = self.context.current_actor;
        if !self.turn_announced {
            if let Some(event) = self.pending_event.take() {
                let effect = apply_random_event(event, &mut self.context, self.content, rng);
                self.bus
                    .push(BattleEvent::RandomEventTriggered { event, effect });
            }
            self.bus.push(BattleEvent::TurnStarted {
                turn_number: self.context.turn_number,
                actor,
            });
            self.turn_announced = true;
        }

        let move_used = self.select_move(actor, selector, rng)?;
        tracing::debug!(turn = self.context.turn_number, ?actor, %move_used, "turn");

        let commands = calculate_attack_outcome(
            &self.context,
            actor,
            move_used,
            &self.content.rules,
            rng,
        )?;
        execute_command_batch(commands, &mut self.context, &mut self.bus);
        self.turn_announced = false;

        if let Some(outcome) = self.check_termination(actor) {
            return Ok(StepResult::Finished(outcome));
        }

        execute_command_batch(
            vec![BattleCommand::AdvanceTurn],
            &mut self.context,
            &mut self.bus,
        );
        self.pending_event = roll_random_event(&self.context, &self.content.rules, rng);
        Ok(StepResult::Continue)
    }

    /// Steps until the battle ends. A rejected player selection is logged and
    /// the turn is asked for again; any other error ends the run.
    pub fn run(
        &mut self,
        selector: &mut dyn MoveSelector,
        rng: &mut BattleRng,
    ) -> BattleResult<BattleOutcome> {
        loop {
            match self.step(selector, rng) {
                Ok(StepResult::Finished(outcome)) => return Ok(outcome),
                Ok(StepResult::Continue) => {}
                Err(BattleEngineError::InvalidMoveSelection { selected, reason }) => {
                    tracing::warn!(%selected, %reason, "move rejected, asking again");
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn select_move(
        &self,
        actor: Actor,
        selector: &mut dyn MoveSelector,
        rng: &mut BattleRng,
    ) -> BattleResult<Move> {
        match actor {
            Actor::User => {
                let player = &self.context.player;
                if player.enabled_moves().is_empty() {
                    return Err(BattleEngineError::EmptyMoveset {
                        name: player.name.clone(),
                    });
                }
                let selected = selector.choose_move(player, &self.context.opponent.name);
                player.check_move_usable(selected)?;
                Ok(selected)
            }
            Actor::Computer => {
                let opponent = &self.context.opponent;
                opponent
                    .choose_random_move(rng)
                    .ok_or_else(|| BattleEngineError::EmptyMoveset {
                        name: opponent.name.clone(),
                    })
            }
        }
    }

    /// Ends the battle if the attacker's last hit was lethal.
    fn check_termination(&mut self, attacker: Actor) -> Option<BattleOutcome> {
        let defender = attacker.other();
        if self.context.combatant(defender).is_alive() {
            return None;
        }

        let (state, outcome) = match defender {
            Actor::Computer => (GameState::Victory, BattleOutcome::Victory),
            Actor::User => (GameState::Defeat, BattleOutcome::Defeat),
        };
        let mut commands = vec![BattleCommand::SetGameState(state)];
        if outcome == BattleOutcome::Victory {
            commands.push(BattleCommand::RestorePlayer);
        }
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded { outcome }));
        execute_command_batch(commands, &mut self.context, &mut self.bus);

        tracing::info!(
            ?outcome,
            turns = self.context.turn_number,
            player_health = self.context.player.health,
            "battle ended"
        );
        Some(outcome)
    }

    /// Consumes a finished battle. Returns `None` while it is still running.
    pub fn into_report(self) -> Option<BattleReport> {
        let outcome = self.context.outcome()?;
        let narration = self.bus.formatted(&self.context);
        let defeated = match outcome {
            BattleOutcome::Victory => Some(self.context.opponent.name.clone()),
            BattleOutcome::Defeat => None,
        };
        Some(BattleReport {
            player: self.context.player,
            outcome,
            defeated,
            turns: self.context.turn_number,
            events: self.bus.into_events(),
            narration,
        })
    }
}

/// Runs a whole battle against the opponent described by `opponent`.
///
/// The player is moved in and handed back in the report, with any permanent
/// changes from the battle applied.
pub fn run_battle(
    player: Combatant,
    opponent: OpponentSpec,
    starting_actor: Option<Actor>,
    selector: &mut dyn MoveSelector,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> BattleResult<BattleReport> {
    let opponent = opponent.spawn(content, rng)?;
    let mut battle = Battle::new(player, opponent, starting_actor, content, rng);
    battle.run(selector, rng)?;
    battle.into_report().ok_or_else(|| {
        BattleEngineError::Content("battle loop exited before an outcome".to_string())
    })
}
