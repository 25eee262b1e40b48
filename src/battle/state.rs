use crate::combatant::Combatant;
use crate::{Actor, BattleOutcome, Effectiveness, Move, RandomEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    InProgress,
    Victory,
    Defeat,
}

/// What a random event actually did to the combatants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum EventEffect {
    /// The opponent learned a new attack
    MoveLearned(Move),
    /// The opponent had nothing left to learn and hits harder instead
    OpponentDamageIncreased,
    MoveCompromised(Move),
    /// Compromising would have left the player with nothing to use
    NothingCompromised,
    PlayerHealed(i32),
    /// The player was already at full health and hits harder instead
    PlayerDamageIncreased,
    /// The target's next attack is divided by a larger number
    NextAttackWeakened { target: Actor },
    ExtraDamageDecreased { target: Actor },
    MoveDissolved(Move),
    /// The player's last move survived the dissolve attempt
    DissolveRefused,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        opponent: String,
        boss: bool,
        first_actor: Actor,
    },
    TurnStarted {
        turn_number: u32,
        actor: Actor,
    },
    RandomEventTriggered {
        event: RandomEvent,
        effect: EventEffect,
    },
    MoveUsed {
        actor: Actor,
        move_used: Move,
    },
    DamageDealt {
        attacker: Actor,
        effectiveness: Effectiveness,
        damage: i32,
        critical: bool,
        remaining_health: i32,
    },
    MovesRestored {
        moves: Vec<Move>,
    },
    CombatantDefeated {
        actor: Actor,
    },
    PlayerRestored {
        health: i32,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, context: &BattleContext) -> Option<String> {
        let opponent = &context.opponent.name;
        match self {
            BattleEvent::BattleStarted { opponent, boss, .. } => {
                if *boss {
                    Some(format!("The {} looms over you!", opponent))
                } else {
                    Some(format!("You have encountered: {}!", opponent))
                }
            }
            BattleEvent::TurnStarted { actor, .. } => match actor {
                Actor::User => Some("Your turn...".to_string()),
                Actor::Computer => Some(format!("{}'s turn...", opponent)),
            },
            BattleEvent::RandomEventTriggered { event, effect } => Some(format!(
                "--EVENT-- {}: {}",
                event,
                Self::format_effect(effect, opponent)
            )),
            BattleEvent::MoveUsed { actor, move_used } => match actor {
                Actor::User => Some(format!("You use {}.", move_used)),
                Actor::Computer => Some(format!("{} uses {}.", opponent, move_used)),
            },
            BattleEvent::DamageDealt {
                effectiveness,
                damage,
                critical,
                ..
            } => {
                if *damage == 0 {
                    Some("Missed!".to_string())
                } else if *critical {
                    Some(format!("CRITICAL [{} damage]!", damage))
                } else {
                    match effectiveness {
                        Effectiveness::High => {
                            Some(format!("It's super effective [{} damage]!", damage))
                        }
                        Effectiveness::Low => {
                            Some(format!("It isn't very effective [{} damage]...", damage))
                        }
                        Effectiveness::Normal => {
                            Some(format!("It's shaken off [{} damage].", damage))
                        }
                    }
                }
            }
            BattleEvent::MovesRestored { .. } => None,
            BattleEvent::CombatantDefeated { actor } => match actor {
                Actor::User => Some("You died...".to_string()),
                Actor::Computer => Some(format!("The {} is defeated!", opponent)),
            },
            BattleEvent::PlayerRestored { health } => {
                Some(format!("You restore yourself to max health ({}hp).", health))
            }
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Victory => Some("Victory!".to_string()),
                BattleOutcome::Defeat => None,
            },
        }
    }

    fn format_effect(effect: &EventEffect, opponent: &str) -> String {
        let whose = |target: &Actor| match target {
            Actor::User => "your".to_string(),
            Actor::Computer => format!("the {}'s", opponent),
        };
        match effect {
            EventEffect::MoveLearned(move_) => {
                format!("the {} evolved and learned {}!", opponent, move_)
            }
            EventEffect::OpponentDamageIncreased => {
                format!("the {} evolved; its attacks look deadlier.", opponent)
            }
            EventEffect::MoveCompromised(move_) => format!("your {} has been compromised!", move_),
            EventEffect::NothingCompromised => "your equipment holds firm.".to_string(),
            EventEffect::PlayerHealed(amount) => format!("you found an item (healed {}hp).", amount),
            EventEffect::PlayerDamageIncreased => {
                "you found an item (attack damage increased by 1).".to_string()
            }
            EventEffect::NextAttackWeakened { target } => {
                format!("damage of {} next attack is reduced.", whose(target))
            }
            EventEffect::ExtraDamageDecreased { target } => {
                format!("{} attack damage decreased by 1.", whose(target))
            }
            EventEffect::MoveDissolved(move_) => format!("your {} has dissolved!", move_),
            EventEffect::DissolveRefused => {
                "you frantically save your last weapon.".to_string()
            }
        }
    }
}

/// Event bus for collecting battle events in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Formatted lines for every event that has text, in order.
    pub fn formatted(&self, context: &BattleContext) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(context))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Shows the debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Live(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The source of every random draw in a battle.
///
/// Live battles use a seedable generator. Tests script the raw draws: each
/// scripted value is reduced into the requested range, so `range(lo, hi)` yields
/// `lo + value % (hi - lo + 1)`.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

impl BattleRng {
    pub fn new_random() -> Self {
        Self {
            source: RngSource::Live(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Live(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Uniform integer in `low..=high`.
    pub fn range(&mut self, low: i32, high: i32, reason: &str) -> i32 {
        if high <= low {
            return low;
        }
        let value = match &mut self.source {
            RngSource::Live(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                let span = (high - low) as u32 + 1;
                low + (next_scripted(outcomes, index, reason) % span) as i32
            }
        };
        tracing::trace!(value, reason, "rng");
        value
    }

    /// Uniform roll in `0..=100`.
    pub fn percent(&mut self, reason: &str) -> u8 {
        self.range(0, 100, reason) as u8
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize, reason: &str) -> usize {
        self.range(0, len.saturating_sub(1) as i32, reason) as usize
    }
}

fn next_scripted(outcomes: &[u32], index: &mut usize, reason: &str) -> u32 {
    if *index >= outcomes.len() {
        panic!(
            "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
            reason
        );
    }
    let outcome = outcomes[*index];
    *index += 1;
    outcome
}

/// Everything a battle mutates: both combatants and whose turn it is.
///
/// Passed explicitly to every turn step and random event.
#[derive(Debug, Clone)]
pub struct BattleContext {
    pub player: Combatant,
    pub opponent: Combatant,
    pub current_actor: Actor,
    pub turn_number: u32,
    pub game_state: GameState,
    /// Set once the player has completed an action; unlocks a boss's later events.
    pub player_has_acted: bool,
}

impl BattleContext {
    pub fn new(player: Combatant, opponent: Combatant, first_actor: Actor) -> Self {
        Self {
            player,
            opponent,
            current_actor: first_actor,
            turn_number: 1,
            game_state: GameState::InProgress,
            player_has_acted: false,
        }
    }

    pub fn combatant(&self, actor: Actor) -> &Combatant {
        match actor {
            Actor::User => &self.player,
            Actor::Computer => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, actor: Actor) -> &mut Combatant {
        match actor {
            Actor::User => &mut self.player,
            Actor::Computer => &mut self.opponent,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.game_state != GameState::InProgress
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.game_state {
            GameState::InProgress => None,
            GameState::Victory => Some(BattleOutcome::Victory),
            GameState::Defeat => Some(BattleOutcome::Defeat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{TestOpponentBuilder, TestPlayerBuilder};
    use crate::Species;

    fn context() -> BattleContext {
        BattleContext::new(
            TestPlayerBuilder::new().build(),
            TestOpponentBuilder::new(Species::CandyCorn).build(),
            Actor::User,
        )
    }

    #[test]
    fn test_scripted_rng_reduces_into_range() {
        let mut rng = BattleRng::new_for_test(vec![0, 5, 7, 250, 3]);
        assert_eq!(rng.range(14, 19, "low end"), 14);
        assert_eq!(rng.range(14, 19, "high end"), 19);
        assert_eq!(rng.range(14, 19, "wraps"), 15);
        assert_eq!(rng.percent("percent"), 48);
        assert_eq!(rng.index(2, "index"), 1);
    }

    #[test]
    #[should_panic(expected = "BattleRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = BattleRng::new_for_test(vec![]);
        rng.percent("nothing left");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = BattleRng::seeded(42);
        let mut b = BattleRng::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.range(-5, 5, "a"), b.range(-5, 5, "b"));
        }
    }

    #[test]
    fn test_silent_events_return_none() {
        let context = context();
        let silent = BattleEvent::MovesRestored {
            moves: vec![Move::Drill],
        };
        assert_eq!(silent.format(&context), None);
    }

    #[test]
    fn test_event_text_samples() {
        let context = context();
        let miss = BattleEvent::DamageDealt {
            attacker: Actor::User,
            effectiveness: Effectiveness::High,
            damage: 0,
            critical: false,
            remaining_health: 10,
        };
        assert_eq!(miss.format(&context).as_deref(), Some("Missed!"));

        let crit = BattleEvent::DamageDealt {
            attacker: Actor::User,
            effectiveness: Effectiveness::High,
            damage: 30,
            critical: true,
            remaining_health: -5,
        };
        assert_eq!(crit.format(&context).as_deref(), Some("CRITICAL [30 damage]!"));

        let used = BattleEvent::MoveUsed {
            actor: Actor::Computer,
            move_used: Move::CandyCorn,
        };
        assert_eq!(
            used.format(&context).as_deref(),
            Some("Candy Corn uses candy corn.")
        );
    }

    #[test]
    fn test_event_bus_collects_in_order() {
        let context = context();
        let mut bus = EventBus::new();
        bus.push(BattleEvent::TurnStarted {
            turn_number: 1,
            actor: Actor::User,
        });
        bus.push(BattleEvent::MovesRestored { moves: vec![] });
        bus.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        });

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.formatted(&context), vec!["Your turn...", "Victory!"]);
        assert!(format!("{}", bus).contains("TurnStarted"));
    }
}
