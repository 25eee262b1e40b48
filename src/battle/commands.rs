use crate::battle::state::{BattleContext, BattleEvent, EventBus, GameState};
use crate::{Actor, Effectiveness};

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // Direct state changes
    SetGameState(GameState),
    AdvanceTurn,

    // Combatant modifications
    DealDamage {
        target: Actor,
        amount: i32,
        effectiveness: Effectiveness,
        critical: bool,
    },
    ResetDamageAdjust {
        target: Actor,
    },
    RestoreCompromisedMoves,
    RestorePlayer,

    // Battle flow
    EmitEvent(BattleEvent),
}

/// Execute a batch of commands in order
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    context: &mut BattleContext,
    bus: &mut EventBus,
) {
    for command in commands {
        execute_command(command, context, bus);
    }
}

pub fn execute_command(command: BattleCommand, context: &mut BattleContext, bus: &mut EventBus) {
    match command {
        BattleCommand::SetGameState(state) => {
            context.game_state = state;
        }
        BattleCommand::AdvanceTurn => {
            if context.current_actor == Actor::User {
                context.player_has_acted = true;
            }
            context.current_actor = context.current_actor.other();
            context.turn_number += 1;
        }
        BattleCommand::DealDamage {
            target,
            amount,
            effectiveness,
            critical,
        } => execute_deal_damage_command(target, amount, effectiveness, critical, context, bus),
        BattleCommand::ResetDamageAdjust { target } => {
            context.combatant_mut(target).reset_damage_adjust();
        }
        BattleCommand::RestoreCompromisedMoves => {
            let moves = context.player.restore_compromised_moves();
            if !moves.is_empty() {
                bus.push(BattleEvent::MovesRestored { moves });
            }
        }
        BattleCommand::RestorePlayer => {
            context.player.heal_full();
            bus.push(BattleEvent::PlayerRestored {
                health: context.player.health,
            });
        }
        BattleCommand::EmitEvent(event) => bus.push(event),
    }
}

/// Applies damage and reports it, along with the defeat if the hit was lethal.
fn execute_deal_damage_command(
    target: Actor,
    amount: i32,
    effectiveness: Effectiveness,
    critical: bool,
    context: &mut BattleContext,
    bus: &mut EventBus,
) {
    let defender = context.combatant_mut(target);
    defender.take_damage(amount);
    let remaining_health = defender.health;
    let defeated = !defender.is_alive();

    bus.push(BattleEvent::DamageDealt {
        attacker: target.other(),
        effectiveness,
        damage: amount,
        critical,
        remaining_health,
    });

    if defeated {
        bus.push(BattleEvent::CombatantDefeated { actor: target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{TestOpponentBuilder, TestPlayerBuilder};
    use crate::{Move, Species};
    use pretty_assertions::assert_eq;

    fn context() -> BattleContext {
        BattleContext::new(
            TestPlayerBuilder::new().build(),
            TestOpponentBuilder::new(Species::HoleyTooth)
                .with_health(10)
                .build(),
            Actor::User,
        )
    }

    #[test]
    fn test_lethal_damage_emits_defeat() {
        let mut context = context();
        let mut bus = EventBus::new();
        execute_command(
            BattleCommand::DealDamage {
                target: Actor::Computer,
                amount: 12,
                effectiveness: Effectiveness::Normal,
                critical: false,
            },
            &mut context,
            &mut bus,
        );

        assert_eq!(context.opponent.health, -2);
        assert_eq!(
            bus.events(),
            &[
                BattleEvent::DamageDealt {
                    attacker: Actor::User,
                    effectiveness: Effectiveness::Normal,
                    damage: 12,
                    critical: false,
                    remaining_health: -2,
                },
                BattleEvent::CombatantDefeated {
                    actor: Actor::Computer
                },
            ]
        );
    }

    #[test]
    fn test_advance_turn_alternates_and_tracks_player_action() {
        let mut context = context();
        let mut bus = EventBus::new();
        execute_command(BattleCommand::AdvanceTurn, &mut context, &mut bus);
        assert_eq!(context.current_actor, Actor::Computer);
        assert_eq!(context.turn_number, 2);
        assert!(context.player_has_acted);

        execute_command(BattleCommand::AdvanceTurn, &mut context, &mut bus);
        assert_eq!(context.current_actor, Actor::User);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_restore_moves_is_silent_when_nothing_was_compromised() {
        let mut context = context();
        let mut bus = EventBus::new();
        execute_command(BattleCommand::RestoreCompromisedMoves, &mut context, &mut bus);
        assert!(bus.is_empty());

        context.player.disabled_moves.push(Move::Drill);
        execute_command(BattleCommand::RestoreCompromisedMoves, &mut context, &mut bus);
        assert!(context.player.disabled_moves.is_empty());
        assert_eq!(
            bus.events(),
            &[BattleEvent::MovesRestored {
                moves: vec![Move::Drill]
            }]
        );
    }
}
