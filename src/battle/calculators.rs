use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleContext, BattleEvent, BattleRng};
use crate::combatant::Combatant;
use crate::content::BattleRules;
use crate::errors::BattleResult;
use crate::{Actor, Effectiveness, Move};

/// The result of a single damage roll, before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRoll {
    pub effectiveness: Effectiveness,
    pub damage: i32,
    pub critical: bool,
}

/// Integer division rounding towards positive infinity. A non-positive
/// divisor is treated as 1.
pub fn ceil_div(numerator: i32, divisor: i32) -> i32 {
    let divisor = divisor.max(1);
    let quotient = numerator.div_euclid(divisor);
    if numerator.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Base damage for an effectiveness category: `ceil(base * 1.5)` for super
/// effective hits, `ceil(base / 1.5)` for weak ones.
pub fn base_damage(effectiveness: Effectiveness, base: i32) -> i32 {
    match effectiveness {
        Effectiveness::High => ceil_div(base * 3, 2),
        Effectiveness::Low => ceil_div(base * 2, 3),
        Effectiveness::Normal => base,
    }
}

/// Offsets of the variance window around the adjusted base.
pub fn damage_window(effectiveness: Effectiveness) -> (i32, i32) {
    match effectiveness {
        Effectiveness::High => (-1, 4),
        Effectiveness::Low => (-4, 1),
        Effectiveness::Normal => (-2, 2),
    }
}

/// Rolls the damage `attacker` deals to `defender` with `move_used`.
///
/// Order: effectiveness base, plus extra damage, variance roll, ceiling
/// division by the attacker's damage adjust, minus the defender's defence,
/// clamp at zero. Only the player's super effective hits can be critical, and
/// a miss stays a miss.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: Move,
    rules: &BattleRules,
    rng: &mut BattleRng,
) -> BattleResult<DamageRoll> {
    let effectiveness = defender.incoming_effectiveness(move_used)?;
    let adjusted = base_damage(effectiveness, rules.base_damage) + attacker.extra_damage;
    let (low, high) = damage_window(effectiveness);
    let raw = rng.range(adjusted + low, adjusted + high, "damage roll");

    let mut damage = (ceil_div(raw, attacker.damage_adjust) - defender.defence).max(0);
    let mut critical = false;

    if attacker.is_player() && effectiveness == Effectiveness::High {
        let roll = rng.percent("critical hit");
        if roll > rules.critical_threshold && damage > 0 {
            damage *= 2;
            critical = true;
        }
    }

    Ok(DamageRoll {
        effectiveness,
        damage,
        critical,
    })
}

/// Calculate the outcome of one attack as a list of commands.
///
/// Does not mutate the context; the engine executes the commands.
pub fn calculate_attack_outcome(
    context: &BattleContext,
    attacker: Actor,
    move_used: Move,
    rules: &BattleRules,
    rng: &mut BattleRng,
) -> BattleResult<Vec<BattleCommand>> {
    let defender = attacker.other();
    let roll = calculate_damage(
        context.combatant(attacker),
        context.combatant(defender),
        move_used,
        rules,
        rng,
    )?;

    tracing::debug!(
        ?attacker,
        %move_used,
        effectiveness = %roll.effectiveness,
        damage = roll.damage,
        critical = roll.critical,
        "attack resolved"
    );

    let mut commands = vec![
        BattleCommand::EmitEvent(BattleEvent::MoveUsed {
            actor: attacker,
            move_used,
        }),
        BattleCommand::DealDamage {
            target: defender,
            amount: roll.damage,
            effectiveness: roll.effectiveness,
            critical: roll.critical,
        },
        BattleCommand::ResetDamageAdjust { target: attacker },
    ];
    if attacker == Actor::User {
        commands.push(BattleCommand::RestoreCompromisedMoves);
    }
    Ok(commands)
}
