//! Side effects injected between turns.
//!
//! Each event mutates the battle context directly and reports what it did as an
//! [`EventEffect`]; turning that into text is the presentation layer's job.

use crate::battle::state::{BattleContext, BattleRng, EventEffect};
use crate::combatant::HealOutcome;
use crate::content::{BattleRules, ContentTables};
use crate::{Actor, RandomEvent};

/// Events that can fire right now: the mundane four, plus a boss's start
/// events, plus its later events once the player has acted.
pub fn eligible_events(context: &BattleContext) -> Vec<RandomEvent> {
    let mut events = RandomEvent::MUNDANE.to_vec();
    if let Some(boss) = context.opponent.boss_extensions() {
        let mut extra = boss.start_events.clone();
        if context.player_has_acted {
            extra.extend(boss.later_events.iter().copied());
        }
        for event in extra {
            if !events.contains(&event) {
                events.push(event);
            }
        }
    }
    events
}

/// Rolls whether an event fires before the upcoming turn, and which one.
pub fn roll_random_event(
    context: &BattleContext,
    rules: &BattleRules,
    rng: &mut BattleRng,
) -> Option<RandomEvent> {
    let threshold = if context.opponent.is_boss() {
        rules.boss_event_threshold
    } else {
        rules.mundane_event_threshold
    };
    if rng.percent("random event check") <= threshold {
        return None;
    }

    let events = eligible_events(context);
    if events.is_empty() {
        return None;
    }
    Some(events[rng.index(events.len(), "random event choice")])
}

/// Applies `event` to the battle. `context.current_actor` is the combatant whose
/// turn is about to occur.
pub fn apply_random_event(
    event: RandomEvent,
    context: &mut BattleContext,
    content: &ContentTables,
    rng: &mut BattleRng,
) -> EventEffect {
    let effect = match event {
        RandomEvent::Evolve => match context.opponent.evolve(content, rng) {
            Some(move_) => EventEffect::MoveLearned(move_),
            None => EventEffect::OpponentDamageIncreased,
        },
        RandomEvent::Compromise => match context.player.compromise_random_move(rng) {
            Some(move_) => EventEffect::MoveCompromised(move_),
            None => EventEffect::NothingCompromised,
        },
        RandomEvent::FindItem => {
            let rules = &content.rules;
            let amount = rng.range(rules.item_heal_min, rules.item_heal_max, "item heal");
            match context.player.heal(amount) {
                HealOutcome::Healed(healed) => EventEffect::PlayerHealed(healed),
                HealOutcome::Capped => {
                    context.player.increase_extra_damage(1);
                    EventEffect::PlayerDamageIncreased
                }
            }
        }
        RandomEvent::Gust => {
            let target = context.current_actor;
            context.combatant_mut(target).adjust_damage(1);
            EventEffect::NextAttackWeakened { target }
        }
        RandomEvent::Fizz => weaken(context, Actor::User),
        RandomEvent::PressureRelease => weaken(context, Actor::Computer),
        RandomEvent::DissolveWeapon => match context.player.remove_random_move(rng) {
            Ok(move_) => EventEffect::MoveDissolved(move_),
            Err(_) => EventEffect::DissolveRefused,
        },
    };

    tracing::debug!(%event, ?effect, "random event applied");
    effect
}

fn weaken(context: &mut BattleContext, target: Actor) -> EventEffect {
    if context.combatant_mut(target).decrease_extra_damage(1) {
        EventEffect::ExtraDamageDecreased { target }
    } else {
        EventEffect::NextAttackWeakened { target }
    }
}
