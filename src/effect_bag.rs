//! An ordered multiset of effectiveness labels, drawn from without replacement
//! when a new player character is created.

use crate::battle::state::BattleRng;
use crate::Effectiveness;
use schema::TraitRating;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectBag {
    labels: Vec<Effectiveness>,
}

impl EffectBag {
    pub fn new(labels: Vec<Effectiveness>) -> Self {
        Self { labels }
    }

    /// Builds the bag for `move_count` attacks, keeping the 2 high : 3 normal : 2 low
    /// ratio of the seven attack game.
    pub fn for_move_count(move_count: usize) -> Self {
        let extremes = ((2 * move_count + 3) / 7).min(move_count / 2);
        let normal = move_count - 2 * extremes;

        let mut labels = Vec::with_capacity(move_count);
        labels.extend(std::iter::repeat(Effectiveness::High).take(extremes));
        labels.extend(std::iter::repeat(Effectiveness::Normal).take(normal));
        labels.extend(std::iter::repeat(Effectiveness::Low).take(extremes));
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn count(&self, label: Effectiveness) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }

    /// Removes the first occurrence of `label`. Returns false if none was left.
    pub fn remove_first(&mut self, label: Effectiveness) -> bool {
        match self.labels.iter().position(|l| *l == label) {
            Some(index) => {
                self.labels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Draws any remaining label uniformly. `None` once the bag is empty.
    pub fn draw_random(&mut self, rng: &mut BattleRng) -> Option<Effectiveness> {
        if self.labels.is_empty() {
            return None;
        }
        let index = rng.index(self.labels.len(), "effect bag draw");
        Some(self.labels.remove(index))
    }

    /// Draws a label biased by a character trait.
    ///
    /// Good prefers `Low` (the player resists the attack) and Bad prefers `High`;
    /// either falls back to `Normal`, then to a random remaining label.
    /// Meh always draws at random.
    pub fn draw_for_trait(
        &mut self,
        rating: TraitRating,
        rng: &mut BattleRng,
    ) -> Option<Effectiveness> {
        let preferred = match rating {
            TraitRating::Good => Effectiveness::Low,
            TraitRating::Bad => Effectiveness::High,
            TraitRating::Meh => return self.draw_random(rng),
        };

        for label in [preferred, Effectiveness::Normal] {
            if self.remove_first(label) {
                return Some(label);
            }
        }
        self.draw_random(rng)
    }
}
