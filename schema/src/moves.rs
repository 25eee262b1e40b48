use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Every ability that can be used in a battle.
///
/// The first block are the attacks opponents use against the player, the second
/// block is the player's equipment. Which block a move belongs to is decided by
/// the content tables, not by this enum, so the ordering here is only used for
/// stable map iteration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
pub enum Move {
    // Opponent attacks
    #[strum(to_string = "bad brushing schedule")]
    BadBrushingSchedule,
    #[strum(to_string = "bad breath")]
    BadBreath,
    #[strum(to_string = "plaque")]
    Plaque,
    #[strum(to_string = "candy corn")]
    CandyCorn,
    #[strum(to_string = "sugar")]
    Sugar,
    #[strum(to_string = "gum disease")]
    GumDisease,
    #[strum(to_string = "toffee")]
    Toffee,
    #[strum(to_string = "carbonation")]
    Carbonation,

    // Player equipment
    #[strum(to_string = "blended kale")]
    BlendedKale,
    #[strum(to_string = "scaler")]
    Scaler,
    #[strum(to_string = "dental floss")]
    DentalFloss,
    #[strum(to_string = "toothpaste")]
    Toothpaste,
    #[strum(to_string = "drill")]
    Drill,
    #[strum(to_string = "fluoridated water")]
    FluoridatedWater,
    #[strum(to_string = "dental pamphlet")]
    DentalPamphlet,
}

impl Move {
    /// The lowercase display name used in menus and battle text.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_names_are_lowercase_phrases() {
        assert_eq!(Move::FluoridatedWater.to_string(), "fluoridated water");
        assert_eq!(Move::BadBrushingSchedule.name(), "bad brushing schedule");
        assert!(Move::iter().all(|m| m.name() == m.name().to_lowercase()));
    }
}
