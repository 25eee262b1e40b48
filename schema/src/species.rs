use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Every kind of opponent the player can meet, bosses included.
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
pub enum Species {
    #[strum(to_string = "Plaque Monster")]
    PlaqueMonster,
    #[strum(to_string = "Holey Tooth")]
    HoleyTooth,
    #[strum(to_string = "Rotten Tooth")]
    RottenTooth,
    #[strum(to_string = "Chipped Tooth")]
    ChippedTooth,
    #[strum(to_string = "Sugarholic Teeth")]
    SugarholicTeeth,
    #[strum(to_string = "Candy Corn")]
    CandyCorn,
    #[strum(to_string = "L&P")]
    LAndP,
    #[strum(to_string = "Bottle of Coke")]
    BottleOfCoke,
}

impl Species {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
