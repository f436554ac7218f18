use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::names::normalise_name;

/// Deities a character can worship. `NoGod` stands for no religion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum God {
    #[default]
    NoGod,
    Zin,
    TheShiningOne,
    Kikubaaqudgha,
    Yredelemnul,
    Xom,
    Vehumet,
    Okawaru,
    Makhleb,
    SifMuna,
    Trog,
    NemelexXobeh,
    Elyvilon,
    Lugonu,
    Beogh,
    Jiyva,
    Fedhas,
    Cheibriados,
    Ashenzari,
    Dithmenos,
    Gozag,
    Qazlal,
    Ru,
}

impl God {
    pub fn name(self) -> &'static str {
        match self {
            God::NoGod => "No God",
            God::Zin => "Zin",
            God::TheShiningOne => "The Shining One",
            God::Kikubaaqudgha => "Kikubaaqudgha",
            God::Yredelemnul => "Yredelemnul",
            God::Xom => "Xom",
            God::Vehumet => "Vehumet",
            God::Okawaru => "Okawaru",
            God::Makhleb => "Makhleb",
            God::SifMuna => "Sif Muna",
            God::Trog => "Trog",
            God::NemelexXobeh => "Nemelex Xobeh",
            God::Elyvilon => "Elyvilon",
            God::Lugonu => "Lugonu",
            God::Beogh => "Beogh",
            God::Jiyva => "Jiyva",
            God::Fedhas => "Fedhas",
            God::Cheibriados => "Cheibriados",
            God::Ashenzari => "Ashenzari",
            God::Dithmenos => "Dithmenos",
            God::Gozag => "Gozag",
            God::Qazlal => "Qazlal",
            God::Ru => "Ru",
        }
    }

    pub fn is_good(self) -> bool {
        matches!(self, God::Zin | God::TheShiningOne | God::Elyvilon)
    }
}

/// Resolve a god from its name; unknown names give `NoGod`.
pub fn str_to_god(name: &str) -> God {
    let wanted = normalise_name(name);
    God::iter()
        .filter(|g| *g != God::NoGod)
        .find(|g| normalise_name(g.name()) == wanted)
        .unwrap_or(God::NoGod)
}
