//! Spell and deity model of the game engine, as seen by the scripting layer.

pub mod character;
pub mod error;
pub mod formula;
pub mod god;
pub mod host;
pub mod names;
pub mod religion;
pub mod rng;
pub mod spell;

pub use character::{Character, CharacterSheet, Coord, Monster};
pub use error::SpellbookError;
pub use god::{str_to_god, God};
pub use host::{CastResult, SpellHost};
pub use spell::{spell_by_name, SpellData, SpellFlags, SpellSchools, SpellType};
